//! The master clock sequencer (C5).
//!
//! One bit-clock tick, in the mandated order: compute the mux strobes from
//! `k mod n`, compute the key feedback bit, compute the ciphertext feedback
//! bit, step the LFSR if this is a word boundary, then shift both
//! registers. The order matters: strobes and feedback bits are
//! combinational functions of the pre-shift state, and the LFSR's reduced
//! clock domain rises at the start of a word, before that word's first
//! shift.

use crate::lfsr::Lfsr;
use crate::bitreg::BitRegister;
use crate::mode::{Direction, KeyBitSource};
use crate::mux::Strobes;

/// Everything a single tick computed, for the sink and for the session
/// driver's word-boundary bookkeeping.
#[derive(Debug, Copy, Clone)]
pub struct TickOutcome {
    pub strobes: Strobes,
    pub z: u8,
    pub toggle_bit: u8,
    pub key_feed: u8,
    pub crypto_feed: u8,
    /// True if this tick was a word boundary and the LFSR stepped.
    pub stepped_lfsr: bool,
}

/// Run one bit-clock tick, mutating `key`, `ciphertext`, and `lfsr` in
/// place. `k` is the tick index about to run; `n` is the word size.
pub fn tick(
    key: &mut BitRegister,
    ciphertext: &mut BitRegister,
    lfsr: &mut Lfsr,
    direction: &Direction,
    k: u32,
    n: u32,
) -> TickOutcome {
    let c = k % n;
    let strobes = (direction.strobes)(c, n);
    let z = lfsr.z();
    let toggle_bit = lfsr.toggle_bit();

    let key_feed = (direction.key_feedback)(key, strobes, z, n);

    let key_bit_for_crypto = match direction.key_bit_source {
        KeyBitSource::PreShiftBitZero => key.get_bit(0),
        KeyBitSource::JustComputedFeedBit => key_feed,
    };
    let crypto_feed = (direction.ciphertext_feedback)(ciphertext, strobes, key_bit_for_crypto);

    let stepped_lfsr = k % n == 0;
    if stepped_lfsr {
        (direction.lfsr_step)(lfsr);
    }

    (direction.shift)(key, key_feed);
    (direction.shift)(ciphertext, crypto_feed);

    TickOutcome {
        strobes,
        z,
        toggle_bit,
        key_feed,
        crypto_feed,
        stepped_lfsr,
    }
}
