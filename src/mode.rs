//! Mode as data, not control-flow duplication.
//!
//! Encryption and decryption share the same sequencer structure but differ
//! in shift direction, LFSR traversal, tap offsets, and which key bit the
//! ciphertext feedback consumes. Rather than branch on a mode flag deep
//! inside the sequencer, each direction is captured once here as a small
//! table of pure functions, and `clock::tick` is written against the table
//! instead of against encrypt/decrypt specifically.

use crate::bitreg::BitRegister;
use crate::feedback;
use crate::lfsr::Lfsr;
use crate::mux::{self, Strobes};

/// Which key bit the ciphertext feedback consumes this tick.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyBitSource {
    /// Bit 0 of the key register, read before the key register shifts
    /// (encrypt).
    PreShiftBitZero,
    /// The key feed bit just computed this tick, before it is shifted in
    /// (decrypt).
    JustComputedFeedBit,
}

/// The direction-specific behavior of one bit-clock tick.
pub struct Direction {
    pub name: &'static str,
    pub strobes: fn(u32, u32) -> Strobes,
    pub key_feedback: fn(&BitRegister, Strobes, u8, u32) -> u8,
    pub ciphertext_feedback: fn(&BitRegister, Strobes, u8) -> u8,
    pub shift: fn(&mut BitRegister, u8),
    pub lfsr_step: fn(&mut Lfsr),
    pub key_bit_source: KeyBitSource,
}

impl Direction {
    pub const ENCRYPT: Direction = Direction {
        name: "encrypt",
        strobes: mux::encrypt_strobes,
        key_feedback: feedback::key_feedback_encrypt,
        ciphertext_feedback: feedback::ciphertext_feedback_encrypt,
        shift: BitRegister::shift_right_insert_msb,
        lfsr_step: Lfsr::step_encrypt,
        key_bit_source: KeyBitSource::PreShiftBitZero,
    };

    pub const DECRYPT: Direction = Direction {
        name: "decrypt",
        strobes: mux::decrypt_strobes,
        key_feedback: feedback::key_feedback_decrypt,
        ciphertext_feedback: feedback::ciphertext_feedback_decrypt,
        shift: BitRegister::insert_bit_at_lsb,
        lfsr_step: Lfsr::step_decrypt,
        key_bit_source: KeyBitSource::JustComputedFeedBit,
    };
}
