//! The XOR feedback network.
//!
//! Four pure functions compute the next feed bit for the key register and
//! the ciphertext register, one pair per direction. Each reads only the
//! current register contents, the current mux strobes, and (for the key
//! feedback) the current z bit — nothing here mutates a register; the
//! clock sequencer (C5) owns the shift.
//!
//! Tap indices are specific to m=4 (SIMON 32/64's four key words); a wider
//! key schedule would need its own key-feedback variant, per spec.md §1's
//! Non-goals.

use crate::bitreg::BitRegister;
use crate::mux::Strobes;

/// Ciphertext feed bit for encryption. `key_out` is bit 0 of the key
/// register *before* it shifts this tick.
pub fn ciphertext_feedback_encrypt(c: &BitRegister, s: Strobes, key_out: u8) -> u8 {
    let msb = c.msb_index();
    let high = (c.width() / 2) - 1;
    let n1 = if s.cm0 == 0 { c.get_bit(msb) } else { c.get_bit(high) };
    let n2 = if s.cm1 == 0 { c.get_bit(msb - 1) } else { c.get_bit(high - 1) };
    let n8 = if s.cm8 == 0 { c.get_bit(msb - 7) } else { c.get_bit(high - 7) };
    key_out ^ c.get_bit(0) ^ (n1 & n8) ^ n2
}

/// Ciphertext feed bit for decryption. `key_bit` is the key feed bit just
/// computed this tick by `key_feedback_decrypt`, not bit 0 of the
/// (pre-shift) key register — decrypt consumes the key "as produced"
/// rather than "as stored".
pub fn ciphertext_feedback_decrypt(c: &BitRegister, s: Strobes, key_bit: u8) -> u8 {
    let msb = c.msb_index();
    let high = (c.width() / 2) - 1;
    let n1 = if s.cm0 == 0 { c.get_bit(msb - 1) } else { c.get_bit(high - 1) };
    let n2 = if s.cm1 == 0 { c.get_bit(msb - 2) } else { c.get_bit(high - 2) };
    let n8 = if s.cm8 == 0 { c.get_bit(msb - 8) } else { c.get_bit(high - 8) };
    let x0 = c.get_bit(msb);
    key_bit ^ x0 ^ (n1 & n8) ^ n2
}

/// Key feed bit for encryption, m=4. `n` is the word size.
pub fn key_feedback_encrypt(k: &BitRegister, s: Strobes, z: u8, n: u32) -> u8 {
    let n = n as usize;
    let i3a = if s.km3 == 0 { k.get_bit(3 * n + 3) } else { k.get_bit(2 * n + 3) };
    let i4a = if s.km4 == 0 { k.get_bit(3 * n + 4) } else { k.get_bit(2 * n + 4) };
    let b1 = if s.km1 == 0 { k.get_bit(n + 1) } else { k.get_bit(1) };

    let b3 = i3a ^ k.get_bit(n);
    let b4 = i4a ^ b1;

    let k0 = k.get_bit(0);
    let k_s = (!k0) & 1;

    let kz = if s.cm0 == 0 { z ^ 1 } else { 1 };
    if s.cm1 == 0 {
        k_s ^ b3 ^ b4 ^ kz
    } else {
        k_s ^ b3 ^ b4
    }
}

/// Key feed bit for decryption, m=4. `n` is the word size.
pub fn key_feedback_decrypt(k: &BitRegister, s: Strobes, z: u8, n: u32) -> u8 {
    let n = n as usize;
    let i2a = if s.km3 == 0 { k.get_bit(3 * n + 2) } else { k.get_bit(2 * n + 2) };
    let i3a = if s.km4 == 0 { k.get_bit(3 * n + 3) } else { k.get_bit(2 * n + 3) };
    let b0 = if s.km1 == 0 { k.get_bit(n) } else { k.get_bit(0) };

    let b3 = i3a ^ b0;
    let b2 = i2a ^ k.get_bit(n - 1);

    let kmsb = k.get_bit(k.msb_index());

    let kz = if s.cm0 == 0 { z ^ 1 } else { 1 };
    let raw = if s.cm1 == 0 {
        kmsb ^ b2 ^ b3 ^ kz
    } else {
        kmsb ^ b2 ^ b3
    };
    (!raw) & 1
}
