//! Cipher configuration: the SIMON parameter set the datapath is wired for.

use std::fmt;

use crate::error::{Error, Result};
use crate::hex::next_valid_width;

/// The SIMON 32/64 parameterization, and structural room for the others
/// named in Table 3.1 of the NSA specification. Only 32/64 is wired up;
/// see `CipherConfig::new` for the rejection of everything else (spec.md
/// §9 Open Questions, resolved as option (a): reject at the API).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CipherConfig {
    /// Block size in bits (2n).
    pub block_bits: u32,
    /// Key size in bits (m*n).
    pub key_bits: u32,
    /// Number of rounds.
    pub rounds: u32,
    /// Z-sequence index.
    pub z_index: u32,
}

impl CipherConfig {
    /// The only parameterization this simulator implements.
    pub const SIMON_32_64: CipherConfig = CipherConfig {
        block_bits: 32,
        key_bits: 64,
        rounds: 32,
        z_index: 0,
    };

    /// Construct a configuration for the given block/key widths, rounding
    /// each up to the next valid SIMON width first. Returns an error if the
    /// rounded widths are not the supported 32/64 parameterization.
    pub fn new(block_bits: u32, key_bits: u32) -> Result<CipherConfig> {
        let mut config = CipherConfig::SIMON_32_64;
        config.set_block_bits(block_bits)?;
        config.set_key_bits(key_bits)?;
        Ok(config)
    }

    /// Round `block_bits` to the next valid SIMON block width and set it,
    /// re-validating against the currently set key width. Independent of
    /// `set_key_bits` and callable in either order, mirroring
    /// `simon_set_blocksize`.
    pub fn set_block_bits(&mut self, block_bits: u32) -> Result<()> {
        let block_bits = next_valid_width(block_bits, 32, 128);
        if block_bits != 32 || self.key_bits != 64 {
            return Err(Error::UnsupportedWidth { block_bits, key_bits: self.key_bits });
        }
        self.block_bits = block_bits;
        Ok(())
    }

    /// Round `key_bits` to the next valid SIMON key width and set it,
    /// re-validating against the currently set block width. Independent of
    /// `set_block_bits` and callable in either order, mirroring
    /// `simon_set_keysize`.
    pub fn set_key_bits(&mut self, key_bits: u32) -> Result<()> {
        let key_bits = next_valid_width(key_bits, 64, 256);
        if self.block_bits != 32 || key_bits != 64 {
            return Err(Error::UnsupportedWidth { block_bits: self.block_bits, key_bits });
        }
        self.key_bits = key_bits;
        Ok(())
    }

    /// Word size `n` (half the block width).
    pub fn word_size(&self) -> u32 {
        self.block_bits / 2
    }

    /// Number of key words `m`.
    pub fn key_word_count(&self) -> u32 {
        self.key_bits / self.word_size()
    }

    /// Number of bit-clocks in a complete session (`n * T`).
    pub fn full_clock_count(&self) -> u32 {
        self.word_size() * self.rounds
    }
}

impl Default for CipherConfig {
    fn default() -> Self {
        CipherConfig::SIMON_32_64
    }
}

impl fmt::Display for CipherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SIMON {}/{} (n={}, m={}, T={}, Z={})",
            self.block_bits,
            self.key_bits,
            self.word_size(),
            self.key_word_count(),
            self.rounds,
            self.z_index
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accepts_32_64() {
        let cfg = CipherConfig::new(32, 64).unwrap();
        assert_eq!(cfg.word_size(), 16);
        assert_eq!(cfg.key_word_count(), 4);
        assert_eq!(cfg.full_clock_count(), 512);
    }

    #[test]
    fn rounds_up_to_next_width() {
        let cfg = CipherConfig::new(30, 50).unwrap();
        assert_eq!(cfg.block_bits, 32);
        assert_eq!(cfg.key_bits, 64);
    }

    #[test]
    fn rejects_other_parameterizations() {
        let err = CipherConfig::new(48, 72).unwrap_err();
        assert!(matches!(err, Error::UnsupportedWidth { .. }));
    }

    #[test]
    fn block_and_key_width_can_be_set_independently_in_either_order() {
        let mut cfg = CipherConfig::SIMON_32_64;
        cfg.set_key_bits(50).unwrap();
        cfg.set_block_bits(30).unwrap();
        assert_eq!(cfg.block_bits, 32);
        assert_eq!(cfg.key_bits, 64);
    }

    #[test]
    fn set_block_bits_rejects_a_width_outside_32_64() {
        let mut cfg = CipherConfig::SIMON_32_64;
        let err = cfg.set_block_bits(48).unwrap_err();
        assert!(matches!(err, Error::UnsupportedWidth { .. }));
    }
}
