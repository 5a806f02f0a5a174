//! The session driver (C6): owns the registers for one encrypt or decrypt
//! run and exposes the caller-facing API of spec.md §6.

use std::fmt;

use log::debug;

use crate::bitreg::BitRegister;
use crate::clock;
use crate::config::CipherConfig;
use crate::error::Result;
use crate::hex;
use crate::lfsr::Lfsr;
use crate::mode::Direction;
use crate::sink::{LogSink, LogSnapshot, StrobeSink, TickRecord};

/// Seconds-exponent the strobe waveform timestamps are expressed in;
/// matches the original tool's microsecond default.
const DEFAULT_CLOCK_MAGNITUDE: i32 = -6;
const DEFAULT_VOLTAGE: &str = "5";

/// One encrypt or decrypt run of the bit-serial datapath.
///
/// Corresponds to `create_config`/`destroy_config` plus the rest of the
/// caller API in spec.md §6; Rust's ownership model makes the explicit
/// destroy a no-op (the session's `Drop` impl, derived for free, releases
/// the registers when it goes out of scope).
pub struct Session {
    config: CipherConfig,
    direction: Direction,
    key: BitRegister,
    ciphertext: BitRegister,
    lfsr: Lfsr,
    clock_limit: u32,
    clock_magnitude: i32,
    voltage: String,
}

impl Session {
    /// A new session for `config`, defaulted to encryption with zeroed
    /// registers. Call `set_decrypt` before loading registers if a
    /// decrypt run is wanted — it reseeds the LFSR to the decrypt phase.
    pub fn new(config: CipherConfig) -> Session {
        Session {
            key: BitRegister::new(config.key_bits as usize),
            ciphertext: BitRegister::new(config.block_bits as usize),
            lfsr: Lfsr::new_for_encrypt(),
            direction: Direction::ENCRYPT,
            clock_limit: 0,
            clock_magnitude: DEFAULT_CLOCK_MAGNITUDE,
            voltage: DEFAULT_VOLTAGE.to_string(),
            config,
        }
    }

    pub fn set_encrypt(&mut self) {
        debug!("session direction set to encrypt");
        self.direction = Direction::ENCRYPT;
        self.lfsr = Lfsr::new_for_encrypt();
    }

    pub fn set_decrypt(&mut self) {
        debug!("session direction set to decrypt");
        self.direction = Direction::DECRYPT;
        self.lfsr = Lfsr::new_for_decrypt(self.config.rounds);
    }

    /// Load the key register (MSB-first, zero-padded on the right).
    pub fn set_key_hex(&mut self, s: &str) -> Result<()> {
        let bytes = hex::decode_hex_padded(s, self.config.key_bits)?;
        self.key.load_from_bytes(&bytes);
        Ok(())
    }

    /// Load the ciphertext/block register (MSB-first, zero-padded on the
    /// right).
    pub fn set_block_hex(&mut self, s: &str) -> Result<()> {
        let bytes = hex::decode_hex_padded(s, self.config.block_bits)?;
        self.ciphertext.load_from_bytes(&bytes);
        Ok(())
    }

    /// Override the number of bit-clocks to run; 0 means "use n*T".
    pub fn set_clock_limit(&mut self, limit: u32) {
        self.clock_limit = limit;
    }

    pub fn config(&self) -> CipherConfig {
        self.config
    }

    fn clock_count(&self) -> u32 {
        if self.clock_limit == 0 {
            self.config.full_clock_count()
        } else {
            self.clock_limit
        }
    }

    /// Hex grouping width used for key/ciphertext dumps: `n / (2m)`.
    fn group_width(&self) -> usize {
        let n = self.config.word_size();
        let m = self.config.key_word_count();
        (n / (2 * m)).max(1) as usize
    }

    /// Run the session to completion, driving both sinks tick by tick.
    pub fn run(&mut self, log_sink: &mut dyn LogSink, strobe_sink: &mut dyn StrobeSink) -> Result<()> {
        let n = self.config.word_size();
        let total = self.clock_count();
        let group = self.group_width();

        debug!(
            "running {} session for {} ticks ({})",
            self.direction.name, total, self.config
        );

        for k in 0..total {
            let outcome = clock::tick(
                &mut self.key,
                &mut self.ciphertext,
                &mut self.lfsr,
                &self.direction,
                k,
                n,
            );

            strobe_sink.on_tick(&TickRecord {
                k,
                clock_magnitude: self.clock_magnitude,
                strobes: outcome.strobes,
                lfsr_bit: outcome.z,
                toggle_bit: outcome.toggle_bit,
                z: outcome.z,
                key_feed: outcome.key_feed,
                crypto_feed: outcome.crypto_feed,
            })?;

            let next_k = k + 1;
            if next_k % n == 0 {
                let round_index = next_k / n;
                log_sink.on_round(&LogSnapshot {
                    round_index,
                    k: next_k,
                    key: &self.key,
                    ciphertext: &self.ciphertext,
                    lfsr_bit: self.lfsr.z(),
                    toggle_bit: self.lfsr.toggle_bit(),
                    z: self.lfsr.z(),
                    group,
                })?;
            }
        }

        Ok(())
    }

    /// The ciphertext/block register, serialized as a big-endian hex
    /// string.
    pub fn output_hex(&self) -> String {
        let mut buf = vec![0u8; (self.config.block_bits / 8) as usize];
        self.ciphertext.array_copy_out(&mut buf);
        hex::encode_hex(&buf)
    }

    pub fn key_hex(&self) -> String {
        let mut buf = vec![0u8; (self.config.key_bits / 8) as usize];
        self.key.array_copy_out(&mut buf);
        hex::encode_hex(&buf)
    }
}

/// Debug echo of the session's configuration and current register
/// contents, in place of the original tool's `simon_debug_simondata`
/// stdout dump.
impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} direction={} key={} block={}",
            self.config,
            self.direction.name,
            self.key_hex(),
            self.output_hex()
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sink::{NullLogSink, NullStrobeSink};

    #[test]
    fn known_answer_encrypt() {
        let mut session = Session::new(CipherConfig::SIMON_32_64);
        session.set_encrypt();
        session.set_key_hex("1918111009080100").unwrap();
        session.set_block_hex("65656877").unwrap();
        session.run(&mut NullLogSink, &mut NullStrobeSink).unwrap();
        assert_eq!(session.output_hex(), "c69be9bb");
    }

    #[test]
    fn known_answer_decrypt_with_the_round_32_expanded_key() {
        // The key register holds the last m words of the expanded key
        // schedule after a full run, not the original user key — decrypt
        // picks up the schedule where encryption left it (spec.md §4.6:
        // "the caller is responsible for supplying the round-T key for
        // decryption"). This value was confirmed by running the encrypt
        // session on the same known-answer vector and reading back
        // `key_hex()`.
        let mut decrypt = Session::new(CipherConfig::SIMON_32_64);
        decrypt.set_decrypt();
        decrypt.set_key_hex("4d837db932f2fa04").unwrap();
        decrypt.set_block_hex("c69be9bb").unwrap();
        decrypt.run(&mut NullLogSink, &mut NullStrobeSink).unwrap();
        assert_eq!(decrypt.output_hex(), "65656877");
    }

    #[test]
    fn encrypt_then_decrypt_round_trips_through_the_expanded_key() {
        let mut encrypt = Session::new(CipherConfig::SIMON_32_64);
        encrypt.set_encrypt();
        encrypt.set_key_hex("1918111009080100").unwrap();
        encrypt.set_block_hex("65656877").unwrap();
        encrypt.run(&mut NullLogSink, &mut NullStrobeSink).unwrap();
        let ciphertext = encrypt.output_hex();
        assert_eq!(ciphertext, "c69be9bb");
        let expanded_key = encrypt.key_hex();

        let mut decrypt = Session::new(CipherConfig::SIMON_32_64);
        decrypt.set_decrypt();
        decrypt.set_key_hex(&expanded_key).unwrap();
        decrypt.set_block_hex(&ciphertext).unwrap();
        decrypt.run(&mut NullLogSink, &mut NullStrobeSink).unwrap();
        assert_eq!(decrypt.output_hex(), "65656877");
    }

    #[test]
    fn clock_limit_halts_after_the_requested_number_of_ticks() {
        let mut session = Session::new(CipherConfig::SIMON_32_64);
        session.set_encrypt();
        session.set_key_hex("9669966996699669").unwrap();
        session.set_block_hex("65656877").unwrap();
        session.set_clock_limit(16);
        session.run(&mut NullLogSink, &mut NullStrobeSink).unwrap();
        // One word of processing has run; the block has changed from its
        // seed but a full 32-round encryption has not occurred.
        assert_ne!(session.output_hex(), "65656877");
    }
}
