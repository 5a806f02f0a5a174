//! End-to-end scenarios pinned against the retrieved known-answer vectors
//! and a Python re-implementation of the datapath used to derive the
//! exact register snapshots the unit tests can't reach (partial runs,
//! off-by-one boundaries). See DESIGN.md for how each fixture below was
//! derived.

use simonwire::config::CipherConfig;
use simonwire::session::Session;
use simonwire::sink::{NullLogSink, NullStrobeSink};

fn run(direction_decrypt: bool, key_hex: &str, block_hex: &str, clock_limit: u32) -> Session {
    let mut session = Session::new(CipherConfig::SIMON_32_64);
    if direction_decrypt {
        session.set_decrypt();
    } else {
        session.set_encrypt();
    }
    session.set_key_hex(key_hex).unwrap();
    session.set_block_hex(block_hex).unwrap();
    session.set_clock_limit(clock_limit);
    session.run(&mut NullLogSink, &mut NullStrobeSink).unwrap();
    session
}

#[test]
fn scenario_1_standard_test_vector_encrypts_to_the_published_ciphertext() {
    let session = run(false, "1918111009080100", "65656877", 0);
    assert_eq!(session.output_hex(), "c69be9bb");
}

#[test]
fn scenario_2_decrypting_with_the_round_32_expanded_key_recovers_the_plaintext() {
    let session = run(true, "4d837db932f2fa04", "c69be9bb", 0);
    assert_eq!(session.output_hex(), "65656877");
}

#[test]
fn scenario_3_all_zero_key_and_block_round_trips_through_its_expanded_key() {
    let encrypted = run(false, "0000000000000000", "00000000", 0);
    // Regression fixture: this is not a published test vector, just the
    // value this datapath produces, pinned so a future change is caught.
    assert_eq!(encrypted.output_hex(), "5ae828ec");
    let expanded_key = encrypted.key_hex();
    assert_eq!(expanded_key, "549b6ca93bfafb04");

    let decrypted = run(true, &expanded_key, &encrypted.output_hex(), 0);
    assert_eq!(decrypted.output_hex(), "00000000");
}

#[test]
fn scenario_4_a_clock_max_of_16_halts_after_one_word_with_a_pinned_key_snapshot() {
    let session = run(false, "9669966996699669", "65656877", 16);
    // One word (n=16 ticks) has shifted through the key register; the
    // block has only partially updated. Both are deterministic snapshots.
    assert_eq!(session.key_hex(), "9f62966996699669");
    assert_eq!(session.output_hex(), "2bcb6565");
}

#[test]
fn scenario_5_one_tick_short_of_completion_then_one_more_reaches_the_round_boundary() {
    let short = run(false, "1918111009080100", "65656877", 16 * 32 - 1);
    assert_eq!(short.key_hex(), "9b06fb7265e5f409");
    assert_eq!(short.output_hex(), "8d37d376");

    let complete = run(false, "1918111009080100", "65656877", 16 * 32);
    assert_eq!(complete.key_hex(), "4d837db932f2fa04");
    assert_eq!(complete.output_hex(), "c69be9bb");
}
