use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use argparse::{ArgumentParser, Print, Store, StoreTrue};
use log::error;
use simonwire::config::CipherConfig;
use simonwire::session::Session;
use simonwire::sink::{LatexLogSink, LogSink, NullLogSink, NullStrobeSink, PlainTextLogSink, PwlStrobeSink, StrobeSink};

fn main() {
    env_logger::init();

    let mut encrypt = false;
    let mut decrypt = false;
    let mut key_hex = String::new();
    let mut block_hex = String::new();
    let mut clock_limit: u32 = 0;
    let mut log_path = String::new();
    let mut latex_log = false;
    let mut strobe_dir = String::new();
    {
        let mut arg_parser = ArgumentParser::new();
        arg_parser.set_description("Bit-serial SIMON 32/64 hardware simulator");
        arg_parser.add_option(
            &["-v", "--version"],
            Print(format!("simonwire version: v{}", env!("CARGO_PKG_VERSION"))),
            "Show current version of the program",
        );
        arg_parser.refer(&mut encrypt).add_option(
            &["-e", "--encrypt"],
            StoreTrue,
            "Run an encryption session (default)",
        );
        arg_parser.refer(&mut decrypt).add_option(
            &["-d", "--decrypt"],
            StoreTrue,
            "Run a decryption session",
        );
        arg_parser.refer(&mut key_hex).add_option(
            &["-k", "--key"],
            Store,
            "Key register contents, as hex (zero-padded on the right if short)",
        );
        arg_parser.refer(&mut block_hex).add_option(
            &["-b", "--block"],
            Store,
            "Block/ciphertext register contents, as hex",
        );
        arg_parser.refer(&mut clock_limit).add_option(
            &["--clock-limit"],
            Store,
            "Override the number of bit-clocks to run (0 = full n*T)",
        );
        arg_parser.refer(&mut log_path).add_option(
            &["--log"],
            Store,
            "Write a per-round snapshot log to this path",
        );
        arg_parser.refer(&mut latex_log).add_option(
            &["--latex-log"],
            StoreTrue,
            "Format the snapshot log as a LaTeX multirow/cline block",
        );
        arg_parser.refer(&mut strobe_dir).add_option(
            &["--strobes"],
            Store,
            "Write the twelve PWL waveform files into this directory",
        );
        arg_parser.parse_args_or_exit();
    }

    if encrypt && decrypt {
        eprintln!("simonwire: --encrypt and --decrypt are mutually exclusive");
        std::process::exit(1);
    }
    if key_hex.is_empty() || block_hex.is_empty() {
        eprintln!("simonwire: --key and --block are required");
        std::process::exit(1);
    }

    let config = CipherConfig::SIMON_32_64;
    let mut session = Session::new(config);
    if decrypt {
        session.set_decrypt();
    } else {
        session.set_encrypt();
    }

    if let Err(err) = session.set_key_hex(&key_hex) {
        eprintln!("simonwire: {err}");
        std::process::exit(1);
    }
    if let Err(err) = session.set_block_hex(&block_hex) {
        eprintln!("simonwire: {err}");
        std::process::exit(1);
    }
    session.set_clock_limit(clock_limit);

    let mut null_log = NullLogSink;
    let mut null_strobes = NullStrobeSink;
    let mut owned_log_sink: Option<Box<dyn LogSink>> = None;
    if !log_path.is_empty() {
        match File::create(PathBuf::from(&log_path)) {
            Ok(file) => {
                let log_file = BufWriter::new(file);
                owned_log_sink = Some(if latex_log {
                    Box::new(LatexLogSink::new(log_file)) as Box<dyn LogSink>
                } else {
                    Box::new(PlainTextLogSink::new(log_file)) as Box<dyn LogSink>
                });
            }
            Err(err) => {
                error!("could not open log file {log_path}: {err}");
                std::process::exit(1);
            }
        }
    }

    let mut owned_strobe_sink: Option<Box<dyn StrobeSink>> = None;
    if !strobe_dir.is_empty() {
        match PwlStrobeSink::create_in_dir(&strobe_dir, "5") {
            Ok(sink) => owned_strobe_sink = Some(Box::new(sink)),
            Err(err) => {
                error!("could not open strobe directory {strobe_dir}: {err}");
                std::process::exit(1);
            }
        }
    }

    let log_sink: &mut dyn LogSink = owned_log_sink.as_deref_mut().unwrap_or(&mut null_log);
    let strobe_sink: &mut dyn StrobeSink = owned_strobe_sink.as_deref_mut().unwrap_or(&mut null_strobes);

    if let Err(err) = session.run(log_sink, strobe_sink) {
        eprintln!("simonwire: {err}");
        std::process::exit(1);
    }

    println!("{}", session.output_hex());
}
