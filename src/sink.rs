//! The strobe/log sink interface (C7).
//!
//! At each tick the sink is offered the six mux strobes plus the LFSR,
//! toggle, z, and feed bits; at each word boundary it is offered a
//! snapshot of the full register state. A null sink is always a valid
//! choice — the simulation never depends on a sink being attached.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::bitreg::BitRegister;
use crate::mux::Strobes;

/// Everything observable on a single bit-clock tick.
#[derive(Debug, Clone, Copy)]
pub struct TickRecord {
    pub k: u32,
    pub clock_magnitude: i32,
    pub strobes: Strobes,
    pub lfsr_bit: u8,
    pub toggle_bit: u8,
    pub z: u8,
    pub key_feed: u8,
    pub crypto_feed: u8,
}

/// The full register state at a word boundary, plus the round index the
/// original tool logs separately from the raw bit-clock (spec.md §4.8).
pub struct LogSnapshot<'a> {
    pub round_index: u32,
    pub k: u32,
    pub key: &'a BitRegister,
    pub ciphertext: &'a BitRegister,
    pub lfsr_bit: u8,
    pub toggle_bit: u8,
    pub z: u8,
    /// Hex grouping size for key/ciphertext dumps: `n / (2m)`.
    pub group: usize,
}

pub trait StrobeSink {
    fn on_tick(&mut self, tick: &TickRecord) -> io::Result<()>;
}

pub trait LogSink {
    fn on_round(&mut self, snapshot: &LogSnapshot) -> io::Result<()>;
}

/// Discards everything. The default when no sink is attached.
#[derive(Debug, Default)]
pub struct NullStrobeSink;

impl StrobeSink for NullStrobeSink {
    fn on_tick(&mut self, _tick: &TickRecord) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct NullLogSink;

impl LogSink for NullLogSink {
    fn on_round(&mut self, _snapshot: &LogSnapshot) -> io::Result<()> {
        Ok(())
    }
}

/// Plain-text log sink: a three-line block per round (spec.md §6).
pub struct PlainTextLogSink<W: Write> {
    writer: W,
}

impl<W: Write> PlainTextLogSink<W> {
    pub fn new(writer: W) -> Self {
        PlainTextLogSink { writer }
    }
}

impl<W: Write> LogSink for PlainTextLogSink<W> {
    fn on_round(&mut self, snapshot: &LogSnapshot) -> io::Result<()> {
        writeln!(
            self.writer,
            "z[{:02}] LFSR:{} toggle:{} Z: {}",
            snapshot.round_index, snapshot.lfsr_bit, snapshot.toggle_bit, snapshot.z
        )?;
        writeln!(
            self.writer,
            "k[{:02}] {}",
            snapshot.round_index,
            snapshot.key.dump_hex(Some(snapshot.group))
        )?;
        writeln!(
            self.writer,
            "c[{:02}] {}",
            snapshot.round_index,
            snapshot.ciphertext.dump_hex(Some(snapshot.group))
        )
    }
}

/// LaTeX log sink: a multirow/cline block equivalent to the plain form.
pub struct LatexLogSink<W: Write> {
    writer: W,
}

impl<W: Write> LatexLogSink<W> {
    pub fn new(writer: W) -> Self {
        LatexLogSink { writer }
    }
}

impl<W: Write> LogSink for LatexLogSink<W> {
    fn on_round(&mut self, snapshot: &LogSnapshot) -> io::Result<()> {
        writeln!(self.writer, "\\hline")?;
        writeln!(
            self.writer,
            "\\multirow{{2}}{{*}}{{{:02}}} &\\multirow{{2}}{{*}}{{{}}} & key&{}\\\\",
            snapshot.round_index,
            snapshot.z,
            snapshot.key.dump_hex(Some(snapshot.group))
        )?;
        writeln!(self.writer, "\\cline{{3-4}}")?;
        writeln!(
            self.writer,
            "& & block &{}\\\\",
            snapshot.ciphertext.dump_hex(Some(snapshot.group))
        )
    }
}

/// One row of a piecewise-linear waveform: `t_value t_exp value`.
fn pwl_row(out: &mut impl Write, k: u32, frac: &str, exp: i32, value: &str) -> io::Result<()> {
    writeln!(out, "{k}.{frac}e{exp} {value}")
}

/// Emits the generic two-row-per-tick pattern shared by every non-clock
/// strobe signal: low at `.0e`, held through `.99e`.
fn pwl_signal(out: &mut impl Write, k: u32, exp: i32, bit: u8, voltage: &str) -> io::Result<()> {
    let v = if bit != 0 { voltage } else { "0" };
    pwl_row(out, k, "0", exp, v)?;
    pwl_row(out, k, "99", exp, v)
}

/// Emits the twelve named `.pwl` waveform files the original tool wrote
/// (`clock.pwl`, `lfsr.pwl`, `toggle.pwl`, `z.pwl`, `key_bit.pwl`,
/// `key_mux{1,3,4}.pwl`, `crypto_bit.pwl`, `crypto_mux{0,1,8}.pwl`) into a
/// directory.
pub struct PwlStrobeSink {
    voltage: String,
    clock: Box<dyn Write>,
    lfsr: Box<dyn Write>,
    toggle: Box<dyn Write>,
    z: Box<dyn Write>,
    key_bit: Box<dyn Write>,
    key_mux1: Box<dyn Write>,
    key_mux3: Box<dyn Write>,
    key_mux4: Box<dyn Write>,
    crypto_bit: Box<dyn Write>,
    crypto_mux0: Box<dyn Write>,
    crypto_mux1: Box<dyn Write>,
    crypto_mux8: Box<dyn Write>,
}

impl PwlStrobeSink {
    pub fn create_in_dir(dir: impl AsRef<Path>, voltage: impl Into<String>) -> io::Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let open = |name: &str| -> io::Result<Box<dyn Write>> {
            Ok(Box::new(File::create(dir.join(name))?))
        };
        Ok(PwlStrobeSink {
            voltage: voltage.into(),
            clock: open("clock.pwl")?,
            lfsr: open("lfsr.pwl")?,
            toggle: open("toggle.pwl")?,
            z: open("z.pwl")?,
            key_bit: open("key_bit.pwl")?,
            key_mux1: open("key_mux1.pwl")?,
            key_mux3: open("key_mux3.pwl")?,
            key_mux4: open("key_mux4.pwl")?,
            crypto_bit: open("crypto_bit.pwl")?,
            crypto_mux0: open("crypto_mux0.pwl")?,
            crypto_mux1: open("crypto_mux1.pwl")?,
            crypto_mux8: open("crypto_mux8.pwl")?,
        })
    }
}

impl StrobeSink for PwlStrobeSink {
    fn on_tick(&mut self, tick: &TickRecord) -> io::Result<()> {
        let k = tick.k;
        let exp = tick.clock_magnitude;
        let v = self.voltage.as_str();

        // The clock strobe gets a mid-tick rising edge in addition to the
        // generic 2-row pattern: low through .49e, high from .5e.
        pwl_row(&mut self.clock, k, "0", exp, "0")?;
        pwl_row(&mut self.clock, k, "49", exp, "0")?;
        pwl_row(&mut self.clock, k, "5", exp, v)?;
        pwl_row(&mut self.clock, k, "99", exp, v)?;

        pwl_signal(&mut self.lfsr, k, exp, tick.lfsr_bit, v)?;
        pwl_signal(&mut self.toggle, k, exp, tick.toggle_bit, v)?;
        pwl_signal(&mut self.z, k, exp, tick.z, v)?;

        pwl_signal(&mut self.key_bit, k, exp, tick.key_feed, v)?;
        pwl_signal(&mut self.key_mux1, k, exp, tick.strobes.km1, v)?;
        pwl_signal(&mut self.key_mux3, k, exp, tick.strobes.km3, v)?;
        pwl_signal(&mut self.key_mux4, k, exp, tick.strobes.km4, v)?;

        pwl_signal(&mut self.crypto_bit, k, exp, tick.crypto_feed, v)?;
        pwl_signal(&mut self.crypto_mux0, k, exp, tick.strobes.cm0, v)?;
        pwl_signal(&mut self.crypto_mux1, k, exp, tick.strobes.cm1, v)?;
        pwl_signal(&mut self.crypto_mux8, k, exp, tick.strobes.cm8, v)
    }
}

/// In-memory counting sink used to pin the row-count invariant (spec.md
/// §8 scenario 6) without touching the filesystem.
#[derive(Default)]
pub struct CountingStrobeSink {
    pub rows_per_signal: [u32; 12],
}

impl StrobeSink for CountingStrobeSink {
    fn on_tick(&mut self, _tick: &TickRecord) -> io::Result<()> {
        self.rows_per_signal[0] += 4; // clock
        for slot in &mut self.rows_per_signal[1..] {
            *slot += 2;
        }
        Ok(())
    }
}
