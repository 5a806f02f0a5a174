//! Crate-wide error and result types.

use thiserror::Error;

/// Result alias used throughout simonwire.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors the simulator can report to a caller.
///
/// Bit-index bounds errors are not part of this enum: per the core's
/// contract, an out-of-range register index is a programmer bug, not a
/// recoverable condition, and is reported via `debug_assert!` instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested block/key width is not the supported SIMON 32/64
    /// parameterization.
    #[error("unsupported block/key width: block_bits={block_bits}, key_bits={key_bits} (only 32/64 is implemented)")]
    UnsupportedWidth { block_bits: u32, key_bits: u32 },

    /// A non-hex character was found while decoding a hex input string.
    #[error("invalid hex character {ch:?} at position {position}")]
    InvalidHexChar { ch: char, position: usize },

    /// The input string is too long to load into the target register, even
    /// after truncation is considered (reserved for inputs that cannot be
    /// safely truncated).
    #[error("input too large: got {provided} hex characters, max {max}")]
    OversizedInput { provided: usize, max: usize },

    /// A log or strobe sink reported a fatal I/O failure; the session was
    /// aborted at the current tick boundary and its output discarded.
    #[error("sink I/O failure: {0}")]
    SinkIo(#[from] std::io::Error),
}
