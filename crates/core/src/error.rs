//! Error types for the huffpress codec.
//!
//! Every failure is reported as a structured value carrying enough context
//! (offending symbol, bit position, lengths) to diagnose it. Nothing here is
//! transient, so callers should never retry.

use thiserror::Error;

/// Top-level error type for all codec operations.
///
/// Each variant corresponds to a specific failure domain:
/// - Bit I/O: reading bits past the logical end of a stream
/// - Huffman: table construction, encode, or decode failures
/// - Round trip: decoded bytes differ from what was compressed
/// - I/O and configuration: surfaced by callers driving the codec
#[derive(Debug, Error)]
pub enum Error {
    /// Bit I/O operation failed (e.g., reading past end of stream)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Huffman codec error (unknown symbol, malformed bitstream, ...)
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Decoded output does not reproduce the original input.
    ///
    /// The decoder cannot see the original, so this is raised by whoever
    /// holds both sides (see `codec::verify_round_trip`).
    #[error(
        "round-trip mismatch: expected {} bytes (crc {:#010x}), got {} bytes (crc {:#010x}){}",
        .expected_len,
        .expected_crc,
        .actual_len,
        .actual_crc,
        .first_difference.map(|at| format!(", first difference at byte {at}")).unwrap_or_default()
    )]
    RoundTripMismatch {
        expected_len: usize,
        actual_len: usize,
        first_difference: Option<usize>,
        expected_crc: u32,
        actual_crc: u32,
    },

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Bit-level I/O errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitIoError {
    /// Attempted to read past the logical end of the stream
    #[error("unexpected end of bit stream at bit {position}")]
    UnexpectedEof { position: usize },

    /// Invalid bit count (more than 64 bits in one call)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),

    /// Logical bit length does not fit in the supplied bytes
    #[error("bit length {bit_len} exceeds capacity of {bytes} bytes")]
    LengthExceedsBuffer { bit_len: usize, bytes: usize },
}

/// Huffman codec errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HuffmanError {
    /// Input byte has no entry in the code table it is being encoded with
    #[error("symbol {symbol:#04x} at byte {position} has no code in the table")]
    UnknownSymbol { symbol: u8, position: usize },

    /// Bitstream does not parse against the code table
    ///
    /// `position` is the bit offset where the unresolved code started;
    /// `pending_bits` is how many bits were buffered without a match.
    #[error("malformed bitstream: {pending_bits} unresolved bits starting at bit {position}")]
    MalformedBitstream { position: usize, pending_bits: usize },

    /// A code would exceed the 64-bit maximum
    #[error("code length {length} exceeds maximum 64")]
    CodeLengthTooLong { length: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
