//! Whole-buffer compress / decompress.
//!
//! These functions are pure: the same input always produces the same
//! table and stream, and nothing is remembered between calls. Callers that
//! want memoization keep their own cache keyed by content.
//!
//! # Integrity
//!
//! The raw decoder cannot tell a wrong parse from a right one when a
//! foreign stream happens to match codes. [`Compressed`] therefore records
//! the input length and CRC-32, and [`decompress`] rejects any output that
//! does not match them.

use std::time::Instant;

use tracing::{debug, info};

use crate::bitio::EncodedStream;
use crate::code_table::CodeTable;
use crate::decoder::decode;
use crate::encoder::encode;
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::metrics::CompressionMetrics;

/// Everything needed to reproduce an input: its code table, the encoded
/// bits, and the length and checksum the output must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compressed {
    pub table: CodeTable,
    pub stream: EncodedStream,
    pub original_len: usize,
    pub checksum: u32,
}

impl Compressed {
    /// Packed payload size in bytes.
    pub fn compressed_bytes(&self) -> usize {
        self.stream.byte_len()
    }

    pub fn encoded_bits(&self) -> usize {
        self.stream.bit_len()
    }
}

/// Outcome of compressing and decompressing one input.
#[derive(Debug, Clone)]
pub struct RoundTrip {
    pub compressed: Compressed,
    pub decoded: Vec<u8>,
    pub metrics: CompressionMetrics,
}

/// CRC-32 of `data`.
pub fn checksum(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// Build the optimal code table for `data` and encode it.
///
/// An empty input gives an empty table and an empty stream.
pub fn compress(data: &[u8]) -> Result<Compressed> {
    let frequencies = FrequencyTable::from_bytes(data);
    let table = CodeTable::from_frequencies(&frequencies)?;
    let stream = encode(data, &table)?;

    Ok(Compressed {
        table,
        stream,
        original_len: data.len(),
        checksum: checksum(data),
    })
}

/// Decode `compressed` and check the result against its recorded length
/// and checksum.
///
/// # Errors
/// - `HuffmanError::MalformedBitstream` if the stream does not parse
/// - `Error::RoundTripMismatch` if it parses into something else
pub fn decompress(compressed: &Compressed) -> Result<Vec<u8>> {
    let decoded = decode(&compressed.stream, &compressed.table)?;

    let actual_crc = checksum(&decoded);
    if decoded.len() != compressed.original_len || actual_crc != compressed.checksum {
        return Err(Error::RoundTripMismatch {
            expected_len: compressed.original_len,
            actual_len: decoded.len(),
            first_difference: None,
            expected_crc: compressed.checksum,
            actual_crc,
        });
    }

    Ok(decoded)
}

/// Fail unless `decoded` is byte-for-byte equal to `original`.
pub fn verify_round_trip(original: &[u8], decoded: &[u8]) -> Result<()> {
    if original == decoded {
        return Ok(());
    }

    let first_difference = original
        .iter()
        .zip(decoded)
        .position(|(a, b)| a != b)
        .or(Some(original.len().min(decoded.len())));

    Err(Error::RoundTripMismatch {
        expected_len: original.len(),
        actual_len: decoded.len(),
        first_difference,
        expected_crc: checksum(original),
        actual_crc: checksum(decoded),
    })
}

/// Compress, decompress, and verify `data`, timing both directions.
pub fn round_trip(data: &[u8]) -> Result<RoundTrip> {
    let mut metrics = CompressionMetrics::new();

    let started = Instant::now();
    let compressed = compress(data)?;
    metrics.compress_time = started.elapsed();

    let started = Instant::now();
    let decoded = decompress(&compressed)?;
    metrics.decompress_time = started.elapsed();

    verify_round_trip(data, &decoded)?;

    metrics.input_bytes = data.len() as u64;
    metrics.output_bytes = decoded.len() as u64;
    metrics.encoded_bits = compressed.encoded_bits() as u64;
    metrics.compressed_bytes = compressed.compressed_bytes() as u64;
    metrics.distinct_symbols = compressed.table.len();
    metrics.max_code_len = compressed.table.max_code_len();
    metrics.verified = true;

    debug!(checksum = compressed.checksum, "round trip verified");
    info!(
        input_bytes = metrics.input_bytes,
        compressed_bytes = metrics.compressed_bytes,
        savings_pct = metrics.space_savings_percent(),
        "compressed"
    );

    Ok(RoundTrip {
        compressed,
        decoded,
        metrics,
    })
}
