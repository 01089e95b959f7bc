//! Compression statistics.
//!
//! Captures what a caller wants to show after a run: sizes on both sides,
//! how well the data compressed, and how long each direction took.
//!
//! # Thread Safety
//!
//! `CompressionMetrics` is plain data. Share it behind an `Arc` once filled.

use std::time::Duration;

/// Sizes, ratio inputs and timings for one compress/decompress run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompressionMetrics {
    // === Sizes ===
    /// Bytes handed to the encoder
    pub input_bytes: u64,

    /// Bytes produced by the decoder
    pub output_bytes: u64,

    /// Logical length of the encoded stream
    pub encoded_bits: u64,

    /// Packed size of the encoded stream (`ceil(encoded_bits / 8)`)
    pub compressed_bytes: u64,

    // === Code table ===
    /// Symbols present in the input
    pub distinct_symbols: usize,

    /// Longest code assigned
    pub max_code_len: usize,

    // === Timing ===
    pub compress_time: Duration,
    pub decompress_time: Duration,

    /// Whether the decoded bytes were checked against the input
    pub verified: bool,
}

impl CompressionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compressed / raw. Returns 0.0 if nothing was compressed.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.compressed_bytes as f64 / self.input_bytes as f64
        }
    }

    /// Size reduction in percent: `100 × (1 − compressed / max(1, raw))`.
    pub fn space_savings_percent(&self) -> f64 {
        100.0 * (1.0 - self.compressed_bytes as f64 / self.input_bytes.max(1) as f64)
    }

    /// Average code length actually spent per input byte.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.encoded_bits as f64 / self.input_bytes as f64
        }
    }

    /// Encoder throughput in bytes/second.
    pub fn compress_throughput_bps(&self) -> f64 {
        let secs = self.compress_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.input_bytes as f64 / secs
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Compression Summary ===");
        println!("Original size:   {} bytes ({:.2} KiB)", self.input_bytes, self.input_bytes as f64 / 1024.0);
        println!(
            "Compressed size: {} bytes ({} bits, {:.3} bits/byte)",
            self.compressed_bytes,
            self.encoded_bits,
            self.bits_per_symbol()
        );
        println!("Reduction:       {:.2}%", self.space_savings_percent());
        println!("Ratio:           {:.1}%", self.compression_ratio() * 100.0);
        println!();

        println!("=== Code Table ===");
        println!("Distinct symbols: {}", self.distinct_symbols);
        println!("Longest code:     {} bits", self.max_code_len);
        println!();

        println!("=== Timing ===");
        println!("Compression:   {:.3} s", self.compress_time.as_secs_f64());
        println!("Decompression: {:.3} s", self.decompress_time.as_secs_f64());
        println!("Throughput:    {:.2} MB/s", self.compress_throughput_bps() / 1_000_000.0);
        println!();
    }

    /// Print just the final result (pass/fail).
    pub fn print_result(&self) {
        if self.verified && self.input_bytes == self.output_bytes {
            println!("✓ Round trip verified");
            println!("  {} bytes -> {} bytes", self.input_bytes, self.compressed_bytes);
        } else if !self.verified {
            println!("✗ Round trip not verified");
        } else {
            println!("✗ Round trip failed: size mismatch ({} != {})", self.input_bytes, self.output_bytes);
        }
    }

    /// Export metrics as `key=value` lines (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "input_bytes={}\n\
             output_bytes={}\n\
             encoded_bits={}\n\
             compressed_bytes={}\n\
             distinct_symbols={}\n\
             max_code_len={}\n\
             compression_ratio={:.4}\n\
             space_savings_percent={:.2}\n\
             compress_ms={}\n\
             decompress_ms={}\n\
             verified={}\n",
            self.input_bytes,
            self.output_bytes,
            self.encoded_bits,
            self.compressed_bytes,
            self.distinct_symbols,
            self.max_code_len,
            self.compression_ratio(),
            self.space_savings_percent(),
            self.compress_time.as_millis(),
            self.decompress_time.as_millis(),
            self.verified,
        )
    }
}
