//! huffpress-core: byte-oriented Huffman compression
//!
//! This library turns an arbitrary byte buffer into an optimal prefix code
//! and a packed bitstream, and back:
//! - Counts byte frequencies
//! - Builds the Huffman tree with a min-heap merge
//! - Reads prefix-free codes off the tree
//! - Encodes bytes into a packed bitstream
//! - Decodes the bitstream by prefix matching
//!
//! # Architecture
//!
//! - `frequency`: byte histogram
//! - `tree`: arena-backed Huffman tree and deterministic heap merge
//! - `code_table`: codes per symbol, prefix-free checks
//! - `bitio`: packed bit storage with an exact bit length
//! - `encoder` / `decoder`: the two directions of the codec
//! - `codec`: whole-buffer compress, decompress and integrity checks
//! - `metrics`: sizes, ratio and timings of a run
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and carry a position
//! - **Stateless**: No global state; identical input gives identical output
//! - **Packed**: One physical bit per encoded bit
//!
//! # Example
//! ```
//! use huffpress_core::codec::{compress, decompress};
//!
//! let compressed = compress(b"aaabbc").unwrap();
//! assert_eq!(compressed.encoded_bits(), 9);
//! assert_eq!(decompress(&compressed).unwrap(), b"aaabbc");
//! ```

pub mod bitio;
pub mod code_table;
pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod metrics;
pub mod tree;

// Re-export commonly used types
pub use bitio::EncodedStream;
pub use code_table::{Code, CodeTable};
pub use codec::{compress, decompress, round_trip, verify_round_trip, Compressed, RoundTrip};
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use metrics::CompressionMetrics;
