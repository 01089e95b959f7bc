//! Bitstream to byte sequence.
//!
//! Decoding grows a bit buffer one bit at a time and looks it up in the
//! reverse table (code -> symbol). Because the table is prefix-free, the
//! first match is the only possible one, so no lookahead or backtracking is
//! needed. A buffer that outgrows the longest code can never match and is
//! reported immediately instead of being extended forever.

use std::collections::HashMap;

use tracing::debug;

use crate::bitio::EncodedStream;
use crate::code_table::{Code, CodeTable};
use crate::error::{HuffmanError, Result};

/// Reverse lookup built once from a [`CodeTable`] and reusable across
/// streams encoded with that table.
#[derive(Debug, Clone)]
pub struct Decoder {
    symbols: HashMap<Code, u8>,
    max_code_len: usize,
}

impl Decoder {
    pub fn new(table: &CodeTable) -> Self {
        Self {
            symbols: table.iter().map(|(symbol, code)| (code, symbol)).collect(),
            max_code_len: table.max_code_len(),
        }
    }

    /// Decode every bit of `stream`.
    ///
    /// # Errors
    /// `HuffmanError::MalformedBitstream` when the buffered bits exceed the
    /// longest code without matching, or when the stream ends in the middle
    /// of a code. `position` is the bit offset where the unresolved code
    /// began.
    pub fn decode(&self, stream: &EncodedStream) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        let mut reader = stream.reader();

        let mut pending = 0u64;
        let mut pending_len = 0usize;
        let mut code_start = 0usize;

        while !reader.is_empty() {
            let bit = reader.read_bit()?;
            pending = (pending << 1) | bit as u64;
            pending_len += 1;

            if pending_len > self.max_code_len {
                return Err(HuffmanError::MalformedBitstream {
                    position: code_start,
                    pending_bits: pending_len,
                }
                .into());
            }

            let symbol = Code::new(pending, pending_len).and_then(|code| self.symbols.get(&code));
            if let Some(&symbol) = symbol {
                output.push(symbol);
                pending = 0;
                pending_len = 0;
                code_start = reader.position();
            }
        }

        if pending_len > 0 {
            return Err(HuffmanError::MalformedBitstream {
                position: code_start,
                pending_bits: pending_len,
            }
            .into());
        }

        debug!(encoded_bits = stream.bit_len(), output_bytes = output.len(), "decoded");
        Ok(output)
    }
}

/// Decode `stream` with `table`.
///
/// For any `data`, `decode(&encode(data, &t)?, &t)? == data` when `t` was
/// built from `data`'s frequencies.
pub fn decode(stream: &EncodedStream, table: &CodeTable) -> Result<Vec<u8>> {
    Decoder::new(table).decode(stream)
}
