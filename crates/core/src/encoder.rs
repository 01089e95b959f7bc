//! Byte sequence to bitstream.

use tracing::debug;

use crate::bitio::{BitWriter, EncodedStream};
use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};

/// Concatenate the code of every byte in `data`, in order.
///
/// The resulting stream is exactly `table.weighted_cost(freq(data))` bits
/// long; nothing is padded or prefixed.
///
/// # Errors
/// `HuffmanError::UnknownSymbol` for the first byte that has no code in
/// `table`. Bytes are never skipped or substituted.
pub fn encode(data: &[u8], table: &CodeTable) -> Result<EncodedStream> {
    let mut writer = BitWriter::with_capacity(data.len() * 8);

    for (position, &symbol) in data.iter().enumerate() {
        let code = table
            .get(symbol)
            .ok_or(HuffmanError::UnknownSymbol { symbol, position })?;
        writer.write_bits(code.bits(), code.len())?;
    }

    let stream = writer.finish();
    debug!(input_bytes = data.len(), encoded_bits = stream.bit_len(), "encoded");
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::frequency::FrequencyTable;

    fn table_for(data: &[u8]) -> CodeTable {
        CodeTable::from_frequencies(&FrequencyTable::from_bytes(data)).unwrap()
    }

    #[test]
    fn test_encode_aaabbc() {
        let table = table_for(b"aaabbc");
        let stream = encode(b"aaabbc", &table).unwrap();
        // a=0 b=11 c=10
        assert_eq!(stream.to_string(), "000111110");
        assert_eq!(stream.bit_len(), 9);
        assert_eq!(stream.byte_len(), 2);
    }

    #[test]
    fn test_single_symbol_one_bit_each() {
        let table = table_for(b"AAAA");
        let stream = encode(b"AAAA", &table).unwrap();
        assert_eq!(stream.to_string(), "0000");
        assert_eq!(stream.bit_len(), 4);
    }

    #[test]
    fn test_empty_input() {
        let stream = encode(b"", &CodeTable::new()).unwrap();
        assert!(stream.is_empty());
        assert_eq!(stream.byte_len(), 0);
    }

    #[test]
    fn test_length_equals_weighted_cost() {
        let data = b"mississippi river banks";
        let freqs = FrequencyTable::from_bytes(data);
        let table = CodeTable::from_frequencies(&freqs).unwrap();
        let stream = encode(data, &table).unwrap();
        assert_eq!(stream.bit_len() as u64, table.weighted_cost(&freqs));
    }

    #[test]
    fn test_unknown_symbol_reports_position() {
        let table = table_for(b"abc");
        let result = encode(b"abcabd", &table);
        assert!(matches!(
            result,
            Err(Error::Huffman(HuffmanError::UnknownSymbol { symbol: b'd', position: 5 }))
        ));
    }
}
