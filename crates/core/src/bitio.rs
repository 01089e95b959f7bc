//! Packed bit storage for encoded streams.
//!
//! An [`EncodedStream`] keeps one logical bit per physical bit: bytes are
//! filled MSB-first and the stream records its exact bit length, so the
//! final partial byte is never ambiguous.
//!
//! # Padding Rules
//! - BitWriter: fills the unused tail of the last byte with zeros
//! - BitReader: stops at the logical bit length and never reads padding
//!
//! # Example
//! ```
//! use huffpress_core::bitio::BitWriter;
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b11, 2).unwrap();
//!
//! let stream = writer.finish();
//! assert_eq!(stream.bit_len(), 5);
//! assert_eq!(stream.as_bytes(), &[0b1011_1000]);
//! assert_eq!(stream.to_string(), "10111");
//!
//! let mut reader = stream.reader();
//! assert!(reader.read_bit().unwrap());
//! assert!(!reader.read_bit().unwrap());
//! assert_eq!(reader.bits_remaining(), 3);
//! ```

use std::fmt;

use crate::error::{BitIoError, Result};

/// An ordered sequence of bits packed MSB-first into bytes.
///
/// # Invariants
/// - `bit_len <= bytes.len() * 8`
/// - `bytes.len() == bit_len.div_ceil(8)`
/// - padding bits past `bit_len` are zero
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EncodedStream {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl EncodedStream {
    /// An empty stream (what encoding an empty input produces).
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a stream from packed bytes and its logical bit length.
    ///
    /// Bytes beyond `bit_len.div_ceil(8)` are dropped and padding bits in
    /// the final byte are cleared.
    ///
    /// # Errors
    /// `BitIoError::LengthExceedsBuffer` if `bit_len` needs more bytes than
    /// were supplied.
    pub fn from_parts(mut bytes: Vec<u8>, bit_len: usize) -> Result<Self> {
        if bit_len > bytes.len() * 8 {
            return Err(BitIoError::LengthExceedsBuffer {
                bit_len,
                bytes: bytes.len(),
            }
            .into());
        }

        bytes.truncate(bit_len.div_ceil(8));
        let tail = bit_len % 8;
        if tail != 0 {
            if let Some(last) = bytes.last_mut() {
                *last &= 0xFFu8 << (8 - tail);
            }
        }

        Ok(Self { bytes, bit_len })
    }

    /// Packed bytes, including zero padding in the final byte.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Logical number of bits.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Number of packed bytes (`ceil(bit_len / 8)`).
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Bit at `index`, or `None` past the logical end.
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.bit_len {
            return None;
        }
        Some(self.bytes[index / 8] & (0x80 >> (index % 8)) != 0)
    }

    /// Reader positioned at the first bit.
    pub fn reader(&self) -> BitReader<'_> {
        BitReader::new(&self.bytes, self.bit_len)
    }

    /// Iterate over the logical bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bit_len).filter_map(move |i| self.get(i))
    }

    /// Split into packed bytes and bit length.
    pub fn into_parts(self) -> (Vec<u8>, usize) {
        (self.bytes, self.bit_len)
    }
}

/// Renders the stream as a string of `'0'` and `'1'` characters.
impl fmt::Display for EncodedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Writes bits MSB-first into a byte buffer.
///
/// Accumulates bits in a buffer and flushes complete bytes to the output.
///
/// # Invariants
/// - `bit_count` is always < 8
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    /// Create a new BitWriter with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer whose buffer can hold `bits` without reallocating.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            ..Self::default()
        }
    }

    /// Write the lowest `count` bits of `value`, most significant first.
    ///
    /// # Errors
    /// Returns `BitIoError::InvalidBitCount` if count > 64.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        let mut remaining = count;
        while remaining > 0 {
            let free = 8 - self.bit_count as usize;
            let take = remaining.min(free);

            // top `take` bits of what is left of the value
            let shift = remaining - take;
            let bits = ((value >> shift) & ((1u64 << take) - 1)) as u8;

            self.bit_buffer |= bits << (free - take);
            self.bit_count += take as u8;

            if self.bit_count == 8 {
                self.bytes.push(self.bit_buffer);
                self.bit_buffer = 0;
                self.bit_count = 0;
            }

            remaining -= take;
        }

        Ok(())
    }

    /// Return the total number of bits written (including partial byte).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }

    /// Finish writing and return the packed stream.
    pub fn finish(mut self) -> EncodedStream {
        let bit_len = self.bit_len();
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        EncodedStream {
            bytes: self.bytes,
            bit_len,
        }
    }
}

/// Reads bits MSB-first, bounded by a logical bit length.
///
/// # Invariants
/// - `bit_position <= bit_len <= data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_len: usize,
    bit_position: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader over the first `bit_len` bits of `data`.
    ///
    /// `bit_len` is clamped to the bits actually present.
    pub fn new(data: &'a [u8], bit_len: usize) -> Self {
        Self {
            data,
            bit_len: bit_len.min(data.len() * 8),
            bit_position: 0,
        }
    }

    /// Read a single bit.
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.bit_position >= self.bit_len {
            return Err(BitIoError::UnexpectedEof {
                position: self.bit_position,
            }
            .into());
        }
        let byte = self.data[self.bit_position / 8];
        let bit = byte & (0x80 >> (self.bit_position % 8)) != 0;
        self.bit_position += 1;
        Ok(bit)
    }

    pub fn bits_remaining(&self) -> usize {
        self.bit_len - self.bit_position
    }

    /// Index of the next bit to be read.
    pub fn position(&self) -> usize {
        self.bit_position
    }

    pub fn is_empty(&self) -> bool {
        self.bit_position >= self.bit_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn read_value(reader: &mut BitReader<'_>, count: usize) -> u64 {
        (0..count).fold(0, |acc, _| (acc << 1) | reader.read_bit().unwrap() as u64)
    }

    #[test]
    fn test_write_read_single_byte() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b10110011, 8).unwrap();

        let stream = writer.finish();
        assert_eq!(stream.as_bytes(), &[0b10110011]);
        assert_eq!(stream.bit_len(), 8);

        let mut reader = stream.reader();
        assert_eq!(read_value(&mut reader, 8), 0b10110011);
    }

    #[test]
    fn test_partial_byte_keeps_exact_length() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b1, 1).unwrap();

        let stream = writer.finish();
        assert_eq!(stream.as_bytes(), &[0b10000000]);
        assert_eq!(stream.bit_len(), 1);
        assert_eq!(stream.byte_len(), 1);

        // padding is not readable
        let mut reader = stream.reader();
        assert!(reader.read_bit().unwrap());
        assert!(matches!(
            reader.read_bit(),
            Err(Error::BitIo(BitIoError::UnexpectedEof { position: 1 }))
        ));
    }

    #[test]
    fn test_multi_byte() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b1010101111110000, 16).unwrap();

        let stream = writer.finish();
        assert_eq!(stream.as_bytes(), &[0b10101011, 0b11110000]);

        let mut reader = stream.reader();
        assert_eq!(read_value(&mut reader, 16), 0b1010101111110000);
    }

    #[test]
    fn test_64_bit_values() {
        let mut writer = BitWriter::new();
        writer.write_bits(1, 1).unwrap();
        let val = 0x123456789ABCDEF0u64;
        writer.write_bits(val, 64).unwrap();

        let stream = writer.finish();
        assert_eq!(stream.bit_len(), 65);
        let mut reader = stream.reader();
        assert!(reader.read_bit().unwrap());
        assert_eq!(read_value(&mut reader, 64), val);
    }

    #[test]
    fn test_invalid_bit_count() {
        let mut writer = BitWriter::new();
        assert!(matches!(
            writer.write_bits(0, 65),
            Err(Error::BitIo(BitIoError::InvalidBitCount(65)))
        ));
    }

    #[test]
    fn test_bit_by_bit_matches_display() {
        let mut writer = BitWriter::new();
        for &bit in &[true, false, true, true, false, false, true, false, true] {
            writer.write_bits(bit as u64, 1).unwrap();
        }

        let stream = writer.finish();
        assert_eq!(stream.as_bytes(), &[0b10110010, 0b10000000]);
        assert_eq!(stream.to_string(), "101100101");
        assert_eq!(stream.iter().filter(|b| *b).count(), 5);
    }

    #[test]
    fn test_bits_remaining() {
        let stream = EncodedStream::from_parts(vec![0xFF, 0xFF], 13).unwrap();
        let mut reader = stream.reader();

        assert_eq!(reader.bits_remaining(), 13);
        read_value(&mut reader, 5);
        assert_eq!(reader.bits_remaining(), 8);
        assert_eq!(reader.position(), 5);
        read_value(&mut reader, 8);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_from_parts_clears_padding() {
        let stream = EncodedStream::from_parts(vec![0xFF, 0xFF, 0xFF], 10).unwrap();
        assert_eq!(stream.as_bytes(), &[0xFF, 0b11000000]);
        assert_eq!(stream.get(9), Some(true));
        assert_eq!(stream.get(10), None);
    }

    #[test]
    fn test_from_parts_rejects_short_buffer() {
        assert!(matches!(
            EncodedStream::from_parts(vec![0x00], 9),
            Err(Error::BitIo(BitIoError::LengthExceedsBuffer { bit_len: 9, bytes: 1 }))
        ));
    }

    #[test]
    fn test_empty_stream() {
        let stream = BitWriter::new().finish();
        assert!(stream.is_empty());
        assert_eq!(stream, EncodedStream::new());
        assert_eq!(stream.to_string(), "");
        assert!(stream.reader().is_empty());
    }
}
