//! Prefix-free code assignment.
//!
//! Codes are read off the tree with an explicit work stack: a left edge
//! appends `0`, a right edge appends `1`, and each leaf records the path
//! that reached it. A tree that is a single leaf assigns that symbol `0`.

use std::fmt;

use tracing::debug;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node};

/// Longest code the table can hold.
pub const MAX_CODE_LEN: usize = 64;

/// A non-empty bit string of at most [`MAX_CODE_LEN`] bits.
///
/// Stored right-aligned in `bits`; the first bit of the code is bit
/// `len - 1` of `bits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code {
    bits: u64,
    len: u8,
}

impl Code {
    /// Build a code from its right-aligned bits and length.
    ///
    /// Returns `None` for a zero length or one above [`MAX_CODE_LEN`].
    /// Bits above `len` are discarded.
    pub fn new(bits: u64, len: usize) -> Option<Self> {
        if len == 0 || len > MAX_CODE_LEN {
            return None;
        }
        let mask = if len == 64 { u64::MAX } else { (1u64 << len) - 1 };
        Some(Self {
            bits: bits & mask,
            len: len as u8,
        })
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false; codes have at least one bit.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && other.bits >> (other.len - self.len) == self.bits
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.len).rev() {
            f.write_str(if (self.bits >> i) & 1 == 1 { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Mapping from byte value to its prefix-free code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; 256],
}

impl CodeTable {
    /// Empty table (what an empty input produces).
    pub fn new() -> Self {
        Self { codes: [None; 256] }
    }

    /// Build the optimal table for `frequencies`.
    ///
    /// An empty frequency table yields an empty code table.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        match HuffmanTree::build(frequencies) {
            Some(tree) => Self::from_tree(&tree),
            None => Ok(Self::new()),
        }
    }

    /// Assign codes by walking `tree` depth-first.
    ///
    /// # Errors
    /// `HuffmanError::CodeLengthTooLong` if any leaf is deeper than
    /// [`MAX_CODE_LEN`].
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut table = Self::new();

        if let Node::Leaf { symbol, .. } = *tree.node(tree.root()) {
            table.codes[symbol as usize] = Code::new(0, 1);
            return Ok(table);
        }

        // (node, accumulated bits, depth)
        let mut stack = vec![(tree.root(), 0u64, 0usize)];
        while let Some((id, bits, depth)) = stack.pop() {
            match *tree.node(id) {
                Node::Leaf { symbol, .. } => {
                    table.codes[symbol as usize] = Code::new(bits, depth);
                }
                Node::Internal { left, right, .. } => {
                    if depth == MAX_CODE_LEN {
                        return Err(HuffmanError::CodeLengthTooLong { length: depth + 1 }.into());
                    }
                    stack.push((right, (bits << 1) | 1, depth + 1));
                    stack.push((left, bits << 1, depth + 1));
                }
            }
        }

        debug!(symbols = table.len(), max_code_len = table.max_code_len(), "generated code table");
        Ok(table)
    }

    /// Code for `symbol`, if it has one.
    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(Option::is_none)
    }

    /// Symbols and their codes, ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        (0..=u8::MAX).filter_map(|symbol| self.codes[symbol as usize].map(|code| (symbol, code)))
    }

    /// Length of the longest code, or 0 for an empty table.
    pub fn max_code_len(&self) -> usize {
        self.iter().map(|(_, code)| code.len()).max().unwrap_or(0)
    }

    /// Σ frequency(s) × len(code(s)) over the symbols in `frequencies`.
    ///
    /// Symbols without a code contribute nothing.
    pub fn weighted_cost(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|code| count * code.len() as u64))
            .sum()
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::new()
    }
}

/// One `symbol: code` line per entry, printable symbols shown as characters.
impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, code) in self.iter() {
            if symbol.is_ascii_graphic() {
                writeln!(f, "{:#04x} '{}'  {}", symbol, symbol as char, code)?;
            } else {
                writeln!(f, "{:#04x}      {}", symbol, code)?;
            }
        }
        Ok(())
    }
}
