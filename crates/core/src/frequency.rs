//! Byte frequency analysis.

/// Occurrence count for each byte value.
///
/// Backed by a fixed 256-entry histogram; iteration only reports symbols
/// that actually occur, in ascending symbol order.
///
/// # Invariants
/// - `total()` equals the length of the input the table was built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    /// Count every byte in `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        for &byte in data {
            counts[byte as usize] += 1;
        }
        Self { counts }
    }

    /// Build a table from an existing histogram.
    pub fn from_counts(counts: [u64; 256]) -> Self {
        Self { counts }
    }

    /// Count for `symbol` (zero when absent).
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of distinct symbols present.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Present symbols and their counts, ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        (0..=u8::MAX)
            .map(|symbol| (symbol, self.counts[symbol as usize]))
            .filter(|&(_, count)| count > 0)
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self { counts: [0; 256] }
    }
}

impl From<&[u8]> for FrequencyTable {
    fn from(data: &[u8]) -> Self {
        Self::from_bytes(data)
    }
}
