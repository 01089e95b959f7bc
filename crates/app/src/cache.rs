//! Content-keyed memoization of codec runs.
//!
//! The codec itself is a pure function, so identical input always yields an
//! identical result. This cache lets a session pay for each unique input at
//! most once. It is owned by the caller; nothing here is global.
//!
//! Entries are bucketed by `(length, crc32)` and confirmed by comparing the
//! full content, so a checksum collision can never return another input's
//! result.

use std::collections::HashMap;
use std::sync::Arc;

use huffpress_core::codec::{self, RoundTrip};
use huffpress_core::Result;
use tracing::debug;

#[derive(Debug)]
struct Entry {
    input: Vec<u8>,
    run: Arc<RoundTrip>,
}

/// Cache from input bytes to their verified round trip.
#[derive(Debug, Default)]
pub struct CodecCache {
    buckets: HashMap<(usize, u32), Vec<Entry>>,
    hits: u64,
    misses: u64,
}

impl CodecCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached run for `data`, running the codec on a miss.
    ///
    /// Failed runs are not cached.
    pub fn get_or_run(&mut self, data: &[u8]) -> Result<Arc<RoundTrip>> {
        let key = (data.len(), codec::checksum(data));

        if let Some(entry) = self
            .buckets
            .get(&key)
            .and_then(|bucket| bucket.iter().find(|e| e.input == data))
        {
            self.hits += 1;
            debug!(len = key.0, crc = key.1, "codec cache hit");
            return Ok(Arc::clone(&entry.run));
        }

        self.misses += 1;
        debug!(len = key.0, crc = key.1, "codec cache miss");

        let run = Arc::new(codec::round_trip(data)?);
        self.buckets.entry(key).or_default().push(Entry {
            input: data.to_vec(),
            run: Arc::clone(&run),
        });
        Ok(run)
    }

    /// Number of distinct inputs cached.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_once_per_content() {
        let mut cache = CodecCache::new();

        let first = cache.get_or_run(b"aaabbc").unwrap();
        let second = cache.get_or_run(b"aaabbc").unwrap();
        let third = cache.get_or_run(&b"xaaabbc"[1..]).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &third));
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_inputs_get_distinct_entries() {
        let mut cache = CodecCache::new();

        let a = cache.get_or_run(b"abab").unwrap();
        let b = cache.get_or_run(b"baba").unwrap();

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a.decoded, b"abab");
        assert_eq!(b.decoded, b"baba");
        assert_eq!(cache.misses(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_empty_input_is_cached() {
        let mut cache = CodecCache::new();
        let run = cache.get_or_run(b"").unwrap();
        assert!(run.decoded.is_empty());
        cache.get_or_run(b"").unwrap();
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.len(), 1);
    }
}
