use std::num::NonZeroUsize;

use lru::LruCache;

const TIMESTAMP_CACHE_SIZE: usize = 512;

/// Block-number to timestamp cache. Timestamps of mined blocks are
/// immutable, so entries never expire; only LRU capacity bounds the map.
pub struct TimestampCache {
    timestamps: LruCache<u64, u64>,
}

impl TimestampCache {
    pub fn new() -> Self {
        Self {
            timestamps: LruCache::new(NonZeroUsize::new(TIMESTAMP_CACHE_SIZE).unwrap()),
        }
    }

    pub fn get(&mut self, number: u64) -> Option<u64> {
        self.timestamps.get(&number).copied()
    }

    pub fn put(&mut self, number: u64, timestamp: u64) {
        self.timestamps.put(number, timestamp);
    }

    /// Evict everything. Used when the chain changes underneath us.
    pub fn clear(&mut self) {
        self.timestamps.clear();
    }
}

impl Default for TimestampCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let mut cache = TimestampCache::new();
        cache.put(100, 1_700_000_000);
        assert_eq!(cache.get(100), Some(1_700_000_000));
    }

    #[test]
    fn test_get_missing() {
        let mut cache = TimestampCache::new();
        assert!(cache.get(999).is_none());
    }

    #[test]
    fn test_clear() {
        let mut cache = TimestampCache::new();
        cache.put(1, 10);
        cache.clear();
        assert!(cache.get(1).is_none());
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = TimestampCache::new();
        for i in 0..=TIMESTAMP_CACHE_SIZE as u64 {
            cache.put(i, i * 12);
        }
        // The oldest entry should have been evicted.
        assert!(cache.get(0).is_none());
        assert!(cache.get(TIMESTAMP_CACHE_SIZE as u64).is_some());
    }
}
