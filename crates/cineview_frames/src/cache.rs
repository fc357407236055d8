// SPDX-License-Identifier: MIT OR Apache-2.0
//! Decoded-frame cache.
//!
//! Bounded both by frame count and by bytes; eviction is least recently
//! used, driven by a logical access counter rather than wall-clock time.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A cacheable decoded frame
///
/// The cache only needs to know how much memory a frame occupies.
pub trait FramePayload {
    /// Approximate size of the decoded frame in bytes
    fn byte_size(&self) -> usize;
}

/// Cache limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached frames
    pub max_frames: usize,
    /// Maximum total bytes of cached frames
    pub max_bytes: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_frames: 256,
            max_bytes: 512 * 1024 * 1024,
        }
    }
}

/// Hit/miss statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups that found a frame
    pub hits: u64,
    /// Lookups that did not
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of lookups that hit; 0 when there were none
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 0.0;
        }
        self.hits as f64 / total as f64
    }
}

struct Entry<T> {
    payload: T,
    bytes: usize,
    last_access: u64,
}

/// LRU cache of decoded frames keyed by frame index
pub struct FrameCache<T> {
    config: CacheConfig,
    entries: HashMap<usize, Entry<T>>,
    memory_usage: usize,
    access_counter: u64,
    stats: CacheStats,
}

impl<T: FramePayload> FrameCache<T> {
    /// Create a cache with the given limits
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
            memory_usage: 0,
            access_counter: 0,
            stats: CacheStats::default(),
        }
    }

    /// Insert a decoded frame, evicting older frames to stay within limits
    ///
    /// A frame larger than the whole byte budget is refused.
    pub fn insert(&mut self, index: usize, payload: T) {
        let bytes = payload.byte_size();
        if bytes > self.config.max_bytes {
            tracing::trace!(index, bytes, "frame not cached: exceeds byte budget");
            return;
        }

        // Replacing an existing entry releases its bytes first.
        if let Some(old) = self.entries.remove(&index) {
            self.memory_usage -= old.bytes;
        }

        while self.entries.len() >= self.config.max_frames
            || self.memory_usage + bytes > self.config.max_bytes
        {
            if !self.evict_lru() {
                break;
            }
        }

        self.access_counter += 1;
        self.entries.insert(
            index,
            Entry {
                payload,
                bytes,
                last_access: self.access_counter,
            },
        );
        self.memory_usage += bytes;
    }

    /// Look up a frame, refreshing its recency
    pub fn get(&mut self, index: usize) -> Option<&T> {
        self.access_counter += 1;
        let counter = self.access_counter;
        match self.entries.get_mut(&index) {
            Some(entry) => {
                entry.last_access = counter;
                self.stats.hits += 1;
                Some(&entry.payload)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Is the frame resident? Does not affect recency or stats
    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    /// Remove a single frame
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let entry = self.entries.remove(&index)?;
        self.memory_usage -= entry.bytes;
        Some(entry.payload)
    }

    /// Drop all frames and reset statistics
    pub fn clear(&mut self) {
        self.entries.clear();
        self.memory_usage = 0;
        self.access_counter = 0;
        self.stats = CacheStats::default();
    }

    /// Number of resident frames
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the cache empty?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total bytes of resident frames
    pub fn memory_usage(&self) -> usize {
        self.memory_usage
    }

    /// Hit/miss statistics
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// The configured limits
    pub fn config(&self) -> CacheConfig {
        self.config
    }

    /// Indices of resident frames, sorted ascending
    pub fn available_frames(&self) -> Vec<usize> {
        let mut frames: Vec<usize> = self.entries.keys().copied().collect();
        frames.sort_unstable();
        frames
    }

    fn evict_lru(&mut self) -> bool {
        let lru = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.last_access)
            .map(|(index, _)| *index);

        match lru {
            Some(index) => {
                tracing::trace!(index, "evicting least recently used frame");
                self.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestFrame(usize);

    impl FramePayload for TestFrame {
        fn byte_size(&self) -> usize {
            self.0
        }
    }

    fn small_cache(max_frames: usize, max_bytes: usize) -> FrameCache<TestFrame> {
        FrameCache::new(CacheConfig {
            max_frames,
            max_bytes,
        })
    }

    #[test]
    fn test_insert_and_get() {
        let mut cache = small_cache(4, 1000);
        cache.insert(0, TestFrame(100));
        cache.insert(1, TestFrame(100));

        assert!(cache.get(0).is_some());
        assert!(cache.get(5).is_none());
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.memory_usage(), 200);
    }

    #[test]
    fn test_frame_limit_evicts_lru() {
        let mut cache = small_cache(2, 1000);
        cache.insert(0, TestFrame(10));
        cache.insert(1, TestFrame(10));

        // Touch frame 0 so frame 1 is the LRU.
        cache.get(0);
        cache.insert(2, TestFrame(10));

        assert_eq!(cache.len(), 2);
        assert!(cache.contains(0));
        assert!(!cache.contains(1));
        assert!(cache.contains(2));
    }

    #[test]
    fn test_byte_budget_enforced() {
        let mut cache = small_cache(10, 250);
        cache.insert(0, TestFrame(100));
        cache.insert(1, TestFrame(100));
        cache.insert(2, TestFrame(100));

        assert!(cache.memory_usage() <= 250);
        assert!(!cache.contains(0));
        assert!(cache.contains(2));
    }

    #[test]
    fn test_oversized_frame_refused() {
        let mut cache = small_cache(10, 100);
        cache.insert(0, TestFrame(101));
        assert!(cache.is_empty());
        assert_eq!(cache.memory_usage(), 0);
    }

    #[test]
    fn test_replace_updates_memory() {
        let mut cache = small_cache(4, 1000);
        cache.insert(0, TestFrame(100));
        cache.insert(0, TestFrame(300));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.memory_usage(), 300);
    }

    #[test]
    fn test_hit_ratio() {
        let mut cache = small_cache(4, 1000);
        cache.insert(0, TestFrame(10));

        cache.get(0);
        cache.get(0);
        cache.get(1);

        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_ratio() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_clear_resets_stats() {
        let mut cache = small_cache(4, 1000);
        cache.insert(0, TestFrame(10));
        cache.get(0);
        cache.get(9);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.memory_usage(), 0);
        assert_eq!(cache.stats(), CacheStats::default());
        assert_eq!(cache.stats().hit_ratio(), 0.0);
    }

    #[test]
    fn test_available_frames_sorted() {
        let mut cache = small_cache(8, 1000);
        cache.insert(5, TestFrame(1));
        cache.insert(1, TestFrame(1));
        cache.insert(3, TestFrame(1));

        assert_eq!(cache.available_frames(), vec![1, 3, 5]);
    }

    #[test]
    fn test_config_round_trip() {
        let config = CacheConfig {
            max_frames: 64,
            max_bytes: 1024,
        };
        let text = ron::to_string(&config).unwrap();
        let back: CacheConfig = ron::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
