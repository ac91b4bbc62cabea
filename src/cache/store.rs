//! Cache Store Module
//!
//! HashMap storage keyed on `(query, limit)` with an optional LRU capacity bound.

use std::collections::HashMap;
use std::num::NonZeroUsize;

use tracing::debug;

use crate::cache::{CacheEntry, CacheKey, CacheStats, LruTracker};

// == Cache Store ==
/// Result storage for memoized computations.
///
/// Unbounded unless constructed with [`CacheStore::bounded`]. Holds at most one
/// entry per key; the latest `set` wins. Methods take `&mut self`; share it
/// across tasks through [`crate::cache::SharedCache`].
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<CacheKey, CacheEntry<V>>,
    /// Access order, only maintained when bounded
    lru: Option<LruTracker>,
    /// Performance statistics
    stats: CacheStats,
    /// Capacity bound, `None` = unbounded
    max_entries: Option<NonZeroUsize>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructors ==
    /// Creates an unbounded store.
    pub fn new() -> Self {
        Self::with_capacity(None)
    }

    /// Creates a store that evicts the least recently used entry once it
    /// holds `max_entries` entries.
    pub fn bounded(max_entries: NonZeroUsize) -> Self {
        Self::with_capacity(Some(max_entries))
    }

    /// Creates a store with an optional capacity bound.
    pub fn with_capacity(max_entries: Option<NonZeroUsize>) -> Self {
        Self {
            entries: HashMap::new(),
            lru: max_entries.map(|_| LruTracker::new()),
            stats: CacheStats::new(),
            max_entries,
        }
    }

    // == Get ==
    /// Looks up the result stored for `(query, limit)`.
    ///
    /// `None` is an ordinary miss. A stored empty value is still returned as
    /// `Some`, so emptiness never causes recomputation.
    pub fn get(&mut self, query: &str, limit: usize) -> Option<V> {
        let key = CacheKey::new(query, limit);

        match self.entries.get(&key) {
            Some(entry) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                if let Some(lru) = self.lru.as_mut() {
                    lru.touch(&key);
                }
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Inserts or overwrites the result for `(query, limit)`.
    ///
    /// When bounded and full, inserting a new key evicts the least recently
    /// used entry first. Overwriting an existing key never evicts.
    pub fn set(&mut self, query: &str, limit: usize, value: V) {
        let key = CacheKey::new(query, limit);
        let is_overwrite = self.entries.contains_key(&key);

        if let (Some(max), Some(lru)) = (self.max_entries, self.lru.as_mut()) {
            if !is_overwrite && self.entries.len() >= max.get() {
                if let Some(evicted) = lru
                    .evict_oldest()
                    .and_then(|oldest| self.entries.remove(&oldest))
                {
                    debug!("Evicted least recently used {}", evicted.key);
                    self.stats.record_eviction();
                }
            }
            lru.touch(&key);
        }

        self.entries.insert(key.clone(), CacheEntry::new(key, value));
        self.stats.record_write();
        self.stats.set_total_entries(self.entries.len());
    }

    // == Invalidate ==
    /// Removes the entry for `(query, limit)`. Returns whether one existed.
    pub fn invalidate(&mut self, query: &str, limit: usize) -> bool {
        let key = CacheKey::new(query, limit);
        let removed = self.entries.remove(&key).is_some();
        if removed {
            if let Some(lru) = self.lru.as_mut() {
                lru.remove(&key);
            }
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Clear ==
    /// Removes every entry. Returns the number removed.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        if let Some(lru) = self.lru.as_mut() {
            lru.clear();
        }
        self.stats.set_total_entries(0);
        count
    }

    // == Get If Present ==
    /// Like [`get`](Self::get), but an absent key is not counted as a miss.
    ///
    /// For callers that already recorded their miss and are looking again
    /// after another caller may have filled the entry.
    pub fn get_if_present(&mut self, query: &str, limit: usize) -> Option<V> {
        if self.contains(query, limit) {
            self.get(query, limit)
        } else {
            None
        }
    }

    /// Returns the stored result without touching stats or recency.
    pub fn peek(&self, query: &str, limit: usize) -> Option<V> {
        self.entries
            .get(&CacheKey::new(query, limit))
            .map(|entry| entry.value.clone())
    }

    /// Checks for an entry without touching stats or recency.
    pub fn contains(&self, query: &str, limit: usize) -> bool {
        self.entries.contains_key(&CacheKey::new(query, limit))
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn capacity(&self) -> Option<NonZeroUsize> {
        self.max_entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn cap(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_store_new() {
        let store: CacheStore<Vec<String>> = CacheStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert!(store.capacity().is_none());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new();

        store.set("rust jobs", 10, vec!["a".to_string(), "b".to_string()]);

        assert_eq!(
            store.get("rust jobs", 10),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_absent() {
        let mut store: CacheStore<u32> = CacheStore::new();
        assert_eq!(store.get("nothing", 10), None);
    }

    #[test]
    fn test_store_limit_is_part_of_key() {
        let mut store = CacheStore::new();

        store.set("rust jobs", 10, 10u32);

        assert_eq!(store.get("rust jobs", 20), None);
        store.set("rust jobs", 20, 20u32);
        assert_eq!(store.get("rust jobs", 10), Some(10));
        assert_eq!(store.get("rust jobs", 20), Some(20));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_store_empty_value_is_a_hit() {
        let mut store: CacheStore<Vec<u8>> = CacheStore::new();

        store.set("no matches", 5, Vec::new());

        assert_eq!(store.get("no matches", 5), Some(Vec::new()));
        assert_eq!(store.stats().hits, 1);
        assert_eq!(store.stats().misses, 0);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new();

        store.set("q", 1, "first");
        store.set("q", 1, "second");

        assert_eq!(store.get("q", 1), Some("second"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().writes, 2);
    }

    #[test]
    fn test_store_invalidate() {
        let mut store = CacheStore::new();

        store.set("q", 1, 1u8);

        assert!(store.invalidate("q", 1));
        assert!(!store.invalidate("q", 1));
        assert!(store.is_empty());
        assert_eq!(store.get("q", 1), None);
    }

    #[test]
    fn test_store_clear() {
        let mut store = CacheStore::bounded(cap(10));

        store.set("a", 1, 1u8);
        store.set("b", 1, 2u8);

        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
        assert_eq!(store.stats().total_entries, 0);

        // Tracker was cleared too, so refilling evicts nothing early
        for i in 0..10 {
            store.set("refill", i, 0u8);
        }
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_unbounded_never_evicts() {
        let mut store = CacheStore::new();

        for i in 0..1000 {
            store.set("q", i, i);
        }

        assert_eq!(store.len(), 1000);
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = CacheStore::bounded(cap(3));

        store.set("key1", 10, 1);
        store.set("key2", 10, 2);
        store.set("key3", 10, 3);

        // Full: key4 evicts key1
        store.set("key4", 10, 4);

        assert_eq!(store.len(), 3);
        assert!(!store.contains("key1", 10));
        assert!(store.contains("key2", 10));
        assert!(store.contains("key4", 10));
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = CacheStore::bounded(cap(3));

        store.set("key1", 10, 1);
        store.set("key2", 10, 2);
        store.set("key3", 10, 3);

        store.get("key1", 10);
        store.set("key4", 10, 4);

        assert!(store.contains("key1", 10));
        assert!(!store.contains("key2", 10));
    }

    #[test]
    fn test_store_overwrite_at_capacity_does_not_evict() {
        let mut store = CacheStore::bounded(cap(2));

        store.set("a", 1, 1);
        store.set("b", 1, 2);
        store.set("a", 1, 3);

        assert_eq!(store.len(), 2);
        assert_eq!(store.stats().evictions, 0);
        assert_eq!(store.get("a", 1), Some(3));
    }

    #[test]
    fn test_store_peek_has_no_side_effects() {
        let mut store = CacheStore::bounded(cap(2));

        store.set("a", 1, 1);
        store.set("b", 1, 2);

        assert_eq!(store.peek("a", 1), Some(1));
        assert_eq!(store.peek("c", 1), None);
        assert_eq!(store.stats().hits, 0);
        assert_eq!(store.stats().misses, 0);

        // peek did not refresh "a", so it is still the eviction candidate
        store.set("c", 1, 3);
        assert!(!store.contains("a", 1));
    }

    #[test]
    fn test_store_get_if_present() {
        let mut store = CacheStore::bounded(cap(2));

        assert_eq!(store.get_if_present("a", 1), None);
        assert_eq!(store.stats().misses, 0);

        store.set("a", 1, 1);
        store.set("b", 1, 2);
        assert_eq!(store.get_if_present("a", 1), Some(1));
        assert_eq!(store.stats().hits, 1);

        // "a" was refreshed, so "b" is evicted next
        store.set("c", 1, 3);
        assert!(store.contains("a", 1));
        assert!(!store.contains("b", 1));
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new();

        store.set("q", 1, 1u8);
        store.get("q", 1); // hit
        store.get("other", 1); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.writes, 1);
        assert_eq!(stats.total_entries, 1);
    }
}
