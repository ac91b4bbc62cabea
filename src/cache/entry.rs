//! Cache Entry Module
//!
//! A stored result together with the key it was computed for.

use crate::cache::CacheKey;

// == Cache Entry ==
/// A single memoized result.
///
/// The value is opaque to the cache. Entries carry no timestamp or TTL; they
/// live until overwritten, invalidated, cleared or evicted.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// Key the value was computed for, reported when the entry is evicted
    pub key: CacheKey,
    /// The stored result
    pub value: V,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry for `key` holding `value`.
    pub fn new(key: CacheKey, value: V) -> Self {
        Self { key, value }
    }
}
