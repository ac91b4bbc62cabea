//! LRU Tracker Module
//!
//! Recency ordering of cache keys, used when the store has a capacity bound.

use std::collections::VecDeque;

use crate::cache::CacheKey;

// == LRU Tracker ==
/// Tracks access order for LRU eviction.
///
/// Front = most recently used, back = least recently used.
#[derive(Debug, Default)]
pub struct LruTracker {
    order: VecDeque<CacheKey>,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Touch ==
    /// Marks a key as most recently used.
    pub fn touch(&mut self, key: &CacheKey) {
        self.remove(key);
        self.order.push_front(key.clone());
    }

    // == Remove ==
    /// Stops tracking a key.
    pub fn remove(&mut self, key: &CacheKey) {
        self.order.retain(|k| k != key);
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<CacheKey> {
        self.order.pop_back()
    }

    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&CacheKey> {
        self.order.back()
    }

    /// Drops every tracked key.
    pub fn clear(&mut self) {
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
