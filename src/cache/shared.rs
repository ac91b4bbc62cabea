//! Shared Cache Handle
//!
//! Cloneable, thread-safe handle around a [`CacheStore`].

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::cache::{CacheStats, CacheStore};
use crate::error::{CacheError, CacheResult};

// == Shared Cache ==
/// Process-wide result cache, passed explicitly to whoever needs it.
///
/// Clones share the same store. Every operation takes a short synchronous
/// lock and never suspends. If a holder panicked, the lock is poisoned and
/// every operation returns [`CacheError::StorePoisoned`] instead of a miss.
#[derive(Debug)]
pub struct SharedCache<V> {
    inner: Arc<Mutex<CacheStore<V>>>,
}

impl<V> Clone for SharedCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone> SharedCache<V> {
    /// Wraps an existing store.
    pub fn new(store: CacheStore<V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Creates a handle to a fresh unbounded store.
    pub fn unbounded() -> Self {
        Self::new(CacheStore::new())
    }

    /// Creates a handle to a fresh store with an optional capacity bound.
    pub fn with_capacity(max_entries: Option<NonZeroUsize>) -> Self {
        Self::new(CacheStore::with_capacity(max_entries))
    }

    fn lock(&self, op: &'static str) -> CacheResult<MutexGuard<'_, CacheStore<V>>> {
        self.inner
            .lock()
            .map_err(|_| CacheError::StorePoisoned(op))
    }

    /// Returns the stored result for `(query, limit)`, `Ok(None)` on a miss.
    pub fn get(&self, query: &str, limit: usize) -> CacheResult<Option<V>> {
        Ok(self.lock("get")?.get(query, limit))
    }

    /// Like [`get`](Self::get) but does not count an absent key as a miss.
    pub fn get_if_present(&self, query: &str, limit: usize) -> CacheResult<Option<V>> {
        Ok(self.lock("get")?.get_if_present(query, limit))
    }

    /// Like [`get`](Self::get) but leaves stats and recency untouched.
    pub fn peek(&self, query: &str, limit: usize) -> CacheResult<Option<V>> {
        Ok(self.lock("peek")?.peek(query, limit))
    }

    /// Inserts or overwrites the result for `(query, limit)`.
    pub fn set(&self, query: &str, limit: usize, value: V) -> CacheResult<()> {
        self.lock("set")?.set(query, limit, value);
        Ok(())
    }

    /// Removes one entry; `Ok(false)` if there was none.
    pub fn invalidate(&self, query: &str, limit: usize) -> CacheResult<bool> {
        Ok(self.lock("invalidate")?.invalidate(query, limit))
    }

    /// Removes every entry and returns how many were dropped.
    pub fn clear(&self) -> CacheResult<usize> {
        Ok(self.lock("clear")?.clear())
    }

    pub fn contains(&self, query: &str, limit: usize) -> CacheResult<bool> {
        Ok(self.lock("contains")?.contains(query, limit))
    }

    pub fn capacity(&self) -> CacheResult<Option<NonZeroUsize>> {
        Ok(self.lock("capacity")?.capacity())
    }

    pub fn stats(&self) -> CacheResult<CacheStats> {
        Ok(self.lock("stats")?.stats())
    }

    pub fn len(&self) -> CacheResult<usize> {
        Ok(self.lock("len")?.len())
    }

    pub fn is_empty(&self) -> CacheResult<bool> {
        Ok(self.lock("is_empty")?.is_empty())
    }
}

#[cfg(test)]
impl<V: Send + 'static> SharedCache<V> {
    /// Panics on another thread while holding the lock.
    pub(crate) fn poison(&self) {
        let inner = Arc::clone(&self.inner);
        let _ = std::thread::spawn(move || {
            let _guard = inner.lock();
            panic!("poisoning cache store");
        })
        .join();
    }
}

impl<V: Clone> Default for SharedCache<V> {
    fn default() -> Self {
        Self::unbounded()
    }
}
