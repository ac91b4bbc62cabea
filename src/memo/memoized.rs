//! Memoizing Wrapper
//!
//! Lookup-or-compute orchestration in front of a [`Compute`] operation.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, warn};

use crate::cache::{CacheKey, SharedCache};
use crate::error::CacheError;
use crate::memo::Compute;

// == Flight Mode ==
/// How concurrent misses for the same key are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightMode {
    /// Every caller that misses computes and writes. Two concurrent misses for
    /// one key both run the operation; the later write wins.
    #[default]
    Concurrent,
    /// Misses for the same key queue behind one another. Each waiter re-checks
    /// the cache when its turn comes, so a successful computation is shared.
    SingleFlight,
}

// == Memo Stats ==
/// Counters kept by the wrapper itself, separate from store stats.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MemoStats {
    /// Times the wrapped operation was invoked
    pub computations: u64,
    /// Invocations that returned an error
    pub failures: u64,
    /// Single-flight waiters served by another caller's computation. Each of
    /// these also shows up in the store stats as one miss and one hit.
    pub coalesced: u64,
}

// == Memoized ==
/// A [`Compute`] that serves repeated `(query, limit)` requests from a cache.
///
/// The extra arguments are forwarded on a miss but are not part of the key:
/// a second call with the same query and limit gets the first call's result
/// whatever its extra arguments are. Failed computations are never stored.
pub struct Memoized<C, V> {
    inner: C,
    cache: SharedCache<V>,
    mode: FlightMode,
    in_flight: Mutex<HashMap<CacheKey, Arc<AsyncMutex<()>>>>,
    computations: AtomicU64,
    failures: AtomicU64,
    coalesced: AtomicU64,
}

/// Wraps `inner` so its results are memoized in `cache`.
pub fn memoize<C, V: Clone>(inner: C, cache: SharedCache<V>) -> Memoized<C, V> {
    Memoized::new(inner, cache)
}

impl<C, V: Clone> Memoized<C, V> {
    // == Constructor ==
    /// Creates a wrapper in [`FlightMode::Concurrent`].
    pub fn new(inner: C, cache: SharedCache<V>) -> Self {
        Self {
            inner,
            cache,
            mode: FlightMode::default(),
            in_flight: Mutex::new(HashMap::new()),
            computations: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            coalesced: AtomicU64::new(0),
        }
    }

    /// Sets the flight mode.
    pub fn with_mode(mut self, mode: FlightMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> FlightMode {
        self.mode
    }

    /// The cache this wrapper reads and writes.
    pub fn cache(&self) -> &SharedCache<V> {
        &self.cache
    }

    /// The wrapped operation.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn stats(&self) -> MemoStats {
        MemoStats {
            computations: self.computations.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            coalesced: self.coalesced.load(Ordering::Relaxed),
        }
    }

    // == Call ==
    /// Returns the cached result for `(query, limit)` or computes and stores it.
    ///
    /// A hit completes without awaiting anything. A store failure is returned
    /// through the operation's own error type.
    pub async fn call<A>(&self, query: &str, limit: usize, extra: A) -> Result<V, C::Error>
    where
        C: Compute<A, Output = V>,
        C::Error: From<CacheError>,
    {
        if let Some(hit) = self.cache.get(query, limit)? {
            debug!("Cache hit for {:?}@{}", query, limit);
            return Ok(hit);
        }
        debug!("Cache miss for {:?}@{}", query, limit);

        match self.mode {
            FlightMode::Concurrent => self.compute_and_store(query, limit, extra).await,
            FlightMode::SingleFlight => self.call_single_flight(query, limit, extra).await,
        }
    }

    async fn call_single_flight<A>(
        &self,
        query: &str,
        limit: usize,
        extra: A,
    ) -> Result<V, C::Error>
    where
        C: Compute<A, Output = V>,
        C::Error: From<CacheError>,
    {
        let flight = self.join_flight(CacheKey::new(query, limit))?;
        let _turn = flight.gate.lock().await;

        // Whoever held the gate before us may have stored a result. Our miss
        // is already counted, so only a hit is recorded here.
        match self.cache.get_if_present(query, limit) {
            Ok(Some(value)) => {
                self.coalesced.fetch_add(1, Ordering::Relaxed);
                debug!("Shared in-flight result for {:?}@{}", query, limit);
                Ok(value)
            }
            Ok(None) => self.compute_and_store(query, limit, extra).await,
            Err(err) => Err(err.into()),
        }
    }

    async fn compute_and_store<A>(
        &self,
        query: &str,
        limit: usize,
        extra: A,
    ) -> Result<V, C::Error>
    where
        C: Compute<A, Output = V>,
        C::Error: From<CacheError>,
    {
        self.computations.fetch_add(1, Ordering::Relaxed);

        match self.inner.compute(query, limit, extra).await {
            Ok(value) => {
                self.cache.set(query, limit, value.clone())?;
                Ok(value)
            }
            Err(err) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                warn!("Computation failed for {:?}@{}, nothing cached", query, limit);
                Err(err)
            }
        }
    }

    fn join_flight(&self, key: CacheKey) -> Result<Flight<'_>, CacheError> {
        let mut gates = self
            .in_flight
            .lock()
            .map_err(|_| CacheError::StorePoisoned("single-flight"))?;
        let gate = Arc::clone(gates.entry(key.clone()).or_default());

        Ok(Flight {
            gates: &self.in_flight,
            key,
            gate,
        })
    }

    #[cfg(test)]
    fn in_flight_len(&self) -> usize {
        self.in_flight.lock().map(|gates| gates.len()).unwrap_or(0)
    }
}

// == Flight ==
/// One caller's membership in a key's queue. Dropping it (including when the
/// caller's future is cancelled) removes the gate once nobody else holds it.
struct Flight<'a> {
    gates: &'a Mutex<HashMap<CacheKey, Arc<AsyncMutex<()>>>>,
    key: CacheKey,
    gate: Arc<AsyncMutex<()>>,
}

impl Drop for Flight<'_> {
    fn drop(&mut self) {
        if let Ok(mut gates) = self.gates.lock() {
            // Ours plus the map's means nobody else is queued
            if Arc::strong_count(&self.gate) == 2 {
                gates.remove(&self.key);
            }
        }
    }
}

impl<C, V, A> Compute<A> for Memoized<C, V>
where
    C: Compute<A, Output = V>,
    C::Error: From<CacheError>,
    V: Clone + Send + Sync,
    A: Send,
{
    type Output = V;
    type Error = C::Error;

    fn compute(
        &self,
        query: &str,
        limit: usize,
        extra: A,
    ) -> impl Future<Output = Result<V, C::Error>> + Send {
        self.call(query, limit, extra)
    }
}
