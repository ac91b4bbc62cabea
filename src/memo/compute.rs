//! The operation shape that can be memoized.

use std::future::Future;

// == Compute Trait ==
/// An async operation taking a query, a result limit and extra arguments `A`.
///
/// `A` is whatever else the operation needs; it is passed through on a cache
/// miss and never influences the cache key.
pub trait Compute<A>: Send + Sync {
    /// Produced result, stored in the cache on success
    type Output: Clone + Send;
    /// Failure type, returned to the caller unchanged
    type Error: Send;

    fn compute(
        &self,
        query: &str,
        limit: usize,
        extra: A,
    ) -> impl Future<Output = Result<Self::Output, Self::Error>> + Send;
}

// == Closure Adapter ==
/// A [`Compute`] backed by a closure. Build one with [`compute_fn`].
#[derive(Clone)]
pub struct ComputeFn<F> {
    f: F,
}

/// Adapts `Fn(String, usize, A) -> impl Future<Output = Result<V, E>>` into a
/// [`Compute`].
pub fn compute_fn<F>(f: F) -> ComputeFn<F> {
    ComputeFn { f }
}

impl<F, Fut, A, V, E> Compute<A> for ComputeFn<F>
where
    F: Fn(String, usize, A) -> Fut + Send + Sync,
    Fut: Future<Output = Result<V, E>> + Send,
    V: Clone + Send,
    E: Send,
{
    type Output = V;
    type Error = E;

    fn compute(
        &self,
        query: &str,
        limit: usize,
        extra: A,
    ) -> impl Future<Output = Result<V, E>> + Send {
        (self.f)(query.to_string(), limit, extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_compute_fn_passes_arguments() {
        let op = compute_fn(|query: String, limit: usize, suffix: &'static str| async move {
            Ok::<_, String>(format!("{query}:{limit}:{suffix}"))
        });

        assert_eq!(op.compute("rust", 3, "x").await, Ok("rust:3:x".to_string()));
    }

    #[tokio::test]
    async fn test_compute_fn_propagates_error() {
        let op = compute_fn(|_query: String, _limit: usize, _extra: ()| async move {
            Err::<Vec<u8>, _>("upstream down".to_string())
        });

        assert_eq!(op.compute("rust", 3, ()).await, Err("upstream down".to_string()));
    }
}
