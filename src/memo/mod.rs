//! Memoization Module
//!
//! Wraps any async `(query, limit, extra)` operation so results are served from
//! a [`SharedCache`](crate::cache::SharedCache) keyed on `(query, limit)`.

mod compute;
mod memoized;

pub use compute::{compute_fn, Compute, ComputeFn};
pub use memoized::{memoize, FlightMode, MemoStats, Memoized};
