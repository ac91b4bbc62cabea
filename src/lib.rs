//! Search Cache - result memoization for async search operations
//!
//! Caches results of a `(query, limit, ...)` operation keyed on the query and
//! limit alone, and serves a catalog search through that cache over HTTP.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod memo;
pub mod models;
pub mod search;

pub use api::AppState;
pub use cache::SharedCache;
pub use config::Config;
pub use error::{AppError, CacheError};
pub use memo::{compute_fn, memoize, Compute, FlightMode, Memoized};
