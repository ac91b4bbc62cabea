//! Search Module
//!
//! The operation the service memoizes: a term search over an in-memory catalog
//! of listing titles.

mod catalog;

pub use catalog::{Catalog, SearchHit, SearchOptions};

use crate::memo::Memoized;

/// The catalog search behind a result cache.
pub type MemoizedSearch = Memoized<Catalog, Vec<SearchHit>>;
