//! Cache Key Module
//!
//! Composite key built from the query text and the result limit.

use std::fmt;

// == Cache Key ==
/// Identifies one memoized result.
///
/// Only the query and the limit take part in equality. Any extra arguments the
/// wrapped operation receives are deliberately left out, so two calls that
/// differ only in those arguments share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Query text, stored verbatim (no trimming or case folding)
    pub query: String,
    /// Maximum number of results requested
    pub limit: usize,
}

impl CacheKey {
    /// Creates a key from a query and limit.
    pub fn new(query: impl Into<String>, limit: usize) -> Self {
        Self {
            query: query.into(),
            limit,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.query, self.limit)
    }
}
