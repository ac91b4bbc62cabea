//! Request DTOs for the search service API
//!
//! Query-string parameters of incoming requests.

use serde::Deserialize;

use crate::search::SearchOptions;

/// Limit used when a request does not give one
pub const DEFAULT_LIMIT: usize = 10;

/// Largest accepted limit
pub const MAX_LIMIT: usize = 100;

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

fn validate_key(q: &str, limit: usize) -> Option<String> {
    if q.trim().is_empty() {
        return Some("Query cannot be empty".to_string());
    }
    if limit == 0 || limit > MAX_LIMIT {
        return Some(format!("Limit must be between 1 and {}", MAX_LIMIT));
    }
    None
}

/// Query parameters of `GET /search`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    /// Query text
    pub q: String,
    /// Maximum number of results
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Exact-case matching; passed to the search but not part of the cache key
    #[serde(default)]
    pub case_sensitive: bool,
}

impl SearchParams {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.q, self.limit)
    }

    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            case_sensitive: self.case_sensitive,
        }
    }
}

/// Query parameters of `DELETE /cache/entry`
#[derive(Debug, Clone, Deserialize)]
pub struct InvalidateParams {
    pub q: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl InvalidateParams {
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.q, self.limit)
    }
}
