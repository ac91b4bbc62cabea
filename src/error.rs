//! Error types
//!
//! `CacheError` covers failures of the store itself; `AppError` is what the
//! search service and its HTTP handlers return.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// A malfunction of the cache store. Never used to signal a miss.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A thread panicked while holding the store lock
    #[error("Cache store poisoned during {0}")]
    StorePoisoned(&'static str),
}

// == App Error Enum ==
/// Unified error type for the search service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Requested cache entry does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The search backend failed
    #[error("Search failed: {0}")]
    Search(String),

    /// The cache store failed
    #[error(transparent)]
    Cache(#[from] CacheError),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Search(_) => StatusCode::BAD_GATEWAY,
            AppError::Cache(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Aliases ==
/// Result of a cache store operation.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Convenience Result type for the search service.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let test_cases = vec![
            (AppError::InvalidRequest("bad".to_string()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("key".to_string()), StatusCode::NOT_FOUND),
            (AppError::Search("upstream".to_string()), StatusCode::BAD_GATEWAY),
            (
                AppError::Cache(CacheError::StorePoisoned("get")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }

    #[test]
    fn test_cache_error_converts() {
        let err: AppError = CacheError::StorePoisoned("set").into();
        assert_eq!(err, AppError::Cache(CacheError::StorePoisoned("set")));
        assert_eq!(err.to_string(), "Cache store poisoned during set");
    }
}
