//! Response DTOs for the search service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::memo::{FlightMode, MemoStats};
use crate::search::SearchHit;

/// Response body for `GET /search`
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub limit: usize,
    /// Number of results returned
    pub count: usize,
    pub results: Vec<SearchHit>,
}

impl SearchResponse {
    pub fn new(query: impl Into<String>, limit: usize, results: Vec<SearchHit>) -> Self {
        Self {
            query: query.into(),
            limit,
            count: results.len(),
            results,
        }
    }
}

/// Response body for `GET /stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Store lookups that found an entry
    pub hits: u64,
    /// Store lookups that found nothing
    pub misses: u64,
    pub writes: u64,
    pub evictions: u64,
    /// Current number of cached results
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses)). A coalesced request counts as one
    /// miss and one hit.
    pub hit_rate: f64,
    /// Searches actually executed
    pub computations: u64,
    /// Searches that failed
    pub failures: u64,
    /// Requests served by another request's in-flight search
    pub coalesced: u64,
    pub flight_mode: FlightMode,
    /// Capacity bound, absent when unbounded
    pub max_entries: Option<usize>,
}

impl StatsResponse {
    /// Combines store and wrapper statistics
    pub fn new(
        cache: CacheStats,
        memo: MemoStats,
        flight_mode: FlightMode,
        max_entries: Option<usize>,
    ) -> Self {
        Self {
            hits: cache.hits,
            misses: cache.misses,
            writes: cache.writes,
            evictions: cache.evictions,
            total_entries: cache.total_entries,
            hit_rate: cache.hit_rate(),
            computations: memo.computations,
            failures: memo.failures,
            coalesced: memo.coalesced,
            flight_mode,
            max_entries,
        }
    }
}

/// Response body for `DELETE /cache`
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    /// Entries dropped
    pub removed: usize,
}

impl ClearResponse {
    pub fn new(removed: usize) -> Self {
        Self {
            message: format!("Cleared {} cached results", removed),
            removed,
        }
    }
}

/// Response body for `DELETE /cache/entry`
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    pub message: String,
    pub query: String,
    pub limit: usize,
}

impl InvalidateResponse {
    pub fn new(query: impl Into<String>, limit: usize) -> Self {
        let query = query.into();
        Self {
            message: format!("Invalidated {:?} with limit {}", query, limit),
            query,
            limit,
        }
    }
}

/// Response body for `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_counts_results() {
        let resp = SearchResponse::new(
            "rust",
            10,
            vec![SearchHit {
                id: 3,
                title: "Rust Developer".to_string(),
            }],
        );
        assert_eq!(resp.count, 1);

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["results"][0]["id"], 3);
        assert_eq!(json["query"], "rust");
    }

    #[test]
    fn test_stats_response_combines_sources() {
        let cache = CacheStats {
            hits: 8,
            misses: 2,
            writes: 2,
            evictions: 0,
            total_entries: 2,
        };
        let memo = MemoStats {
            computations: 2,
            failures: 0,
            coalesced: 0,
        };

        let resp = StatsResponse::new(cache, memo, FlightMode::SingleFlight, None);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.computations, 2);

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["flight_mode"], "single_flight");
        assert!(json["max_entries"].is_null());
    }

    #[test]
    fn test_clear_and_invalidate_messages() {
        assert_eq!(ClearResponse::new(3).message, "Cleared 3 cached results");
        assert_eq!(
            InvalidateResponse::new("rust jobs", 10).message,
            "Invalidated \"rust jobs\" with limit 10"
        );
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
