//! Request and Response models for the search service API
//!
//! DTOs used for query-string parsing and JSON response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{InvalidateParams, SearchParams, DEFAULT_LIMIT, MAX_LIMIT};
pub use responses::{
    ClearResponse, HealthResponse, InvalidateResponse, SearchResponse, StatsResponse,
};
