//! API Module
//!
//! HTTP handlers and routing for the search service.
//!
//! # Endpoints
//! - `GET /search?q=&limit=&case_sensitive=` - Memoized search
//! - `GET /stats` - Cache and search statistics
//! - `DELETE /cache` - Drop every cached result
//! - `DELETE /cache/entry?q=&limit=` - Drop one cached result
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
