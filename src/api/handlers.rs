//! API Handlers
//!
//! HTTP request handlers for each search service endpoint.

use std::num::NonZeroUsize;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::info;

use crate::cache::SharedCache;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::memo::memoize;
use crate::models::{
    ClearResponse, HealthResponse, InvalidateParams, InvalidateResponse, SearchParams,
    SearchResponse, StatsResponse,
};
use crate::search::{Catalog, MemoizedSearch, SearchHit};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Result cache, shared with `search`
    pub cache: SharedCache<Vec<SearchHit>>,
    /// Catalog search behind the cache
    pub search: Arc<MemoizedSearch>,
}

impl AppState {
    /// Creates a new AppState around a memoized search.
    pub fn new(search: MemoizedSearch) -> Self {
        Self {
            cache: search.cache().clone(),
            search: Arc::new(search),
        }
    }

    /// Builds the sample catalog, cache and wrapper from configuration.
    pub fn from_config(config: &Config) -> Self {
        let catalog = Catalog::sample().with_delay(config.search_delay());
        let cache = SharedCache::with_capacity(config.capacity());
        Self::new(memoize(catalog, cache).with_mode(config.flight_mode()))
    }
}

/// Handler for GET /search
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    if let Some(error_msg) = params.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let results = state
        .search
        .call(&params.q, params.limit, params.options())
        .await?;

    Ok(Json(SearchResponse::new(params.q, params.limit, results)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let cache_stats = state.cache.stats()?;
    let max_entries = state.cache.capacity()?.map(NonZeroUsize::get);

    Ok(Json(StatsResponse::new(
        cache_stats,
        state.search.stats(),
        state.search.mode(),
        max_entries,
    )))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<ClearResponse>> {
    let removed = state.cache.clear()?;
    info!("Cache cleared: removed {} entries", removed);

    Ok(Json(ClearResponse::new(removed)))
}

/// Handler for DELETE /cache/entry
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Query(params): Query<InvalidateParams>,
) -> Result<Json<InvalidateResponse>> {
    if let Some(error_msg) = params.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    if !state.cache.invalidate(&params.q, params.limit)? {
        return Err(AppError::NotFound(format!(
            "No cached result for {:?} with limit {}",
            params.q, params.limit
        )));
    }
    info!("Invalidated {:?}@{}", params.q, params.limit);

    Ok(Json(InvalidateResponse::new(params.q, params.limit)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
