//! In-memory catalog search.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, Result};
use crate::memo::Compute;

/// Listings served when no other catalog is configured.
const SAMPLE_TITLES: &[&str] = &[
    "Senior Rust Engineer - Storage Team",
    "Rust Backend Developer (Remote)",
    "Embedded Rust Firmware Engineer",
    "Rust Jobs Board Maintainer",
    "Staff Engineer, Rust Compiler Tooling",
    "Rust Developer - Payments Platform",
    "Junior Rust Developer",
    "Rust Networking Engineer",
    "Site Reliability Engineer (Rust, Kubernetes)",
    "Rust WebAssembly Engineer",
    "Database Internals Engineer (Rust)",
    "Rust Jobs Curator - Part Time",
    "Go Backend Developer",
    "Python Data Engineer",
    "TypeScript Frontend Engineer",
    "C++ Game Engine Programmer",
    "Platform Engineer - Go and Rust",
    "Machine Learning Engineer (Python)",
    "Security Engineer - Rust Cryptography",
    "Rust Blockchain Developer",
    "Technical Writer, Rust Documentation",
    "DevOps Engineer",
    "Rust Systems Programmer - Observability",
    "Elixir Backend Engineer",
];

// == Search Types ==
/// Arguments that shape a search but are not part of the cache key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Match terms with exact case
    #[serde(default)]
    pub case_sensitive: bool,
}

/// One matching listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Position of the listing in the catalog
    pub id: usize,
    pub title: String,
}

// == Catalog ==
/// A fixed list of titles searched by whitespace-separated terms.
///
/// A title matches when it contains every term. An optional delay before each
/// search stands in for a slow upstream.
#[derive(Debug, Clone)]
pub struct Catalog {
    titles: Vec<String>,
    delay: Duration,
}

impl Catalog {
    pub fn new(titles: Vec<String>) -> Self {
        Self {
            titles,
            delay: Duration::ZERO,
        }
    }

    /// The built-in listing catalog.
    pub fn sample() -> Self {
        Self::new(SAMPLE_TITLES.iter().map(|t| t.to_string()).collect())
    }

    /// Waits `delay` before answering each search.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    // == Search ==
    /// Returns up to `limit` titles containing every term of `query`, in
    /// catalog order.
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
        options: SearchOptions,
    ) -> Result<Vec<SearchHit>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidRequest("Query cannot be empty".to_string()));
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let fold = |s: &str| {
            if options.case_sensitive {
                s.to_string()
            } else {
                s.to_lowercase()
            }
        };
        let terms: Vec<String> = query.split_whitespace().map(fold).collect();

        let hits: Vec<SearchHit> = self
            .titles
            .iter()
            .enumerate()
            .filter(|(_, title)| {
                let title = fold(title.as_str());
                terms.iter().all(|term| title.contains(term.as_str()))
            })
            .take(limit)
            .map(|(id, title)| SearchHit {
                id,
                title: title.clone(),
            })
            .collect();

        debug!("Search {:?} matched {} of limit {}", query, hits.len(), limit);
        Ok(hits)
    }
}

impl Compute<SearchOptions> for Catalog {
    type Output = Vec<SearchHit>;
    type Error = AppError;

    fn compute(
        &self,
        query: &str,
        limit: usize,
        options: SearchOptions,
    ) -> impl Future<Output = Result<Vec<SearchHit>>> + Send {
        self.search(query, limit, options)
    }
}
