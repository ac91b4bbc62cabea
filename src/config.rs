//! Configuration Module
//!
//! Loads service configuration from environment variables.

use std::env;
use std::num::NonZeroUsize;
use std::time::Duration;

use crate::memo::FlightMode;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache capacity; 0 means unbounded
    pub max_entries: usize,
    /// Share one computation between concurrent misses for the same key
    pub single_flight: bool,
    /// HTTP server port
    pub server_port: u16,
    /// Artificial latency added to every catalog search, in milliseconds
    pub search_delay_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Cache capacity, 0 for unbounded (default: 0)
    /// - `SINGLE_FLIGHT` - `true` to de-duplicate concurrent misses (default: false)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SEARCH_DELAY_MS` - Simulated search latency (default: 0)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            single_flight: parse_var("SINGLE_FLIGHT").unwrap_or(defaults.single_flight),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            search_delay_ms: parse_var("SEARCH_DELAY_MS").unwrap_or(defaults.search_delay_ms),
        }
    }

    /// Capacity bound for the cache store, `None` when unbounded.
    pub fn capacity(&self) -> Option<NonZeroUsize> {
        NonZeroUsize::new(self.max_entries)
    }

    pub fn flight_mode(&self) -> FlightMode {
        if self.single_flight {
            FlightMode::SingleFlight
        } else {
            FlightMode::Concurrent
        }
    }

    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_delay_ms)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 0,
            single_flight: false,
            server_port: 3000,
            search_delay_ms: 0,
        }
    }
}
