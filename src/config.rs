//! Configuration Module
//!
//! Handles loading cache parameters from environment variables.

use std::env;
use std::time::Duration;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Lifetime of an entry after its last write (zero disables expiration)
    pub ttl: Duration,
    /// Background sweep interval (zero disables the cleaner)
    pub cleanup_interval: Duration,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 3)
    /// - `CACHE_TTL_MS` - Entry lifetime in milliseconds (default: 2000)
    /// - `CACHE_CLEANUP_INTERVAL_MS` - Sweep frequency in milliseconds (default: 200)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: env_parse("CACHE_CAPACITY").unwrap_or(defaults.capacity),
            ttl: env_parse("CACHE_TTL_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.ttl),
            cleanup_interval: env_parse("CACHE_CLEANUP_INTERVAL_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.cleanup_interval),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 3,
            ttl: Duration::from_secs(2),
            cleanup_interval: Duration::from_millis(200),
        }
    }
}
