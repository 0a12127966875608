//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity must hold at least one entry
    #[error("Invalid capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    /// Eviction was attempted on an empty recency list
    #[error("Recency list is empty")]
    EmptyList,

    /// The cleaner cannot tick on a zero interval
    #[error("Cleanup interval must be greater than zero")]
    InvalidInterval,

    /// The OS could not start the cleanup thread or its runtime
    #[error("Failed to start cleanup thread: {0}")]
    CleanerSpawn(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
