//! LRU TTL Cache - A bounded in-memory key-value cache
//!
//! Combines least-recently-used eviction on capacity with per-entry
//! time-to-live expiration, enforced lazily on read and by a background sweep.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::Cache;
pub use config::CacheConfig;
pub use error::{CacheError, Result};
