//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and LRU eviction.

mod entries;
mod entry;
mod handle;
mod lru;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entries::EntryStore;
pub use entry::CacheEntry;
pub use handle::Cache;
pub use lru::{NodeId, RecencyIter, RecencyList};
pub use store::CacheStore;
