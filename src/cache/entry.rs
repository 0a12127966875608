//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

use crate::cache::NodeId;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Time of insertion or last overwrite
    pub created_at: Instant,
    /// Expiration instant, None = no expiration
    pub expires_at: Option<Instant>,
    /// Position of this entry in the recency list
    pub node: NodeId,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry with optional TTL.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - Lifetime of the entry, None for no expiration
    /// * `node` - Handle of the entry's recency list node
    pub fn new(value: V, ttl: Option<Duration>, node: NodeId) -> Self {
        let now = Instant::now();
        Self {
            value,
            created_at: now,
            expires_at: expiry(now, ttl),
            node,
        }
    }

    // == Refresh ==
    /// Replaces the value and restarts the entry's lifetime.
    pub fn refresh(&mut self, value: V, ttl: Option<Duration>) {
        let now = Instant::now();
        self.value = value;
        self.created_at = now;
        self.expires_at = expiry(now, ttl);
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is expired once `now` reaches its expiration instant, so an
    /// entry whose lifetime has fully elapsed is never served.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    /// Checks if the entry has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}

fn expiry(now: Instant, ttl: Option<Duration>) -> Option<Instant> {
    // A ttl too large to represent never expires
    ttl.and_then(|ttl| now.checked_add(ttl))
}
