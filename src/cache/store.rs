//! Cache Store Module
//!
//! Main cache engine combining the entry store with recency tracking and TTL
//! expiration. Not synchronized; see [`Cache`](crate::cache::Cache) for the
//! shared, locked facade.

use std::hash::Hash;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::cache::{CacheEntry, EntryStore, RecencyList};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Bounded cache storage with LRU eviction and TTL support.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key-value storage
    entries: EntryStore<K, V>,
    /// LRU access order
    recency: RecencyList<K>,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Entry lifetime, None when expiration is disabled
    ttl: Option<Duration>,
}

impl<K, V> CacheStore<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and TTL.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries the cache can hold (at least 1)
    /// * `ttl` - Lifetime of each entry after its last write; zero disables expiration
    pub fn new(capacity: usize, ttl: Duration) -> Result<Self> {
        if capacity < 1 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        Ok(Self {
            entries: EntryStore::with_capacity(capacity),
            recency: RecencyList::with_capacity(capacity),
            capacity,
            ttl: (!ttl.is_zero()).then_some(ttl),
        })
    }

    // == Get ==
    /// Retrieves a value by key, marking it most recently used.
    ///
    /// Expired entries are removed on sight and reported as absent.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let entry = self.entries.get(key)?;

        if entry.is_expired() {
            let node = entry.node;
            self.entries.remove(key);
            self.recency.remove(node);
            trace!("Lazily expired entry on read");
            return None;
        }

        let (node, value) = (entry.node, entry.value.clone());
        self.recency.move_to_back(node);
        Some(value)
    }

    // == Put ==
    /// Stores a key-value pair.
    ///
    /// If the key already exists (even if expired), the value is overwritten
    /// and its lifetime restarts. If the cache is at capacity, the least
    /// recently used entry is evicted regardless of its TTL.
    pub fn put(&mut self, key: K, value: V) -> Result<()> {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.refresh(value, self.ttl);
            let node = entry.node;
            self.recency.move_to_back(node);
            return Ok(());
        }

        if self.entries.len() >= self.capacity {
            self.evict_oldest()?;
        }

        let node = self.recency.push_back(key.clone());
        self.entries.insert(key, CacheEntry::new(value, self.ttl, node));
        Ok(())
    }

    // == Remove ==
    /// Removes an entry by key, returning its value if it was live.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let entry = self.entries.remove(key)?;
        self.recency.remove(entry.node);
        (!entry.is_expired()).then_some(entry.value)
    }

    // == Expire Now ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn expire_now(&mut self) -> usize {
        if self.ttl.is_none() {
            return 0;
        }

        let expired = self.entries.expired_at(Instant::now());
        let mut removed = 0;

        for node in expired {
            if let Some(key) = self.recency.remove(node) {
                self.entries.remove(&key);
                removed += 1;
            }
        }

        removed
    }

    fn evict_oldest(&mut self) -> Result<()> {
        let evicted = self.recency.pop_front()?;
        self.entries.remove(&evicted);
        debug!(capacity = self.capacity, "Evicted least recently used entry");
        Ok(())
    }

    // == Accessors ==
    /// Returns the current number of entries, including expired ones not yet reclaimed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the entry lifetime, None when expiration is disabled.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Keys ordered from least to most recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.recency.iter()
    }

    // == Consistency Check ==
    /// Verifies the entry store and recency list describe the same entries.
    ///
    /// Every listed key must map to an entry pointing back at its node, the
    /// list must be well formed, and both sizes must agree within capacity.
    pub fn is_consistent(&self) -> bool {
        self.recency.is_well_formed()
            && self.recency.len() == self.entries.len()
            && self.entries.len() <= self.capacity
            && self.recency.iter_nodes().all(|(node, key)| {
                self.entries
                    .get(key)
                    .map_or(false, |entry| entry.node == node)
            })
    }
}
