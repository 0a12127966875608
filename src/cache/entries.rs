//! Entry Store Module
//!
//! Key lookup for cache entries.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Instant;

use crate::cache::{CacheEntry, NodeId};

// == Entry Store ==
/// Authoritative mapping from key to entry data.
#[derive(Debug)]
pub struct EntryStore<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
}

impl<K: Hash + Eq, V> Default for EntryStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V> EntryStore<K, V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    pub fn get(&self, key: &K) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut CacheEntry<V>> {
        self.entries.get_mut(key)
    }

    /// Inserts an entry, returning the one it replaced.
    pub fn insert(&mut self, key: K, entry: CacheEntry<V>) -> Option<CacheEntry<V>> {
        self.entries.insert(key, entry)
    }

    pub fn remove(&mut self, key: &K) -> Option<CacheEntry<V>> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Expired At ==
    /// Returns the recency handles of every entry expired at `now`.
    pub fn expired_at(&self, now: Instant) -> Vec<NodeId> {
        self.entries
            .values()
            .filter(|entry| entry.is_expired_at(now))
            .map(|entry| entry.node)
            .collect()
    }
}
