//! Cache Facade Module
//!
//! Thread-safe cache handle owning the store lock and its background cleaner.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, error};

use crate::cache::CacheStore;
use crate::config::CacheConfig;
use crate::error::Result;
use crate::tasks::{Cleaner, Sweep};

// == Cache ==
/// Bounded LRU cache with TTL expiration, safe to share across threads.
///
/// Every operation, including the background sweep, runs under a single
/// mutex around the store. Lookups reorder recency, so there is no shared
/// read path.
///
/// Wrap in an `Arc` to share between threads or tasks. Dropping the cache
/// stops its cleaner.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use lru_ttl_cache::Cache;
///
/// let cache = Cache::new(2, Duration::from_secs(60), Duration::ZERO).unwrap();
/// cache.put("a", 1);
/// cache.put("b", 2);
/// cache.get(&"a");
/// cache.put("c", 3);
///
/// assert_eq!(cache.get(&"b"), None);
/// assert_eq!(cache.keys(), vec!["a", "c"]);
/// ```
#[derive(Debug)]
pub struct Cache<K, V> {
    store: Arc<Mutex<CacheStore<K, V>>>,
    cleaner: Option<Cleaner>,
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries, at least 1
    /// * `ttl` - Lifetime of an entry after its last write; zero disables expiration
    /// * `cleanup_interval` - Period of the background sweep; zero disables it and
    ///   expired entries are only reclaimed lazily
    ///
    /// # Errors
    /// `InvalidCapacity` when `capacity` is 0. The cleaner runs on its own
    /// thread, so no tokio runtime is needed; only an OS failure to start
    /// that thread yields `CleanerSpawn`.
    pub fn new(capacity: usize, ttl: Duration, cleanup_interval: Duration) -> Result<Self> {
        let store = Arc::new(Mutex::new(CacheStore::new(capacity, ttl)?));

        let cleaner = if cleanup_interval.is_zero() {
            debug!("Cleanup interval is zero, expired entries are reclaimed lazily");
            None
        } else {
            Some(Cleaner::spawn(Arc::downgrade(&store), cleanup_interval)?)
        };

        Ok(Self { store, cleaner })
    }

    /// Creates a cache from configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::new(config.capacity, config.ttl, config.cleanup_interval)
    }

    // == Get ==
    /// Returns a clone of the value for `key`, marking it most recently used.
    ///
    /// Expired entries are treated as absent and removed.
    pub fn get(&self, key: &K) -> Option<V> {
        self.store.lock().get(key)
    }

    // == Put ==
    /// Inserts or overwrites `key`, evicting the least recently used entry
    /// when the cache is full.
    pub fn put(&self, key: K, value: V) {
        if let Err(err) = self.store.lock().put(key, value) {
            error!(%err, "Entry store and recency list out of sync");
        }
    }

    // == Remove ==
    /// Removes `key`, returning its value if it was present and unexpired.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.store.lock().remove(key)
    }

    // == Expire Now ==
    /// Removes every expired entry immediately.
    ///
    /// This is the same sweep the cleaner runs. Returns the number removed.
    pub fn expire_now(&self) -> usize {
        self.store.sweep()
    }

    // == Accessors ==
    /// Number of entries held, including expired ones not yet reclaimed.
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.store.lock().capacity()
    }

    /// Entry lifetime, None when expiration is disabled.
    pub fn ttl(&self) -> Option<Duration> {
        self.store.lock().ttl()
    }

    /// Snapshot of keys ordered from least to most recently used.
    pub fn keys(&self) -> Vec<K> {
        self.store.lock().keys().cloned().collect()
    }

    /// Checks that the entry store and recency list agree.
    pub fn is_consistent(&self) -> bool {
        self.store.lock().is_consistent()
    }

    // == Cleaner Control ==
    /// Returns true if a background cleaner is attached and running.
    pub fn has_cleaner(&self) -> bool {
        self.cleaner.as_ref().map_or(false, Cleaner::is_running)
    }

    /// Stops the background cleaner, if any.
    ///
    /// Returns true if a cleaner was running. Expired entries are still
    /// removed lazily and by [`Cache::expire_now`].
    pub fn stop_cleaner(&mut self) -> bool {
        match self.cleaner.take() {
            Some(cleaner) => {
                cleaner.stop();
                debug!("TTL cleanup task stopped");
                true
            }
            None => false,
        }
    }
}

// == Sweep Target ==
impl<K, V> Sweep for Mutex<CacheStore<K, V>>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    fn sweep(&self) -> usize {
        self.lock().expire_now()
    }
}
