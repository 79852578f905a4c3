//! In-process tier store using DashMap

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

use strata_cache_core::{CacheEntry, CacheError, TierStore};

/// Configuration for the in-process store
#[derive(Debug, Clone)]
pub struct MemoryConfig {
    /// Maximum number of entries (0 = unlimited)
    pub max_capacity: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
        }
    }
}

impl MemoryConfig {
    /// Create config with a specific capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            max_capacity: capacity,
        }
    }

    /// Create config with unlimited capacity
    pub fn unlimited() -> Self {
        Self { max_capacity: 0 }
    }
}

/// Internal counters
#[derive(Debug, Default, Clone)]
struct MemoryCounters {
    hits: u64,
    misses: u64,
    writes: u64,
    deletes: u64,
    evictions: u64,
}

/// In-process tier store
///
/// Uses `DashMap` for concurrent access. Expiry is enforced on read and
/// by the `purge_expired` sweep; an expired entry is reported absent
/// even before it is physically removed. Cloning creates a new handle to
/// the SAME underlying store.
#[derive(Clone)]
pub struct MemoryStore {
    data: Arc<DashMap<String, CacheEntry<Vec<u8>>>>,
    counters: Arc<RwLock<MemoryCounters>>,
    config: MemoryConfig,
}

impl MemoryStore {
    /// Create a new in-process store
    pub fn new(config: MemoryConfig) -> Self {
        Self {
            data: Arc::new(DashMap::with_capacity(config.max_capacity.min(10_000))),
            counters: Arc::new(RwLock::new(MemoryCounters::default())),
            config,
        }
    }

    /// Create with default configuration
    pub fn with_defaults() -> Self {
        Self::new(MemoryConfig::default())
    }

    /// Evict entries if at capacity
    fn maybe_evict(&self) {
        if self.config.max_capacity == 0 {
            return; // Unlimited
        }

        if self.data.len() < self.config.max_capacity {
            return;
        }

        // Prefer dropping already-expired entries before anything live
        let before = self.data.len();
        self.data.retain(|_, entry| !entry.is_expired());
        let purged = before - self.data.len();
        if purged > 0 {
            self.counters.write().evictions += purged as u64;
        }

        if self.data.len() < self.config.max_capacity {
            return;
        }

        // Still full: shed arbitrary entries down to capacity
        let excess = self.data.len().saturating_sub(self.config.max_capacity - 1);
        let victims: Vec<String> = self
            .data
            .iter()
            .take(excess)
            .map(|entry| entry.key().clone())
            .collect();

        for key in victims {
            self.data.remove(&key);
            self.counters.write().evictions += 1;
        }
    }

    /// Remove all physically stored entries whose expiry has passed
    ///
    /// Returns the number of entries removed. Intended to be driven
    /// periodically by the embedding application.
    pub fn purge_expired(&self) -> usize {
        let before = self.data.len();
        self.data.retain(|_, entry| !entry.is_expired());
        let purged = before - self.data.len();
        if purged > 0 {
            self.counters.write().evictions += purged as u64;
            tracing::debug!(purged, "purged expired in-process entries");
        }
        purged
    }

    /// Number of physically stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Hit count since creation
    pub fn hits(&self) -> u64 {
        self.counters.read().hits
    }

    /// Miss count since creation
    pub fn misses(&self) -> u64 {
        self.counters.read().misses
    }
}

#[async_trait]
impl TierStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<CacheEntry<Vec<u8>>>, CacheError> {
        match self.data.get(key) {
            Some(entry) => {
                if entry.is_expired() {
                    drop(entry);
                    self.data.remove(key);
                    self.counters.write().misses += 1;
                    return Ok(None);
                }

                self.counters.write().hits += 1;
                Ok(Some(entry.clone()))
            }
            None => {
                self.counters.write().misses += 1;
                Ok(None)
            }
        }
    }

    async fn set(
        &self,
        key: &str,
        entry: CacheEntry<Vec<u8>>,
        _ttl: Duration,
    ) -> Result<(), CacheError> {
        self.maybe_evict();

        self.data.insert(key.to_string(), entry);
        self.counters.write().writes += 1;
        Ok(())
    }

    async fn remove(&self, keys: &[&str]) -> Result<(), CacheError> {
        let mut removed = 0u64;
        for key in keys {
            if self.data.remove(*key).is_some() {
                removed += 1;
            }
        }
        self.counters.write().deletes += removed;
        Ok(())
    }
}
