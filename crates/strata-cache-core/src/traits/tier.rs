//! Tier store trait

use crate::{CacheEntry, CacheError};
use async_trait::async_trait;
use std::time::Duration;

/// Role of a tier in the registry
///
/// The role decides which caller-supplied TTL override applies to the
/// tier on writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TierRole {
    /// In-process store, visible only to this application instance
    Local,
    /// Network-backed store shared across instances
    Distributed,
}

impl TierRole {
    /// Role as a string label (for logging)
    pub fn as_str(&self) -> &'static str {
        match self {
            TierRole::Local => "local",
            TierRole::Distributed => "distributed",
        }
    }
}

/// Uniform contract for a single cache tier's backing store
///
/// Implemented once per store kind (in-process, Redis). Stores hold
/// opaque byte envelopes; (de)serialization of caller values happens in
/// the orchestrator. Implementations must be safe for concurrent use
/// through a shared handle.
///
/// Timeout budgets are enforced by the orchestrator, which wraps every
/// call in `tokio::time::timeout`; a store only has to be prompt about
/// yielding so cancellation can take effect.
#[async_trait]
pub trait TierStore: Send + Sync + 'static {
    /// Short name identifying the store kind (for logging)
    fn name(&self) -> &'static str;

    /// Look up an envelope
    ///
    /// Returns `Ok(None)` when the key is absent or the store already
    /// purged it. Implementations may return an expired envelope; the
    /// orchestrator re-checks `expires_at` on every read.
    async fn get(&self, key: &str) -> Result<Option<CacheEntry<Vec<u8>>>, CacheError>;

    /// Store an envelope
    ///
    /// `ttl` equals the envelope's remaining logical lifetime and must
    /// also be applied as the store-level expiry so the store
    /// self-purges. Overwrites any existing value for the key.
    async fn set(&self, key: &str, entry: CacheEntry<Vec<u8>>, ttl: Duration)
        -> Result<(), CacheError>;

    /// Remove the given keys
    ///
    /// Absent keys are not an error. Multiple keys may be removed
    /// concurrently within the store.
    async fn remove(&self, keys: &[&str]) -> Result<(), CacheError>;
}
