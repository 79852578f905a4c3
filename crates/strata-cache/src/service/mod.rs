//! The cache orchestrator

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tokio::time::timeout;
use tracing::{debug, trace, warn};

use strata_cache_core::{
    BoxError, CacheEntry, CacheError, CacheScope, JsonSerializer, Serializer, TierRole, TierStore,
    TtlOverrides,
};

mod builder;
pub use builder::CacheServiceBuilder;

/// One tier of the registry: a store plus its policy
pub(crate) struct ConfiguredTier {
    pub(crate) store: Arc<dyn TierStore>,
    pub(crate) role: TierRole,
    pub(crate) default_ttl: Duration,
    pub(crate) op_timeout: Duration,
}

/// Multi-tier cache orchestrator
///
/// Holds an immutable, ordered tier registry (fastest/shortest-lived
/// first) built once by [`CacheServiceBuilder`]. All operations are safe
/// to run concurrently; cloning shares the registry.
///
/// Failure containment: [`get`](Self::get), [`set`](Self::set) and
/// [`remove`](Self::remove) cannot fail: tier-level faults are logged
/// and downgraded to a miss or a skipped write. Only
/// [`get_or_compute`](Self::get_or_compute) returns an error, and only
/// when the caller's own factory fails.
pub struct CacheService<S = JsonSerializer>
where
    S: Serializer,
{
    tiers: Arc<Vec<ConfiguredTier>>,
    serializer: S,
    enabled: bool,
}

impl CacheService<JsonSerializer> {
    /// Start building a service with the default JSON serializer
    pub fn builder() -> CacheServiceBuilder<JsonSerializer> {
        CacheServiceBuilder::new()
    }
}

impl<S> CacheService<S>
where
    S: Serializer,
{
    pub(crate) fn from_parts(tiers: Vec<ConfiguredTier>, serializer: S, enabled: bool) -> Self {
        Self {
            tiers: Arc::new(tiers),
            serializer,
            enabled,
        }
    }

    /// Whether caching is globally enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of configured tiers
    pub fn tier_count(&self) -> usize {
        self.tiers.len()
    }

    fn usable(&self, scope: CacheScope) -> bool {
        self.enabled && !self.tiers.is_empty() && !scope.is_bypassed()
    }

    /// Get a value, or compute and cache it on miss
    ///
    /// Disabled or bypassed caching calls the factory directly without
    /// touching any tier. A hit never invokes the factory. A factory
    /// failure is propagated as [`CacheError::Factory`] and nothing is
    /// cached; this is the only path through which an error reaches the
    /// caller.
    pub async fn get_or_compute<T, F, Fut, E>(
        &self,
        key: &str,
        factory: F,
        overrides: TtlOverrides,
        scope: CacheScope,
    ) -> Result<T, CacheError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<BoxError>,
    {
        if !self.usable(scope) {
            return factory().await.map_err(|e| CacheError::Factory(e.into()));
        }

        if let Some(value) = self.get_with_ttl::<T>(key, overrides.local, scope).await {
            return Ok(value);
        }

        debug!(key, "no cache entry found; invoking factory");
        let value = factory().await.map_err(|e| CacheError::Factory(e.into()))?;

        self.set(key, &value, overrides, scope).await;
        Ok(value)
    }

    /// Like [`get_or_compute`](Self::get_or_compute), for factories that
    /// may legitimately produce no value
    ///
    /// A `None` from the factory is returned to the caller but never
    /// written to any tier; absence is not cached.
    pub async fn get_or_compute_opt<T, F, Fut, E>(
        &self,
        key: &str,
        factory: F,
        overrides: TtlOverrides,
        scope: CacheScope,
    ) -> Result<Option<T>, CacheError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<T>, E>>,
        E: Into<BoxError>,
    {
        if !self.usable(scope) {
            return factory().await.map_err(|e| CacheError::Factory(e.into()));
        }

        if let Some(value) = self.get_with_ttl::<T>(key, overrides.local, scope).await {
            return Ok(Some(value));
        }

        debug!(key, "no cache entry found; invoking factory");
        match factory().await.map_err(|e| CacheError::Factory(e.into()))? {
            Some(value) => {
                self.set(key, &value, overrides, scope).await;
                Ok(Some(value))
            }
            None => {
                debug!(key, "factory produced no value; absence is not cached");
                Ok(None)
            }
        }
    }

    /// Look up a value across tiers
    ///
    /// Returns `None` when caching is disabled, bypassed, or no tier
    /// holds a live entry. Tiers are probed in ascending order; a tier
    /// that errors or exceeds its timeout budget is logged and skipped,
    /// never aborting the scan.
    pub async fn get<T>(&self, key: &str, scope: CacheScope) -> Option<T>
    where
        T: DeserializeOwned,
    {
        self.get_with_ttl(key, None, scope).await
    }

    /// [`get`](Self::get) with a local-tier TTL cap applied to promotion
    ///
    /// When the hit comes from a slower tier, the value is copied into
    /// every faster tier with `ttl = min(local_ttl, remaining lifetime)`
    /// so fast tiers stay warm without outliving the source entry.
    pub async fn get_with_ttl<T>(
        &self,
        key: &str,
        local_ttl: Option<Duration>,
        scope: CacheScope,
    ) -> Option<T>
    where
        T: DeserializeOwned,
    {
        if !self.usable(scope) {
            return None;
        }

        let (hit_tier, entry, value) = self.probe::<T>(key).await?;

        if hit_tier > 0 {
            let remaining = entry.remaining();
            let ttl = match local_ttl {
                Some(cap) if cap < remaining => cap,
                _ => remaining,
            };
            // A zero cap means "do not cache here", same as in set
            if ttl.is_zero() {
                trace!(key, "zero ttl; skipping promotion");
            } else {
                self.promote(key, &entry.value, ttl, hit_tier).await;
            }
        }

        Some(value)
    }

    /// Probe tiers in ascending order; first live, decodable hit wins
    async fn probe<T>(&self, key: &str) -> Option<(usize, CacheEntry<Vec<u8>>, T)>
    where
        T: DeserializeOwned,
    {
        for (i, tier) in self.tiers.iter().enumerate() {
            let fetched = match timeout(tier.op_timeout, tier.store.get(key)).await {
                Ok(Ok(found)) => found,
                Ok(Err(e)) => {
                    warn!(tier = tier.store.name(), key, error = %e, "tier read failed");
                    continue;
                }
                Err(_) => {
                    warn!(
                        tier = tier.store.name(),
                        key,
                        budget = ?tier.op_timeout,
                        "tier read timed out"
                    );
                    continue;
                }
            };

            let Some(entry) = fetched else { continue };

            // Logically absent even if the store has not purged it yet
            if entry.is_expired() {
                continue;
            }

            match self.serializer.deserialize::<T>(&entry.value) {
                Ok(value) => return Some((i, entry, value)),
                Err(e) => {
                    // Probably a type mismatch with a previous deployment;
                    // treat this tier as a miss
                    warn!(tier = tier.store.name(), key, error = %e, "stored entry failed to decode");
                    continue;
                }
            }
        }

        None
    }

    /// Copy a slow-tier hit into every faster tier, best-effort
    async fn promote(&self, key: &str, bytes: &[u8], ttl: Duration, hit_tier: usize) {
        for tier in &self.tiers[..hit_tier] {
            let entry = CacheEntry::new(bytes.to_vec(), ttl);
            match timeout(tier.op_timeout, tier.store.set(key, entry, ttl)).await {
                Ok(Ok(())) => {
                    debug!(tier = tier.store.name(), key, ttl = ?ttl, "promoted entry");
                }
                Ok(Err(e)) => {
                    warn!(tier = tier.store.name(), key, error = %e, "promotion write failed");
                }
                Err(_) => {
                    warn!(
                        tier = tier.store.name(),
                        key,
                        budget = ?tier.op_timeout,
                        "promotion write timed out"
                    );
                }
            }
        }
    }

    /// Write a value across all tiers
    ///
    /// Per tier, the effective TTL is the override matching the tier's
    /// role, falling back to the tier default; a zero TTL skips the tier
    /// ("do not cache here"). Writes are independent: one tier's failure
    /// is logged and does not block the others.
    pub async fn set<T>(&self, key: &str, value: &T, overrides: TtlOverrides, scope: CacheScope)
    where
        T: Serialize,
    {
        if !self.usable(scope) {
            return;
        }

        let bytes = match self.serializer.serialize(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(key, error = %e, "value serialization failed; skipping cache write");
                return;
            }
        };

        for tier in self.tiers.iter() {
            let ttl = overrides.for_role(tier.role).unwrap_or(tier.default_ttl);
            if ttl.is_zero() {
                trace!(tier = tier.store.name(), key, "zero ttl; skipping tier");
                continue;
            }

            // Overwriting an existing entry is fine; whatever is there
            // was retrieved under an older TTL anyway
            let entry = CacheEntry::new(bytes.clone(), ttl);
            match timeout(tier.op_timeout, tier.store.set(key, entry, ttl)).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    warn!(tier = tier.store.name(), key, error = %e, "tier write failed");
                }
                Err(_) => {
                    warn!(
                        tier = tier.store.name(),
                        key,
                        budget = ?tier.op_timeout,
                        "tier write timed out"
                    );
                }
            }
        }
    }

    /// Remove keys from every tier
    ///
    /// Tiers are cleared strictly one at a time in descending order
    /// (slowest/longest-lived first): clearing the long-lived tier first
    /// prevents a concurrent reader from re-promoting a stale value out
    /// of a not-yet-cleared slow tier into an already-cleared fast tier.
    pub async fn remove(&self, keys: &[&str], scope: CacheScope) {
        if !self.usable(scope) {
            return;
        }

        for tier in self.tiers.iter().rev() {
            match timeout(tier.op_timeout, tier.store.remove(keys)).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    warn!(tier = tier.store.name(), error = %e, "tier removal failed");
                }
                Err(_) => {
                    warn!(
                        tier = tier.store.name(),
                        budget = ?tier.op_timeout,
                        "tier removal timed out"
                    );
                }
            }
        }
    }
}

impl<S> fmt::Debug for CacheService<S>
where
    S: Serializer,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tiers: Vec<&str> = self.tiers.iter().map(|t| t.store.name()).collect();
        f.debug_struct("CacheService")
            .field("tiers", &tiers)
            .field("serializer", &self.serializer.name())
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl<S> Clone for CacheService<S>
where
    S: Serializer,
{
    fn clone(&self) -> Self {
        Self {
            tiers: self.tiers.clone(),
            serializer: self.serializer.clone(),
            enabled: self.enabled,
        }
    }
}
