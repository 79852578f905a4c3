//! Builder and validation for the cache orchestrator

use std::sync::Arc;
use std::time::Duration;

use strata_cache_core::{CacheError, JsonSerializer, Serializer, TierRole, TierStore};

use super::{CacheService, ConfiguredTier};

/// Default TTL for local (in-process) tiers
pub const DEFAULT_LOCAL_TTL: Duration = Duration::from_secs(15 * 60);

/// Default TTL for distributed (network-backed) tiers
pub const DEFAULT_DISTRIBUTED_TTL: Duration = Duration::from_secs(60 * 60);

/// Default per-operation timeout budget for a tier
pub const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(5);

/// Builder for [`CacheService`]
///
/// Tiers must be registered fastest/shortest-lived first; `build`
/// validates the ordering and every tier's policy, failing fast with
/// [`CacheError::Configuration`] before the service becomes usable.
pub struct CacheServiceBuilder<S = JsonSerializer>
where
    S: Serializer,
{
    tiers: Vec<ConfiguredTier>,
    serializer: S,
    enabled: bool,
}

impl CacheServiceBuilder<JsonSerializer> {
    /// Start with the default JSON serializer, caching enabled
    pub fn new() -> Self {
        Self {
            tiers: Vec::new(),
            serializer: JsonSerializer,
            enabled: true,
        }
    }
}

impl Default for CacheServiceBuilder<JsonSerializer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> CacheServiceBuilder<S>
where
    S: Serializer,
{
    /// Replace the serializer
    pub fn serializer<S2: Serializer>(self, serializer: S2) -> CacheServiceBuilder<S2> {
        CacheServiceBuilder {
            tiers: self.tiers,
            serializer,
            enabled: self.enabled,
        }
    }

    /// Globally enable or disable caching
    ///
    /// A disabled service never touches any tier; every read misses and
    /// every compute goes to the factory.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Register the next tier with explicit policy
    pub fn tier(
        mut self,
        store: impl TierStore,
        role: TierRole,
        default_ttl: Duration,
        op_timeout: Duration,
    ) -> Self {
        self.tiers.push(ConfiguredTier {
            store: Arc::new(store),
            role,
            default_ttl,
            op_timeout,
        });
        self
    }

    /// Register an in-process tier with default policy (15 min TTL, 5 s budget)
    pub fn local_tier(self, store: impl TierStore) -> Self {
        self.tier(store, TierRole::Local, DEFAULT_LOCAL_TTL, DEFAULT_OP_TIMEOUT)
    }

    /// Register a network-backed tier with default policy (60 min TTL, 5 s budget)
    pub fn distributed_tier(self, store: impl TierStore) -> Self {
        self.tier(
            store,
            TierRole::Distributed,
            DEFAULT_DISTRIBUTED_TTL,
            DEFAULT_OP_TIMEOUT,
        )
    }

    /// Validate the registry and construct the service
    pub fn build(self) -> Result<CacheService<S>, CacheError> {
        if self.enabled && self.tiers.is_empty() {
            return Err(CacheError::Configuration(
                "caching is enabled but no tiers are registered".to_string(),
            ));
        }

        for tier in &self.tiers {
            if tier.default_ttl.is_zero() {
                return Err(CacheError::Configuration(format!(
                    "tier '{}' has a zero default ttl",
                    tier.store.name()
                )));
            }
            if tier.op_timeout.is_zero() {
                return Err(CacheError::Configuration(format!(
                    "tier '{}' has a zero operation timeout",
                    tier.store.name()
                )));
            }
        }

        // Ordering invariant: fastest/shortest-lived first
        for pair in self.tiers.windows(2) {
            if pair[0].default_ttl > pair[1].default_ttl {
                return Err(CacheError::Configuration(format!(
                    "tier '{}' outlives the later tier '{}'; register tiers from shortest- to longest-lived",
                    pair[0].store.name(),
                    pair[1].store.name()
                )));
            }
        }

        Ok(CacheService::from_parts(
            self.tiers,
            self.serializer,
            self.enabled,
        ))
    }
}
