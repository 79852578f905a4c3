//! Redis tier store backed by a bb8 connection pool

use async_trait::async_trait;
use bb8::{Pool, PooledConnection};
use bb8_redis::RedisConnectionManager;
use redis::AsyncCommands;
use std::time::Duration;

use strata_cache_core::{CacheEntry, CacheError, TierStore};

use super::config::RedisConfig;

/// Network-backed tier store
///
/// Envelopes are JSON-serialized whole so value bytes and expiry
/// round-trip together; the store-level `EX` expiry mirrors the logical
/// TTL so Redis self-purges. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct RedisStore {
    pool: Pool<RedisConnectionManager>,
    config: RedisConfig,
}

impl RedisStore {
    /// Create a new Redis store, establishing the connection pool
    pub async fn new(config: RedisConfig) -> Result<Self, CacheError> {
        let manager = RedisConnectionManager::new(config.url.as_str())
            .map_err(|e| CacheError::Configuration(format!("invalid redis url: {e}")))?;

        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|e| CacheError::TierTransport(e.to_string()))?;

        Ok(Self { pool, config })
    }

    fn prefixed_key(&self, key: &str) -> String {
        prefixed(self.config.key_prefix.as_deref(), key)
    }

    async fn connection(&self) -> Result<PooledConnection<'_, RedisConnectionManager>, CacheError> {
        self.pool
            .get()
            .await
            .map_err(|e| CacheError::TierTransport(e.to_string()))
    }
}

fn prefixed(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}:{}", prefix, key),
        None => key.to_string(),
    }
}

#[async_trait]
impl TierStore for RedisStore {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> Result<Option<CacheEntry<Vec<u8>>>, CacheError> {
        let mut conn = self.connection().await?;
        let prefixed = self.prefixed_key(key);

        let bytes: Option<Vec<u8>> = conn
            .get(&prefixed)
            .await
            .map_err(|e| CacheError::TierTransport(e.to_string()))?;

        match bytes {
            Some(data) => {
                let entry: CacheEntry<Vec<u8>> = serde_json::from_slice(&data)
                    .map_err(|e| CacheError::Deserialization(e.to_string()))?;
                Ok(Some(entry))
            }
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        key: &str,
        entry: CacheEntry<Vec<u8>>,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let serialized =
            serde_json::to_vec(&entry).map_err(|e| CacheError::Serialization(e.to_string()))?;
        let prefixed = self.prefixed_key(key);

        let mut conn = self.connection().await?;

        // EX of 0 is rejected by Redis; round sub-second TTLs up
        let ttl_secs = ttl.as_secs().max(1);
        let _: () = conn
            .set_ex(&prefixed, &serialized, ttl_secs)
            .await
            .map_err(|e| CacheError::TierTransport(e.to_string()))?;

        Ok(())
    }

    async fn remove(&self, keys: &[&str]) -> Result<(), CacheError> {
        if keys.is_empty() {
            return Ok(());
        }

        let prefixed: Vec<String> = keys.iter().map(|k| self.prefixed_key(k)).collect();
        let mut conn = self.connection().await?;

        let _: u64 = conn
            .del(&prefixed)
            .await
            .map_err(|e| CacheError::TierTransport(e.to_string()))?;

        tracing::debug!(count = keys.len(), "removed keys from redis tier");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_key_layout() {
        assert_eq!(prefixed(Some("app"), "u:1"), "app:u:1");
        assert_eq!(prefixed(None, "u:1"), "u:1");
    }

    #[test]
    fn test_envelope_wire_format_roundtrip() {
        let entry = CacheEntry::new(b"payload".to_vec(), Duration::from_secs(3600));
        let wire = serde_json::to_vec(&entry).unwrap();
        let back: CacheEntry<Vec<u8>> = serde_json::from_slice(&wire).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_corrupt_envelope_is_deserialization_error() {
        let err = serde_json::from_slice::<CacheEntry<Vec<u8>>>(b"{\"not\":\"an entry\"}")
            .map_err(|e| CacheError::Deserialization(e.to_string()))
            .unwrap_err();
        assert!(matches!(err, CacheError::Deserialization(_)));
    }
}
