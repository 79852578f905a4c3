//! Cache entry envelope

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

/// A cached value together with its absolute expiry instant
///
/// The envelope is what crosses tier boundaries: networked tiers
/// serialize it whole, so value and expiry round-trip together. An entry
/// is logically absent once `expires_at` has passed, regardless of
/// whether the backing store has physically purged it yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The cached value
    pub value: T,
    /// Absolute instant after which the entry no longer counts
    pub expires_at: SystemTime,
}

impl<T> CacheEntry<T> {
    /// Create an entry expiring `ttl` from now
    pub fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: SystemTime::now() + ttl,
        }
    }

    /// Create an entry with an explicit expiry instant
    pub fn expiring_at(value: T, expires_at: SystemTime) -> Self {
        Self { value, expires_at }
    }

    /// Check if the entry has logically expired
    pub fn is_expired(&self) -> bool {
        SystemTime::now() >= self.expires_at
    }

    /// Remaining lifetime, saturating to zero once expired
    pub fn remaining(&self) -> Duration {
        self.expires_at
            .duration_since(SystemTime::now())
            .unwrap_or_default()
    }

    /// Map the value, keeping the expiry
    pub fn map<U, F>(self, f: F) -> CacheEntry<U>
    where
        F: FnOnce(T) -> U,
    {
        CacheEntry {
            value: f(self.value),
            expires_at: self.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_entry_is_live() {
        let entry = CacheEntry::new("v".to_string(), Duration::from_secs(60));
        assert!(!entry.is_expired());
        assert!(entry.remaining() > Duration::from_secs(55));
        assert!(entry.remaining() <= Duration::from_secs(60));
    }

    #[test]
    fn test_past_expiry_is_absent() {
        let entry = CacheEntry::expiring_at(42u32, SystemTime::now() - Duration::from_secs(1));
        assert!(entry.is_expired());
        assert_eq!(entry.remaining(), Duration::ZERO);
    }

    #[test]
    fn test_map_keeps_expiry() {
        let at = SystemTime::now() + Duration::from_secs(30);
        let entry = CacheEntry::expiring_at(2u32, at).map(|v| v * 2);
        assert_eq!(entry.value, 4);
        assert_eq!(entry.expires_at, at);
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_envelope_roundtrip() {
        let entry = CacheEntry::new(vec![1u8, 2, 3], Duration::from_secs(600));
        let json = serde_json::to_vec(&entry).unwrap();
        let back: CacheEntry<Vec<u8>> = serde_json::from_slice(&json).unwrap();
        assert_eq!(back.value, entry.value);
        assert_eq!(back.expires_at, entry.expires_at);
    }
}
