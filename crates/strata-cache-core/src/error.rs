//! Error types for cache operations

use std::time::Duration;
use thiserror::Error;

/// Boxed error type produced by caller-supplied factories
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for all cache operations
///
/// Only `Configuration` (at build time) and `Factory` (from
/// `get_or_compute`) ever reach the caller. Every other variant is
/// contained inside the orchestrator and downgraded to a miss or a
/// skipped write.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Invalid tier setup detected at construction
    #[error("invalid cache configuration: {0}")]
    Configuration(String),

    /// A single tier operation exceeded its timeout budget
    #[error("tier '{tier}' timed out after {budget:?}")]
    TierTimeout {
        /// Name of the tier that timed out
        tier: String,
        /// The budget that elapsed
        budget: Duration,
    },

    /// Transport or store-level failure in a single tier
    #[error("tier transport error: {0}")]
    TierTransport(String),

    /// Serialization failed
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization failed (e.g. type mismatch in a stored envelope)
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// The caller-supplied factory failed
    #[error("factory invocation failed")]
    Factory(#[source] BoxError),
}

impl CacheError {
    /// True for the variants that are contained within the orchestrator
    /// and never surfaced to the caller.
    pub fn is_tier_fault(&self) -> bool {
        matches!(
            self,
            CacheError::TierTimeout { .. }
                | CacheError::TierTransport(_)
                | CacheError::Serialization(_)
                | CacheError::Deserialization(_)
        )
    }
}

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CacheError::Configuration("no tiers".to_string());
        assert_eq!(err.to_string(), "invalid cache configuration: no tiers");

        let err = CacheError::TierTimeout {
            tier: "redis".to_string(),
            budget: Duration::from_secs(5),
        };
        assert_eq!(err.to_string(), "tier 'redis' timed out after 5s");

        let err = CacheError::Deserialization("type mismatch".to_string());
        assert_eq!(err.to_string(), "deserialization error: type mismatch");
    }

    #[test]
    fn test_factory_source_is_preserved() {
        let inner: BoxError = "upstream exploded".into();
        let err = CacheError::Factory(inner);

        let source = std::error::Error::source(&err).expect("factory error carries a source");
        assert_eq!(source.to_string(), "upstream exploded");
    }

    #[test]
    fn test_tier_fault_classification() {
        assert!(CacheError::TierTransport("conn refused".into()).is_tier_fault());
        assert!(CacheError::TierTimeout {
            tier: "memory".into(),
            budget: Duration::from_millis(50)
        }
        .is_tier_fault());
        assert!(!CacheError::Configuration("bad".into()).is_tier_fault());
        assert!(!CacheError::Factory("boom".into()).is_tier_fault());
    }
}
