//! Per-operation scope control

/// Per-logical-operation cache control
///
/// A transient escape hatch, not an invalidation mechanism: a bypassed
/// call computes fresh data and touches no tier, leaving stored entries
/// untouched. The scope is a plain per-call value and is never shared
/// across concurrent operations. Typically derived from a request
/// attribute (e.g. a "no-cache" header) by the embedding application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheScope {
    bypass: bool,
}

impl CacheScope {
    /// Scope that allows caching (the default)
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope that forces the operation to bypass every tier
    pub fn bypass() -> Self {
        Self { bypass: true }
    }

    /// Whether this operation must skip the cache entirely
    pub fn is_bypassed(&self) -> bool {
        self.bypass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allows_caching() {
        assert!(!CacheScope::new().is_bypassed());
        assert!(!CacheScope::default().is_bypassed());
    }

    #[test]
    fn test_bypass() {
        assert!(CacheScope::bypass().is_bypassed());
    }
}
