//! Per-call TTL overrides

use crate::TierRole;
use std::time::Duration;

/// Caller-supplied TTL overrides for a single set or compute operation
///
/// Each override applies to the tiers registered under the matching
/// role; tiers without a matching override fall back to their configured
/// default. An explicit `Duration::ZERO` means "do not cache in tiers of
/// that role" for this call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TtlOverrides {
    /// Override for in-process (local) tiers
    pub local: Option<Duration>,
    /// Override for network-backed (distributed) tiers
    pub distributed: Option<Duration>,
}

impl TtlOverrides {
    /// No overrides; every tier uses its configured default
    pub fn none() -> Self {
        Self::default()
    }

    /// Set the local-tier override
    pub fn local(mut self, ttl: Duration) -> Self {
        self.local = Some(ttl);
        self
    }

    /// Set the distributed-tier override
    pub fn distributed(mut self, ttl: Duration) -> Self {
        self.distributed = Some(ttl);
        self
    }

    /// The override applying to a tier of the given role, if any
    pub fn for_role(&self, role: TierRole) -> Option<Duration> {
        match role {
            TierRole::Local => self.local,
            TierRole::Distributed => self.distributed,
        }
    }
}

impl From<Duration> for TtlOverrides {
    /// A bare duration overrides the local tiers only
    fn from(ttl: Duration) -> Self {
        TtlOverrides::none().local(ttl)
    }
}
