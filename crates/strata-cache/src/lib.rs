//! strata-cache: Multi-tier read-through/write-through cache orchestrator
//!
//! Resolves reads by probing an ordered sequence of cache tiers
//! (fastest/shortest-lived first), computes missing values via a
//! caller-supplied factory, writes results across tiers with independent
//! TTLs, promotes slow-tier hits back into fast tiers, and removes keys
//! across tiers slowest-first to avoid stale re-promotion races.
//!
//! No tier fault (timeout, transport error, serialization mismatch)
//! ever reaches the caller; a degraded cache behaves as "always
//! compute". Only a build-time configuration error and the caller's own
//! factory error cross the boundary.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use strata_cache::prelude::*;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let cache = CacheService::builder()
//!         .local_tier(MemoryStore::with_defaults())
//!         .build()?;
//!
//!     let user: String = cache
//!         .get_or_compute(
//!             "u:1",
//!             || async { Ok::<_, std::io::Error>("alice".to_string()) },
//!             TtlOverrides::none().local(Duration::from_secs(300)),
//!             CacheScope::new(),
//!         )
//!         .await?;
//!
//!     println!("{user}");
//!     Ok(())
//! }
//! ```

mod service;

// Re-export core
pub use strata_cache_core::*;

// Re-export tier stores
#[cfg(feature = "memory")]
pub use strata_cache_storage::{MemoryConfig, MemoryStore};

#[cfg(feature = "redis")]
pub use strata_cache_storage::{RedisConfig, RedisStore};

// Export the orchestrator
pub use service::{CacheService, CacheServiceBuilder};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        CacheError, CacheScope, CacheService, CacheServiceBuilder, JsonSerializer, Result,
        Serializer, TierRole, TierStore, TtlOverrides,
    };

    #[cfg(feature = "memory")]
    pub use crate::{MemoryConfig, MemoryStore};

    #[cfg(feature = "redis")]
    pub use crate::{RedisConfig, RedisStore};

    #[cfg(feature = "msgpack")]
    pub use crate::MsgPackSerializer;
}
