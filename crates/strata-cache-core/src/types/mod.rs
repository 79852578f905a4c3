//! Core types for cache operations

mod entry;
mod scope;
mod ttl;

pub use entry::CacheEntry;
pub use scope::CacheScope;
pub use ttl::TtlOverrides;
