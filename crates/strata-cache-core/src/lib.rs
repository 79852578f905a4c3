//! strata-cache-core: Core traits and types for the strata-cache library
//!
//! This crate provides the foundational types and traits shared by the
//! tier implementations and the cache orchestrator.

mod error;
mod traits;
mod types;

pub use error::{BoxError, CacheError, Result};
pub use traits::*;
pub use types::*;
