//! In-process tier store

mod store;

pub use store::{MemoryConfig, MemoryStore};
