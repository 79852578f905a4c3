//! Core traits for cache operations

mod serializer;
mod tier;

pub use serializer::Serializer;
pub use tier::{TierRole, TierStore};

#[cfg(feature = "json")]
pub use serializer::JsonSerializer;

#[cfg(feature = "msgpack")]
pub use serializer::MsgPackSerializer;
