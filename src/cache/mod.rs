//! Two-level card cache: in-memory lookup map mirrored to a JSON blob on disk

pub mod card_cache;
pub mod store;

pub use card_cache::CardCache;
pub use store::{CacheEntry, CacheStore, CACHE_VERSION};
