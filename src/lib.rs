//! Pokemon TCG card resolution with rarity ranking and a persistent cache.
//!
//! Given a national Pokedex number (or a range of them), this crate queries
//! the Pokemon TCG card catalog, picks the best artwork by a fixed rarity
//! priority (Full Art first), and caches results in memory backed by a JSON
//! blob on disk with 7-day expiry and schema versioning.

pub mod api;
pub mod cache;
pub mod error;
pub mod models;
pub mod rarity;
pub mod resolver;

// Re-export commonly used items
pub use api::{TcgClient, TcgConfig, DEFAULT_BASE_URL};
pub use cache::{CacheEntry, CacheStore, CardCache, CACHE_VERSION};
pub use error::{TcgError, TcgResult};
pub use models::{CardImages, CardSet, TcgCard};
pub use rarity::select_best;
pub use resolver::CardResolver;
