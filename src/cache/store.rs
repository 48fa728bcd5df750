//! Durable cache store: the whole in-memory card cache serialized as one
//! JSON blob on disk.
//!
//! Persistence is best-effort. A missing, unreadable or unparseable blob
//! loads as an empty cache; entries with a stale schema version or past
//! their expiry are dropped during load and disappear from disk on the
//! next save.

use crate::error::TcgResult;
use crate::models::TcgCard;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Bump when the serialized entry shape changes; mismatched entries are
/// dropped on load.
pub const CACHE_VERSION: &str = "v1";

/// Entries older than 7 days are treated as absent.
const EXPIRY_MS: i64 = 7 * 24 * 60 * 60 * 1000;

const BLOB_FILE: &str = "card_cache.json";

/// One cached resolution outcome. `card: None` records a confirmed
/// "looked up, found nothing" (or a failed fetch), distinct from a key
/// that was never queried at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub card: Option<TcgCard>,
    /// Insert time, Unix milliseconds
    pub timestamp: i64,
    pub version: String,
}

impl CacheEntry {
    pub fn new(card: Option<TcgCard>) -> Self {
        Self {
            card,
            timestamp: chrono::Utc::now().timestamp_millis(),
            version: CACHE_VERSION.to_string(),
        }
    }

    /// An entry is valid iff its version matches and it has not expired.
    /// An entry aged exactly the expiry window is still valid.
    pub fn is_valid(&self, now_ms: i64) -> bool {
        self.version == CACHE_VERSION && now_ms - self.timestamp <= EXPIRY_MS
    }
}

/// Whole-blob JSON persistence for the card cache
#[derive(Debug)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    /// Store blob under the platform cache directory
    pub fn new() -> Self {
        let dir = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tcg_resolver");
        Self::in_dir(&dir)
    }

    /// Store blob under an explicit directory (used by tests)
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(BLOB_FILE),
        }
    }

    /// Load all valid entries from disk. Never fails the caller: any read
    /// or parse problem yields an empty map.
    pub fn load(&self) -> HashMap<u32, CacheEntry> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No card cache blob yet, starting empty");
                return HashMap::new();
            }
            Err(e) => {
                log::warn!("Failed to read card cache blob, starting empty: {}", e);
                return HashMap::new();
            }
        };

        let raw: HashMap<u32, CacheEntry> = match serde_json::from_str(&content) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Failed to parse card cache blob, starting empty: {}", e);
                return HashMap::new();
            }
        };

        let now = chrono::Utc::now().timestamp_millis();
        let total = raw.len();
        let entries: HashMap<u32, CacheEntry> = raw
            .into_iter()
            .filter(|(_, entry)| entry.is_valid(now))
            .collect();

        log::info!(
            "Loaded card cache: {} valid, {} expired or stale",
            entries.len(),
            total - entries.len()
        );
        entries
    }

    /// Write all entries to disk, creating parent directories as needed.
    pub fn save(&self, entries: &HashMap<u32, CacheEntry>) -> TcgResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string(entries)?;
        std::fs::write(&self.path, content)?;

        log::debug!("Saved card cache with {} entries", entries.len());
        Ok(())
    }

    /// Delete the blob (cache invalidation). Best-effort.
    pub fn remove(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => log::debug!("Removed card cache blob"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Failed to remove card cache blob: {}", e),
        }
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CardImages, CardSet};
    use tempfile::TempDir;

    fn sample_card(number: u32) -> TcgCard {
        TcgCard {
            id: format!("base1-{}", number),
            name: format!("Pokemon {}", number),
            national_pokedex_numbers: vec![number],
            images: CardImages {
                small: "https://example.com/small.png".to_string(),
                large: "https://example.com/large.png".to_string(),
            },
            rarity: Some("Rare Holo".to_string()),
            subtypes: vec!["Basic".to_string()],
            set: CardSet {
                id: "base1".to_string(),
                name: "Base".to_string(),
            },
        }
    }

    #[test]
    fn save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::in_dir(temp_dir.path());

        let mut entries = HashMap::new();
        entries.insert(6, CacheEntry::new(Some(sample_card(6))));
        entries.insert(7, CacheEntry::new(None));
        store.save(&entries).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(
            loaded.get(&6).unwrap().card.as_ref().unwrap().id,
            "base1-6"
        );
        // Negative entry survives as an explicit "no card found"
        assert!(loaded.get(&7).unwrap().card.is_none());
    }

    #[test]
    fn load_missing_file_returns_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::in_dir(temp_dir.path());

        assert!(store.load().is_empty());
    }

    #[test]
    fn load_corrupt_blob_returns_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::in_dir(temp_dir.path());
        std::fs::write(temp_dir.path().join(BLOB_FILE), "not json{{").unwrap();

        assert!(store.load().is_empty());
    }

    #[test]
    fn expired_entries_dropped_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::in_dir(temp_dir.path());

        let eight_days_ago =
            chrono::Utc::now().timestamp_millis() - 8 * 24 * 60 * 60 * 1000;
        let mut entries = HashMap::new();
        entries.insert(
            1,
            CacheEntry {
                card: Some(sample_card(1)),
                timestamp: eight_days_ago,
                version: CACHE_VERSION.to_string(),
            },
        );
        entries.insert(2, CacheEntry::new(Some(sample_card(2))));
        store.save(&entries).unwrap();

        let loaded = store.load();
        assert!(!loaded.contains_key(&1));
        assert!(loaded.contains_key(&2));
    }

    #[test]
    fn entry_at_exact_expiry_boundary_is_still_valid() {
        let now = chrono::Utc::now().timestamp_millis();
        let entry = CacheEntry {
            card: None,
            timestamp: now - EXPIRY_MS,
            version: CACHE_VERSION.to_string(),
        };

        assert!(entry.is_valid(now));
        // One millisecond past the window it expires
        assert!(!entry.is_valid(now + 1));
    }

    #[test]
    fn version_mismatch_dropped_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::in_dir(temp_dir.path());

        let mut entries = HashMap::new();
        entries.insert(
            25,
            CacheEntry {
                card: Some(sample_card(25)),
                timestamp: chrono::Utc::now().timestamp_millis(),
                version: "v0".to_string(),
            },
        );
        store.save(&entries).unwrap();

        assert!(store.load().is_empty());
    }

    #[test]
    fn remove_deletes_blob() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::in_dir(temp_dir.path());

        let mut entries = HashMap::new();
        entries.insert(4, CacheEntry::new(None));
        store.save(&entries).unwrap();

        store.remove();
        assert!(store.load().is_empty());
    }

    #[test]
    fn remove_on_missing_blob_is_harmless() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::in_dir(temp_dir.path());

        store.remove();
    }

    #[test]
    fn blob_uses_string_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::in_dir(temp_dir.path());

        let mut entries = HashMap::new();
        entries.insert(151, CacheEntry::new(None));
        store.save(&entries).unwrap();

        let raw = std::fs::read_to_string(temp_dir.path().join(BLOB_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.get("151").is_some());
    }
}
