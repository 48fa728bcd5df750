//! In-memory lookup cache from Pokedex number to resolved card.
//!
//! Distinguishes three states per key: absent (never queried), resolved to
//! a card, and resolved to an explicit "no card found". Only "absent"
//! should trigger a fetch.

use crate::cache::store::CacheEntry;
use crate::models::TcgCard;
use std::collections::HashMap;

/// Session-scoped source of truth for card resolutions, mirrored to the
/// durable [`CacheStore`](crate::cache::CacheStore) by the resolver.
#[derive(Debug, Default)]
pub struct CardCache {
    entries: HashMap<u32, CacheEntry>,
}

impl CardCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from entries previously loaded from the durable store
    pub fn from_entries(entries: HashMap<u32, CacheEntry>) -> Self {
        Self { entries }
    }

    /// Three-state lookup: `None` means the key was never queried (or its
    /// entry went stale); `Some(None)` is a confirmed "no card found".
    /// Entries past their expiry are purged on read.
    pub fn get(&mut self, number: u32) -> Option<Option<&TcgCard>> {
        let now = chrono::Utc::now().timestamp_millis();
        if let Some(entry) = self.entries.get(&number) {
            if !entry.is_valid(now) {
                log::debug!("Card cache entry for #{} went stale, purging", number);
                self.entries.remove(&number);
                return None;
            }
        } else {
            return None;
        }
        self.entries.get(&number).map(|entry| entry.card.as_ref())
    }

    /// True if the key has a valid resolution (to a card or to none)
    pub fn contains(&mut self, number: u32) -> bool {
        self.get(number).is_some()
    }

    /// Record a resolution outcome, stamping the entry with the current time
    pub fn insert(&mut self, number: u32, card: Option<TcgCard>) {
        self.entries.insert(number, CacheEntry::new(card));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of all entries, for persistence
    pub fn entries(&self) -> &HashMap<u32, CacheEntry> {
        &self.entries
    }
}
