//! Resolution facade composing cache, fetch client and rarity ranking.
//!
//! Public entry points for card lookups. Cached keys are served without
//! network; misses are fetched, ranked and written to both cache layers.
//! Fetch failures are logged and cached as "no card found" so the UI never
//! sees an error, only a card or an explicit none. A fresh resolution after
//! a failure requires [`CardResolver::invalidate_all`].

use crate::api::TcgClient;
use crate::cache::{CacheStore, CardCache};
use crate::models::TcgCard;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Mutations within this window coalesce into a single durable save
const SAVE_DEBOUNCE: Duration = Duration::from_secs(1);

/// Public entry point for card resolution. Cheap to clone; all clones
/// share one cache.
#[derive(Debug, Clone)]
pub struct CardResolver {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    client: TcgClient,
    cache: Mutex<CardCache>,
    store: CacheStore,
    /// Pending debounced save, aborted and rescheduled on each mutation
    save_task: Mutex<Option<JoinHandle<()>>>,
    /// Per-key locks so concurrent resolutions of the same number issue
    /// only one fetch
    in_flight: Mutex<HashMap<u32, Arc<tokio::sync::Mutex<()>>>>,
    /// Bumped on invalidation; a saver scheduled under an older generation
    /// must not write its stale snapshot back to disk
    generation: AtomicU64,
}

impl Inner {
    /// Persist the cache, unless the cache was invalidated after this save
    /// was scheduled. The write happens under the cache lock so it cannot
    /// interleave with an invalidation.
    fn save_now(&self, generation: u64) {
        let cache = self.cache.lock().unwrap();
        if self.generation.load(Ordering::SeqCst) != generation {
            log::debug!("Skipping cache save scheduled before invalidation");
            return;
        }
        if let Err(e) = self.store.save(cache.entries()) {
            log::warn!("Failed to save card cache: {}", e);
        }
    }
}

impl CardResolver {
    /// Build a resolver, loading previously persisted resolutions from the
    /// durable store.
    pub fn new(client: TcgClient, store: CacheStore) -> Self {
        let cache = CardCache::from_entries(store.load());
        Self {
            inner: Arc::new(Inner {
                client,
                cache: Mutex::new(cache),
                store,
                save_task: Mutex::new(None),
                in_flight: Mutex::new(HashMap::new()),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Cached resolution for a key, if present. Outer `None` means "never
    /// queried".
    fn cached(&self, number: u32) -> Option<Option<TcgCard>> {
        self.inner
            .cache
            .lock()
            .unwrap()
            .get(number)
            .map(|card| card.cloned())
    }

    /// Resolve the best card for one Pokedex number.
    ///
    /// Served from cache when present; otherwise fetched from the catalog
    /// and written to both cache layers. Fetch failures resolve to `None`.
    pub async fn resolve_card(&self, number: u32) -> Option<TcgCard> {
        if let Some(cached) = self.cached(number) {
            log::debug!("Card #{} served from cache", number);
            return cached;
        }

        let key_lock = {
            let mut in_flight = self.inner.in_flight.lock().unwrap();
            Arc::clone(in_flight.entry(number).or_default())
        };
        let guard = key_lock.lock().await;

        // Another caller may have resolved this number while we waited
        if let Some(cached) = self.cached(number) {
            log::debug!("Card #{} resolved by a concurrent caller", number);
            return cached;
        }

        let card = match self.inner.client.fetch_one(number).await {
            Ok(card) => card,
            Err(e) => {
                log::warn!("Failed to fetch card for #{}: {}", number, e);
                None
            }
        };

        self.inner.cache.lock().unwrap().insert(number, card.clone());
        self.schedule_save();

        drop(guard);
        self.inner.in_flight.lock().unwrap().remove(&number);

        card
    }

    /// Resolve the best card for every Pokedex number in `[start, end]`.
    ///
    /// The returned map covers the whole range, with an explicit `None`
    /// for numbers without a card. Fully cached ranges return without
    /// network; otherwise one catalog query covers the span of missing
    /// numbers, and a failed query caches every missing number as `None`.
    pub async fn resolve_card_range(
        &self,
        start: u32,
        end: u32,
    ) -> HashMap<u32, Option<TcgCard>> {
        let mut results = HashMap::new();
        let mut missing = Vec::new();
        {
            let mut cache = self.inner.cache.lock().unwrap();
            for number in start..=end {
                match cache.get(number) {
                    Some(card) => {
                        results.insert(number, card.cloned());
                    }
                    None => missing.push(number),
                }
            }
        }

        if missing.is_empty() {
            log::debug!(
                "All {} cards in range {}-{} served from cache",
                results.len(),
                start,
                end
            );
            return results;
        }

        log::info!(
            "Resolving {} missing cards of {} in range {}-{}",
            missing.len(),
            end - start + 1,
            start,
            end
        );

        // missing is non-empty and ascending here
        let lo = missing[0];
        let hi = missing[missing.len() - 1];

        let fetched = match self.inner.client.fetch_range(lo, hi).await {
            Ok(fetched) => fetched,
            Err(e) => {
                log::warn!("Failed to fetch cards for range {}-{}: {}", lo, hi, e);
                HashMap::new()
            }
        };

        {
            let mut cache = self.inner.cache.lock().unwrap();
            for &number in &missing {
                let card = fetched.get(&number).cloned().flatten();
                cache.insert(number, card.clone());
                results.insert(number, card);
            }
        }
        self.schedule_save();

        results
    }

    /// Drop every cached resolution, in memory and on disk. Subsequent
    /// lookups behave as first-use.
    pub fn invalidate_all(&self) {
        if let Some(task) = self.inner.save_task.lock().unwrap().take() {
            task.abort();
        }
        // The abort is a no-op for a saver already past its sleep. Bumping
        // the generation and removing the blob under the cache lock keeps
        // such a saver from writing its pre-invalidation snapshot back.
        let mut cache = self.inner.cache.lock().unwrap();
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        cache.clear();
        self.inner.store.remove();
        log::info!("Card cache invalidated");
    }

    /// Persist the cache immediately, cancelling any pending debounced
    /// save. Call before process exit.
    pub fn flush(&self) {
        if let Some(task) = self.inner.save_task.lock().unwrap().take() {
            task.abort();
        }
        self.inner
            .save_now(self.inner.generation.load(Ordering::SeqCst));
    }

    /// Schedule a durable save after the debounce window, replacing any
    /// save already pending so rapid mutations coalesce into one write.
    fn schedule_save(&self) {
        let inner = Arc::clone(&self.inner);
        let generation = self.inner.generation.load(Ordering::SeqCst);
        let mut slot = self.inner.save_task.lock().unwrap();
        if let Some(task) = slot.take() {
            task.abort();
        }
        *slot = Some(tokio::spawn(async move {
            tokio::time::sleep(SAVE_DEBOUNCE).await;
            inner.save_now(generation);
        }));
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
