//! Async client for the Pokemon TCG card catalog API.
//!
//! Single-card lookups try a Full Art query first and fall back to an
//! unfiltered query; range lookups issue one interval query and group the
//! result by canonical Pokedex number. The base URL is injected so tests
//! can point the client at a mock server.

use crate::error::{TcgError, TcgResult};
use crate::models::{TcgCard, TcgResponse};
use crate::rarity;
use std::collections::HashMap;
use std::time::Duration;

/// Production card catalog endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.pokemontcg.io/v2";

/// Hard timeout for catalog requests; the API can be slow
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// For Gen 1 ranges, restrict to the "151" set for consistent artwork
const GEN1_SET_FILTER: &str = " set.id:sv3pt5";

/// Client configuration
#[derive(Debug, Clone)]
pub struct TcgConfig {
    pub base_url: String,
    /// Sent as `X-Api-Key` when present
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for TcgConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP client for card catalog queries
#[derive(Debug)]
pub struct TcgClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl TcgClient {
    pub fn new(config: TcgConfig) -> TcgResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("tcg-resolver/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Run one catalog query, newest sets first
    async fn query_cards(&self, query: &str, page_size: u32) -> TcgResult<Vec<TcgCard>> {
        let url = format!("{}/cards", self.base_url);

        log::debug!("Querying card catalog: q={}", query);

        let mut request = self
            .http
            .get(&url)
            .query(&[("q", query), ("orderBy", "-set.releaseDate")])
            .query(&[("pageSize", page_size)]);

        if let Some(ref key) = self.api_key {
            request = request.header("X-Api-Key", key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(TcgError::HttpStatus(response.status()));
        }

        let body: TcgResponse = response.json().await?;
        Ok(body.data)
    }

    /// Fetch the best card for a single Pokedex number.
    ///
    /// Tries a Full Art query first; when that matches nothing, retries
    /// without the subtype filter. Returns `Ok(None)` when the catalog has
    /// no card at all for the number.
    pub async fn fetch_one(&self, number: u32) -> TcgResult<Option<TcgCard>> {
        let full_art_query = format!("nationalPokedexNumbers:{} subtypes:\"Full Art\"", number);

        let mut candidates = self.query_cards(&full_art_query, 10).await?;

        if candidates.is_empty() {
            log::debug!(
                "No Full Art card for #{}, retrying without the subtype filter",
                number
            );
            let fallback_query = format!("nationalPokedexNumbers:{}", number);
            candidates = self.query_cards(&fallback_query, 20).await?;
        }

        Ok(rarity::select_best(&candidates).cloned())
    }

    /// Fetch the best card for every Pokedex number in `[start, end]`.
    ///
    /// The returned map covers the whole range; numbers the catalog has no
    /// card for map to `None`. Without an API key the catalog rejects large
    /// queries, so the range resolves to all-none immediately.
    pub async fn fetch_range(
        &self,
        start: u32,
        end: u32,
    ) -> TcgResult<HashMap<u32, Option<TcgCard>>> {
        if self.api_key.is_none() {
            log::warn!(
                "No TCG API key configured, range {}-{} resolves to no cards",
                start,
                end
            );
            return Ok((start..=end).map(|n| (n, None)).collect());
        }

        let set_filter = if start >= 1 && end <= 151 {
            GEN1_SET_FILTER
        } else {
            ""
        };
        let query = format!("nationalPokedexNumbers:[{} TO {}]{}", start, end, set_filter);

        let cards = self.query_cards(&query, 250).await?;

        // Group by canonical Pokedex number; cards not tied to a species
        // are skipped
        let mut by_number: HashMap<u32, Vec<TcgCard>> = HashMap::new();
        for card in cards {
            if let Some(&number) = card.national_pokedex_numbers.first() {
                by_number.entry(number).or_default().push(card);
            }
        }

        let mut results = HashMap::new();
        for number in start..=end {
            let best = by_number
                .get(&number)
                .and_then(|group| rarity::select_best(group))
                .cloned();
            results.insert(number, best);
        }

        let found = results.values().filter(|card| card.is_some()).count();
        log::info!(
            "Range {}-{}: {} cards found of {} numbers",
            start,
            end,
            found,
            results.len()
        );

        Ok(results)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
