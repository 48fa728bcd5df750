//! Data types for the Pokemon TCG card catalog API.

use serde::{Deserialize, Serialize};

/// One card entry from the TCG catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcgCard {
    pub id: String,
    pub name: String,
    /// A card may map to multiple species; the first entry is the canonical
    /// one used for grouping. May be empty for cards not tied to a species.
    #[serde(default)]
    pub national_pokedex_numbers: Vec<u32>,
    pub images: CardImages,
    /// Free-text catalog rarity label ("Rare Holo", "Secret Rare", ...)
    #[serde(default)]
    pub rarity: Option<String>,
    /// Free-text tags, may include "Full Art"
    #[serde(default)]
    pub subtypes: Vec<String>,
    pub set: CardSet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardImages {
    pub small: String,
    pub large: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSet {
    pub id: String,
    pub name: String,
}

impl TcgCard {
    /// Lowercased "rarity subtypes" text used for priority matching
    pub fn rarity_text(&self) -> String {
        let rarity = self.rarity.as_deref().unwrap_or("").to_lowercase();
        let subtypes = self
            .subtypes
            .iter()
            .map(|st| st.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        format!("{} {}", rarity, subtypes)
    }

    /// A card counts as Full Art if one of its subtypes is "Full Art" or its
    /// rarity text mentions it.
    pub fn is_full_art(&self) -> bool {
        self.subtypes
            .iter()
            .any(|st| st.eq_ignore_ascii_case("full art"))
            || self
                .rarity
                .as_deref()
                .is_some_and(|r| r.to_lowercase().contains("full art"))
    }
}

/// Card catalog query response envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct TcgResponse {
    pub data: Vec<TcgCard>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub total_count: u32,
}
