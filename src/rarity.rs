//! Rarity ranking for card candidates.
//!
//! Picks the "best" artwork among the cards the catalog returns for one
//! species: Full Art cards always come first, then everything else, each
//! group ordered by a fixed rarity priority list.

use crate::models::TcgCard;

/// Rarity priority, highest first. Matched as substrings against the
/// lowercased "rarity subtypes" text of a card.
const PRIORITY_RARITIES: [&str; 9] = [
    "full art",
    "illustration rare",
    "special illustration rare",
    "ultra rare",
    "secret rare",
    "hyper rare",
    "rainbow rare",
    "radiant rare",
    "amazing rare",
];

/// Position of the card in the priority list; cards matching no entry sort
/// after all matching cards.
fn priority_index(card: &TcgCard) -> usize {
    let text = card.rarity_text();
    PRIORITY_RARITIES
        .iter()
        .position(|rarity| text.contains(rarity))
        .unwrap_or(PRIORITY_RARITIES.len())
}

/// Select the best card among `candidates`, or `None` if there are none.
///
/// Full Art candidates precede all others; within each partition candidates
/// are ordered by the priority list with a stable sort, so ties keep their
/// original relative order. Deterministic and side-effect free.
pub fn select_best(candidates: &[TcgCard]) -> Option<&TcgCard> {
    let (mut full_art, mut other): (Vec<&TcgCard>, Vec<&TcgCard>) =
        candidates.iter().partition(|card| card.is_full_art());

    full_art.sort_by_key(|card| priority_index(card));
    other.sort_by_key(|card| priority_index(card));

    full_art.into_iter().chain(other).next()
}

#[cfg(test)]
#[path = "rarity_tests.rs"]
mod tests;
