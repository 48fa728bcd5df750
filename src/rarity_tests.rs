//! Tests for the rarity ranker.

use super::select_best;
use crate::models::{CardImages, CardSet, TcgCard};

/// Helper: builds a card with the given id, rarity and subtypes
fn card(id: &str, rarity: Option<&str>, subtypes: &[&str]) -> TcgCard {
    TcgCard {
        id: id.to_string(),
        name: format!("Card {}", id),
        national_pokedex_numbers: vec![6],
        images: CardImages {
            small: "https://example.com/small.png".to_string(),
            large: "https://example.com/large.png".to_string(),
        },
        rarity: rarity.map(|r| r.to_string()),
        subtypes: subtypes.iter().map(|st| st.to_string()).collect(),
        set: CardSet {
            id: "sv1".to_string(),
            name: "Scarlet & Violet".to_string(),
        },
    }
}

#[test]
fn empty_input_returns_none() {
    assert!(select_best(&[]).is_none());
}

#[test]
fn single_candidate_is_selected() {
    let candidates = vec![card("a", Some("Common"), &[])];
    assert_eq!(select_best(&candidates).unwrap().id, "a");
}

#[test]
fn full_art_subtype_beats_secret_rare() {
    // A common Full Art must outrank a Secret Rare without the subtype
    let candidates = vec![
        card("secret", Some("Secret Rare"), &[]),
        card("fullart", Some("Common"), &["Full Art"]),
    ];
    assert_eq!(select_best(&candidates).unwrap().id, "fullart");
}

#[test]
fn full_art_in_rarity_text_counts() {
    let candidates = vec![
        card("ultra", Some("Ultra Rare"), &[]),
        card("fullart", Some("Rare Ultra Full Art"), &[]),
    ];
    assert_eq!(select_best(&candidates).unwrap().id, "fullart");
}

#[test]
fn priority_order_within_partition() {
    // illustration rare ranks above ultra rare, ultra rare above secret rare
    let candidates = vec![
        card("secret", Some("Secret Rare"), &[]),
        card("ultra", Some("Ultra Rare"), &[]),
        card("illus", Some("Illustration Rare"), &[]),
    ];
    assert_eq!(select_best(&candidates).unwrap().id, "illus");
}

#[test]
fn unmatched_sorts_after_matched() {
    let candidates = vec![
        card("plain", Some("Common"), &[]),
        card("radiant", Some("Radiant Rare"), &[]),
    ];
    assert_eq!(select_best(&candidates).unwrap().id, "radiant");
}

#[test]
fn tie_between_unmatched_keeps_input_order() {
    let candidates = vec![
        card("first", Some("Common"), &[]),
        card("second", Some("Common"), &[]),
    ];
    assert_eq!(select_best(&candidates).unwrap().id, "first");
}

#[test]
fn tie_between_matched_keeps_input_order() {
    let candidates = vec![
        card("first", Some("Ultra Rare"), &[]),
        card("second", Some("Ultra Rare"), &[]),
    ];
    assert_eq!(select_best(&candidates).unwrap().id, "first");
}

#[test]
fn matching_is_case_insensitive() {
    let candidates = vec![
        card("plain", Some("Common"), &[]),
        card("loud", Some("SECRET RARE"), &[]),
    ];
    assert_eq!(select_best(&candidates).unwrap().id, "loud");
}

#[test]
fn subtypes_participate_in_priority_matching() {
    // Priority text is the concatenation of rarity and subtypes
    let candidates = vec![
        card("plain", Some("Common"), &[]),
        card("tagged", None, &["Basic", "Amazing Rare"]),
    ];
    assert_eq!(select_best(&candidates).unwrap().id, "tagged");
}

#[test]
fn repeated_calls_return_same_result() {
    let candidates = vec![
        card("holo", Some("Rare Holo"), &[]),
        card("fullart", None, &["Full Art"]),
        card("secret", Some("Secret Rare"), &[]),
    ];

    let first = select_best(&candidates).unwrap().id.clone();
    for _ in 0..10 {
        assert_eq!(select_best(&candidates).unwrap().id, first);
    }
    assert_eq!(first, "fullart");
}
