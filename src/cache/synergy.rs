//! Synergy tag extraction and relevance scoring.
//!
//! Both functions are pure and deterministic over the card record and the
//! session's context strings. Matching is case-insensitive substring
//! matching throughout, with no tokenization or stemming.

use std::collections::BTreeSet;

use crate::types::CardRecord;

/// Ability-text keywords and the tag each one contributes.
const ABILITY_TAGS: &[(&str, &str)] = &[
    ("draw", "draw_power"),
    ("search", "search_effect"),
    ("energy", "energy_acceleration"),
    ("damage", "damage_synergy"),
];

/// Attack-text keywords and the tag each one contributes.
const ATTACK_TAGS: &[(&str, &str)] = &[
    ("discard", "discard_synergy"),
    ("switch", "switch_synergy"),
];

/// Extract synergy tags from a card.
///
/// All applicable rules fire; tags accumulate into a set:
/// - `type_<elemental>` per elemental type
/// - ability text keywords per [`ABILITY_TAGS`]
/// - attack text containing both "each" and "creature" → `spread_damage`
/// - attack text keywords per [`ATTACK_TAGS`]
/// - `subtype_<subtype>` when a subtype is present (spaces become underscores)
pub fn extract_tags(card: &CardRecord) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();

    for elemental in &card.types {
        tags.insert(format!("type_{}", elemental.to_lowercase()));
    }

    for ability in &card.abilities {
        let Some(text) = ability.text.as_deref() else {
            continue;
        };
        let text = text.to_lowercase();
        for (keyword, tag) in ABILITY_TAGS {
            if text.contains(keyword) {
                tags.insert((*tag).to_string());
            }
        }
    }

    for attack in &card.attacks {
        let Some(text) = attack.text.as_deref() else {
            continue;
        };
        let text = text.to_lowercase();
        if text.contains("each") && text.contains("creature") {
            tags.insert("spread_damage".to_string());
        }
        for (keyword, tag) in ATTACK_TAGS {
            if text.contains(keyword) {
                tags.insert((*tag).to_string());
            }
        }
    }

    if let Some(subtype) = card.subtype.as_deref()
        && !subtype.is_empty()
    {
        tags.insert(format!("subtype_{}", subtype.to_lowercase().replace(' ', "_")));
    }

    tags
}

/// Weighted-additive relevance heuristic, base 1.0.
///
/// Bonuses are order-independent and all applicable ones sum:
/// - +0.5 card type appears in the search context
/// - +0.3 the card has at least one ability
/// - +0.2 the card has at least one attack
/// - +0.4 any word of the strategy context appears in the card name
///   (skipped entirely when the strategy context is empty)
/// - +0.2 per distinct synergy tag
pub fn relevance_score(
    card: &CardRecord,
    search_context: &str,
    strategy_context: &str,
    tags: &BTreeSet<String>,
) -> f32 {
    let mut score = 1.0;

    if let Some(card_type) = card.card_type.as_deref()
        && !card_type.is_empty()
        && search_context
            .to_lowercase()
            .contains(&card_type.to_lowercase())
    {
        score += 0.5;
    }

    if !card.abilities.is_empty() {
        score += 0.3;
    }
    if !card.attacks.is_empty() {
        score += 0.2;
    }

    if !strategy_context.is_empty() {
        let name = card.name.as_deref().unwrap_or_default().to_lowercase();
        if strategy_context
            .to_lowercase()
            .split_whitespace()
            .any(|word| name.contains(word))
        {
            score += 0.4;
        }
    }

    score + 0.2 * tags.len() as f32
}
