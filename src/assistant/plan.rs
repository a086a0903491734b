//! Search planning: maps a user message onto a provider query.
//!
//! A pure, table-driven ladder: a named strategic concept in the message
//! probes the rules text for its characteristic phrase; category keywords
//! build a structured filter; anything else falls back to a broad sample
//! the conversation layer can reason over.

use crate::policy::{CREATURE_KEYWORDS, ENERGY_KEYWORDS, SUPPORT_KEYWORDS, contains_any};
use crate::types::{CREATURE_TYPE, CardFilter, ENERGY_TYPE, SUPPORT_TYPE};

/// Strategic concept → rules-text probe phrase.
const CONCEPT_PROBES: &[(&str, &str)] = &[
    ("spread damage", "damage to each"),
    ("draw power", "draw"),
    ("energy acceleration", "attach energy"),
    ("disruption", "discard"),
    ("stall", "prevent"),
];

const TEXT_SEARCH_LIMIT: usize = 50;
const FILTER_SEARCH_LIMIT: usize = 60;
const BROAD_SEARCH_LIMIT: usize = 100;

/// How the assistant should query the provider for a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPlan {
    /// Probe attack/ability rules text for a strategic phrase.
    Text { query: String, limit: usize },
    /// Structured filter search.
    Filtered(CardFilter),
    /// Broad unfiltered sample.
    Broad { limit: usize },
}

/// Derive a search plan from a user message.
pub fn plan_search(message: &str) -> SearchPlan {
    let message = message.to_lowercase();

    for (concept, probe) in CONCEPT_PROBES {
        if message.contains(concept) {
            return SearchPlan::Text {
                query: (*probe).to_string(),
                limit: TEXT_SEARCH_LIMIT,
            };
        }
    }

    let mut filter = CardFilter::new();
    if contains_any(&message, CREATURE_KEYWORDS) {
        filter = filter.card_type(CREATURE_TYPE);
    }
    if contains_any(&message, SUPPORT_KEYWORDS) {
        filter = filter.card_type(SUPPORT_TYPE);
    }
    if contains_any(&message, ENERGY_KEYWORDS) {
        filter = filter.card_type(ENERGY_TYPE);
    }
    if !filter.card_types.is_empty() {
        return SearchPlan::Filtered(filter.limit(FILTER_SEARCH_LIMIT));
    }

    SearchPlan::Broad {
        limit: BROAD_SEARCH_LIMIT,
    }
}
