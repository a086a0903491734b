//! Search decision policy.
//!
//! Decides whether a user message warrants a fresh provider search or can
//! be answered from the session cache. The trigger vocabulary is held in
//! constant tables iterated in documented priority order, so the matching
//! logic itself stays static and testable.
//!
//! The rule ordering is deliberate: explicit requests for under-represented
//! card categories override general question detection; an empty cache
//! always triggers a search; a cache holding a full deck's worth suppresses
//! default searching to avoid redundant provider calls.

use crate::cache::SessionCache;
use crate::types::TARGET_DECK_SIZE;

/// Phrases that signal an explicit request for cards.
const REQUEST_TRIGGERS: &[&str] = &["show me", "find", "search for", "get", "need"];

/// Phrases that signal a question answerable from cached context.
const QUESTION_TRIGGERS: &[&str] = &["what", "how", "can you", "build", "recommend", "suggest"];

/// Keywords referencing support/utility cards.
pub(crate) const SUPPORT_KEYWORDS: &[&str] =
    &["support", "trainer", "item", "stadium", "tool", "utility"];

/// Keywords referencing energy cards.
pub(crate) const ENERGY_KEYWORDS: &[&str] = &["energy"];

/// Keywords referencing creatures and attackers.
pub(crate) const CREATURE_KEYWORDS: &[&str] =
    &["creature", "attacker", "basic", "stage", "evolution"];

/// Named strategic concepts tracked against the search history.
pub const STRATEGY_CONCEPTS: &[&str] = &[
    "spread damage",
    "draw power",
    "energy acceleration",
    "disruption",
    "stall",
];

/// Below these per-category counts, an explicit request for the category
/// always triggers a fresh search.
const SUPPORT_SEARCH_CAP: usize = 10;
const ENERGY_SEARCH_CAP: usize = 5;
const CREATURE_SEARCH_CAP: usize = 20;

/// Decides whether a message warrants a fresh external card search.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchPolicy;

impl SearchPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate the decision tree top to bottom; the first matching rule
    /// decides.
    ///
    /// 1. Empty cache → search (seed the session).
    /// 2. Explicit request trigger:
    ///    a. references support cards and fewer than 10 cached → search
    ///    b. references energy cards and fewer than 5 cached → search
    ///    c. references creatures and fewer than 20 cached → search
    ///    d. mentions a strategic concept the search history hasn't
    ///       covered → search
    /// 3. Question phrasing (and no rule-2 condition fired) → answer from
    ///    cache.
    /// 4. Default: search while the cache holds fewer than a full deck's
    ///    worth of cards.
    pub fn should_search(&self, message: &str, cache: &SessionCache) -> bool {
        if cache.is_empty() {
            return true;
        }

        let message = message.to_lowercase();
        let progress = cache.deck_progress();

        if contains_any(&message, REQUEST_TRIGGERS) {
            if contains_any(&message, SUPPORT_KEYWORDS) && progress.supports < SUPPORT_SEARCH_CAP {
                return true;
            }
            if contains_any(&message, ENERGY_KEYWORDS) && progress.energies < ENERGY_SEARCH_CAP {
                return true;
            }
            if contains_any(&message, CREATURE_KEYWORDS) && progress.creatures < CREATURE_SEARCH_CAP
            {
                return true;
            }
            for concept in STRATEGY_CONCEPTS {
                if message.contains(concept) && !history_mentions(cache.search_history(), concept) {
                    return true;
                }
            }
        }

        if contains_any(&message, QUESTION_TRIGGERS) {
            return false;
        }

        progress.total_discovered < TARGET_DECK_SIZE
    }
}

/// True when any needle occurs as a substring of the (lowercased) message.
pub(crate) fn contains_any(message: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| message.contains(needle))
}

fn history_mentions(history: &[String], concept: &str) -> bool {
    history
        .iter()
        .any(|entry| entry.to_lowercase().contains(concept))
}
