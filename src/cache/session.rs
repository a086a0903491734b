//! Per-(user, deck) discovery cache.
//!
//! A [`SessionCache`] accumulates the cards surfaced by successive provider
//! searches for one deck-building conversation. Entries are deduplicated by
//! card id, scored for relevance against the search and strategy context at
//! insertion time, and grouped into synergy patterns on demand. Cards are
//! never evicted individually; only whole-session expiry (handled by the
//! registry) removes them.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::time::Instant;

use crate::telemetry;
use crate::types::{
    CardRecord, CREATURE_TYPE, DeckProgress, ENERGY_TYPE, SUPPORT_TYPE, TARGET_DECK_SIZE,
};

use super::synergy;

/// Number of recent search contexts retained per session.
const SEARCH_HISTORY_LIMIT: usize = 20;

/// Thresholds for the next-search suggestion chain.
const CREATURE_GOAL: usize = 10;
const SUPPORT_GOAL: usize = 15;
const ENERGY_GOAL: usize = 8;

/// Synergies shown in the cache summary.
const SUMMARY_SYNERGY_LIMIT: usize = 5;
const SUMMARY_NAMES_PER_SYNERGY: usize = 3;

/// A discovered card with provenance and derived scoring.
#[derive(Debug, Clone)]
pub struct CardDiscovery {
    /// Stable external identifier; immutable once created.
    pub card_id: String,
    /// The card data as returned by the search provider.
    pub card: CardRecord,
    /// When this card was (most recently) discovered.
    pub discovered_at: Instant,
    /// The user query that produced this discovery.
    pub search_context: String,
    /// Derived: how useful this card looks for the current strategy.
    /// Recomputed from the card data and context on every insertion.
    pub relevance_score: f32,
    /// Derived: strategic property labels used for synergy grouping.
    pub synergy_tags: BTreeSet<String>,
    /// Insertion sequence, preserved on overwrite so first-discovery order
    /// survives re-insertion. Used for stable tie-breaks.
    sequence: u64,
}

impl CardDiscovery {
    fn new(
        card_id: String,
        card: CardRecord,
        search_context: String,
        strategy_context: &str,
        sequence: u64,
    ) -> Self {
        let synergy_tags = synergy::extract_tags(&card);
        let relevance_score =
            synergy::relevance_score(&card, &search_context, strategy_context, &synergy_tags);
        Self {
            card_id,
            card,
            discovered_at: Instant::now(),
            search_context,
            relevance_score,
            synergy_tags,
            sequence,
        }
    }

    /// Card name, falling back to "Unknown".
    pub fn name(&self) -> &str {
        self.card.display_name()
    }
}

/// Per-(user, deck) accumulation of card discoveries.
#[derive(Debug)]
pub struct SessionCache {
    user_id: String,
    deck_id: Option<String>,
    discovered_cards: HashMap<String, CardDiscovery>,
    search_history: Vec<String>,
    strategy_context: String,
    synergy_patterns: BTreeMap<String, Vec<String>>,
    created_at: Instant,
    last_updated: Instant,
    next_sequence: u64,
}

impl SessionCache {
    /// Create an empty session for a user, optionally scoped to a deck.
    pub fn new(user_id: impl Into<String>, deck_id: Option<String>) -> Self {
        let now = Instant::now();
        Self {
            user_id: user_id.into(),
            deck_id,
            discovered_cards: HashMap::new(),
            search_history: Vec::new(),
            strategy_context: String::new(),
            synergy_patterns: BTreeMap::new(),
            created_at: now,
            last_updated: now,
            next_sequence: 0,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn deck_id(&self) -> Option<&str> {
        self.deck_id.as_deref()
    }

    /// The user's declared deck strategy; empty until declared.
    pub fn strategy_context(&self) -> &str {
        &self.strategy_context
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Time of the last mutating operation. Drives registry expiry.
    pub fn last_updated(&self) -> Instant {
        self.last_updated
    }

    /// Recent search contexts, oldest first, at most 20.
    pub fn search_history(&self) -> &[String] {
        &self.search_history
    }

    /// Number of distinct cards discovered.
    pub fn len(&self) -> usize {
        self.discovered_cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.discovered_cards.is_empty()
    }

    /// Look up a discovery by card id.
    pub fn get(&self, card_id: &str) -> Option<&CardDiscovery> {
        self.discovered_cards.get(card_id)
    }

    /// Add a batch of discovered cards.
    ///
    /// Records without a `card_id` are skipped silently. A card seen before
    /// is overwritten wholesale: relevance and tags recomputed fresh, no
    /// merging with the old entry. The search context is appended to the
    /// history (FIFO-truncated to the most recent 20) even when the batch is
    /// empty, so a failed provider search still leaves a trace.
    ///
    /// Returns the discoveries touched by this call, in input order.
    pub fn add_discovered_cards(
        &mut self,
        cards: &[CardRecord],
        search_context: &str,
    ) -> Vec<CardDiscovery> {
        let mut touched = Vec::new();

        for card in cards {
            let Some(card_id) = card.card_id.as_deref().filter(|id| !id.is_empty()) else {
                continue;
            };
            let sequence = match self.discovered_cards.get(card_id) {
                Some(existing) => existing.sequence,
                None => {
                    let sequence = self.next_sequence;
                    self.next_sequence += 1;
                    sequence
                }
            };
            let discovery = CardDiscovery::new(
                card_id.to_string(),
                card.clone(),
                search_context.to_string(),
                &self.strategy_context,
                sequence,
            );
            self.discovered_cards
                .insert(card_id.to_string(), discovery.clone());
            touched.push(discovery);
        }

        self.search_history.push(search_context.to_string());
        if self.search_history.len() > SEARCH_HISTORY_LIMIT {
            let excess = self.search_history.len() - SEARCH_HISTORY_LIMIT;
            self.search_history.drain(..excess);
        }
        self.touch();

        metrics::counter!(telemetry::CARDS_DISCOVERED_TOTAL).increment(touched.len() as u64);
        touched
    }

    /// Set the declared deck strategy.
    ///
    /// Existing discoveries keep their scores; the new context only biases
    /// cards discovered after this call.
    pub fn set_strategy_context(&mut self, strategy: impl Into<String>) {
        self.strategy_context = strategy.into();
        self.touch();
    }

    /// Discoveries whose card type matches exactly, in discovery order.
    pub fn cards_by_type(&self, card_type: &str) -> Vec<&CardDiscovery> {
        let mut found: Vec<_> = self
            .discovered_cards
            .values()
            .filter(|d| d.card.card_type.as_deref() == Some(card_type))
            .collect();
        found.sort_by_key(|d| d.sequence);
        found
    }

    /// Discoveries carrying a given synergy tag, in discovery order.
    pub fn cards_by_synergy(&self, tag: &str) -> Vec<&CardDiscovery> {
        let mut found: Vec<_> = self
            .discovered_cards
            .values()
            .filter(|d| d.synergy_tags.contains(tag))
            .collect();
        found.sort_by_key(|d| d.sequence);
        found
    }

    /// The most relevant discoveries, highest score first.
    ///
    /// Ties break toward the earlier discovery.
    pub fn top_cards_by_relevance(&self, limit: usize) -> Vec<&CardDiscovery> {
        let mut all: Vec<_> = self.discovered_cards.values().collect();
        all.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.sequence.cmp(&b.sequence))
        });
        all.truncate(limit);
        all
    }

    /// Current deck-building progress counts.
    pub fn deck_progress(&self) -> DeckProgress {
        let total = self.discovered_cards.len();
        DeckProgress {
            total_discovered: total,
            creatures: self.count_by_type(CREATURE_TYPE),
            supports: self.count_by_type(SUPPORT_TYPE),
            energies: self.count_by_type(ENERGY_TYPE),
            synergy_groups: self.synergy_groups().len(),
            deck_completion: (total as f32 / TARGET_DECK_SIZE as f32 * 100.0).min(100.0),
            searches: self.search_history.len(),
        }
    }

    /// Recompute synergy patterns, store them on the session, and return them.
    ///
    /// A pattern is a tag shared by at least two distinct card names;
    /// singleton tags are noise and dropped. This is a full recomputation on
    /// every call, not incrementally maintained.
    pub fn identify_synergies(&mut self) -> BTreeMap<String, Vec<String>> {
        self.synergy_patterns = self.synergy_groups();
        self.synergy_patterns.clone()
    }

    /// The result of the last [`identify_synergies`](Self::identify_synergies) call.
    pub fn synergy_patterns(&self) -> &BTreeMap<String, Vec<String>> {
        &self.synergy_patterns
    }

    /// What to search for next, by deck-building phase priority.
    ///
    /// First matching branch wins: creatures, then supports, then energy,
    /// then filling out the deck, then refinement.
    pub fn suggest_next_search(&self) -> &'static str {
        let progress = self.deck_progress();
        if progress.creatures < CREATURE_GOAL {
            "Focus on finding more creature attackers and bench support"
        } else if progress.supports < SUPPORT_GOAL {
            "Search for Support cards - draw power, search, and utility"
        } else if progress.energies < ENERGY_GOAL {
            "Add Energy cards to power your creatures' attacks"
        } else if progress.total_discovered < TARGET_DECK_SIZE {
            "Look for synergistic cards that work well with your current discoveries"
        } else {
            "Consider refining your deck by finding better alternatives"
        }
    }

    /// Human-readable summary of the session state.
    ///
    /// Intended to be spliced verbatim into an LLM prompt: counts, the top
    /// synergies, and the next-search suggestion.
    pub fn cache_summary(&mut self) -> String {
        let progress = self.deck_progress();
        let synergies = self.identify_synergies();

        let mut summary = format!(
            "## Discovery Summary\n\
             - **Total Cards Discovered**: {}\n\
             - **Creatures**: {}\n\
             - **Supports**: {}\n\
             - **Energy**: {}\n\
             - **Deck Completion**: {:.1}%\n\
             - **Synergy Patterns**: {}\n\
             - **Searches Performed**: {}\n",
            progress.total_discovered,
            progress.creatures,
            progress.supports,
            progress.energies,
            progress.deck_completion,
            synergies.len(),
            progress.searches,
        );

        if !synergies.is_empty() {
            summary.push_str("\n### Discovered Synergies:\n");
            for (tag, names) in synergies.iter().take(SUMMARY_SYNERGY_LIMIT) {
                let shown: Vec<_> = names
                    .iter()
                    .take(SUMMARY_NAMES_PER_SYNERGY)
                    .map(String::as_str)
                    .collect();
                summary.push_str(&format!("- **{}**: {}", title_case(tag), shown.join(", ")));
                if names.len() > SUMMARY_NAMES_PER_SYNERGY {
                    summary.push_str(&format!(
                        " (+{} more)",
                        names.len() - SUMMARY_NAMES_PER_SYNERGY
                    ));
                }
                summary.push('\n');
            }
        }

        summary.push_str(&format!(
            "\n### Next Search Suggestion:\n{}",
            self.suggest_next_search()
        ));
        summary
    }

    fn count_by_type(&self, card_type: &str) -> usize {
        self.discovered_cards
            .values()
            .filter(|d| d.card.card_type.as_deref() == Some(card_type))
            .count()
    }

    /// Group card names by tag, keeping tags with ≥2 distinct names.
    fn synergy_groups(&self) -> BTreeMap<String, Vec<String>> {
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut ordered: Vec<_> = self.discovered_cards.values().collect();
        ordered.sort_by_key(|d| d.sequence);

        for discovery in ordered {
            for tag in &discovery.synergy_tags {
                groups
                    .entry(tag.clone())
                    .or_default()
                    .push(discovery.name().to_string());
            }
        }
        groups.retain(|_, names| names.iter().collect::<BTreeSet<_>>().len() >= 2);
        groups
    }

    fn touch(&mut self) {
        self.last_updated = Instant::now();
    }
}

/// "spread_damage" → "Spread Damage".
fn title_case(tag: &str) -> String {
    tag.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
