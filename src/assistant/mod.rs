//! Conversation orchestration.
//!
//! [`DeckAssistant`] ties the decision policy, the session registry, and
//! the external collaborators together. Per message: consult the policy →
//! if warranted, query the card-search provider → feed results into the
//! session cache → splice the cache summary into the generation context →
//! return the generator's reply alongside the raw card list.
//!
//! Provider failures do not end the conversation: a failed search degrades
//! to answering from whatever the session already holds.

mod builder;
mod plan;

pub use builder::{Deckhand, DeckhandBuilder};
pub use plan::{SearchPlan, plan_search};

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{CacheRegistry, lock};
use crate::policy::SearchPolicy;
use crate::telemetry;
use crate::traits::{CardSearchProvider, ResponseGenerator};
use crate::types::{CardFilter, CardRecord, DeckProgress};
use crate::Result;

/// Message prefixes that declare a deck strategy.
const STRATEGY_DECLARATIONS: &[&str] = &[
    "my strategy is",
    "i want to build",
    "i'm building",
    "im building",
];

/// Result of handling one user message.
#[derive(Debug, Clone)]
pub struct AssistantResponse {
    /// Natural-language reply from the response generator.
    pub reply: String,
    /// Cards surfaced by this turn's search; empty when answered from cache.
    pub cards_found: Vec<CardRecord>,
    /// Whether a provider search was issued for this turn.
    pub searched: bool,
    /// Deck progress after this turn.
    pub progress: DeckProgress,
}

/// Conversational deck-building assistant.
///
/// Create via [`Deckhand::builder()`].
pub struct DeckAssistant {
    registry: CacheRegistry,
    policy: SearchPolicy,
    search: Arc<dyn CardSearchProvider>,
    generator: Arc<dyn ResponseGenerator>,
}

impl std::fmt::Debug for DeckAssistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeckAssistant").finish_non_exhaustive()
    }
}

impl DeckAssistant {
    pub(crate) fn new(
        registry: CacheRegistry,
        policy: SearchPolicy,
        search: Arc<dyn CardSearchProvider>,
        generator: Arc<dyn ResponseGenerator>,
    ) -> Self {
        Self {
            registry,
            policy,
            search,
            generator,
        }
    }

    /// The session registry, e.g. for stats or explicit clears.
    pub fn registry(&self) -> &CacheRegistry {
        &self.registry
    }

    /// Handle one user message for (user, deck).
    pub async fn handle_message(
        &self,
        user_id: &str,
        deck_id: Option<&str>,
        message: &str,
    ) -> Result<AssistantResponse> {
        let handle = self.registry.get_or_create(user_id, deck_id);

        if let Some(strategy) = detect_strategy(message) {
            debug!(user_id, %strategy, "updating strategy context");
            lock(&handle).set_strategy_context(strategy);
        }

        let wants_search = {
            let cache = lock(&handle);
            self.policy.should_search(message, &cache)
        };

        let cards_found = if wants_search {
            metrics::counter!(telemetry::SEARCHES_TOTAL, "decision" => "issued").increment(1);
            self.run_search(message).await
        } else {
            metrics::counter!(telemetry::SEARCHES_TOTAL, "decision" => "suppressed").increment(1);
            Vec::new()
        };

        let (context, progress) = {
            let mut cache = lock(&handle);
            if wants_search {
                cache.add_discovered_cards(&cards_found, message);
            }
            (cache.cache_summary(), cache.deck_progress())
        };

        let reply = self.generator.generate(&context, message).await?;

        Ok(AssistantResponse {
            reply,
            cards_found,
            searched: wants_search,
            progress,
        })
    }

    async fn run_search(&self, message: &str) -> Vec<CardRecord> {
        let result = match plan_search(message) {
            SearchPlan::Text { query, limit } => self.search.search_text(&query, limit).await,
            SearchPlan::Filtered(filter) => self.search.search(&filter).await,
            SearchPlan::Broad { limit } => {
                self.search.search(&CardFilter::new().limit(limit)).await
            }
        };
        match result {
            Ok(cards) => cards,
            Err(err) => {
                warn!(%err, "card search failed, answering from cache");
                Vec::new()
            }
        }
    }
}

/// Extract a declared deck strategy from a message, if present.
///
/// Returns the (lowercased) text trailing a declaration prefix.
fn detect_strategy(message: &str) -> Option<String> {
    let lower = message.to_lowercase();
    for prefix in STRATEGY_DECLARATIONS {
        if let Some(pos) = lower.find(prefix) {
            let rest = lower[pos + prefix.len()..]
                .trim()
                .trim_end_matches(['.', '!', '?']);
            if !rest.is_empty() {
                return Some(rest.to_string());
            }
        }
    }
    None
}
