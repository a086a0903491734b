//! Deckhand - session discovery memory for a conversational deck-building
//! assistant.
//!
//! The crate accumulates the cards returned by successive searches into a
//! per-(user, deck) working set, deduplicates them, scores their relevance
//! against the conversation's search and strategy context, detects synergy
//! patterns among them, and decides when a fresh provider search is
//! warranted versus reusing cached results.
//!
//! # Cache Example
//!
//! ```rust
//! use deckhand::cache::{CacheRegistry, RegistryConfig, lock};
//! use deckhand::types::{Attack, CardRecord};
//!
//! let registry = CacheRegistry::new(&RegistryConfig::default());
//!
//! let cards = vec![
//!     CardRecord::new("c1", "Emberpup")
//!         .with_card_type("Creature")
//!         .with_elemental_type("Fire")
//!         .with_attack(Attack::new("Burn", "damage to each opposing creature")),
//! ];
//! let handle = registry.add_cards("u1", &cards, "looking for fire attackers", Some("d1"));
//!
//! let mut cache = lock(&handle);
//! assert_eq!(cache.len(), 1);
//! println!("{}", cache.cache_summary());
//! ```
//!
//! # Assistant Example
//!
//! ```rust,ignore
//! use deckhand::{Deckhand, ModelBackedGenerator, HostedCardStore};
//!
//! let assistant = Deckhand::builder()
//!     .search_provider(store)
//!     .response_generator(generator)
//!     .build()?;
//!
//! let response = assistant.handle_message("u1", Some("d1"), "find spread damage").await?;
//! println!("{}", response.reply);
//! ```

pub mod assistant;
pub mod cache;
pub mod error;
pub mod policy;
pub mod telemetry;
pub mod traits;
pub mod types;

// Re-export main types at crate root
pub use assistant::{AssistantResponse, DeckAssistant, Deckhand, DeckhandBuilder, SearchPlan};
pub use cache::{
    CacheRegistry, CardDiscovery, RegistryConfig, RegistryStats, SessionCache, SessionHandle,
    SessionKey,
};
pub use error::{DeckhandError, Result};
pub use policy::SearchPolicy;
pub use traits::{CardSearchProvider, ResponseGenerator};
pub use types::{Ability, Attack, CardFilter, CardRecord, DeckProgress};
