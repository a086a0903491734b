//! Builder for configuring assistant instances.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheRegistry, RegistryConfig};
use crate::policy::SearchPolicy;
use crate::traits::{CardSearchProvider, ResponseGenerator};
use crate::{DeckhandError, Result};

use super::DeckAssistant;

/// Main entry point for creating assistant instances.
pub struct Deckhand;

impl Deckhand {
    /// Create a new builder for configuring the assistant.
    pub fn builder() -> DeckhandBuilder {
        DeckhandBuilder::new()
    }
}

/// Builder for configuring assistant instances.
///
/// Both collaborators are required; the registry configuration is optional.
pub struct DeckhandBuilder {
    search: Option<Arc<dyn CardSearchProvider>>,
    generator: Option<Arc<dyn ResponseGenerator>>,
    registry_config: RegistryConfig,
}

impl DeckhandBuilder {
    pub fn new() -> Self {
        Self {
            search: None,
            generator: None,
            registry_config: RegistryConfig::default(),
        }
    }

    /// Set the card-search provider.
    pub fn search_provider(mut self, provider: Arc<dyn CardSearchProvider>) -> Self {
        self.search = Some(provider);
        self
    }

    /// Set the response generator.
    pub fn response_generator(mut self, generator: Arc<dyn ResponseGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Override the session time-to-live (default: 6 hours).
    pub fn session_ttl(mut self, ttl: Duration) -> Self {
        self.registry_config = self.registry_config.session_ttl(ttl);
        self
    }

    /// Build the assistant.
    pub fn build(self) -> Result<DeckAssistant> {
        let search = self.search.ok_or(DeckhandError::NoSearchProvider)?;
        let generator = self.generator.ok_or(DeckhandError::NoGenerator)?;
        Ok(DeckAssistant::new(
            CacheRegistry::new(&self.registry_config),
            SearchPolicy::new(),
            search,
            generator,
        ))
    }
}

impl Default for DeckhandBuilder {
    fn default() -> Self {
        Self::new()
    }
}
