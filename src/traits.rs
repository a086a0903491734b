//! Collaborator traits for the external services the assistant consumes.
//!
//! The cache layer itself performs no I/O; these traits are the narrow
//! seams through which the orchestration layer reaches the card store and
//! the conversational model. Implementations wrap whatever actually backs
//! them (a hosted database, an LLM API, a fixture in tests).

use async_trait::async_trait;

use crate::types::{CardFilter, CardRecord};
use crate::Result;

/// External card-search capability.
#[async_trait]
pub trait CardSearchProvider: Send + Sync {
    /// Search by structured filter.
    async fn search(&self, filter: &CardFilter) -> Result<Vec<CardRecord>>;

    /// Search within attack and ability rules text.
    async fn search_text(&self, query: &str, limit: usize) -> Result<Vec<CardRecord>>;
}

/// Conversational response generation (the LLM seam).
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    /// Produce natural-language guidance for `message`.
    ///
    /// `context` carries the session's discovery summary, spliced verbatim;
    /// the generator treats it as opaque prompt material.
    async fn generate(&self, context: &str, message: &str) -> Result<String>;
}
