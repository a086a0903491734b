//! Deckhand error types
//!
//! The cache, registry, and policy operations are total functions and never
//! fail; errors exist for the collaborator seam (provider searches, response
//! generation) and configuration.

/// Deckhand error types
#[derive(Debug, thiserror::Error)]
pub enum DeckhandError {
    // Collaborator errors
    #[error("card search failed: {0}")]
    Search(String),

    #[error("response generation failed: {0}")]
    Generation(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Configuration errors
    #[error("no card search provider configured")]
    NoSearchProvider,

    #[error("no response generator configured")]
    NoGenerator,

    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for deckhand operations
pub type Result<T> = std::result::Result<T, DeckhandError>;
