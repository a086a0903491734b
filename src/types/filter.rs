//! Structured search filter for the card-search provider.

use serde::{Deserialize, Serialize};

/// Structured criteria for a provider card search.
///
/// All fields are optional; an empty filter asks for a broad sample bounded
/// only by `limit`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFilter {
    /// Substring match on the card name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Card-type buckets to include (e.g. "Creature", "Support").
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub card_types: Vec<String>,
    /// Subtypes to include (e.g. "Stage 1", "Item").
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtypes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hp_min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hp_max: Option<u32>,
    /// Maximum number of records to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl CardFilter {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn card_type(mut self, card_type: impl Into<String>) -> Self {
        self.card_types.push(card_type.into());
        self
    }

    pub fn subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtypes.push(subtype.into());
        self
    }

    pub fn hp_min(mut self, hp: u32) -> Self {
        self.hp_min = Some(hp);
        self
    }

    pub fn hp_max(mut self, hp: u32) -> Self {
        self.hp_max = Some(hp);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
