//! Deck-building progress snapshot.

use serde::Serialize;

/// Counts describing how far along a session's deck discovery is.
///
/// Produced by [`SessionCache::deck_progress`](crate::cache::SessionCache::deck_progress).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckProgress {
    /// Distinct cards discovered so far.
    pub total_discovered: usize,
    /// Discovered cards in the "Creature" bucket.
    pub creatures: usize,
    /// Discovered cards in the "Support" bucket.
    pub supports: usize,
    /// Discovered cards in the "Energy" bucket.
    pub energies: usize,
    /// Synergy tags shared by at least two distinct card names.
    pub synergy_groups: usize,
    /// Percentage of the target deck size discovered, capped at 100.
    pub deck_completion: f32,
    /// Searches recorded in the session history.
    pub searches: usize,
}
