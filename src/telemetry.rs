//! Telemetry metric name constants.
//!
//! Centralised metric names for deckhand operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `deckhand_`. Counters end in `_total`.
//!
//! # Common labels
//!
//! - `decision`: search policy outcome, "issued" or "suppressed"

/// Session lookups that found a live (non-expired) cache.
pub const SESSION_HITS_TOTAL: &str = "deckhand_session_hits_total";

/// Session lookups that created a fresh cache.
pub const SESSION_MISSES_TOTAL: &str = "deckhand_session_misses_total";

/// Sessions discarded after exceeding their TTL.
pub const SESSIONS_EXPIRED_TOTAL: &str = "deckhand_sessions_expired_total";

/// Search decisions made by the assistant.
///
/// Labels: `decision` ("issued" | "suppressed").
pub const SEARCHES_TOTAL: &str = "deckhand_searches_total";

/// Cards added to session caches (overwrites included).
pub const CARDS_DISCOVERED_TOTAL: &str = "deckhand_cards_discovered_total";
