//! Caching subsystem.
//!
//! Two layers:
//!
//! - [`SessionCache`]: per-(user, deck) accumulation of card discoveries
//!   with relevance scoring, synergy grouping, and progress reporting.
//!
//! - [`CacheRegistry`]: all active sessions keyed by (user, deck), with
//!   lazy TTL expiry at lookup time. The sole entry point external callers
//!   use; sessions are handed out as [`SessionHandle`]s.
//!
//! The scoring and tag-extraction rules live in [`synergy`] as pure
//! functions so they stay independently testable.

pub mod registry;
pub mod session;
pub mod synergy;

pub use registry::{
    CacheRegistry, DEFAULT_SESSION_TTL, RegistryConfig, RegistryStats, SessionHandle, SessionKey,
    lock,
};
pub use session::{CardDiscovery, SessionCache};
