//! Session registry with lazy time-based expiry.
//!
//! The [`CacheRegistry`] owns every active [`SessionCache`], keyed by
//! (user, deck). Expiry is checked lazily at lookup time against each
//! session's `last_updated` clock. There is no background sweep, so an
//! abandoned session is reclaimed on its next (possibly never-occurring)
//! access. An expired session is discarded in its entirety and replaced
//! with a fresh one.
//!
//! # Concurrency
//!
//! The key map sits behind an `RwLock`; each session behind its own
//! `Arc<Mutex<_>>`. Concurrent requests for the same (user, deck) serialise
//! on the per-session mutex rather than on the whole registry. No cache
//! operation performs I/O while holding a lock.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;

use tracing::debug;

use crate::telemetry;
use crate::types::CardRecord;

use super::session::SessionCache;

/// Default session time-to-live: six hours of inactivity.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(6 * 3600);

/// Partition used when no deck id is given.
const DEFAULT_DECK: &str = "default";

/// Composite (user, deck) session key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub user_id: String,
    pub deck_id: String,
}

impl SessionKey {
    fn new(user_id: &str, deck_id: Option<&str>) -> Self {
        Self {
            user_id: user_id.to_string(),
            deck_id: deck_id.unwrap_or(DEFAULT_DECK).to_string(),
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.user_id, self.deck_id)
    }
}

/// Configuration for the session registry.
///
/// ```rust
/// # use deckhand::cache::RegistryConfig;
/// # use std::time::Duration;
/// let config = RegistryConfig::new().session_ttl(Duration::from_secs(3600));
/// ```
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// How long an inactive session lives. Default: 6 hours.
    pub session_ttl: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

impl RegistryConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session time-to-live.
    pub fn session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }
}

/// Shared handle to one session's cache.
pub type SessionHandle = Arc<Mutex<SessionCache>>;

/// Lock a session handle, recovering from poisoning.
///
/// Registry operations are total; a panic in another holder must not turn
/// cache lookups into errors.
pub fn lock(handle: &SessionHandle) -> MutexGuard<'_, SessionCache> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Diagnostic counters over the whole registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// Sessions currently held, expired or not.
    pub total_caches: usize,
    /// Sessions within their TTL.
    pub active_caches: usize,
    /// Sum of discovered cards across all sessions.
    pub total_cards_cached: usize,
    /// Session keys, sorted.
    pub keys: Vec<String>,
}

/// Registry of all active session caches, keyed by (user, deck).
///
/// Construct one per process (or per test) and share it by reference;
/// there is no global instance.
pub struct CacheRegistry {
    sessions: RwLock<HashMap<SessionKey, SessionHandle>>,
    session_ttl: Duration,
}

impl CacheRegistry {
    /// Create an empty registry with the given configuration.
    pub fn new(config: &RegistryConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            session_ttl: config.session_ttl,
        }
    }

    /// The configured session time-to-live.
    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Get the live session for (user, deck), creating or replacing as needed.
    ///
    /// An expired session is discarded here and replaced with a fresh empty
    /// one; callers never observe stale state.
    pub fn get_or_create(&self, user_id: &str, deck_id: Option<&str>) -> SessionHandle {
        let key = SessionKey::new(user_id, deck_id);
        let mut sessions = self.write_sessions();

        if let Some(handle) = sessions.get(&key) {
            let expired = lock(handle).last_updated().elapsed() >= self.session_ttl;
            if !expired {
                metrics::counter!(telemetry::SESSION_HITS_TOTAL).increment(1);
                return handle.clone();
            }
            debug!(%key, "session expired, discarding");
            metrics::counter!(telemetry::SESSIONS_EXPIRED_TOTAL).increment(1);
            sessions.remove(&key);
        }

        metrics::counter!(telemetry::SESSION_MISSES_TOTAL).increment(1);
        debug!(%key, "creating session cache");
        let handle = Arc::new(Mutex::new(SessionCache::new(
            user_id,
            deck_id.map(str::to_string),
        )));
        sessions.insert(key, handle.clone());
        handle
    }

    /// Add discovered cards to the user's session, creating it if needed.
    ///
    /// Returns the session handle so the caller can read the enriched state.
    pub fn add_cards(
        &self,
        user_id: &str,
        cards: &[CardRecord],
        search_context: &str,
        deck_id: Option<&str>,
    ) -> SessionHandle {
        let handle = self.get_or_create(user_id, deck_id);
        lock(&handle).add_discovered_cards(cards, search_context);
        handle
    }

    /// Update the declared strategy used to score future discoveries.
    ///
    /// Existing discoveries are not rescored; only cards discovered after
    /// this call see the new context.
    pub fn update_strategy_context(&self, user_id: &str, strategy: &str, deck_id: Option<&str>) {
        let handle = self.get_or_create(user_id, deck_id);
        lock(&handle).set_strategy_context(strategy);
    }

    /// Remove a session outright.
    pub fn clear(&self, user_id: &str, deck_id: Option<&str>) {
        let key = SessionKey::new(user_id, deck_id);
        self.write_sessions().remove(&key);
    }

    /// Diagnostic snapshot of all sessions.
    pub fn stats(&self) -> RegistryStats {
        let sessions = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        let mut stats = RegistryStats {
            total_caches: sessions.len(),
            ..RegistryStats::default()
        };
        for (key, handle) in sessions.iter() {
            let cache = lock(handle);
            if cache.last_updated().elapsed() < self.session_ttl {
                stats.active_caches += 1;
            }
            stats.total_cards_cached += cache.len();
            stats.keys.push(key.to_string());
        }
        stats.keys.sort();
        stats
    }

    fn write_sessions(
        &self,
    ) -> std::sync::RwLockWriteGuard<'_, HashMap<SessionKey, SessionHandle>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CacheRegistry {
    fn default() -> Self {
        Self::new(&RegistryConfig::default())
    }
}
