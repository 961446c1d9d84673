//! Per-caller conversation state and the store that scopes it.
//!
//! A [`Session`] owns everything a turn mutates: the conversation context,
//! the learned-pattern cache and the random source. The [`SessionStore`]
//! hands out one independently locked session per identifier, creating it on
//! first contact and dropping it once idle for longer than the configured
//! timeout. Two callers never share a session, and a slow or failed turn in
//! one session never blocks another.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use aphator_memory::{ConversationContext, LearnedPatterns};
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, info};

/// Idle time after which a session is evicted when none is configured.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Error)]
pub enum SessionError {
    /// A previous turn panicked while holding the session lock.
    #[error("session '{0}' is unusable after a failed turn")]
    Poisoned(String),
}

/// State of one conversation.
#[derive(Debug)]
pub struct Session<R: Rng> {
    pub(crate) context: ConversationContext,
    pub(crate) patterns: LearnedPatterns,
    pub(crate) rng: R,
}

impl<R: Rng> Session<R> {
    pub fn new(max_history: usize, rng: R) -> Self {
        Session {
            context: ConversationContext::new(max_history),
            patterns: LearnedPatterns::new(),
            rng,
        }
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    pub fn patterns(&self) -> &LearnedPatterns {
        &self.patterns
    }

    /// Whether any turn has been recorded yet.
    pub fn is_fresh(&self) -> bool {
        self.context.is_empty()
    }
}

/// A session shared between the store and the request currently using it.
pub type SharedSession<R> = Arc<Mutex<Session<R>>>;

/// Session lifetime and seeding.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub idle_timeout: Duration,
    /// When set, the n-th session created is seeded with `seed + n`.
    pub seed: Option<u64>,
    pub max_history: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            seed: None,
            max_history: aphator_memory::DEFAULT_MAX_HISTORY,
        }
    }
}

struct Slot<R: Rng> {
    session: SharedSession<R>,
    last_active: Instant,
}

/// Sessions keyed by caller-supplied identifier.
pub struct SessionStore<R: Rng> {
    sessions: HashMap<String, Slot<R>>,
    config: SessionConfig,
    created: u64,
}

impl<R: Rng + SeedableRng> SessionStore<R> {
    pub fn new(config: SessionConfig) -> Self {
        SessionStore {
            sessions: HashMap::new(),
            config,
            created: 0,
        }
    }

    /// Get the session for `id`, creating it if needed, and mark it active.
    pub fn checkout(&mut self, id: &str) -> SharedSession<R> {
        self.checkout_at(id, Instant::now())
    }

    /// [`checkout`](Self::checkout) with an explicit clock reading.
    pub fn checkout_at(&mut self, id: &str, now: Instant) -> SharedSession<R> {
        if let Some(slot) = self.sessions.get_mut(id) {
            slot.last_active = now;
            return Arc::clone(&slot.session);
        }

        let rng = match self.config.seed {
            Some(seed) => R::seed_from_u64(seed.wrapping_add(self.created)),
            None => R::from_rng(&mut rand::rng()),
        };
        self.created += 1;

        let session = Arc::new(Mutex::new(Session::new(self.config.max_history, rng)));
        self.sessions.insert(
            id.to_string(),
            Slot {
                session: Arc::clone(&session),
                last_active: now,
            },
        );
        debug!(session = id, live = self.sessions.len(), "opened session");
        session
    }

    /// Drop every session idle for longer than the timeout. Returns how many
    /// were removed.
    pub fn evict_idle(&mut self, now: Instant) -> usize {
        let timeout = self.config.idle_timeout;
        let before = self.sessions.len();
        self.sessions
            .retain(|_, slot| now.saturating_duration_since(slot.last_active) <= timeout);
        let evicted = before - self.sessions.len();
        if evicted > 0 {
            info!(evicted, live = self.sessions.len(), "evicted idle sessions");
        }
        evicted
    }

    /// Forget a session immediately.
    pub fn remove(&mut self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}
