//! services/web/src/web/state.rs
//!
//! Defines the application's shared state and the in-memory store of
//! per-browser writer sessions.

use crate::config::Config;
use chrono::{DateTime, Duration, Utc};
use property_writer_core::{ports::CompletionService, session::WriterSession};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;
use uuid::Uuid;

//=========================================================================================
// AppState (Shared Across All Connections)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub completion: Arc<dyn CompletionService>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(config: Arc<Config>, completion: Arc<dyn CompletionService>) -> Self {
        let sessions = Arc::new(SessionStore::new(config.session_idle_timeout));
        Self {
            config,
            completion,
            sessions,
        }
    }
}

//=========================================================================================
// SessionStore (One WriterSession per Browser)
//=========================================================================================

/// Identifies the writer session of the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

struct SessionSlot {
    session: WriterSession,
    last_accessed_at: DateTime<Utc>,
}

/// Sessions live only in memory and are dropped after sitting idle.
///
/// The lock is only held for synchronous work on a session, never across an
/// `.await`, so a plain mutex is enough and it can be taken from `Drop`.
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, SessionSlot>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Returns the session for `candidate` if it is still alive, otherwise
    /// starts a new one. The flag is true when a session was created.
    pub fn resolve(&self, candidate: Option<Uuid>) -> (SessionId, bool) {
        self.resolve_at(candidate, Utc::now())
    }

    fn resolve_at(&self, candidate: Option<Uuid>, now: DateTime<Utc>) -> (SessionId, bool) {
        let mut sessions = self.lock();

        let before = sessions.len();
        sessions.retain(|_, slot| now - slot.last_accessed_at < self.idle_timeout);
        if sessions.len() < before {
            debug!(expired = before - sessions.len(), "Dropped idle writer sessions");
        }

        if let Some(id) = candidate {
            if let Some(slot) = sessions.get_mut(&id) {
                slot.last_accessed_at = now;
                return (SessionId(id), false);
            }
        }

        let id = Uuid::new_v4();
        sessions.insert(
            id,
            SessionSlot {
                session: WriterSession::new(),
                last_accessed_at: now,
            },
        );
        (SessionId(id), true)
    }

    /// Runs `f` against a live session. `None` if the session has gone away.
    pub fn with_session<R>(
        &self,
        id: SessionId,
        f: impl FnOnce(&mut WriterSession) -> R,
    ) -> Option<R> {
        let mut sessions = self.lock();
        sessions.get_mut(&id.0).map(|slot| f(&mut slot.session))
    }

    // Closures never leave the map half-updated, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, SessionSlot>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.lock().len()
    }
}
