//! In-memory session store.
//!
//! Sessions are fully independent units of mutable state: each lives behind
//! its own async mutex, which is the per-session exclusive critical section
//! every mutation must enter. Sessions are durable until explicitly
//! deleted; there is no implicit eviction.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::domain::Session;

/// Handle to one session and its lock.
pub type SessionHandle = Arc<Mutex<Session>>;

#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<Uuid, SessionHandle>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly created session and return its id.
    pub fn insert(&self, session: Session) -> Uuid {
        let id = session.id;
        self.sessions.insert(id, Arc::new(Mutex::new(session)));
        debug!(session_id = %id, total_sessions = self.sessions.len(), "Session created");
        id
    }

    /// Handle for a session; lock it to read or mutate.
    pub fn get(&self, id: Uuid) -> Option<SessionHandle> {
        self.sessions.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// Explicit eviction. Returns whether the session existed.
    pub fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.remove(&id).is_some();
        if removed {
            debug!(session_id = %id, remaining_sessions = self.sessions.len(), "Session removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
