use std::sync::Arc;

use crate::counterpart::{Counterpart, ScriptedCounterpart};
use crate::store::{LeaderboardStore, SessionStore};

/// Application state containing shared resources
pub struct AppState {
    /// All live game sessions
    pub sessions: SessionStore,
    /// Completed, named games
    pub leaderboard: LeaderboardStore,
    /// The automated opponent
    pub counterpart: Arc<dyn Counterpart>,
}

impl AppState {
    /// Create a new AppState around the given counterpart implementation
    pub fn new(counterpart: Arc<dyn Counterpart>) -> Self {
        Self {
            sessions: SessionStore::new(),
            leaderboard: LeaderboardStore::new(),
            counterpart,
        }
    }

    /// State with the deterministic scripted counterpart (tests, offline)
    pub fn with_scripted_counterpart() -> Self {
        Self::new(Arc::new(ScriptedCounterpart::new()))
    }
}
