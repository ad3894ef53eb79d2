// Shared helpers for integration tests.
//
// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use backend::counterpart::{
    Counterpart, CounterpartAction, CounterpartContext, CounterpartError,
};
use backend::domain::Role;
use backend::services::sessions;
use backend::state::app_state::AppState;

/// App state with the deterministic scripted counterpart.
pub fn test_state() -> AppState {
    AppState::with_scripted_counterpart()
}

/// App state with a specific counterpart stub.
pub fn state_with(counterpart: Arc<dyn Counterpart>) -> AppState {
    AppState::new(counterpart)
}

/// Create a session and return its id.
pub fn create_session(state: &AppState) -> Uuid {
    sessions::create_session(state, None).session_id
}

/// Create a session that already carries a player name.
pub fn create_named_session(state: &AppState, name: &str) -> Uuid {
    sessions::create_session(state, Some(name.to_string())).session_id
}

/// Counterpart stub simulating the remote model being down.
pub struct FailingCounterpart;

#[async_trait]
impl Counterpart for FailingCounterpart {
    async fn act(&self, _ctx: &CounterpartContext) -> Result<CounterpartAction, CounterpartError> {
        Err(CounterpartError::Unavailable("model offline".to_string()))
    }
}

/// Counterpart stub that claims nothing for itself and accepts everything.
pub struct GenerousCounterpart;

#[async_trait]
impl Counterpart for GenerousCounterpart {
    async fn act(&self, ctx: &CounterpartContext) -> Result<CounterpartAction, CounterpartError> {
        match ctx.expected_role {
            Role::Proposer => Ok(CounterpartAction::Proposal {
                points: 10,
                message: "All of it is yours.".to_string(),
            }),
            Role::Decider => Ok(CounterpartAction::Decision {
                accept: true,
                message: "Gladly.".to_string(),
            }),
        }
    }
}

/// Counterpart stub that always answers with the wrong action kind.
pub struct ConfusedCounterpart;

#[async_trait]
impl Counterpart for ConfusedCounterpart {
    async fn act(&self, ctx: &CounterpartContext) -> Result<CounterpartAction, CounterpartError> {
        match ctx.expected_role {
            Role::Proposer => Ok(CounterpartAction::Decision {
                accept: true,
                message: String::new(),
            }),
            Role::Decider => Ok(CounterpartAction::Proposal {
                points: 5,
                message: String::new(),
            }),
        }
    }
}
