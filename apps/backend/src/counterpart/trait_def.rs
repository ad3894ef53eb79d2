//! Automated counterpart trait definition.

use std::fmt;

use async_trait::async_trait;

use crate::domain::{Role, RoundEvent};
use crate::error::AppError;

/// Errors that can occur while the counterpart produces an action.
#[derive(Debug)]
pub enum CounterpartError {
    /// The collaborator did not answer within the configured deadline
    Timeout,
    /// The collaborator could not be reached or rejected the call
    Unavailable(String),
    /// The collaborator answered with something unusable for the expected role
    InvalidAction(String),
}

impl fmt::Display for CounterpartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CounterpartError::Timeout => write!(f, "counterpart timed out"),
            CounterpartError::Unavailable(msg) => write!(f, "counterpart unavailable: {msg}"),
            CounterpartError::InvalidAction(msg) => {
                write!(f, "counterpart produced an invalid action: {msg}")
            }
        }
    }
}

impl std::error::Error for CounterpartError {}

impl From<CounterpartError> for AppError {
    fn from(err: CounterpartError) -> Self {
        AppError::counterpart_unavailable(err.to_string())
    }
}

/// What the counterpart decided to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterpartAction {
    /// A split proposal, in human-side units.
    Proposal { points: u8, message: String },
    /// Accept or reject the proposal on the table.
    Decision { accept: bool, message: String },
}

impl CounterpartAction {
    /// The role this action answers.
    pub fn role(&self) -> Role {
        match self {
            CounterpartAction::Proposal { .. } => Role::Proposer,
            CounterpartAction::Decision { .. } => Role::Decider,
        }
    }
}

/// Everything the counterpart is allowed to see: the full audit trail plus
/// the live scores and the role it is expected to fill.
#[derive(Debug, Clone)]
pub struct CounterpartContext {
    pub events: Vec<RoundEvent>,
    pub human_score: u32,
    pub ai_score: u32,
    pub current_round: u8,
    pub total_rounds: u8,
    /// The role the schedule expects the counterpart to fill right now.
    pub expected_role: Role,
    /// Human-side points of the proposal on the table, when deciding.
    pub pending_proposal: Option<u8>,
}

/// The automated counterpart, behind an interface so the state machine
/// stays agnostic to how the decision is produced (remote reasoning call,
/// scripted policy, test stub).
///
/// Implementations may be slow, may fail, and must not be assumed
/// deterministic or side-effect-free.
#[async_trait]
pub trait Counterpart: Send + Sync {
    async fn act(&self, ctx: &CounterpartContext) -> Result<CounterpartAction, CounterpartError>;
}
