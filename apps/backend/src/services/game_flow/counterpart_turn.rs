use tracing::{info, warn};
use uuid::Uuid;

use super::GameFlowService;
use crate::counterpart::{CounterpartAction, CounterpartContext};
use crate::domain::{snapshot, Actor, Phase, Role, SessionSnapshot, TOTAL_ROUNDS};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::services::leaderboard::record_if_named;
use crate::services::sessions::require_session;
use crate::state::app_state::AppState;

impl GameFlowService {
    /// Let the automated counterpart take its scheduled turn.
    ///
    /// Valid only when the current phase is waiting on the counterpart. The
    /// collaborator call happens inside the session's critical section, so
    /// a decision can never be requested before its proposal event exists
    /// and no human action can interleave. On any collaborator failure the
    /// session stays in its pre-call phase and the trigger may be retried.
    pub async fn trigger_counterpart_turn(
        &self,
        state: &AppState,
        session_id: Uuid,
    ) -> Result<SessionSnapshot, AppError> {
        let handle = require_session(state, session_id)?;
        let mut session = handle.lock().await;

        let (expected_role, pending_proposal) = match session.phase() {
            Phase::AwaitingProposal {
                proposer: Actor::Ai,
                ..
            } => (Role::Proposer, None),
            Phase::AwaitingDecision {
                decider: Actor::Ai,
                proposal,
                ..
            } => (Role::Decider, Some(proposal)),
            Phase::Terminal => {
                return Err(DomainError::conflict(
                    ConflictKind::InvalidTurn,
                    "the game is already over",
                )
                .into())
            }
            _ => {
                return Err(DomainError::conflict(
                    ConflictKind::InvalidTurn,
                    "it is the human player's turn",
                )
                .into())
            }
        };

        let ctx = CounterpartContext {
            events: session.ledger.events().to_vec(),
            human_score: session.human_score,
            ai_score: session.ai_score,
            current_round: session.current_round,
            total_rounds: TOTAL_ROUNDS,
            expected_role,
            pending_proposal,
        };

        info!(
            %session_id,
            round = session.current_round,
            role = %expected_role,
            "Requesting counterpart action"
        );
        let action = state.counterpart.act(&ctx).await.map_err(|e| {
            warn!(%session_id, round = session.current_round, error = %e, "Counterpart call failed");
            AppError::from(e)
        })?;

        match (expected_role, action) {
            (Role::Proposer, CounterpartAction::Proposal { points, message }) => {
                session.propose(Actor::Ai, points, message).map_err(|e| {
                    AppError::counterpart_unavailable(format!(
                        "counterpart produced an unusable proposal: {e}"
                    ))
                })?;
                info!(%session_id, round = session.current_round, points, "Counterpart proposal recorded");
            }
            (Role::Decider, CounterpartAction::Decision { accept, message }) => {
                let outcome = session.decide(Actor::Ai, accept, message).map_err(|e| {
                    AppError::counterpart_unavailable(format!(
                        "counterpart produced an unusable decision: {e}"
                    ))
                })?;
                info!(
                    %session_id,
                    round = outcome.round_num,
                    accepted = outcome.accepted,
                    human_score = session.human_score,
                    ai_score = session.ai_score,
                    game_over = session.game_over,
                    "Counterpart decision resolved the round"
                );
            }
            (role, action) => {
                return Err(AppError::counterpart_unavailable(format!(
                    "counterpart answered as {} while a {role} action was expected",
                    action.role()
                )))
            }
        }

        if session.game_over {
            record_if_named(&state.leaderboard, &session);
        }
        Ok(snapshot(&session))
    }
}
