use tracing::{debug, info};
use uuid::Uuid;

use super::GameFlowService;
use crate::domain::rules::valid_proposal_range;
use crate::domain::{snapshot, Actor, SessionSnapshot};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::services::leaderboard::record_if_named;
use crate::services::sessions::require_session;
use crate::state::app_state::AppState;

impl GameFlowService {
    /// Record the human player's proposal for the current round.
    ///
    /// A replayed submission into an already-proposed round is a no-op that
    /// returns the unchanged session; every other failure leaves the
    /// session exactly as it was.
    pub async fn submit_proposal(
        &self,
        state: &AppState,
        session_id: Uuid,
        points: i32,
        message: String,
    ) -> Result<SessionSnapshot, AppError> {
        // Range-check before narrowing so -1 and 999 both fail the same way.
        let points = u8::try_from(points)
            .ok()
            .filter(|p| valid_proposal_range().contains(p))
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::InvalidProposal,
                    format!("points must be in {:?}, got {points}", valid_proposal_range()),
                )
            })?;

        let handle = require_session(state, session_id)?;
        let mut session = handle.lock().await;
        debug!(%session_id, round = session.current_round, points, "Submitting proposal");

        match session.propose(Actor::Human, points, message) {
            Ok(()) => {
                info!(%session_id, round = session.current_round, points, "Proposal recorded");
            }
            Err(err) if err.is_duplicate_event() => {
                debug!(%session_id, round = session.current_round, "Duplicate proposal ignored");
            }
            Err(err) => return Err(err.into()),
        }

        Ok(snapshot(&session))
    }

    /// Record the human player's decision on the counterpart's proposal.
    ///
    /// Resolves the round; after the last round this flips the session to
    /// terminal and, if it already carries a name, submits it to the
    /// leaderboard.
    pub async fn submit_decision(
        &self,
        state: &AppState,
        session_id: Uuid,
        accept: bool,
        message: String,
    ) -> Result<SessionSnapshot, AppError> {
        let handle = require_session(state, session_id)?;
        let mut session = handle.lock().await;
        debug!(%session_id, round = session.current_round, accept, "Submitting decision");

        match session.decide(Actor::Human, accept, message) {
            Ok(outcome) => {
                info!(
                    %session_id,
                    round = outcome.round_num,
                    accepted = outcome.accepted,
                    human_score = session.human_score,
                    ai_score = session.ai_score,
                    game_over = session.game_over,
                    "Round resolved"
                );
            }
            Err(err) if err.is_duplicate_event() => {
                debug!(%session_id, round = session.current_round, "Duplicate decision ignored");
            }
            Err(err) => return Err(err.into()),
        }

        if session.game_over {
            record_if_named(&state.leaderboard, &session);
        }
        Ok(snapshot(&session))
    }
}
