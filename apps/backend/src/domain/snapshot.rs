//! Public snapshot API for observing session state without exposing internals.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::ledger::{Actor, RoundEvent};
use crate::domain::rules::TOTAL_ROUNDS;
use crate::domain::scoring::is_big_win;
use crate::domain::state::{Phase, Session, Winner};

/// Adjacently tagged union of phase-specific snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "data")]
pub enum PhaseSnapshot {
    AwaitingProposal(AwaitingProposalSnapshot),
    AwaitingDecision(AwaitingDecisionSnapshot),
    GameOver(GameOverSnapshot),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AwaitingProposalSnapshot {
    pub round_no: u8,
    pub to_act: Actor,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AwaitingDecisionSnapshot {
    pub round_no: u8,
    pub to_act: Actor,
    /// Human-side points of the proposal on the table.
    pub proposal: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameOverSnapshot {
    pub winner: Winner,
    /// Naming-prompt heuristic; intentionally looser than `winner`.
    pub big_win: bool,
}

/// Top-level view of one session, safe to hand to any client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub current_round: u8,
    pub total_rounds: u8,
    pub human_score: u32,
    pub ai_score: u32,
    pub game_over: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Winner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub events: Vec<RoundEvent>,
    pub phase: PhaseSnapshot,
}

/// Entry point: produce a snapshot of the current session state.
pub fn snapshot(session: &Session) -> SessionSnapshot {
    let phase = match session.phase() {
        Phase::AwaitingProposal { round_no, proposer } => {
            PhaseSnapshot::AwaitingProposal(AwaitingProposalSnapshot {
                round_no,
                to_act: proposer,
            })
        }
        Phase::AwaitingDecision {
            round_no,
            proposal,
            decider,
        } => PhaseSnapshot::AwaitingDecision(AwaitingDecisionSnapshot {
            round_no,
            to_act: decider,
            proposal,
        }),
        Phase::Terminal => PhaseSnapshot::GameOver(GameOverSnapshot {
            // A terminal session always carries a winner; fall back to a tie
            // rather than panicking on a hand-built inconsistent state.
            winner: session.winner.unwrap_or(Winner::Tie),
            big_win: is_big_win(session.human_score, session.ai_score),
        }),
    };

    SessionSnapshot {
        session_id: session.id,
        current_round: session.current_round,
        total_rounds: TOTAL_ROUNDS,
        human_score: session.human_score,
        ai_score: session.ai_score,
        game_over: session.game_over,
        winner: session.winner,
        player_name: session.player_name.clone(),
        created_at: session.created_at,
        events: session.ledger.events().to_vec(),
        phase,
    }
}
