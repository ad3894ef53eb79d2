//! Session state machine: one game's lifecycle from round 1 to the
//! terminal transition.
//!
//! The phase is derived from the ledger rather than stored, so it can never
//! disagree with the audit trail. Each transition is atomic: all validation
//! happens before the first mutation, and everything after a successful
//! ledger append is infallible.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::ledger::{Actor, Ledger, RoundEvent, RoundOutcome};
use crate::domain::rules::{role_for, valid_proposal_range, validate_message, TOTAL_ROUNDS};
use crate::domain::scoring::{round_points, winner_for};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

/// Final result of a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Human,
    Ai,
    Tie,
}

/// Derived phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the scheduled proposer to submit a split.
    AwaitingProposal { round_no: u8, proposer: Actor },
    /// Waiting for the scheduled decider to accept or reject.
    AwaitingDecision {
        round_no: u8,
        proposal: u8,
        decider: Actor,
    },
    /// All rounds resolved; no further events may be appended.
    Terminal,
}

impl Phase {
    /// The actor expected to act, if anyone is.
    pub fn to_act(&self) -> Option<Actor> {
        match self {
            Phase::AwaitingProposal { proposer, .. } => Some(*proposer),
            Phase::AwaitingDecision { decider, .. } => Some(*decider),
            Phase::Terminal => None,
        }
    }
}

/// One game between the human player and the automated counterpart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    /// 1-based; stays at [`TOTAL_ROUNDS`] once the last round resolves.
    pub current_round: u8,
    pub human_score: u32,
    pub ai_score: u32,
    pub game_over: bool,
    pub winner: Option<Winner>,
    pub player_name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub ledger: Ledger,
}

impl Session {
    pub fn new(player_name: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            current_round: 1,
            human_score: 0,
            ai_score: 0,
            game_over: false,
            winner: None,
            player_name,
            created_at: OffsetDateTime::now_utc(),
            ledger: Ledger::new(),
        }
    }

    /// Derive the current phase from the ledger and the terminal flag.
    pub fn phase(&self) -> Phase {
        if self.game_over {
            return Phase::Terminal;
        }
        let schedule = role_for(self.current_round);
        match self.ledger.pending_proposal(self.current_round) {
            Some(proposal) => Phase::AwaitingDecision {
                round_no: self.current_round,
                proposal,
                decider: schedule.decider,
            },
            None => Phase::AwaitingProposal {
                round_no: self.current_round,
                proposer: schedule.proposer,
            },
        }
    }

    /// Record a proposal for the current round.
    ///
    /// `points` are human-side units whoever proposes. Fails without
    /// touching the session on a finished game (`InvalidTurn`), an
    /// out-of-range value (`InvalidProposal`), an overlong message, or any
    /// ledger sequencing conflict.
    pub fn propose(
        &mut self,
        actor: Actor,
        points: u8,
        message: String,
    ) -> Result<(), DomainError> {
        if self.game_over {
            return Err(DomainError::conflict(
                ConflictKind::InvalidTurn,
                "the game is already over",
            ));
        }
        if !valid_proposal_range().contains(&points) {
            return Err(DomainError::validation(
                ValidationKind::InvalidProposal,
                format!("points must be in {:?}", valid_proposal_range()),
            ));
        }
        validate_message(&message)?;

        let schedule = role_for(self.current_round);
        let event = RoundEvent::proposal(self.current_round, actor, points, message);
        self.ledger.append(self.current_round, &schedule, event)?;
        Ok(())
    }

    /// Record a decision for the current round and resolve it.
    ///
    /// On acceptance the pot splits per the pending proposal; on rejection
    /// neither score changes. Either way the round resolves: the session
    /// advances to the next round, or flips to terminal and fixes the
    /// winner when the last round was just decided.
    pub fn decide(
        &mut self,
        actor: Actor,
        accept: bool,
        message: String,
    ) -> Result<RoundOutcome, DomainError> {
        if self.game_over {
            return Err(DomainError::conflict(
                ConflictKind::InvalidTurn,
                "the game is already over",
            ));
        }
        validate_message(&message)?;

        let proposal = match self.phase() {
            Phase::AwaitingDecision { proposal, .. } => proposal,
            _ => {
                return Err(DomainError::conflict(
                    ConflictKind::InvalidTurn,
                    format!("round {} has no proposal to decide on", self.current_round),
                ))
            }
        };

        let schedule = role_for(self.current_round);
        let event = RoundEvent::decision(self.current_round, actor, accept, message);
        let outcome = self
            .ledger
            .append(self.current_round, &schedule, event)?
            .unwrap_or_else(|| {
                let (human, ai) = round_points(proposal, accept);
                RoundOutcome {
                    round_num: self.current_round,
                    accepted: accept,
                    human_points: human,
                    ai_points: ai,
                }
            });

        // Infallible from here on: the (append, score, advance) triple
        // either happens entirely or not at all.
        if outcome.accepted {
            self.human_score += u32::from(outcome.human_points);
            self.ai_score += u32::from(outcome.ai_points);
        }
        if self.current_round >= TOTAL_ROUNDS {
            self.game_over = true;
            self.winner = Some(winner_for(self.human_score, self.ai_score));
        } else {
            self.current_round += 1;
        }
        Ok(outcome)
    }

    /// Overwrite the player name; allowed at any time, including after the
    /// game is over. Leaderboard rows already created are never touched.
    pub fn rename(&mut self, name: String) {
        self.player_name = Some(name);
    }
}
