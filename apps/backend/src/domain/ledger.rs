//! Append-only round ledger: the audit trail of a session.
//!
//! Every proposal and decision becomes one immutable [`RoundEvent`]. The
//! ledger validates sequencing (turn, role, duplicates) and derives round
//! outcomes; it never touches scores or the round counter, which belong to
//! the session state machine.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::rules::RoleAssignment;
use crate::domain::scoring::round_points;
use crate::errors::domain::{ConflictKind, DomainError};

/// Who performed an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actor {
    Human,
    Ai,
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Actor::Human => write!(f, "human"),
            Actor::Ai => write!(f, "ai"),
        }
    }
}

/// The role an actor holds within one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Proposer,
    Decider,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Proposer => write!(f, "proposer"),
            Role::Decider => write!(f, "decider"),
        }
    }
}

/// One immutable entry in the audit trail.
///
/// `proposal` is present only on proposer events and is always expressed in
/// human-side units: the points claimed for the human player, whoever made
/// the proposal. `decision` is present only on decider events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundEvent {
    pub round_num: u8,
    pub actor: Actor,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposal: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<bool>,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
}

impl RoundEvent {
    /// Build a proposer event; the timestamp is stamped here, never taken
    /// from the client.
    pub fn proposal(round_num: u8, actor: Actor, points: u8, message: String) -> Self {
        Self {
            round_num,
            actor,
            role: Role::Proposer,
            proposal: Some(points),
            decision: None,
            message,
            recorded_at: OffsetDateTime::now_utc(),
        }
    }

    /// Build a decider event.
    pub fn decision(round_num: u8, actor: Actor, accept: bool, message: String) -> Self {
        Self {
            round_num,
            actor,
            role: Role::Decider,
            proposal: None,
            decision: Some(accept),
            message,
            recorded_at: OffsetDateTime::now_utc(),
        }
    }
}

/// Derived result of a fully played round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOutcome {
    pub round_num: u8,
    pub accepted: bool,
    pub human_points: u8,
    pub ai_points: u8,
}

impl RoundOutcome {
    pub fn new(round_num: u8, proposal: u8, accepted: bool) -> Self {
        let (human_points, ai_points) = round_points(proposal, accepted);
        Self {
            round_num,
            accepted,
            human_points,
            ai_points,
        }
    }
}

/// Ordered, append-only record of round events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    events: Vec<RoundEvent>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insertion order is chronological order.
    pub fn events(&self) -> &[RoundEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The event filling the `(round, role)` slot, if any.
    pub fn find(&self, round_num: u8, role: Role) -> Option<&RoundEvent> {
        self.events
            .iter()
            .find(|e| e.round_num == round_num && e.role == role)
    }

    /// Proposal points for a round whose decision has not been recorded yet.
    pub fn pending_proposal(&self, round_num: u8) -> Option<u8> {
        if self.find(round_num, Role::Decider).is_some() {
            return None;
        }
        self.find(round_num, Role::Proposer).and_then(|e| e.proposal)
    }

    /// Append an event after validating it against the session's current
    /// round and the static role schedule.
    ///
    /// Validation order: wrong round (`InvalidTurn`), filled slot
    /// (`DuplicateEvent`), actor/role mismatch (`InvalidRole`), decision
    /// with no proposal on record (`InvalidTurn`). Nothing is recorded
    /// unless every check passes.
    ///
    /// Returns the derived [`RoundOutcome`] once the round holds both its
    /// proposer and decider events.
    pub fn append(
        &mut self,
        current_round: u8,
        schedule: &RoleAssignment,
        event: RoundEvent,
    ) -> Result<Option<RoundOutcome>, DomainError> {
        if event.round_num != current_round {
            return Err(DomainError::conflict(
                ConflictKind::InvalidTurn,
                format!(
                    "event targets round {} but the session is in round {current_round}",
                    event.round_num
                ),
            ));
        }

        if self.find(event.round_num, event.role).is_some() {
            return Err(DomainError::conflict(
                ConflictKind::DuplicateEvent,
                format!(
                    "round {} already has a {} event",
                    event.round_num, event.role
                ),
            ));
        }

        if schedule.role_of(event.actor) != event.role {
            return Err(DomainError::conflict(
                ConflictKind::InvalidRole,
                format!(
                    "{} is scheduled as {} in round {}, not {}",
                    event.actor,
                    schedule.role_of(event.actor),
                    event.round_num,
                    event.role
                ),
            ));
        }

        let pending = self.pending_proposal(event.round_num);
        if event.role == Role::Decider && pending.is_none() {
            return Err(DomainError::conflict(
                ConflictKind::InvalidTurn,
                format!("round {} has no proposal to decide on", event.round_num),
            ));
        }

        let outcome = match (event.role, event.decision, pending) {
            (Role::Decider, Some(accept), Some(proposal)) => {
                Some(RoundOutcome::new(event.round_num, proposal, accept))
            }
            _ => None,
        };

        self.events.push(event);
        Ok(outcome)
    }

    /// Derived outcome for a round, if both of its events are on record.
    pub fn outcome_for(&self, round_num: u8) -> Option<RoundOutcome> {
        let proposal = self.find(round_num, Role::Proposer)?.proposal?;
        let accept = self.find(round_num, Role::Decider)?.decision?;
        Some(RoundOutcome::new(round_num, proposal, accept))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rules::role_for;
    use crate::errors::domain::ConflictKind;

    fn assert_conflict(err: DomainError, kind: ConflictKind) {
        match err {
            DomainError::Conflict(k, _) => assert_eq!(k, kind),
            other => panic!("expected conflict {kind:?}, got {other:?}"),
        }
    }

    #[test]
    fn append_rejects_wrong_round() {
        let mut ledger = Ledger::new();
        let event = RoundEvent::proposal(2, Actor::Human, 5, String::new());
        let err = ledger.append(1, &role_for(1), event).unwrap_err();
        assert_conflict(err, ConflictKind::InvalidTurn);
        assert!(ledger.is_empty());
    }

    #[test]
    fn append_rejects_duplicate_slot() {
        let mut ledger = Ledger::new();
        let schedule = role_for(1);
        ledger
            .append(
                1,
                &schedule,
                RoundEvent::proposal(1, Actor::Human, 5, String::new()),
            )
            .unwrap();
        let err = ledger
            .append(
                1,
                &schedule,
                RoundEvent::proposal(1, Actor::Human, 7, String::new()),
            )
            .unwrap_err();
        assert_conflict(err, ConflictKind::DuplicateEvent);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn append_rejects_unscheduled_role() {
        let mut ledger = Ledger::new();
        // Round 1: the counterpart decides, it does not propose.
        let event = RoundEvent::proposal(1, Actor::Ai, 5, String::new());
        let err = ledger.append(1, &role_for(1), event).unwrap_err();
        assert_conflict(err, ConflictKind::InvalidRole);
        assert!(ledger.is_empty());
    }

    #[test]
    fn decision_without_proposal_is_invalid_turn() {
        let mut ledger = Ledger::new();
        let event = RoundEvent::decision(1, Actor::Ai, true, String::new());
        let err = ledger.append(1, &role_for(1), event).unwrap_err();
        assert_conflict(err, ConflictKind::InvalidTurn);
        assert!(ledger.is_empty());
    }

    #[test]
    fn duplicate_decision_is_detected_before_role_check() {
        let mut ledger = Ledger::new();
        let schedule = role_for(1);
        ledger
            .append(
                1,
                &schedule,
                RoundEvent::proposal(1, Actor::Human, 6, String::new()),
            )
            .unwrap();
        ledger
            .append(
                1,
                &schedule,
                RoundEvent::decision(1, Actor::Ai, true, String::new()),
            )
            .unwrap();
        let err = ledger
            .append(
                1,
                &schedule,
                RoundEvent::decision(1, Actor::Ai, false, String::new()),
            )
            .unwrap_err();
        assert_conflict(err, ConflictKind::DuplicateEvent);
    }

    #[test]
    fn completing_a_round_yields_its_outcome() {
        let mut ledger = Ledger::new();
        let schedule = role_for(1);
        let none = ledger
            .append(
                1,
                &schedule,
                RoundEvent::proposal(1, Actor::Human, 7, String::new()),
            )
            .unwrap();
        assert!(none.is_none());

        let outcome = ledger
            .append(
                1,
                &schedule,
                RoundEvent::decision(1, Actor::Ai, true, String::new()),
            )
            .unwrap()
            .unwrap();
        assert!(outcome.accepted);
        assert_eq!(outcome.human_points, 7);
        assert_eq!(outcome.ai_points, 3);
        assert_eq!(ledger.outcome_for(1), Some(outcome));
    }

    #[test]
    fn rejected_round_outcome_has_zero_points() {
        let outcome = RoundOutcome::new(3, 9, false);
        assert!(!outcome.accepted);
        assert_eq!((outcome.human_points, outcome.ai_points), (0, 0));
    }

    #[test]
    fn pending_proposal_clears_once_decided() {
        let mut ledger = Ledger::new();
        let schedule = role_for(1);
        ledger
            .append(
                1,
                &schedule,
                RoundEvent::proposal(1, Actor::Human, 4, String::new()),
            )
            .unwrap();
        assert_eq!(ledger.pending_proposal(1), Some(4));
        ledger
            .append(
                1,
                &schedule,
                RoundEvent::decision(1, Actor::Ai, false, String::new()),
            )
            .unwrap();
        assert_eq!(ledger.pending_proposal(1), None);
    }
}
