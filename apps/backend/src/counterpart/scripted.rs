//! Scripted counterpart - a deterministic baseline policy.
//!
//! Goals:
//! - No network, no RNG: the same context always yields the same action.
//! - Plausible play: offers keep a majority share, and lowball proposals
//!   get rejected.
//!
//! This is the counterpart used in tests and offline runs; swapping it in
//! for the remote model changes nothing about the state machine.

use async_trait::async_trait;

use super::trait_def::{Counterpart, CounterpartAction, CounterpartContext, CounterpartError};
use crate::domain::{Role, POT_POINTS};

pub struct ScriptedCounterpart {
    /// Human-side points offered when proposing.
    offer: u8,
    /// Smallest own share it will accept when deciding.
    min_share: u8,
}

impl ScriptedCounterpart {
    pub const NAME: &'static str = "ScriptedCounterpart";

    pub fn new() -> Self {
        Self {
            offer: 4,
            min_share: 3,
        }
    }

    /// Policy knobs for tests: offer `offer` human-side points when
    /// proposing, accept any proposal leaving at least `min_share` points.
    pub fn with_policy(offer: u8, min_share: u8) -> Self {
        Self {
            offer: offer.min(POT_POINTS),
            min_share,
        }
    }
}

impl Default for ScriptedCounterpart {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Counterpart for ScriptedCounterpart {
    async fn act(&self, ctx: &CounterpartContext) -> Result<CounterpartAction, CounterpartError> {
        match ctx.expected_role {
            Role::Proposer => Ok(CounterpartAction::Proposal {
                points: self.offer,
                message: format!(
                    "I'll take {} and you get {}.",
                    POT_POINTS - self.offer,
                    self.offer
                ),
            }),
            Role::Decider => {
                let proposal = ctx.pending_proposal.ok_or_else(|| {
                    CounterpartError::InvalidAction(
                        "asked to decide with no proposal on the table".to_string(),
                    )
                })?;
                let own_share = POT_POINTS.saturating_sub(proposal);
                let accept = own_share >= self.min_share;
                let message = if accept {
                    "That works for me.".to_string()
                } else {
                    format!("{own_share} points is not worth my while.")
                };
                Ok(CounterpartAction::Decision { accept, message })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(expected_role: Role, pending_proposal: Option<u8>) -> CounterpartContext {
        CounterpartContext {
            events: Vec::new(),
            human_score: 0,
            ai_score: 0,
            current_round: 1,
            total_rounds: 6,
            expected_role,
            pending_proposal,
        }
    }

    #[tokio::test]
    async fn proposes_its_configured_offer() {
        let counterpart = ScriptedCounterpart::with_policy(2, 3);
        let action = counterpart.act(&ctx(Role::Proposer, None)).await.unwrap();
        assert_eq!(action.role(), Role::Proposer);
        assert!(matches!(action, CounterpartAction::Proposal { points: 2, .. }));
    }

    #[tokio::test]
    async fn accepts_at_and_above_its_threshold() {
        let counterpart = ScriptedCounterpart::new();
        // proposal 7 leaves a share of 3: accepted
        let action = counterpart.act(&ctx(Role::Decider, Some(7))).await.unwrap();
        assert!(matches!(action, CounterpartAction::Decision { accept: true, .. }));
        // proposal 10 leaves nothing: rejected
        let action = counterpart.act(&ctx(Role::Decider, Some(10))).await.unwrap();
        assert!(matches!(action, CounterpartAction::Decision { accept: false, .. }));
    }

    #[tokio::test]
    async fn deciding_without_a_proposal_is_an_invalid_action() {
        let counterpart = ScriptedCounterpart::new();
        let err = counterpart.act(&ctx(Role::Decider, None)).await.unwrap_err();
        assert!(matches!(err, CounterpartError::InvalidAction(_)));
    }
}
