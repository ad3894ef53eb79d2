//! Random counterpart - uniformly random but always legal actions.
//!
//! Seedable for reproducible tests; with no seed it draws from system
//! entropy. Uses `Mutex<StdRng>` for interior mutability since the trait
//! takes `&self`.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::prelude::*;

use super::trait_def::{Counterpart, CounterpartAction, CounterpartContext, CounterpartError};
use crate::domain::{Role, POT_POINTS};

pub struct RandomCounterpart {
    rng: Mutex<StdRng>,
}

impl RandomCounterpart {
    pub const NAME: &'static str = "RandomCounterpart";

    /// `Some(seed)` for reproducible behavior, `None` for system entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

#[async_trait]
impl Counterpart for RandomCounterpart {
    async fn act(&self, ctx: &CounterpartContext) -> Result<CounterpartAction, CounterpartError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| CounterpartError::InvalidAction(format!("RNG lock poisoned: {e}")))?;

        match ctx.expected_role {
            Role::Proposer => {
                let points = rng.gen_range(0..=POT_POINTS);
                Ok(CounterpartAction::Proposal {
                    points,
                    message: String::new(),
                })
            }
            Role::Decider => {
                if ctx.pending_proposal.is_none() {
                    return Err(CounterpartError::InvalidAction(
                        "asked to decide with no proposal on the table".to_string(),
                    ));
                }
                Ok(CounterpartAction::Decision {
                    accept: rng.gen_bool(0.5),
                    message: String::new(),
                })
            }
        }
    }
}
