//! Automated counterpart module - the opponent behind an interface.
//!
//! This module provides:
//! - the [`Counterpart`] trait the state machine delegates to
//! - OpenRouterCounterpart: remote reasoning model (production)
//! - ScriptedCounterpart: deterministic policy (tests, offline)
//! - RandomCounterpart: seedable random policy (tests)

pub mod openrouter;
mod random;
mod scripted;
mod trait_def;

use std::sync::Arc;

pub use openrouter::OpenRouterCounterpart;
pub use random::RandomCounterpart;
pub use scripted::ScriptedCounterpart;
pub use trait_def::{Counterpart, CounterpartAction, CounterpartContext, CounterpartError};

use crate::config::counterpart::{CounterpartConfig, CounterpartKind};
use crate::error::AppError;

/// Build the counterpart selected by configuration.
pub fn create_counterpart(config: &CounterpartConfig) -> Result<Arc<dyn Counterpart>, AppError> {
    match config.kind {
        CounterpartKind::OpenRouter => Ok(Arc::new(OpenRouterCounterpart::new(config.clone())?)),
        CounterpartKind::Scripted => Ok(Arc::new(ScriptedCounterpart::new())),
        CounterpartKind::Random => Ok(Arc::new(RandomCounterpart::new(None))),
    }
}
