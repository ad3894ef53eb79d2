//! OpenRouter-backed counterpart.
//!
//! Prompts a remote reasoning model through the OpenRouter chat completions
//! API and parses its constrained reply format:
//!
//! ```text
//! PROPOSAL: <0-10>          (proposer turns)
//! DECISION: ACCEPT|REJECT   (decider turns)
//! MESSAGE: <free text>
//! ```
//!
//! Parsing is lenient on purpose: an unparseable proposal falls back to an
//! even split, an unparseable decision falls back to a rejection, and
//! messages are truncated to the ledger's cap. The state machine therefore
//! always receives a usable action or a [`CounterpartError`], never a
//! half-parsed one.

use std::fmt::Write as _;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::trait_def::{Counterpart, CounterpartAction, CounterpartContext, CounterpartError};
use crate::config::counterpart::{CounterpartConfig, MAX_TOKENS, TEMPERATURE};
use crate::domain::{Role, RoundEvent, MAX_MESSAGE_LEN, POT_POINTS};
use crate::error::AppError;

const FALLBACK_PROPOSAL: u8 = 5;
const FALLBACK_PROPOSAL_MESSAGE: &str = "I propose a fair split.";
const FALLBACK_DECISION_MESSAGE: &str = "I need to reject this proposal.";

pub struct OpenRouterCounterpart {
    client: reqwest::Client,
    config: CounterpartConfig,
}

impl OpenRouterCounterpart {
    pub fn new(config: CounterpartConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::config(format!("failed to build counterpart HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    async fn complete(&self, prompt: String) -> Result<String, CounterpartError> {
        let payload = serde_json::json!({
            "model": self.config.model,
            "messages": [{ "role": "system", "content": prompt }],
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
        });

        let response = self
            .client
            .post(&self.config.base_url)
            .bearer_auth(self.config.api_key.as_deref().unwrap_or_default())
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CounterpartError::Timeout
                } else {
                    CounterpartError::Unavailable(format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(CounterpartError::Unavailable(
                "OpenRouter rejected the API key".to_string(),
            ));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CounterpartError::Unavailable(
                "OpenRouter rate limit exceeded".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(CounterpartError::Unavailable(format!(
                "OpenRouter returned {status}"
            )));
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| CounterpartError::Unavailable(format!("malformed reply: {e}")))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| CounterpartError::Unavailable("reply carried no choices".to_string()))
    }
}

#[async_trait]
impl Counterpart for OpenRouterCounterpart {
    async fn act(&self, ctx: &CounterpartContext) -> Result<CounterpartAction, CounterpartError> {
        match ctx.expected_role {
            Role::Proposer => {
                debug!(
                    round = ctx.current_round,
                    model = %self.config.model,
                    "Requesting proposal from reasoning model"
                );
                let reply = self.complete(proposal_prompt(ctx)).await?;
                let (points, message) = parse_proposal_reply(&reply);
                Ok(CounterpartAction::Proposal { points, message })
            }
            Role::Decider => {
                let proposal = ctx.pending_proposal.ok_or_else(|| {
                    CounterpartError::InvalidAction(
                        "asked to decide with no proposal on the table".to_string(),
                    )
                })?;
                debug!(
                    round = ctx.current_round,
                    proposal,
                    model = %self.config.model,
                    "Requesting decision from reasoning model"
                );
                let reply = self.complete(decision_prompt(ctx, proposal)).await?;
                let (accept, message) = parse_decision_reply(&reply);
                if !accept && message == FALLBACK_DECISION_MESSAGE {
                    warn!(
                        round = ctx.current_round,
                        "Reply did not contain a decision line, falling back to rejection"
                    );
                }
                Ok(CounterpartAction::Decision { accept, message })
            }
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

/// Render the ledger the way the model sees it: one line per event.
fn render_history(events: &[RoundEvent]) -> String {
    let mut history = String::new();
    for event in events {
        if let Some(points) = event.proposal {
            let _ = writeln!(
                history,
                "Round {}: {} proposed {} points for human, {} for AI. Message: '{}'",
                event.round_num,
                event.actor,
                points,
                POT_POINTS - points,
                event.message
            );
        }
        if let Some(accept) = event.decision {
            let action = if accept { "accepted" } else { "rejected" };
            let _ = writeln!(
                history,
                "Round {}: {} {} the proposal. Message: '{}'",
                event.round_num, event.actor, action, event.message
            );
        }
    }
    history
}

fn proposal_prompt(ctx: &CounterpartContext) -> String {
    format!(
        "You are playing an ultimatum game against a human player for {total} rounds. \
Your goal is to maximize your total points across all rounds.\n\n\
In each round, one player proposes how to split {pot} points, and the other decides \
whether to accept or reject. If rejected, both get 0 points for that round.\n\n\
Current situation:\n\
- Round {round} of {total}\n\
- Current scores: Human {human}, AI {ai}\n\
- It's your turn to propose how to split {pot} points\n\n\
Game history:\n{history}\n\
You must respond with EXACTLY this format:\n\
PROPOSAL: [number 0-{pot} representing points for human]\n\
MESSAGE: [your message up to {max_len} characters]\n\n\
Remember: You want to maximize YOUR total points over all {total} rounds. \
Consider what the human might accept based on the game history.",
        total = ctx.total_rounds,
        pot = POT_POINTS,
        round = ctx.current_round,
        human = ctx.human_score,
        ai = ctx.ai_score,
        history = render_history(&ctx.events),
        max_len = MAX_MESSAGE_LEN,
    )
}

fn decision_prompt(ctx: &CounterpartContext, proposal: u8) -> String {
    let proposer_message = ctx
        .events
        .iter()
        .rev()
        .find(|e| e.round_num == ctx.current_round && e.role == Role::Proposer)
        .map(|e| e.message.as_str())
        .unwrap_or_default();

    format!(
        "You are playing an ultimatum game against a human player for {total} rounds. \
Your goal is to maximize your total points across all rounds.\n\n\
In each round, one player proposes how to split {pot} points, and the other decides \
whether to accept or reject. If rejected, both get 0 points for that round.\n\n\
Current situation:\n\
- Round {round} of {total}\n\
- Current scores: Human {human}, AI {ai}\n\
- Human proposed: {proposal} points for human, {ai_share} points for you\n\
- Human's message: \"{proposer_message}\"\n\n\
Game history:\n{history}\n\
You must respond with EXACTLY this format:\n\
DECISION: [ACCEPT or REJECT]\n\
MESSAGE: [your message up to {max_len} characters]\n\n\
Consider the overall game strategy - you want to maximize your total points over \
{total} rounds, not just this round.",
        total = ctx.total_rounds,
        pot = POT_POINTS,
        round = ctx.current_round,
        human = ctx.human_score,
        ai = ctx.ai_score,
        proposal = proposal,
        ai_share = POT_POINTS - proposal,
        proposer_message = proposer_message,
        history = render_history(&ctx.events),
        max_len = MAX_MESSAGE_LEN,
    )
}

fn truncate_message(message: &str) -> String {
    message.chars().take(MAX_MESSAGE_LEN).collect()
}

/// Parse a proposer reply. An absent or unparseable PROPOSAL line falls
/// back to an even split; values outside 0..=10 are treated the same way.
fn parse_proposal_reply(reply: &str) -> (u8, String) {
    let mut points: Option<u8> = None;
    let mut message = String::new();

    for line in reply.lines() {
        if let Some(rest) = line.strip_prefix("PROPOSAL:") {
            points = Some(
                rest.trim()
                    .parse::<i64>()
                    .ok()
                    .and_then(|n| u8::try_from(n).ok())
                    .filter(|n| *n <= POT_POINTS)
                    .unwrap_or(FALLBACK_PROPOSAL),
            );
        } else if let Some(rest) = line.strip_prefix("MESSAGE:") {
            message = truncate_message(rest.trim());
        }
    }

    match points {
        Some(points) => (points, message),
        None => (FALLBACK_PROPOSAL, FALLBACK_PROPOSAL_MESSAGE.to_string()),
    }
}

/// Parse a decider reply. An absent DECISION line falls back to rejection.
fn parse_decision_reply(reply: &str) -> (bool, String) {
    let mut decision: Option<bool> = None;
    let mut message = String::new();

    for line in reply.lines() {
        if let Some(rest) = line.strip_prefix("DECISION:") {
            decision = Some(rest.trim().eq_ignore_ascii_case("accept"));
        } else if let Some(rest) = line.strip_prefix("MESSAGE:") {
            message = truncate_message(rest.trim());
        }
    }

    match decision {
        Some(accept) => (accept, message),
        None => (false, FALLBACK_DECISION_MESSAGE.to_string()),
    }
}
