//! Counterpart configuration, read from the environment at startup.
//!
//! Configuration problems are fatal at startup, never at request time; in
//! particular a missing or placeholder OpenRouter API key is rejected
//! before the server binds.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_MODEL: &str = "anthropic/claude-sonnet-4";
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const MAX_TOKENS: u32 = 300;
pub const TEMPERATURE: f32 = 0.7;

// Values shipped in sample env files; treated the same as an unset key.
const PLACEHOLDER_KEYS: &[&str] = &[
    "placeholder_replace_with_real_key",
    "test_key_replace_with_real_key",
];

/// Which counterpart implementation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterpartKind {
    /// Remote reasoning model via the OpenRouter chat API.
    OpenRouter,
    /// Deterministic scripted policy (tests, offline runs).
    Scripted,
    /// Seedable random policy (tests).
    Random,
}

impl FromStr for CounterpartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openrouter" => Ok(Self::OpenRouter),
            "scripted" => Ok(Self::Scripted),
            "random" => Ok(Self::Random),
            other => Err(format!("unknown counterpart kind '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CounterpartConfig {
    pub kind: CounterpartKind,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl CounterpartConfig {
    /// Read the counterpart configuration from the environment.
    ///
    /// - `COUNTERPART_KIND`: `openrouter` (default) | `scripted` | `random`
    /// - `OPENROUTER_API_KEY`: required for the openrouter kind
    /// - `OPENROUTER_MODEL`, `OPENROUTER_BASE_URL`, `OPENROUTER_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, AppError> {
        let kind = match env::var("COUNTERPART_KIND") {
            Ok(raw) => raw.parse::<CounterpartKind>().map_err(AppError::config)?,
            Err(_) => CounterpartKind::OpenRouter,
        };

        let api_key = env::var("OPENROUTER_API_KEY").ok();
        if kind == CounterpartKind::OpenRouter {
            match api_key.as_deref() {
                Some(key) if !key.is_empty() && !PLACEHOLDER_KEYS.contains(&key) => {}
                _ => {
                    return Err(AppError::config(
                        "OPENROUTER_API_KEY is not configured. Set a valid OpenRouter API key \
                         (https://openrouter.ai/) or select COUNTERPART_KIND=scripted.",
                    ))
                }
            }
        }

        let timeout_secs = match env::var("OPENROUTER_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                AppError::config(format!("OPENROUTER_TIMEOUT_SECS must be a number, got '{raw}'"))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            kind,
            api_key,
            model: env::var("OPENROUTER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: env::var("OPENROUTER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Config for the deterministic scripted counterpart (tests, offline).
    pub fn scripted() -> Self {
        Self {
            kind: CounterpartKind::Scripted,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!(
            "OpenRouter".parse::<CounterpartKind>().unwrap(),
            CounterpartKind::OpenRouter
        );
        assert_eq!(
            "scripted".parse::<CounterpartKind>().unwrap(),
            CounterpartKind::Scripted
        );
        assert!("chess-engine".parse::<CounterpartKind>().is_err());
    }

    #[test]
    fn scripted_config_needs_no_key() {
        let config = CounterpartConfig::scripted();
        assert_eq!(config.kind, CounterpartKind::Scripted);
        assert!(config.api_key.is_none());
    }
}
