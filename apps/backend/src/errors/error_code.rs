//! Error codes for the backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the backend API.
///
/// This enum ensures type safety and prevents the use of ad-hoc error codes.
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Proposal points outside the 0..=10 range
    InvalidProposal,
    /// Message text exceeds the allowed length
    MessageTooLong,
    /// Leaderboard name is empty after trimming
    MissingName,
    /// Malformed session id in the request path
    InvalidSessionId,
    /// Unknown leaderboard sort key
    InvalidSort,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Turn / Phase Conflicts
    /// Action submitted out of phase order
    InvalidTurn,
    /// Actor does not hold the scheduled role for this round
    InvalidRole,
    /// Replayed event for a (round, role) slot that is already filled
    DuplicateEvent,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // Resource Not Found
    /// Game session not found
    SessionNotFound,
    /// General not found error
    NotFound,

    // System Errors
    /// Automated counterpart failed to produce an action
    CounterpartUnavailable,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Request Validation
            Self::InvalidProposal => "INVALID_PROPOSAL",
            Self::MessageTooLong => "MESSAGE_TOO_LONG",
            Self::MissingName => "MISSING_NAME",
            Self::InvalidSessionId => "INVALID_SESSION_ID",
            Self::InvalidSort => "INVALID_SORT",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            // Turn / Phase Conflicts
            Self::InvalidTurn => "INVALID_TURN",
            Self::InvalidRole => "INVALID_ROLE",
            Self::DuplicateEvent => "DUPLICATE_EVENT",
            Self::Conflict => "CONFLICT",

            // Resource Not Found
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // System Errors
            Self::CounterpartUnavailable => "COUNTERPART_UNAVAILABLE",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
