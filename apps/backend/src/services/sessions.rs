//! Session lifecycle: creation, retrieval, renaming, deletion.
//!
//! Renaming is where leaderboard submission happens: a finished session
//! that acquires a non-empty name gets its (single, immutable) entry.

use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{snapshot, Session, SessionSnapshot};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::services::leaderboard::record_if_named;
use crate::state::app_state::AppState;
use crate::store::SessionHandle;

/// Look up a session handle or fail with the domain's not-found error.
pub(crate) fn require_session(state: &AppState, id: Uuid) -> Result<SessionHandle, AppError> {
    state.sessions.get(id).ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Session, format!("session {id} not found")).into()
    })
}

/// Create a fresh session awaiting the round-1 human proposal.
pub fn create_session(state: &AppState, player_name: Option<String>) -> SessionSnapshot {
    let session = Session::new(player_name);
    let snap = snapshot(&session);
    let id = state.sessions.insert(session);
    info!(session_id = %id, "Session created");
    snap
}

pub async fn get_session(state: &AppState, id: Uuid) -> Result<SessionSnapshot, AppError> {
    let handle = require_session(state, id)?;
    let session = handle.lock().await;
    Ok(snapshot(&session))
}

/// Overwrite the player name.
///
/// Allowed at any time; for a finished game this also submits the (first
/// and only) leaderboard entry. Whitespace-only names are rejected so the
/// caller can re-prompt.
pub async fn rename_session(
    state: &AppState,
    id: Uuid,
    player_name: String,
) -> Result<SessionSnapshot, AppError> {
    let trimmed = player_name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::MissingName,
            "player name must not be empty",
        )
        .into());
    }

    let handle = require_session(state, id)?;
    let mut session = handle.lock().await;
    session.rename(trimmed.to_string());
    debug!(session_id = %id, player_name = trimmed, "Session renamed");

    record_if_named(&state.leaderboard, &session);
    Ok(snapshot(&session))
}

/// Explicitly evict a session from the store.
pub fn delete_session(state: &AppState, id: Uuid) -> Result<(), AppError> {
    if state.sessions.remove(id) {
        info!(session_id = %id, "Session deleted");
        Ok(())
    } else {
        Err(DomainError::not_found(NotFoundKind::Session, format!("session {id} not found")).into())
    }
}
