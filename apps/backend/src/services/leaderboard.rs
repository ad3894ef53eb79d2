//! Leaderboard queries and the submission hook for completed sessions.

use tracing::{debug, info, warn};

use crate::domain::Session;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;
use crate::store::leaderboard::DEFAULT_PAGE_SIZE;
use crate::store::{LeaderboardPage, LeaderboardStore, SortBy};

/// Normalize raw query parameters and run the leaderboard query.
///
/// Missing parameters fall back to `score`, page 1, page size 10; an
/// unknown sort key is a client error.
pub fn query_leaderboard(
    state: &AppState,
    sort_by: Option<&str>,
    page: Option<u32>,
    page_size: Option<u32>,
) -> Result<LeaderboardPage, AppError> {
    let sort_by = match sort_by {
        None => SortBy::Score,
        Some(raw) => raw
            .parse::<SortBy>()
            .map_err(|e| AppError::bad_request(ErrorCode::InvalidSort, e))?,
    };
    Ok(state.leaderboard.query(
        sort_by,
        page.unwrap_or(1),
        page_size.unwrap_or(DEFAULT_PAGE_SIZE),
    ))
}

/// Put a finished, named session on the leaderboard.
///
/// Safe to call from any path that may complete or rename a session: it is
/// a no-op for unfinished or unnamed sessions and for sessions that already
/// have an entry.
pub fn record_if_named(leaderboard: &LeaderboardStore, session: &Session) {
    if !session.game_over {
        return;
    }
    let Some(name) = session.player_name.as_deref() else {
        return;
    };
    if name.trim().is_empty() {
        return;
    }

    match leaderboard.submit(session.id, name, session.human_score, session.ai_score) {
        Ok(true) => info!(
            session_id = %session.id,
            player_name = name.trim(),
            human_score = session.human_score,
            ai_score = session.ai_score,
            "Leaderboard entry recorded"
        ),
        Ok(false) => debug!(session_id = %session.id, "Leaderboard entry already exists"),
        Err(e) => warn!(session_id = %session.id, error = %e, "Leaderboard submission refused"),
    }
}
