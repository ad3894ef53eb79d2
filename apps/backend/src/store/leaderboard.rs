//! In-memory leaderboard of completed, named sessions.
//!
//! Entries are immutable once created and submission is idempotent per
//! session, so a renamed-twice game can never be double-counted. Queries
//! sort on a total order (ranking key, then earliest creation, then
//! insertion sequence) so pagination is stable: concatenating all pages
//! reproduces the entry set exactly once each.

use std::collections::HashSet;
use std::str::FromStr;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::errors::domain::{DomainError, ValidationKind};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Ranking key for leaderboard queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Human score, descending.
    Score,
    /// Human score minus counterpart score, descending.
    Difference,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "score" => Ok(Self::Score),
            "difference" => Ok(Self::Difference),
            other => Err(format!("unknown sort key '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
struct LeaderboardEntry {
    session_id: Uuid,
    player_name: String,
    human_score: u32,
    ai_score: u32,
    created_at: OffsetDateTime,
    /// Monotone insertion counter; the final pagination tie-break.
    seq: u64,
}

impl LeaderboardEntry {
    fn difference(&self) -> i64 {
        i64::from(self.human_score) - i64::from(self.ai_score)
    }
}

/// One row as returned to clients; `difference` is computed at query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub player_name: String,
    pub human_score: u32,
    pub ai_score: u32,
    pub difference: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// One page of leaderboard results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardPage {
    pub entries: Vec<LeaderboardRow>,
    pub total_pages: u32,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Default)]
struct Inner {
    entries: Vec<LeaderboardEntry>,
    submitted: HashSet<Uuid>,
    next_seq: u64,
}

#[derive(Default)]
pub struct LeaderboardStore {
    inner: RwLock<Inner>,
}

impl LeaderboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed, named session.
    ///
    /// Idempotent per session id: the first submission wins and later ones
    /// are no-ops (returns `false`). Fails with `MissingName` when the name
    /// is empty after trimming; nothing is recorded in that case.
    pub fn submit(
        &self,
        session_id: Uuid,
        player_name: &str,
        human_score: u32,
        ai_score: u32,
    ) -> Result<bool, DomainError> {
        let name = player_name.trim();
        if name.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::MissingName,
                "leaderboard entries need a non-empty player name",
            ));
        }

        let mut inner = self.inner.write();
        if !inner.submitted.insert(session_id) {
            debug!(%session_id, "Session already on the leaderboard, ignoring resubmission");
            return Ok(false);
        }
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.entries.push(LeaderboardEntry {
            session_id,
            player_name: name.to_string(),
            human_score,
            ai_score,
            created_at: OffsetDateTime::now_utc(),
            seq,
        });
        debug!(%session_id, player_name = name, total_entries = inner.entries.len(), "Leaderboard entry created");
        Ok(true)
    }

    /// Ranked slice of the leaderboard.
    ///
    /// `page` is 1-indexed; a page beyond the last yields an empty slice
    /// with `total_pages` still computed from the full set (minimum 1, even
    /// when the board is empty). `page_size` is clamped to 1..=100.
    pub fn query(&self, sort_by: SortBy, page: u32, page_size: u32) -> LeaderboardPage {
        let page = page.max(1);
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);

        let mut entries: Vec<LeaderboardEntry> = self.inner.read().entries.clone();
        entries.sort_by(|a, b| {
            let key = match sort_by {
                SortBy::Score => b.human_score.cmp(&a.human_score),
                SortBy::Difference => b.difference().cmp(&a.difference()),
            };
            key.then(a.created_at.cmp(&b.created_at)).then(a.seq.cmp(&b.seq))
        });

        let total = entries.len() as u32;
        let total_pages = (total.div_ceil(page_size)).max(1);
        let offset = (page - 1).saturating_mul(page_size) as usize;

        let rows = entries
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .map(|e| LeaderboardRow {
                difference: e.difference(),
                player_name: e.player_name,
                human_score: e.human_score,
                ai_score: e.ai_score,
                created_at: e.created_at,
            })
            .collect();

        LeaderboardPage {
            entries: rows,
            total_pages,
            page,
            page_size,
        }
    }

    /// Whether a session already produced an entry.
    pub fn contains(&self, session_id: Uuid) -> bool {
        self.inner.read().submitted.contains(&session_id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_by_parses_known_keys() {
        assert_eq!("score".parse::<SortBy>().unwrap(), SortBy::Score);
        assert_eq!("Difference".parse::<SortBy>().unwrap(), SortBy::Difference);
        assert!("elo".parse::<SortBy>().is_err());
    }

    #[test]
    fn submit_trims_and_rejects_empty_names() {
        let store = LeaderboardStore::new();
        let err = store.submit(Uuid::new_v4(), "   ", 10, 5).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::MissingName, _)
        ));
        assert!(store.is_empty());

        assert!(store.submit(Uuid::new_v4(), "  Ada  ", 10, 5).unwrap());
        let page = store.query(SortBy::Score, 1, 10);
        assert_eq!(page.entries[0].player_name, "Ada");
    }

    #[test]
    fn submit_is_idempotent_per_session() {
        let store = LeaderboardStore::new();
        let id = Uuid::new_v4();
        assert!(store.submit(id, "Ada", 40, 20).unwrap());
        assert!(!store.submit(id, "Ada the Second", 40, 20).unwrap());
        assert_eq!(store.len(), 1);
        assert!(store.contains(id));
    }

    #[test]
    fn empty_board_still_reports_one_page() {
        let store = LeaderboardStore::new();
        let page = store.query(SortBy::Score, 1, 10);
        assert!(page.entries.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn difference_ordering_differs_from_score_ordering() {
        let store = LeaderboardStore::new();
        // high score, low margin
        store.submit(Uuid::new_v4(), "grinder", 35, 25).unwrap();
        // lower score, high margin
        store.submit(Uuid::new_v4(), "closer", 30, 0).unwrap();

        let by_score = store.query(SortBy::Score, 1, 10);
        assert_eq!(by_score.entries[0].player_name, "grinder");

        let by_difference = store.query(SortBy::Difference, 1, 10);
        assert_eq!(by_difference.entries[0].player_name, "closer");
        assert_eq!(by_difference.entries[0].difference, 30);
    }

    #[test]
    fn score_ties_break_by_earliest_submission() {
        let store = LeaderboardStore::new();
        store.submit(Uuid::new_v4(), "first", 30, 10).unwrap();
        store.submit(Uuid::new_v4(), "second", 30, 10).unwrap();
        let page = store.query(SortBy::Score, 1, 10);
        assert_eq!(page.entries[0].player_name, "first");
        assert_eq!(page.entries[1].player_name, "second");
    }

    #[test]
    fn page_size_is_clamped() {
        let store = LeaderboardStore::new();
        for i in 0..5 {
            store
                .submit(Uuid::new_v4(), &format!("p{i}"), i, 0)
                .unwrap();
        }
        let page = store.query(SortBy::Score, 1, 0);
        assert_eq!(page.page_size, 1);
        let page = store.query(SortBy::Score, 1, 10_000);
        assert_eq!(page.page_size, MAX_PAGE_SIZE);
    }
}
