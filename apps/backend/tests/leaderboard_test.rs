// Integration tests for the leaderboard engine: orderings, tie-breaks,
// and pagination arithmetic.

mod support;

use backend::services::leaderboard::query_leaderboard;
use backend::store::{LeaderboardStore, SortBy};
use backend::ErrorCode;
use uuid::Uuid;

use crate::support::test_state;

fn board_with_scores(scores: &[(u32, u32)]) -> LeaderboardStore {
    let store = LeaderboardStore::new();
    for (i, (human, ai)) in scores.iter().enumerate() {
        store
            .submit(Uuid::new_v4(), &format!("player-{i}"), *human, *ai)
            .expect("submit");
    }
    store
}

#[test]
fn score_ordering_is_non_increasing() {
    let store = board_with_scores(&[(10, 0), (45, 15), (30, 30), (60, 0), (25, 5)]);
    let page = store.query(SortBy::Score, 1, 10);

    let scores: Vec<u32> = page.entries.iter().map(|e| e.human_score).collect();
    let mut sorted = scores.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(scores, sorted);
    assert_eq!(page.entries[0].human_score, 60);
}

#[test]
fn difference_ordering_is_non_increasing() {
    let store = board_with_scores(&[(35, 25), (30, 0), (20, 40), (45, 15)]);
    let page = store.query(SortBy::Difference, 1, 10);

    let diffs: Vec<i64> = page.entries.iter().map(|e| e.difference).collect();
    let mut sorted = diffs.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(diffs, sorted);
    // (30, 0) wins on margin even though (45, 15) has the higher score.
    assert_eq!(page.entries[0].difference, 30);
    // A game the counterpart dominated has a negative difference.
    assert_eq!(*diffs.last().unwrap(), -20);
}

#[test]
fn twenty_five_entries_paginate_into_three_pages() {
    // Scenario: 25 entries, page size 10.
    let scores: Vec<(u32, u32)> = (0..25).map(|i| (60 - i, i)).collect();
    let store = board_with_scores(&scores);

    let first = store.query(SortBy::Score, 1, 10);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.entries.len(), 10);

    let last = store.query(SortBy::Score, 3, 10);
    assert_eq!(last.entries.len(), 5);

    // Page beyond the last: empty slice, same page count.
    let beyond = store.query(SortBy::Score, 4, 10);
    assert!(beyond.entries.is_empty());
    assert_eq!(beyond.total_pages, 3);
}

#[test]
fn concatenated_pages_reproduce_the_full_set() {
    let scores: Vec<(u32, u32)> = (0..23).map(|i| ((i * 7) % 61, (i * 3) % 31)).collect();
    let store = board_with_scores(&scores);

    for sort_by in [SortBy::Score, SortBy::Difference] {
        let mut names = Vec::new();
        let total_pages = store.query(sort_by, 1, 7).total_pages;
        for page in 1..=total_pages {
            names.extend(
                store
                    .query(sort_by, page, 7)
                    .entries
                    .into_iter()
                    .map(|e| e.player_name),
            );
        }
        assert_eq!(names.len(), scores.len(), "no entry skipped or repeated");
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), scores.len());
    }
}

#[test]
fn query_service_applies_defaults_and_rejects_bad_sort() {
    let state = test_state();

    let page = query_leaderboard(&state, None, None, None).expect("default query");
    assert!(page.entries.is_empty());
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, 10);

    let err = query_leaderboard(&state, Some("elo"), None, None).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidSort);
}

#[test]
fn resubmission_never_changes_the_original_row() {
    let store = LeaderboardStore::new();
    let session_id = Uuid::new_v4();
    assert!(store.submit(session_id, "original", 50, 10).unwrap());
    assert!(!store.submit(session_id, "renamed", 50, 10).unwrap());

    let page = store.query(SortBy::Score, 1, 10);
    assert_eq!(page.entries.len(), 1);
    assert_eq!(page.entries[0].player_name, "original");
}
