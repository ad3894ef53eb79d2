// Property tests for the domain core and the leaderboard's pagination
// guarantees.

use backend::domain::{role_for, Actor, Session, Winner, TOTAL_ROUNDS};
use backend::store::{LeaderboardStore, SortBy};
use proptest::prelude::*;
use uuid::Uuid;

/// Play every round to completion with the scheduled actors.
fn play_full_game(rounds: &[(u8, bool)]) -> Session {
    let mut session = Session::new(None);
    for (points, accept) in rounds {
        let schedule = role_for(session.current_round);
        session
            .propose(schedule.proposer, *points, String::new())
            .expect("scheduled proposal");
        session
            .decide(schedule.decider, *accept, String::new())
            .expect("scheduled decision");
    }
    session
}

proptest! {
    #[test]
    fn final_scores_sum_to_ten_per_accepted_round(
        rounds in proptest::collection::vec((0u8..=10, any::<bool>()), TOTAL_ROUNDS as usize),
    ) {
        let session = play_full_game(&rounds);
        let accepted = rounds.iter().filter(|(_, accept)| *accept).count() as u32;

        prop_assert!(session.game_over);
        prop_assert_eq!(session.current_round, TOTAL_ROUNDS);
        prop_assert_eq!(session.human_score + session.ai_score, accepted * 10);

        let winner = session.winner.expect("terminal sessions carry a winner");
        match winner {
            Winner::Human => prop_assert!(session.human_score > session.ai_score),
            Winner::Ai => prop_assert!(session.ai_score > session.human_score),
            Winner::Tie => prop_assert_eq!(session.human_score, session.ai_score),
        }
    }

    #[test]
    fn rejection_advances_without_scoring(points in 0u8..=10) {
        let mut session = Session::new(None);
        session.propose(Actor::Human, points, String::new()).unwrap();
        session.decide(Actor::Ai, false, String::new()).unwrap();

        prop_assert_eq!(session.human_score, 0);
        prop_assert_eq!(session.ai_score, 0);
        prop_assert_eq!(session.current_round, 2);
    }

    #[test]
    fn proposer_is_human_iff_round_is_odd(round in 1u8..=TOTAL_ROUNDS) {
        let assignment = role_for(round);
        prop_assert_eq!(assignment.proposer == Actor::Human, round % 2 == 1);
        prop_assert_eq!(assignment.decider == Actor::Human, round % 2 == 0);
    }

    #[test]
    fn pagination_partitions_the_board(
        scores in proptest::collection::vec((0u32..=60, 0u32..=60), 0..40),
        page_size in 1u32..=20,
    ) {
        let store = LeaderboardStore::new();
        for (i, (human, ai)) in scores.iter().enumerate() {
            store
                .submit(Uuid::new_v4(), &format!("player-{i}"), *human, *ai)
                .expect("submit");
        }

        for sort_by in [SortBy::Score, SortBy::Difference] {
            let total_pages = store.query(sort_by, 1, page_size).total_pages;
            prop_assert_eq!(
                total_pages,
                ((scores.len() as u32).div_ceil(page_size)).max(1)
            );

            let mut names = Vec::new();
            let mut keys: Vec<i64> = Vec::new();
            for page in 1..=total_pages {
                let slice = store.query(sort_by, page, page_size);
                prop_assert_eq!(slice.total_pages, total_pages);
                for row in slice.entries {
                    keys.push(match sort_by {
                        SortBy::Score => i64::from(row.human_score),
                        SortBy::Difference => row.difference,
                    });
                    names.push(row.player_name);
                }
            }

            // Every entry exactly once, in non-increasing key order.
            prop_assert_eq!(names.len(), scores.len());
            names.sort();
            names.dedup();
            prop_assert_eq!(names.len(), scores.len());
            prop_assert!(keys.windows(2).all(|pair| pair[0] >= pair[1]));

            let beyond = store.query(sort_by, total_pages + 1, page_size);
            prop_assert!(beyond.entries.is_empty());
            prop_assert_eq!(beyond.total_pages, total_pages);
        }
    }
}
