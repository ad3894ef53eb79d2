use crate::domain::rules::POT_POINTS;
use crate::domain::state::Winner;

/// Points awarded for one round, in human-side units.
///
/// An accepted proposal splits the pot exactly; a rejected one awards
/// nothing to either side.
pub fn round_points(proposal: u8, accepted: bool) -> (u8, u8) {
    if accepted {
        (proposal, POT_POINTS - proposal)
    } else {
        (0, 0)
    }
}

/// Winner by final score comparison, evaluated once at the terminal
/// transition. Independent of how many rounds were rejected.
pub fn winner_for(human_score: u32, ai_score: u32) -> Winner {
    if human_score > ai_score {
        Winner::Human
    } else if ai_score > human_score {
        Winner::Ai
    } else {
        Winner::Tie
    }
}

/// Naming-prompt heuristic: a finished game worth putting on the
/// leaderboard. Deliberately looser than [`winner_for`] and never used to
/// decide the winner.
pub fn is_big_win(human_score: u32, ai_score: u32) -> bool {
    human_score > 30 || i64::from(human_score) - i64::from(ai_score) > 10
}
