//! Service layer: orchestrates domain transitions over the stores.

pub mod game_flow;
pub mod leaderboard;
pub mod sessions;
