//! Explicitly owned in-memory stores; created at startup and passed to
//! services, never reached through ambient globals.

pub mod leaderboard;
pub mod sessions;

pub use leaderboard::{LeaderboardPage, LeaderboardRow, LeaderboardStore, SortBy};
pub use sessions::{SessionHandle, SessionStore};
