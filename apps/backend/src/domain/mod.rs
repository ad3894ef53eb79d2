//! Domain layer: pure game logic, no I/O.

pub mod ledger;
pub mod rules;
pub mod scoring;
pub mod snapshot;
pub mod state;

// Re-exports for ergonomics
pub use ledger::{Actor, Ledger, Role, RoundEvent, RoundOutcome};
pub use rules::{role_for, RoleAssignment, MAX_MESSAGE_LEN, POT_POINTS, TOTAL_ROUNDS};
pub use scoring::{is_big_win, winner_for};
pub use snapshot::{snapshot, SessionSnapshot};
pub use state::{Phase, Session, Winner};
