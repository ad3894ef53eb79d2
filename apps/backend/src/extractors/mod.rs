//! Request extractors for the HTTP boundary.

pub mod session_id;
pub mod validated_json;

pub use session_id::SessionId;
pub use validated_json::ValidatedJson;
