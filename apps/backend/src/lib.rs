#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod counterpart;
pub mod domain;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod web;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use counterpart::create_counterpart;
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use extractors::session_id::SessionId;
pub use extractors::validated_json::ValidatedJson;
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
