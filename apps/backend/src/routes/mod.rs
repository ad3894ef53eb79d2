use actix_web::web;

pub mod health;
pub mod leaderboard;
pub mod sessions;

/// Configure application routes for tests and non-HttpServer contexts.
///
/// In production, `main.rs` wires these under the full middleware stack
/// (CORS, request tracing, structured logging). For tests we register the
/// same paths without those wrappers so that endpoint behavior can be
/// exercised directly.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Session routes: /api/sessions/**
    cfg.service(web::scope("/api/sessions").configure(sessions::configure_routes));

    // Leaderboard routes: /api/leaderboard
    cfg.service(web::scope("/api/leaderboard").configure(leaderboard::configure_routes));
}
