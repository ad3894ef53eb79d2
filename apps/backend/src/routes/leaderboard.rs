//! Leaderboard HTTP routes.

use actix_web::{web, Result};
use serde::Deserialize;

use crate::error::AppError;
use crate::services::leaderboard::query_leaderboard;
use crate::state::app_state::AppState;
use crate::store::LeaderboardPage;

#[derive(Debug, Deserialize)]
struct LeaderboardQuery {
    sort_by: Option<String>,
    page: Option<u32>,
    page_size: Option<u32>,
}

/// GET /api/leaderboard?sort_by=score|difference&page=1&page_size=10
async fn get_leaderboard(
    app_state: web::Data<AppState>,
    query: web::Query<LeaderboardQuery>,
) -> Result<web::Json<LeaderboardPage>, AppError> {
    let page = query_leaderboard(
        &app_state,
        query.sort_by.as_deref(),
        query.page,
        query.page_size,
    )?;
    Ok(web::Json(page))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(get_leaderboard)));
}
