//! Session HTTP routes: lifecycle plus the three game actions.

use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use crate::domain::SessionSnapshot;
use crate::error::AppError;
use crate::extractors::session_id::SessionId;
use crate::extractors::validated_json::ValidatedJson;
use crate::services::game_flow::GameFlowService;
use crate::services::sessions;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct CreateSessionRequest {
    #[serde(default)]
    player_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RenameRequest {
    player_name: String,
}

#[derive(Debug, Deserialize)]
struct ProposalRequest {
    /// Points claimed for the human side, 0..=10.
    points: i32,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct DecisionRequest {
    accept: bool,
    #[serde(default)]
    message: String,
}

/// POST /api/sessions
///
/// Create a fresh session in round 1, awaiting the human proposal. The body
/// is optional; it may carry an initial player name.
async fn create_session(
    app_state: web::Data<AppState>,
    body: Option<ValidatedJson<CreateSessionRequest>>,
) -> Result<HttpResponse, AppError> {
    let player_name = body.and_then(|b| b.into_inner().player_name);
    let snapshot = sessions::create_session(&app_state, player_name);
    Ok(HttpResponse::Created().json(snapshot))
}

/// GET /api/sessions/{session_id}
async fn get_session(
    app_state: web::Data<AppState>,
    session_id: SessionId,
) -> Result<web::Json<SessionSnapshot>, AppError> {
    let snapshot = sessions::get_session(&app_state, session_id.0).await?;
    Ok(web::Json(snapshot))
}

/// PATCH /api/sessions/{session_id}
///
/// Overwrite the player name. For a finished game this also creates the
/// session's (single) leaderboard entry.
async fn patch_session(
    app_state: web::Data<AppState>,
    session_id: SessionId,
    body: ValidatedJson<RenameRequest>,
) -> Result<web::Json<SessionSnapshot>, AppError> {
    let snapshot =
        sessions::rename_session(&app_state, session_id.0, body.into_inner().player_name).await?;
    Ok(web::Json(snapshot))
}

/// DELETE /api/sessions/{session_id}
async fn delete_session(
    app_state: web::Data<AppState>,
    session_id: SessionId,
) -> Result<HttpResponse, AppError> {
    sessions::delete_session(&app_state, session_id.0)?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/sessions/{session_id}/proposal
async fn submit_proposal(
    app_state: web::Data<AppState>,
    session_id: SessionId,
    body: ValidatedJson<ProposalRequest>,
) -> Result<web::Json<SessionSnapshot>, AppError> {
    let request = body.into_inner();
    let snapshot = GameFlowService
        .submit_proposal(&app_state, session_id.0, request.points, request.message)
        .await?;
    Ok(web::Json(snapshot))
}

/// POST /api/sessions/{session_id}/decision
async fn submit_decision(
    app_state: web::Data<AppState>,
    session_id: SessionId,
    body: ValidatedJson<DecisionRequest>,
) -> Result<web::Json<SessionSnapshot>, AppError> {
    let request = body.into_inner();
    let snapshot = GameFlowService
        .submit_decision(&app_state, session_id.0, request.accept, request.message)
        .await?;
    Ok(web::Json(snapshot))
}

/// POST /api/sessions/{session_id}/counterpart-turn
///
/// Let the automated counterpart take its scheduled turn. This is the slow
/// call; clients poll the session while it is in flight.
async fn counterpart_turn(
    app_state: web::Data<AppState>,
    session_id: SessionId,
) -> Result<web::Json<SessionSnapshot>, AppError> {
    let snapshot = GameFlowService
        .trigger_counterpart_turn(&app_state, session_id.0)
        .await?;
    Ok(web::Json(snapshot))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_session)));
    cfg.service(
        web::resource("/{session_id}")
            .route(web::get().to(get_session))
            .route(web::patch().to(patch_session))
            .route(web::delete().to(delete_session)),
    );
    cfg.service(web::resource("/{session_id}/proposal").route(web::post().to(submit_proposal)));
    cfg.service(web::resource("/{session_id}/decision").route(web::post().to(submit_decision)));
    cfg.service(
        web::resource("/{session_id}/counterpart-turn").route(web::post().to(counterpart_turn)),
    );
}
