use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use uuid::Uuid;

use crate::{
    dto::matches::{MatchSummary, ReportScoreRequest, TransitionRequest},
    error::AppError,
    services::schedule_service,
    state::SharedState,
};

/// Routes handling score reporting and match lifecycle transitions.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/matches/{id}/score", post(report_score))
        .route("/matches/{id}/status", post(transition_match))
}

/// Report a final score, completing the match and advancing the bracket.
#[utoipa::path(
    post,
    path = "/matches/{id}/score",
    tag = "matches",
    params(("id" = Uuid, Path, description = "Identifier of the match")),
    request_body = ReportScoreRequest,
    responses(
        (status = 200, description = "Score recorded", body = MatchSummary),
        (status = 404, description = "Unknown match"),
        (status = 409, description = "Match cannot accept a score in its current status")
    )
)]
pub async fn report_score(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReportScoreRequest>,
) -> Result<Json<MatchSummary>, AppError> {
    let summary = schedule_service::report_score(&state, id, payload).await?;
    Ok(Json(summary))
}

/// Apply an explicit lifecycle transition (begin, cancel) to a match.
#[utoipa::path(
    post,
    path = "/matches/{id}/status",
    tag = "matches",
    params(("id" = Uuid, Path, description = "Identifier of the match")),
    request_body = TransitionRequest,
    responses(
        (status = 200, description = "Transition applied", body = MatchSummary),
        (status = 404, description = "Unknown match"),
        (status = 409, description = "Transition not allowed from the current status")
    )
)]
pub async fn transition_match(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransitionRequest>,
) -> Result<Json<MatchSummary>, AppError> {
    let summary = schedule_service::transition_match(&state, id, payload).await?;
    Ok(Json(summary))
}
