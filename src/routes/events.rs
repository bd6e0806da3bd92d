use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        event::{CreateEventRequest, EventSummary},
        matches::{MatchListQuery, MatchSummary, StandingRow},
        pairing::{MatchupSummary, PairingRequest},
        team::{CreateTeamRequest, TeamSummary},
    },
    error::AppError,
    services::{event_service, schedule_service},
    state::SharedState,
};

/// Routes handling events, rosters, schedules, and standings.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/events", post(create_event).get(list_events))
        .route("/events/{id}", get(get_event).delete(delete_event))
        .route("/events/{id}/teams", post(add_team).get(list_teams))
        .route("/events/{id}/teams/{team_id}", delete(remove_team))
        .route("/events/{id}/schedule", post(generate_schedule))
        .route("/events/{id}/bracket", post(generate_bracket))
        .route("/events/{id}/matches", get(list_matches))
        .route("/events/{id}/standings", get(get_standings))
        .route("/events/{id}/pairings", post(run_pairings))
}

/// Register a new tournament event.
#[utoipa::path(
    post,
    path = "/events",
    tag = "events",
    request_body = CreateEventRequest,
    responses(
        (status = 200, description = "Event created", body = EventSummary),
        (status = 400, description = "Invalid event configuration")
    )
)]
pub async fn create_event(
    State(state): State<SharedState>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<Json<EventSummary>, AppError> {
    payload.validate()?;
    let summary = event_service::create_event(&state, payload).await?;
    Ok(Json(summary))
}

/// List all known events.
#[utoipa::path(
    get,
    path = "/events",
    tag = "events",
    responses((status = 200, description = "Known events", body = [EventSummary]))
)]
pub async fn list_events(
    State(state): State<SharedState>,
) -> Result<Json<Vec<EventSummary>>, AppError> {
    let events = event_service::list_events(&state).await?;
    Ok(Json(events))
}

/// Fetch a single event.
#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = "events",
    params(("id" = Uuid, Path, description = "Identifier of the event")),
    responses(
        (status = 200, description = "Event found", body = EventSummary),
        (status = 404, description = "Unknown event")
    )
)]
pub async fn get_event(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventSummary>, AppError> {
    let summary = event_service::get_event(&state, id).await?;
    Ok(Json(summary))
}

/// Delete an event together with its teams and matches.
#[utoipa::path(
    delete,
    path = "/events/{id}",
    tag = "events",
    params(("id" = Uuid, Path, description = "Identifier of the event")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, description = "Unknown event")
    )
)]
pub async fn delete_event(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    event_service::delete_event(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Register a team for an event.
#[utoipa::path(
    post,
    path = "/events/{id}/teams",
    tag = "events",
    params(("id" = Uuid, Path, description = "Identifier of the event")),
    request_body = CreateTeamRequest,
    responses(
        (status = 200, description = "Team registered", body = TeamSummary),
        (status = 404, description = "Unknown event")
    )
)]
pub async fn add_team(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateTeamRequest>,
) -> Result<Json<TeamSummary>, AppError> {
    payload.validate()?;
    let summary = event_service::add_team(&state, id, payload).await?;
    Ok(Json(summary))
}

/// List the teams registered for an event.
#[utoipa::path(
    get,
    path = "/events/{id}/teams",
    tag = "events",
    params(("id" = Uuid, Path, description = "Identifier of the event")),
    responses(
        (status = 200, description = "Registered teams", body = [TeamSummary]),
        (status = 404, description = "Unknown event")
    )
)]
pub async fn list_teams(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<TeamSummary>>, AppError> {
    let teams = event_service::list_teams(&state, id).await?;
    Ok(Json(teams))
}

/// Remove a team from an event's roster.
#[utoipa::path(
    delete,
    path = "/events/{id}/teams/{team_id}",
    tag = "events",
    params(
        ("id" = Uuid, Path, description = "Identifier of the event"),
        ("team_id" = Uuid, Path, description = "Identifier of the team")
    ),
    responses(
        (status = 204, description = "Team removed"),
        (status = 404, description = "Unknown event")
    )
)]
pub async fn remove_team(
    State(state): State<SharedState>,
    Path((id, team_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    event_service::remove_team(&state, id, team_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Regenerate the pool-play schedule for an event.
#[utoipa::path(
    post,
    path = "/events/{id}/schedule",
    tag = "events",
    params(("id" = Uuid, Path, description = "Identifier of the event")),
    responses(
        (status = 200, description = "Pool schedule generated", body = [MatchSummary]),
        (status = 400, description = "Invalid schedule configuration"),
        (status = 404, description = "Unknown event")
    )
)]
pub async fn generate_schedule(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<MatchSummary>>, AppError> {
    let matches = schedule_service::generate_pool_schedule(&state, id).await?;
    Ok(Json(matches))
}

/// Build the elimination bracket from current standings.
#[utoipa::path(
    post,
    path = "/events/{id}/bracket",
    tag = "events",
    params(("id" = Uuid, Path, description = "Identifier of the event")),
    responses(
        (status = 200, description = "Bracket generated", body = [MatchSummary]),
        (status = 400, description = "Too few teams for a bracket"),
        (status = 404, description = "Unknown event")
    )
)]
pub async fn generate_bracket(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<MatchSummary>>, AppError> {
    let matches = schedule_service::generate_bracket(&state, id).await?;
    Ok(Json(matches))
}

/// List an event's matches, optionally narrowed by phase or status.
#[utoipa::path(
    get,
    path = "/events/{id}/matches",
    tag = "events",
    params(
        ("id" = Uuid, Path, description = "Identifier of the event"),
        ("kind" = Option<String>, Query, description = "Restrict to `pool` or `bracket` matches"),
        ("status" = Option<String>, Query, description = "Restrict to one lifecycle status")
    ),
    responses(
        (status = 200, description = "Matches for the event", body = [MatchSummary]),
        (status = 404, description = "Unknown event")
    )
)]
pub async fn list_matches(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Query(query): Query<MatchListQuery>,
) -> Result<Json<Vec<MatchSummary>>, AppError> {
    let matches = schedule_service::list_matches(&state, id, query).await?;
    Ok(Json(matches))
}

/// Ranked standings over an event's completed pool matches.
#[utoipa::path(
    get,
    path = "/events/{id}/standings",
    tag = "events",
    params(("id" = Uuid, Path, description = "Identifier of the event")),
    responses(
        (status = 200, description = "Ranked standings, best seed first", body = [StandingRow]),
        (status = 404, description = "Unknown event")
    )
)]
pub async fn get_standings(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<StandingRow>>, AppError> {
    let rows = schedule_service::compute_standings(&state, id).await?;
    Ok(Json(rows))
}

/// Run a pairing strategy over the event's roster.
#[utoipa::path(
    post,
    path = "/events/{id}/pairings",
    tag = "events",
    params(("id" = Uuid, Path, description = "Identifier of the event")),
    request_body = PairingRequest,
    responses(
        (status = 200, description = "Generated matchups", body = [MatchupSummary]),
        (status = 400, description = "Roster does not fit the strategy"),
        (status = 404, description = "Unknown event")
    )
)]
pub async fn run_pairings(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PairingRequest>,
) -> Result<Json<Vec<MatchupSummary>>, AppError> {
    payload.validate()?;
    let matchups = schedule_service::run_pairings(&state, id, payload).await?;
    Ok(Json(matchups))
}
