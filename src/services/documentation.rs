use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Courtside Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sse::events_stream,
        crate::routes::events::create_event,
        crate::routes::events::list_events,
        crate::routes::events::get_event,
        crate::routes::events::delete_event,
        crate::routes::events::add_team,
        crate::routes::events::list_teams,
        crate::routes::events::remove_team,
        crate::routes::events::generate_schedule,
        crate::routes::events::generate_bracket,
        crate::routes::events::list_matches,
        crate::routes::events::get_standings,
        crate::routes::events::run_pairings,
        crate::routes::matches::report_score,
        crate::routes::matches::transition_match,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::event::CreateEventRequest,
            crate::dto::event::EventSummary,
            crate::dto::team::CreateTeamRequest,
            crate::dto::team::TeamSummary,
            crate::dto::matches::MatchSummary,
            crate::dto::matches::ReportScoreRequest,
            crate::dto::matches::TransitionRequest,
            crate::dto::matches::StandingRow,
            crate::dto::pairing::PairingRequest,
            crate::dto::pairing::MatchupSummary,
            crate::dto::sse::Handshake,
            crate::dto::sse::SystemStatus,
            crate::dao::models::RefereePolicy,
            crate::dao::models::ScoringMode,
            crate::dao::models::MatchKind,
            crate::dao::models::MatchStatus,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "sse", description = "Server-sent events stream"),
        (name = "events", description = "Tournament events, rosters, and schedules"),
        (name = "matches", description = "Score reporting and match lifecycle"),
    )
)]
pub struct ApiDoc;
