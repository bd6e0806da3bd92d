use axum::Router;

use crate::state::SharedState;

/// Swagger UI and the OpenAPI document.
pub mod docs;
/// Event, team, schedule, bracket, standings and pairing endpoints.
pub mod events;
/// Liveness endpoint.
pub mod health;
/// Per-match score and status endpoints.
pub mod matches;
/// Server-sent event stream.
pub mod sse;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(sse::router())
        .merge(events::router())
        .merge(matches::router());

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}
