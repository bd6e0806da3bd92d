//! Shared setup for integration tests over the in-memory store.

use std::sync::Arc;

use courtside_back::{
    config::AppConfig,
    dao::match_store::memory::MemoryMatchStore,
    dao::models::{RefereePolicy, ScoringMode},
    dto::{event::CreateEventRequest, team::CreateTeamRequest},
    services::event_service,
    state::{AppState, SharedState},
};
use uuid::Uuid;

/// Fresh application state backed by a memory store.
pub async fn test_state() -> SharedState {
    let state = AppState::new(AppConfig::default());
    state
        .set_match_store(Arc::new(MemoryMatchStore::new()))
        .await;
    state
}

/// Create an event plus `team_count` active teams, returning their ids.
pub async fn seed_event(
    state: &SharedState,
    pools: u32,
    courts: u32,
    referee_policy: RefereePolicy,
    scoring_mode: ScoringMode,
    team_count: usize,
) -> (Uuid, Vec<Uuid>) {
    let event = event_service::create_event(
        state,
        CreateEventRequest {
            name: "Test Open".into(),
            pools,
            courts,
            referee_policy,
            scoring_mode,
        },
    )
    .await
    .expect("create event");

    let mut team_ids = Vec::with_capacity(team_count);
    for i in 0..team_count {
        let team = event_service::add_team(
            state,
            event.id,
            CreateTeamRequest {
                name: format!("Team {i}"),
                active: true,
            },
        )
        .await
        .expect("add team");
        team_ids.push(team.id);
    }

    (event.id, team_ids)
}
