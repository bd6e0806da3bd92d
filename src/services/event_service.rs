//! Event and roster management on top of the match store.

use std::time::SystemTime;

use uuid::Uuid;

use crate::{
    dao::models::{EventEntity, TeamEntity},
    dto::{
        event::{CreateEventRequest, EventSummary},
        team::{CreateTeamRequest, TeamSummary},
    },
    error::ServiceError,
    state::SharedState,
};

/// Register a new tournament event.
pub async fn create_event(
    state: &SharedState,
    request: CreateEventRequest,
) -> Result<EventSummary, ServiceError> {
    let limits = state.config().limits();
    if request.pools > limits.max_pools {
        return Err(ServiceError::InvalidInput(format!(
            "pool count {} exceeds the limit of {}",
            request.pools, limits.max_pools
        )));
    }
    if request.courts > limits.max_courts {
        return Err(ServiceError::InvalidInput(format!(
            "court count {} exceeds the limit of {}",
            request.courts, limits.max_courts
        )));
    }

    let now = SystemTime::now();
    let event = EventEntity {
        id: Uuid::new_v4(),
        name: request.name.trim().to_string(),
        pools: request.pools,
        courts: request.courts,
        referee_policy: request.referee_policy,
        scoring_mode: request.scoring_mode,
        created_at: now,
        updated_at: now,
    };

    let store = state.require_match_store().await?;
    store.save_event(event.clone()).await?;

    Ok(event.into())
}

/// All known events.
pub async fn list_events(state: &SharedState) -> Result<Vec<EventSummary>, ServiceError> {
    let store = state.require_match_store().await?;
    let events = store.list_events().await?;
    Ok(events.into_iter().map(Into::into).collect())
}

/// Look an event up by id.
pub async fn get_event(state: &SharedState, id: Uuid) -> Result<EventSummary, ServiceError> {
    let event = find_event(state, id).await?;
    Ok(event.into())
}

/// Delete an event together with its teams and matches.
pub async fn delete_event(state: &SharedState, id: Uuid) -> Result<(), ServiceError> {
    let store = state.require_match_store().await?;
    if !store.delete_event(id).await? {
        return Err(ServiceError::NotFound(format!("event `{id}` not found")));
    }
    Ok(())
}

/// Register a team for an event.
pub async fn add_team(
    state: &SharedState,
    event_id: Uuid,
    request: CreateTeamRequest,
) -> Result<TeamSummary, ServiceError> {
    let event = find_event(state, event_id).await?;
    let store = state.require_match_store().await?;

    let roster = store.load_teams(event.id).await?;
    let limits = state.config().limits();
    if roster.len() as u32 >= limits.max_teams {
        return Err(ServiceError::InvalidInput(format!(
            "event already has the maximum of {} teams",
            limits.max_teams
        )));
    }

    let team = TeamEntity {
        id: Uuid::new_v4(),
        event_id: event.id,
        name: request.name.trim().to_string(),
        active: request.active,
        updated_at: SystemTime::now(),
    };
    store.save_team(team.clone()).await?;

    Ok(team.into())
}

/// Teams registered for an event, in registration order.
pub async fn list_teams(
    state: &SharedState,
    event_id: Uuid,
) -> Result<Vec<TeamSummary>, ServiceError> {
    find_event(state, event_id).await?;
    let store = state.require_match_store().await?;
    let teams = store.load_teams(event_id).await?;
    Ok(teams.into_iter().map(Into::into).collect())
}

/// Remove one team from an event's roster.
pub async fn remove_team(
    state: &SharedState,
    event_id: Uuid,
    team_id: Uuid,
) -> Result<(), ServiceError> {
    find_event(state, event_id).await?;
    let store = state.require_match_store().await?;
    store.delete_team(event_id, team_id).await?;
    Ok(())
}

/// Load an event or fail with a not-found error.
pub(crate) async fn find_event(
    state: &SharedState,
    id: Uuid,
) -> Result<EventEntity, ServiceError> {
    let store = state.require_match_store().await?;
    let Some(event) = store.find_event(id).await? else {
        return Err(ServiceError::NotFound(format!("event `{id}` not found")));
    };
    Ok(event)
}
