//! Orchestration of schedule generation, score reporting, and standings.

use tracing::info;
use uuid::Uuid;

use crate::{
    dao::models::{
        EventEntity, MatchEntity, MatchFilter, MatchKind, RefereePolicy, TeamEntity,
    },
    dto::{
        matches::{
            MatchListQuery, MatchSummary, ReportScoreRequest, StandingRow, TransitionRequest,
        },
        pairing::{MatchupSummary, PairingRequest, PairingStrategy},
    },
    error::ServiceError,
    services::{bracket, event_service, pairing, pool_schedule, referee, sse_events, standings},
    state::{SharedState, changes::MatchChange, lifecycle},
};

/// Regenerate the pool-play schedule for an event.
///
/// Prior pool matches are dropped and the new schedule lands in one batch
/// insert, so a generation failure never leaves a half-written phase behind.
pub async fn generate_pool_schedule(
    state: &SharedState,
    event_id: Uuid,
) -> Result<Vec<MatchSummary>, ServiceError> {
    let event = event_service::find_event(state, event_id).await?;
    let teams = active_roster(state, &event).await?;
    validate_schedule_config(state, &event, &teams)?;

    let team_ids: Vec<Uuid> = teams.iter().map(|team| team.id).collect();
    let mut pool_matches =
        pool_schedule::build(&team_ids, event.pools, event.courts, false)
            .map_err(|err| ServiceError::InvalidInput(err.to_string()))?;
    if event.referee_policy == RefereePolicy::Teams {
        referee::assign(&mut pool_matches, &team_ids)
            .map_err(|err| ServiceError::InvalidInput(err.to_string()))?;
    }

    let batch: Vec<MatchEntity> = pool_matches
        .into_iter()
        .map(|placed| {
            let mut entity = MatchEntity::new(event.id, MatchKind::Pool);
            entity.round = placed.round;
            entity.court = placed.court;
            entity.team1 = Some(placed.team1);
            entity.team2 = Some(placed.team2);
            entity.referee = placed.referee;
            entity
        })
        .collect();

    let store = state.require_match_store().await?;
    store
        .delete_matches_by_event(event.id, Some(MatchFilter::kind(MatchKind::Pool)))
        .await?;
    let inserted = store.insert_matches(batch).await?;

    info!(event_id = %event.id, matches = inserted.len(), "pool schedule generated");
    for entity in &inserted {
        state.changes().publish(MatchChange::inserted(entity.clone()));
    }
    sse_events::broadcast_schedule_generated(state, &inserted);

    Ok(inserted.into_iter().map(Into::into).collect())
}

/// Build the elimination bracket from current pool standings.
pub async fn generate_bracket(
    state: &SharedState,
    event_id: Uuid,
) -> Result<Vec<MatchSummary>, ServiceError> {
    let event = event_service::find_event(state, event_id).await?;
    let teams = active_roster(state, &event).await?;
    let team_ids: Vec<Uuid> = teams.iter().map(|team| team.id).collect();

    let store = state.require_match_store().await?;
    let pool_matches = store
        .load_matches(event.id, Some(MatchFilter::kind(MatchKind::Pool)))
        .await?;
    let ranked: Vec<Uuid> = standings::compute(&pool_matches, &team_ids, event.scoring_mode)
        .into_iter()
        .map(|(team_id, _)| team_id)
        .collect();

    let batch = bracket::build(event.id, &ranked)
        .map_err(|err| ServiceError::InvalidInput(err.to_string()))?;

    store
        .delete_matches_by_event(event.id, Some(MatchFilter::kind(MatchKind::Bracket)))
        .await?;
    let inserted = store.insert_matches(batch).await?;

    info!(event_id = %event.id, matches = inserted.len(), "bracket generated");
    for entity in &inserted {
        state.changes().publish(MatchChange::inserted(entity.clone()));
    }
    sse_events::broadcast_bracket_generated(state, &inserted);

    Ok(inserted.into_iter().map(Into::into).collect())
}

/// Matches for an event, optionally narrowed by phase or status.
pub async fn list_matches(
    state: &SharedState,
    event_id: Uuid,
    query: MatchListQuery,
) -> Result<Vec<MatchSummary>, ServiceError> {
    event_service::find_event(state, event_id).await?;
    let store = state.require_match_store().await?;
    let filter = MatchFilter {
        kind: query.kind,
        status: query.status,
    };
    let matches = store.load_matches(event_id, Some(filter)).await?;
    Ok(matches.into_iter().map(Into::into).collect())
}

/// Ranked standings over the event's completed pool matches, best seed first.
pub async fn compute_standings(
    state: &SharedState,
    event_id: Uuid,
) -> Result<Vec<StandingRow>, ServiceError> {
    let event = event_service::find_event(state, event_id).await?;
    let teams = active_roster(state, &event).await?;
    let team_ids: Vec<Uuid> = teams.iter().map(|team| team.id).collect();

    let store = state.require_match_store().await?;
    let pool_matches = store
        .load_matches(event.id, Some(MatchFilter::kind(MatchKind::Pool)))
        .await?;

    Ok(standings::compute(&pool_matches, &team_ids, event.scoring_mode)
        .into_iter()
        .map(Into::into)
        .collect())
}

/// Report a final score, completing the match.
///
/// Publishing the resulting change record is what drives bracket progression.
pub async fn report_score(
    state: &SharedState,
    match_id: Uuid,
    request: ReportScoreRequest,
) -> Result<MatchSummary, ServiceError> {
    let store = state.require_match_store().await?;
    let Some(before) = store.find_match(match_id).await? else {
        return Err(ServiceError::NotFound(format!(
            "match `{match_id}` not found"
        )));
    };
    if before.team1.is_none() || before.team2.is_none() {
        return Err(ServiceError::InvalidState(
            "cannot report a score before both participants are known".into(),
        ));
    }

    let next_status = lifecycle::apply(before.status, lifecycle::MatchEvent::ReportScore)?;

    let mut next = before.clone();
    next.team1_score = Some(request.team1_score);
    next.team2_score = Some(request.team2_score);
    next.status = next_status;
    let updated = store.update_match(next).await?;

    state
        .changes()
        .publish(MatchChange::updated(before, updated.clone()));
    sse_events::broadcast_match_updated(state, &updated);

    Ok(updated.into())
}

/// Apply an explicit lifecycle transition (begin, cancel) to a match.
pub async fn transition_match(
    state: &SharedState,
    match_id: Uuid,
    request: TransitionRequest,
) -> Result<MatchSummary, ServiceError> {
    let store = state.require_match_store().await?;
    let Some(before) = store.find_match(match_id).await? else {
        return Err(ServiceError::NotFound(format!(
            "match `{match_id}` not found"
        )));
    };

    let next_status = lifecycle::apply(before.status, request.transition.into())?;

    let mut next = before.clone();
    next.status = next_status;
    let updated = store.update_match(next).await?;

    state
        .changes()
        .publish(MatchChange::updated(before, updated.clone()));
    sse_events::broadcast_match_updated(state, &updated);

    Ok(updated.into())
}

/// Run a pairing strategy over the event's active roster.
pub async fn run_pairings(
    state: &SharedState,
    event_id: Uuid,
    request: PairingRequest,
) -> Result<Vec<MatchupSummary>, ServiceError> {
    let event = event_service::find_event(state, event_id).await?;
    let teams = active_roster(state, &event).await?;
    let team_ids: Vec<Uuid> = teams.iter().map(|team| team.id).collect();

    let per_side = request.teams_per_side as usize;
    let matchups = match request.strategy {
        PairingStrategy::Consecutive => pairing::consecutive(&team_ids, per_side),
        PairingStrategy::Snake => pairing::snake(&team_ids, per_side),
        PairingStrategy::Random => pairing::random(&team_ids, per_side),
        PairingStrategy::RoundRobin => {
            Ok(pairing::round_robin_capped(&team_ids, request.max_games))
        }
    }
    .map_err(|err| ServiceError::InvalidInput(err.to_string()))?;

    Ok(matchups.into_iter().map(Into::into).collect())
}

async fn active_roster(
    state: &SharedState,
    event: &EventEntity,
) -> Result<Vec<TeamEntity>, ServiceError> {
    let store = state.require_match_store().await?;
    let teams = store.load_teams(event.id).await?;
    Ok(teams.into_iter().filter(|team| team.active).collect())
}

fn validate_schedule_config(
    state: &SharedState,
    event: &EventEntity,
    teams: &[TeamEntity],
) -> Result<(), ServiceError> {
    let limits = state.config().limits();
    if teams.len() < 2 {
        return Err(ServiceError::InvalidInput(format!(
            "schedule generation requires at least 2 active teams, got {}",
            teams.len()
        )));
    }
    if teams.len() as u32 > limits.max_teams {
        return Err(ServiceError::InvalidInput(format!(
            "active roster of {} exceeds the limit of {} teams",
            teams.len(),
            limits.max_teams
        )));
    }
    if event.referee_policy == RefereePolicy::Teams && teams.len() <= 2 {
        return Err(ServiceError::InvalidInput(
            "team referees require more than 2 teams".into(),
        ));
    }
    Ok(())
}
