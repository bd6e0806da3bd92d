//! Construction and broadcast of the realtime SSE payloads.

use serde::Serialize;
use tracing::warn;

use crate::{
    dao::models::MatchEntity,
    dto::{
        matches::MatchSummary,
        sse::{
            BracketAdvancedEvent, BracketGeneratedEvent, MatchUpdatedEvent,
            ScheduleGeneratedEvent, ServerEvent, SystemStatus,
        },
    },
    state::SharedState,
};

const EVENT_SCHEDULE_GENERATED: &str = "schedule.generated";
const EVENT_BRACKET_GENERATED: &str = "bracket.generated";
const EVENT_MATCH_UPDATED: &str = "match.updated";
const EVENT_BRACKET_ADVANCED: &str = "bracket.advanced";
const EVENT_SYSTEM_STATUS: &str = "system.status";

/// Broadcast a freshly generated pool schedule.
pub fn broadcast_schedule_generated(state: &SharedState, matches: &[MatchEntity]) {
    let payload = ScheduleGeneratedEvent {
        matches: summaries(matches),
    };
    send_event(state, EVENT_SCHEDULE_GENERATED, &payload);
}

/// Broadcast a freshly generated bracket.
pub fn broadcast_bracket_generated(state: &SharedState, matches: &[MatchEntity]) {
    let payload = BracketGeneratedEvent {
        matches: summaries(matches),
    };
    send_event(state, EVENT_BRACKET_GENERATED, &payload);
}

/// Broadcast a score or status change on a single match.
pub fn broadcast_match_updated(state: &SharedState, entity: &MatchEntity) {
    let payload = MatchUpdatedEvent {
        r#match: entity.clone().into(),
    };
    send_event(state, EVENT_MATCH_UPDATED, &payload);
}

/// Broadcast that winners advanced into a bracket slot.
pub fn broadcast_bracket_advanced(state: &SharedState, entity: &MatchEntity) {
    let payload = BracketAdvancedEvent {
        r#match: entity.clone().into(),
    };
    send_event(state, EVENT_BRACKET_ADVANCED, &payload);
}

/// Broadcast a degraded-mode flip.
pub fn broadcast_system_status(state: &SharedState, degraded: bool) {
    let payload = SystemStatus { degraded };
    send_event(state, EVENT_SYSTEM_STATUS, &payload);
}

fn summaries(matches: &[MatchEntity]) -> Vec<MatchSummary> {
    matches.iter().cloned().map(Into::into).collect()
}

fn send_event(state: &SharedState, event: &str, payload: &impl Serialize) {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(event) => state.events_sse().broadcast(event),
        Err(err) => warn!(event, error = %err, "failed to serialize SSE payload"),
    }
}
