use serde::Serialize;
use utoipa::ToSchema;

use crate::dto::matches::MatchSummary;

#[derive(Clone, Debug)]
/// Dispatched payload carried across the SSE channel.
pub struct ServerEvent {
    /// Optional SSE event name.
    pub event: Option<String>,
    /// Serialized JSON data field.
    pub data: String,
}

impl ServerEvent {
    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Initial metadata sent to an SSE client when it connects.
pub struct Handshake {
    /// Human-readable message confirming the subscription.
    pub message: String,
    /// Whether the backend is running without a storage backend connection.
    pub degraded: bool,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when the backend enters or leaves degraded mode.
pub struct SystemStatus {
    /// Current degraded flag.
    pub degraded: bool,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a pool schedule has been (re)generated for an event.
pub struct ScheduleGeneratedEvent {
    /// Freshly inserted pool matches.
    pub matches: Vec<MatchSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when an elimination bracket has been (re)generated for an event.
pub struct BracketGeneratedEvent {
    /// Freshly inserted bracket matches.
    pub matches: Vec<MatchSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a match's score or status changes.
pub struct MatchUpdatedEvent {
    /// New value of the match.
    pub r#match: MatchSummary,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when winners advance into a bracket slot.
pub struct BracketAdvancedEvent {
    /// Bracket match that received its participants.
    pub r#match: MatchSummary,
}
