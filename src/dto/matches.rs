use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dao::models::{MatchEntity, MatchKind, MatchStatus},
    services::standings::Standing,
    state::lifecycle::MatchEvent,
};

/// Match representation returned to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchSummary {
    /// Identifier of the match.
    pub id: Uuid,
    /// Event the match belongs to.
    pub event_id: Uuid,
    /// Playable round index.
    pub round: u32,
    /// Court index.
    pub court: u32,
    /// First participant, when filled.
    pub team1: Option<Uuid>,
    /// Second participant, when filled.
    pub team2: Option<Uuid>,
    /// Score reported for the first participant.
    pub team1_score: Option<u32>,
    /// Score reported for the second participant.
    pub team2_score: Option<u32>,
    /// Officiating team, when the event uses team referees.
    pub referee: Option<Uuid>,
    /// Pool or bracket phase.
    pub kind: MatchKind,
    /// Lifecycle status.
    pub status: MatchStatus,
    /// Bracket match the winner advances into.
    pub child: Option<Uuid>,
}

impl From<MatchEntity> for MatchSummary {
    fn from(entity: MatchEntity) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            round: entity.round,
            court: entity.court,
            team1: entity.team1,
            team2: entity.team2,
            team1_score: entity.team1_score,
            team2_score: entity.team2_score,
            referee: entity.referee,
            kind: entity.kind,
            status: entity.status,
            child: entity.child,
        }
    }
}

/// Optional narrowing applied when listing an event's matches.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct MatchListQuery {
    /// Restrict to one phase.
    pub kind: Option<MatchKind>,
    /// Restrict to one lifecycle status.
    pub status: Option<MatchStatus>,
}

/// Final score reported for a match.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReportScoreRequest {
    /// Points scored by the first participant.
    pub team1_score: u32,
    /// Points scored by the second participant.
    pub team2_score: u32,
}

/// Explicit lifecycle transition applied to a match.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatusTransition {
    /// Play begins on a scheduled match.
    Begin,
    /// The match is abandoned.
    Cancel,
}

impl From<StatusTransition> for MatchEvent {
    fn from(transition: StatusTransition) -> Self {
        match transition {
            StatusTransition::Begin => MatchEvent::Begin,
            StatusTransition::Cancel => MatchEvent::Cancel,
        }
    }
}

/// Request body for a lifecycle transition.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransitionRequest {
    /// Transition to apply.
    pub transition: StatusTransition,
}

/// One row of the ranked standings table, best seed first.
#[derive(Debug, Serialize, ToSchema)]
pub struct StandingRow {
    /// Team the row describes.
    pub team_id: Uuid,
    /// Matches won outright.
    pub wins: u32,
    /// Own points minus opponent points.
    pub point_diff: i64,
    /// Total points scored.
    pub points_for: u64,
}

impl From<(Uuid, Standing)> for StandingRow {
    fn from((team_id, standing): (Uuid, Standing)) -> Self {
        Self {
            team_id,
            wins: standing.wins,
            point_diff: standing.point_diff,
            points_for: standing.points_for,
        }
    }
}
