use mongodb::bson::{Binary, DateTime, Document, doc, spec::BinarySubtype};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dao::models::{
    EventEntity, MatchEntity, MatchFilter, MatchKind, MatchStatus, RefereePolicy, ScoringMode,
    TeamEntity,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoEventDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    name: String,
    pools: u32,
    courts: u32,
    referee_policy: RefereePolicy,
    scoring_mode: ScoringMode,
    created_at: DateTime,
    updated_at: DateTime,
}

impl From<EventEntity> for MongoEventDocument {
    fn from(value: EventEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            pools: value.pools,
            courts: value.courts,
            referee_policy: value.referee_policy,
            scoring_mode: value.scoring_mode,
            created_at: DateTime::from_system_time(value.created_at),
            updated_at: DateTime::from_system_time(value.updated_at),
        }
    }
}

impl From<MongoEventDocument> for EventEntity {
    fn from(value: MongoEventDocument) -> Self {
        Self {
            id: value.id,
            name: value.name,
            pools: value.pools,
            courts: value.courts,
            referee_policy: value.referee_policy,
            scoring_mode: value.scoring_mode,
            created_at: value.created_at.to_system_time(),
            updated_at: value.updated_at.to_system_time(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoTeamDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    event_id: Uuid,
    name: String,
    active: bool,
    updated_at: DateTime,
}

impl From<TeamEntity> for MongoTeamDocument {
    fn from(value: TeamEntity) -> Self {
        Self {
            id: value.id,
            event_id: value.event_id,
            name: value.name,
            active: value.active,
            updated_at: DateTime::from_system_time(value.updated_at),
        }
    }
}

impl From<MongoTeamDocument> for TeamEntity {
    fn from(value: MongoTeamDocument) -> Self {
        Self {
            id: value.id,
            event_id: value.event_id,
            name: value.name,
            active: value.active,
            updated_at: value.updated_at.to_system_time(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoMatchDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    event_id: Uuid,
    round: u32,
    court: u32,
    team1: Option<Uuid>,
    team2: Option<Uuid>,
    team1_score: Option<u32>,
    team2_score: Option<u32>,
    referee: Option<Uuid>,
    kind: MatchKind,
    status: MatchStatus,
    child: Option<Uuid>,
}

impl From<MatchEntity> for MongoMatchDocument {
    fn from(value: MatchEntity) -> Self {
        Self {
            id: value.id,
            event_id: value.event_id,
            round: value.round,
            court: value.court,
            team1: value.team1,
            team2: value.team2,
            team1_score: value.team1_score,
            team2_score: value.team2_score,
            referee: value.referee,
            kind: value.kind,
            status: value.status,
            child: value.child,
        }
    }
}

impl From<MongoMatchDocument> for MatchEntity {
    fn from(value: MongoMatchDocument) -> Self {
        Self {
            id: value.id,
            event_id: value.event_id,
            round: value.round,
            court: value.court,
            team1: value.team1,
            team2: value.team2,
            team1_score: value.team1_score,
            team2_score: value.team2_score,
            referee: value.referee,
            kind: value.kind,
            status: value.status,
            child: value.child,
        }
    }
}

pub fn uuid_as_binary(id: Uuid) -> Binary {
    Binary {
        subtype: BinarySubtype::Uuid,
        bytes: id.into_bytes().to_vec(),
    }
}

pub fn doc_id(id: Uuid) -> Document {
    doc! {"_id": uuid_as_binary(id)}
}

/// Wire name of a match kind, matching the serde representation.
fn kind_name(kind: MatchKind) -> &'static str {
    match kind {
        MatchKind::Pool => "pool",
        MatchKind::Bracket => "bracket",
    }
}

/// Wire name of a match status, matching the serde representation.
fn status_name(status: MatchStatus) -> &'static str {
    match status {
        MatchStatus::Incomplete => "incomplete",
        MatchStatus::InProgress => "in_progress",
        MatchStatus::Complete => "complete",
        MatchStatus::Cancelled => "cancelled",
    }
}

/// Query document selecting an event's matches narrowed by `filter`.
pub fn match_query(event_id: Uuid, filter: Option<MatchFilter>) -> Document {
    let mut query = doc! {"event_id": uuid_as_binary(event_id)};
    if let Some(filter) = filter {
        if let Some(kind) = filter.kind {
            query.insert("kind", kind_name(kind));
        }
        if let Some(status) = filter.status {
            query.insert("status", status_name(status));
        }
    }
    query
}
