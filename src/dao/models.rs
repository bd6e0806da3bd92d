use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// Who referees pool matches for an event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RefereePolicy {
    /// Referees are supplied externally; no assignment pass runs.
    Provided,
    /// Non-playing teams referee, balanced by load.
    Teams,
}

/// How standings are scored for seeding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// One point per match won; ties grant nothing.
    Wins,
    /// Sum of a team's own reported scores.
    Points,
}

/// Whether a match belongs to the pool phase or the elimination bracket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Round-robin pool play.
    Pool,
    /// Single-elimination bracket.
    Bracket,
}

/// Lifecycle status of a match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Created but not yet played.
    Incomplete,
    /// Currently being played.
    InProgress,
    /// Finished with a reported score.
    Complete,
    /// Abandoned; excluded from standings and progression.
    Cancelled,
}

/// Tournament event configuration persisted by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventEntity {
    /// Stable identifier for the event.
    pub id: Uuid,
    /// Display name of the tournament event.
    pub name: String,
    /// Number of round-robin cycles each team plays in pool phase.
    pub pools: u32,
    /// Number of courts available for concurrent matches.
    pub courts: u32,
    /// Referee sourcing policy for pool matches.
    pub referee_policy: RefereePolicy,
    /// Scoring mode used to seed the bracket.
    pub scoring_mode: ScoringMode,
    /// Creation timestamp for auditing/debugging.
    pub created_at: SystemTime,
    /// Last time the event entity was updated.
    pub updated_at: SystemTime,
}

/// Representation of a team stored in persistence and shared across layers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamEntity {
    /// Stable identifier for the team.
    pub id: Uuid,
    /// Event this team belongs to.
    pub event_id: Uuid,
    /// Display name chosen for the team.
    pub name: String,
    /// Inactive teams are excluded from schedule generation.
    pub active: bool,
    /// Last time this team was updated.
    pub updated_at: SystemTime,
}

/// A scheduled or played match persisted by the storage layer.
///
/// `team1`/`team2` are `None` for byes and unfilled bracket slots. `child`
/// points at the bracket match this match's winner feeds into.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchEntity {
    /// Primary key of the match.
    pub id: Uuid,
    /// Event this match belongs to.
    pub event_id: Uuid,
    /// Playable round index, monotonic within a schedule.
    pub round: u32,
    /// Court index, always below the event's court count.
    pub court: u32,
    /// First participant, if filled.
    pub team1: Option<Uuid>,
    /// Second participant, if filled.
    pub team2: Option<Uuid>,
    /// Score reported for the first participant.
    pub team1_score: Option<u32>,
    /// Score reported for the second participant.
    pub team2_score: Option<u32>,
    /// Team officiating this match, when the event uses team referees.
    pub referee: Option<Uuid>,
    /// Pool or bracket phase.
    pub kind: MatchKind,
    /// Lifecycle status.
    pub status: MatchStatus,
    /// Bracket match the winner advances into.
    pub child: Option<Uuid>,
}

impl MatchEntity {
    /// Blank match shell for the given event and kind.
    pub fn new(event_id: Uuid, kind: MatchKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            round: 0,
            court: 0,
            team1: None,
            team2: None,
            team1_score: None,
            team2_score: None,
            referee: None,
            kind,
            status: MatchStatus::Incomplete,
            child: None,
        }
    }

    /// Winner of the match: the team with the strictly higher reported score.
    ///
    /// A one-team bye placeholder wins with its lone participant. Ties and
    /// unreported scores have no winner.
    pub fn winner(&self) -> Option<Uuid> {
        match (self.team1, self.team2) {
            (Some(team), None) => Some(team),
            (None, Some(team)) => Some(team),
            (Some(team1), Some(team2)) => match (self.team1_score, self.team2_score) {
                (Some(s1), Some(s2)) if s1 > s2 => Some(team1),
                (Some(s1), Some(s2)) if s2 > s1 => Some(team2),
                _ => None,
            },
            (None, None) => None,
        }
    }

    /// Whether the match is a one-team bye placeholder.
    pub fn is_bye(&self) -> bool {
        self.team1.is_some() != self.team2.is_some()
    }
}

/// Filter narrowing a match load to a subset of an event's matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchFilter {
    /// Restrict to one phase.
    pub kind: Option<MatchKind>,
    /// Restrict to one lifecycle status.
    pub status: Option<MatchStatus>,
}

impl MatchFilter {
    /// Filter selecting only matches of the given kind.
    pub fn kind(kind: MatchKind) -> Self {
        Self {
            kind: Some(kind),
            status: None,
        }
    }

    /// True when the match passes this filter.
    pub fn accepts(&self, entity: &MatchEntity) -> bool {
        self.kind.is_none_or(|kind| entity.kind == kind)
            && self.status.is_none_or(|status| entity.status == status)
    }
}
