use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::{EventEntity, RefereePolicy, ScoringMode},
    dto::{format_system_time, validation::validate_display_name},
};

/// Payload used to register a new tournament event.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateEventRequest {
    /// Display name of the event.
    #[validate(custom(function = "validate_display_name"))]
    pub name: String,
    /// Number of round-robin cycles each team plays in pool phase.
    #[validate(range(min = 1))]
    pub pools: u32,
    /// Number of courts available for concurrent matches.
    #[validate(range(min = 1))]
    pub courts: u32,
    /// Referee sourcing policy for pool matches.
    pub referee_policy: RefereePolicy,
    /// Scoring mode used to seed the bracket.
    pub scoring_mode: ScoringMode,
}

/// Event representation returned to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventSummary {
    /// Identifier of the event.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Round-robin cycles per team in pool phase.
    pub pools: u32,
    /// Courts available for concurrent matches.
    pub courts: u32,
    /// Referee sourcing policy.
    pub referee_policy: RefereePolicy,
    /// Scoring mode used for standings.
    pub scoring_mode: ScoringMode,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
    /// Last update timestamp, RFC 3339.
    pub updated_at: String,
}

impl From<EventEntity> for EventSummary {
    fn from(entity: EventEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            pools: entity.pools,
            courts: entity.courts,
            referee_policy: entity.referee_policy,
            scoring_mode: entity.scoring_mode,
            created_at: format_system_time(entity.created_at),
            updated_at: format_system_time(entity.updated_at),
        }
    }
}
