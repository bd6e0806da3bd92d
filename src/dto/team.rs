use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::TeamEntity,
    dto::{format_system_time, validation::validate_display_name},
};

/// Payload used to register a team for an event.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateTeamRequest {
    /// Display name chosen for the team.
    #[validate(custom(function = "validate_display_name"))]
    pub name: String,
    /// Inactive teams are kept on the roster but excluded from scheduling.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Team representation returned to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamSummary {
    /// Identifier of the team.
    pub id: Uuid,
    /// Event the team belongs to.
    pub event_id: Uuid,
    /// Display name.
    pub name: String,
    /// Whether the team takes part in schedule generation.
    pub active: bool,
    /// Last update timestamp, RFC 3339.
    pub updated_at: String,
}

impl From<TeamEntity> for TeamSummary {
    fn from(entity: TeamEntity) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            name: entity.name,
            active: entity.active,
            updated_at: format_system_time(entity.updated_at),
        }
    }
}
