use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::services::pairing::Matchup;

/// Strategy used to compose matchup sides from the roster.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PairingStrategy {
    /// Contiguous roster blocks, first half home.
    Consecutive,
    /// Snake-draft split balancing aggregate rank per side.
    Snake,
    /// Shuffle, then consecutive.
    Random,
    /// All unique pairs under a per-team game cap.
    RoundRobin,
}

/// Request body for running a pairing strategy over an event's roster.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct PairingRequest {
    /// Strategy to apply.
    pub strategy: PairingStrategy,
    /// Units per side; ignored by the round-robin strategy.
    #[serde(default = "default_teams_per_side")]
    #[validate(range(min = 1))]
    pub teams_per_side: u32,
    /// Per-team game cap; only used by the round-robin strategy.
    #[serde(default = "default_max_games")]
    #[validate(range(min = 1))]
    pub max_games: u32,
}

fn default_teams_per_side() -> u32 {
    1
}

fn default_max_games() -> u32 {
    1
}

/// One generated matchup, two sides of equal size.
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchupSummary {
    /// Units on the home side.
    pub home: Vec<Uuid>,
    /// Units on the away side.
    pub away: Vec<Uuid>,
}

impl From<Matchup> for MatchupSummary {
    fn from(matchup: Matchup) -> Self {
        Self {
            home: matchup.home,
            away: matchup.away,
        }
    }
}
