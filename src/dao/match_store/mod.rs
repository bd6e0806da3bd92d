/// In-memory backend used by tests and storage-less deployments.
pub mod memory;
#[cfg(feature = "mongo-store")]
/// MongoDB-backed persistence.
pub mod mongodb;

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::models::{EventEntity, MatchEntity, MatchFilter, TeamEntity};
use crate::dao::storage::StorageResult;

/// Abstraction over the persistence layer for events, teams, and matches.
///
/// One trait serves both pool and bracket matches; callers narrow loads with
/// a [`MatchFilter`] instead of subclassing per phase.
pub trait MatchStore: Send + Sync {
    /// Persist an event, replacing any prior version.
    fn save_event(&self, event: EventEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Look an event up by id.
    fn find_event(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<EventEntity>>>;
    /// All known events.
    fn list_events(&self) -> BoxFuture<'static, StorageResult<Vec<EventEntity>>>;
    /// Delete an event together with its teams and matches.
    fn delete_event(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>>;

    /// Persist a team, replacing any prior version.
    fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Remove one team from an event.
    fn delete_team(&self, event_id: Uuid, team_id: Uuid)
    -> BoxFuture<'static, StorageResult<()>>;
    /// Teams registered for an event, in registration order.
    fn load_teams(&self, event_id: Uuid) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>>;

    /// Matches for an event, optionally narrowed by a filter.
    fn load_matches(
        &self,
        event_id: Uuid,
        filter: Option<MatchFilter>,
    ) -> BoxFuture<'static, StorageResult<Vec<MatchEntity>>>;
    /// Look a single match up by id.
    fn find_match(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<MatchEntity>>>;
    /// Insert a generated batch in one write; either every match lands or none.
    fn insert_matches(
        &self,
        matches: Vec<MatchEntity>,
    ) -> BoxFuture<'static, StorageResult<Vec<MatchEntity>>>;
    /// Replace a single match with an updated value.
    fn update_match(&self, entity: MatchEntity)
    -> BoxFuture<'static, StorageResult<MatchEntity>>;
    /// Drop an event's matches, optionally only one phase.
    fn delete_matches_by_event(
        &self,
        event_id: Uuid,
        filter: Option<MatchFilter>,
    ) -> BoxFuture<'static, StorageResult<u64>>;

    /// Cheap connectivity probe.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Attempt to re-establish a dropped connection.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
