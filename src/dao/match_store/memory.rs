//! Hash-map backed [`MatchStore`] with no external dependencies.
//!
//! Used by integration tests and as a volatile fallback backend when no
//! database is configured.

use std::sync::Arc;

use futures::future::BoxFuture;
use indexmap::IndexMap;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::dao::{
    match_store::MatchStore,
    models::{EventEntity, MatchEntity, MatchFilter, TeamEntity},
    storage::{StorageError, StorageResult},
};

/// Raised when an update targets a match that was never inserted.
#[derive(Debug, Error)]
#[error("match `{id}` not present in memory store")]
pub struct UnknownMatch {
    /// Identifier of the missing match.
    pub id: Uuid,
}

#[derive(Default)]
struct MemoryInner {
    events: IndexMap<Uuid, EventEntity>,
    teams: IndexMap<Uuid, TeamEntity>,
    matches: IndexMap<Uuid, MatchEntity>,
}

/// In-process match store; insertion order is preserved so generated
/// schedules read back in the order they were created.
#[derive(Clone, Default)]
pub struct MemoryMatchStore {
    inner: Arc<RwLock<MemoryInner>>,
}

impl MemoryMatchStore {
    /// Fresh, empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MatchStore for MemoryMatchStore {
    fn save_event(&self, event: EventEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.inner.write().await.events.insert(event.id, event);
            Ok(())
        })
    }

    fn find_event(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<EventEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.inner.read().await.events.get(&id).cloned()) })
    }

    fn list_events(&self) -> BoxFuture<'static, StorageResult<Vec<EventEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.inner.read().await.events.values().cloned().collect()) })
    }

    fn delete_event(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move {
            let mut guard = store.inner.write().await;
            guard.teams.retain(|_, team| team.event_id != id);
            guard.matches.retain(|_, entity| entity.event_id != id);
            Ok(guard.events.shift_remove(&id).is_some())
        })
    }

    fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.inner.write().await.teams.insert(team.id, team);
            Ok(())
        })
    }

    fn delete_team(
        &self,
        event_id: Uuid,
        team_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .inner
                .write()
                .await
                .teams
                .retain(|_, team| !(team.id == team_id && team.event_id == event_id));
            Ok(())
        })
    }

    fn load_teams(&self, event_id: Uuid) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            Ok(store
                .inner
                .read()
                .await
                .teams
                .values()
                .filter(|team| team.event_id == event_id)
                .cloned()
                .collect())
        })
    }

    fn load_matches(
        &self,
        event_id: Uuid,
        filter: Option<MatchFilter>,
    ) -> BoxFuture<'static, StorageResult<Vec<MatchEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let filter = filter.unwrap_or_default();
            Ok(store
                .inner
                .read()
                .await
                .matches
                .values()
                .filter(|entity| entity.event_id == event_id && filter.accepts(entity))
                .cloned()
                .collect())
        })
    }

    fn find_match(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<MatchEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.inner.read().await.matches.get(&id).cloned()) })
    }

    fn insert_matches(
        &self,
        matches: Vec<MatchEntity>,
    ) -> BoxFuture<'static, StorageResult<Vec<MatchEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let mut guard = store.inner.write().await;
            for entity in &matches {
                guard.matches.insert(entity.id, entity.clone());
            }
            Ok(matches)
        })
    }

    fn update_match(
        &self,
        entity: MatchEntity,
    ) -> BoxFuture<'static, StorageResult<MatchEntity>> {
        let store = self.clone();
        Box::pin(async move {
            let mut guard = store.inner.write().await;
            if !guard.matches.contains_key(&entity.id) {
                return Err(StorageError::unavailable(
                    format!("match `{}` not found", entity.id),
                    UnknownMatch { id: entity.id },
                ));
            }
            guard.matches.insert(entity.id, entity.clone());
            Ok(entity)
        })
    }

    fn delete_matches_by_event(
        &self,
        event_id: Uuid,
        filter: Option<MatchFilter>,
    ) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move {
            let filter = filter.unwrap_or_default();
            let mut guard = store.inner.write().await;
            let before = guard.matches.len();
            guard
                .matches
                .retain(|_, entity| !(entity.event_id == event_id && filter.accepts(entity)));
            Ok((before - guard.matches.len()) as u64)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
