use std::sync::Arc;

use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{Client, Collection, Database, bson::doc, options::IndexOptions};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{
        MongoEventDocument, MongoMatchDocument, MongoTeamDocument, doc_id, match_query,
        uuid_as_binary,
    },
};
use crate::dao::{
    match_store::MatchStore,
    models::{EventEntity, MatchEntity, MatchFilter, TeamEntity},
    storage::StorageResult,
};

const EVENT_COLLECTION: &str = "events";
const TEAM_COLLECTION: &str = "teams";
const MATCH_COLLECTION: &str = "matches";

/// MongoDB-backed match store holding a reconnectable client handle.
#[derive(Clone)]
pub struct MongoMatchStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    state: RwLock<MongoState>,
    config: MongoConfig,
}

struct MongoState {
    client: Client,
    database: Database,
}

impl MongoInner {
    async fn ping(&self) -> MongoResult<()> {
        let database = {
            let guard = self.state.read().await;
            guard.database.clone()
        };

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn reconnect(&self) -> MongoResult<()> {
        let (client, database) =
            establish_connection(&self.config.options, &self.config.database_name).await?;
        let mut guard = self.state.write().await;
        guard.client = client;
        guard.database = database;
        Ok(())
    }
}

impl MongoMatchStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (client, database) =
            establish_connection(&config.options, &config.database_name).await?;

        let inner = Arc::new(MongoInner {
            state: RwLock::new(MongoState { client, database }),
            config,
        });

        let store = Self { inner };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        let database = self.database().await;

        // Teams are always loaded per event.
        let team_index = mongodb::IndexModel::builder()
            .keys(doc! {"event_id": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("team_event_idx".to_owned()))
                    .build(),
            )
            .build();
        database
            .collection::<MongoTeamDocument>(TEAM_COLLECTION)
            .create_index(team_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: TEAM_COLLECTION,
                index: "event_id",
                source,
            })?;

        // Matches are loaded per event and narrowed by kind/status.
        let match_index = mongodb::IndexModel::builder()
            .keys(doc! {"event_id": 1, "kind": 1, "status": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("match_event_idx".to_owned()))
                    .build(),
            )
            .build();
        database
            .collection::<MongoMatchDocument>(MATCH_COLLECTION)
            .create_index(match_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: MATCH_COLLECTION,
                index: "event_id,kind,status",
                source,
            })?;

        Ok(())
    }

    async fn database(&self) -> Database {
        let guard = self.inner.state.read().await;
        guard.database.clone()
    }

    async fn event_collection(&self) -> Collection<MongoEventDocument> {
        self.database().await.collection(EVENT_COLLECTION)
    }

    async fn team_collection(&self) -> Collection<MongoTeamDocument> {
        self.database().await.collection(TEAM_COLLECTION)
    }

    async fn match_collection(&self) -> Collection<MongoMatchDocument> {
        self.database().await.collection(MATCH_COLLECTION)
    }

    async fn save_event(&self, event: EventEntity) -> MongoResult<()> {
        let id = event.id;
        let document: MongoEventDocument = event.into();
        self.event_collection()
            .await
            .replace_one(doc_id(id), &document)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::Write {
                entity: "event",
                id,
                source,
            })?;
        Ok(())
    }

    async fn find_event(&self, id: Uuid) -> MongoResult<Option<EventEntity>> {
        let document = self
            .event_collection()
            .await
            .find_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::Load {
                entity: "event",
                source,
            })?;
        Ok(document.map(Into::into))
    }

    async fn list_events(&self) -> MongoResult<Vec<EventEntity>> {
        let documents: Vec<MongoEventDocument> = self
            .event_collection()
            .await
            .find(doc! {})
            .await
            .map_err(|source| MongoDaoError::Load {
                entity: "event",
                source,
            })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::Load {
                entity: "event",
                source,
            })?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn delete_event(&self, id: Uuid) -> MongoResult<bool> {
        let by_event = doc! {"event_id": uuid_as_binary(id)};

        self.match_collection()
            .await
            .delete_many(by_event.clone())
            .await
            .map_err(|source| MongoDaoError::Delete {
                entity: "match",
                source,
            })?;
        self.team_collection()
            .await
            .delete_many(by_event)
            .await
            .map_err(|source| MongoDaoError::Delete {
                entity: "team",
                source,
            })?;

        let result = self
            .event_collection()
            .await
            .delete_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::Delete {
                entity: "event",
                source,
            })?;
        Ok(result.deleted_count > 0)
    }

    async fn save_team(&self, team: TeamEntity) -> MongoResult<()> {
        let id = team.id;
        let document: MongoTeamDocument = team.into();
        self.team_collection()
            .await
            .replace_one(doc_id(id), &document)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::Write {
                entity: "team",
                id,
                source,
            })?;
        Ok(())
    }

    async fn delete_team(&self, event_id: Uuid, team_id: Uuid) -> MongoResult<()> {
        self.team_collection()
            .await
            .delete_one(doc! {
                "_id": uuid_as_binary(team_id),
                "event_id": uuid_as_binary(event_id),
            })
            .await
            .map_err(|source| MongoDaoError::Delete {
                entity: "team",
                source,
            })?;
        Ok(())
    }

    async fn load_teams(&self, event_id: Uuid) -> MongoResult<Vec<TeamEntity>> {
        let documents: Vec<MongoTeamDocument> = self
            .team_collection()
            .await
            .find(doc! {"event_id": uuid_as_binary(event_id)})
            .sort(doc! {"updated_at": 1})
            .await
            .map_err(|source| MongoDaoError::Load {
                entity: "team",
                source,
            })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::Load {
                entity: "team",
                source,
            })?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn load_matches(
        &self,
        event_id: Uuid,
        filter: Option<MatchFilter>,
    ) -> MongoResult<Vec<MatchEntity>> {
        let documents: Vec<MongoMatchDocument> = self
            .match_collection()
            .await
            .find(match_query(event_id, filter))
            .sort(doc! {"round": 1, "court": 1})
            .await
            .map_err(|source| MongoDaoError::Load {
                entity: "match",
                source,
            })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::Load {
                entity: "match",
                source,
            })?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn find_match(&self, id: Uuid) -> MongoResult<Option<MatchEntity>> {
        let document = self
            .match_collection()
            .await
            .find_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::Load {
                entity: "match",
                source,
            })?;
        Ok(document.map(Into::into))
    }

    async fn insert_matches(&self, matches: Vec<MatchEntity>) -> MongoResult<Vec<MatchEntity>> {
        let Some(first) = matches.first() else {
            return Ok(matches);
        };
        let event_id = first.event_id;

        let documents: Vec<MongoMatchDocument> =
            matches.iter().cloned().map(Into::into).collect();

        // Unordered inserts would keep going past a failure; ordered inserts
        // stop at the first error so a rejected batch never half-lands.
        self.match_collection()
            .await
            .insert_many(documents)
            .await
            .map_err(|source| MongoDaoError::InsertBatch { event_id, source })?;

        Ok(matches)
    }

    async fn update_match(&self, entity: MatchEntity) -> MongoResult<MatchEntity> {
        let id = entity.id;
        let document: MongoMatchDocument = entity.clone().into();
        self.match_collection()
            .await
            .replace_one(doc_id(id), &document)
            .await
            .map_err(|source| MongoDaoError::Write {
                entity: "match",
                id,
                source,
            })?;
        Ok(entity)
    }

    async fn delete_matches_by_event(
        &self,
        event_id: Uuid,
        filter: Option<MatchFilter>,
    ) -> MongoResult<u64> {
        let result = self
            .match_collection()
            .await
            .delete_many(match_query(event_id, filter))
            .await
            .map_err(|source| MongoDaoError::Delete {
                entity: "match",
                source,
            })?;
        Ok(result.deleted_count)
    }
}

impl MatchStore for MongoMatchStore {
    fn save_event(&self, event: EventEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_event(event).await.map_err(Into::into) })
    }

    fn find_event(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<EventEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_event(id).await.map_err(Into::into) })
    }

    fn list_events(&self) -> BoxFuture<'static, StorageResult<Vec<EventEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_events().await.map_err(Into::into) })
    }

    fn delete_event(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.delete_event(id).await.map_err(Into::into) })
    }

    fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_team(team).await.map_err(Into::into) })
    }

    fn delete_team(
        &self,
        event_id: Uuid,
        team_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .delete_team(event_id, team_id)
                .await
                .map_err(Into::into)
        })
    }

    fn load_teams(&self, event_id: Uuid) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.load_teams(event_id).await.map_err(Into::into) })
    }

    fn load_matches(
        &self,
        event_id: Uuid,
        filter: Option<MatchFilter>,
    ) -> BoxFuture<'static, StorageResult<Vec<MatchEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .load_matches(event_id, filter)
                .await
                .map_err(Into::into)
        })
    }

    fn find_match(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<MatchEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_match(id).await.map_err(Into::into) })
    }

    fn insert_matches(
        &self,
        matches: Vec<MatchEntity>,
    ) -> BoxFuture<'static, StorageResult<Vec<MatchEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.insert_matches(matches).await.map_err(Into::into) })
    }

    fn update_match(
        &self,
        entity: MatchEntity,
    ) -> BoxFuture<'static, StorageResult<MatchEntity>> {
        let store = self.clone();
        Box::pin(async move { store.update_match(entity).await.map_err(Into::into) })
    }

    fn delete_matches_by_event(
        &self,
        event_id: Uuid,
        filter: Option<MatchFilter>,
    ) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .delete_matches_by_event(event_id, filter)
                .await
                .map_err(Into::into)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.reconnect().await.map_err(Into::into) })
    }
}
