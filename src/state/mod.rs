/// Match-table change notification bus.
pub mod changes;
/// Match lifecycle status transitions.
pub mod lifecycle;
mod sse;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, RwLock, watch};
use uuid::Uuid;

use crate::{config::AppConfig, dao::match_store::MatchStore, error::ServiceError};

pub use self::sse::SseHub;
use self::changes::ChangeHub;

/// Shared handle to the central application state.
pub type SharedState = Arc<AppState>;

const SSE_CHANNEL_CAPACITY: usize = 16;
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Central application state storing the storage handle, notification hubs,
/// and per-bracket-slot advancement locks.
pub struct AppState {
    config: AppConfig,
    match_store: RwLock<Option<Arc<dyn MatchStore>>>,
    sse: SseHub,
    changes: ChangeHub,
    advancement_locks: DashMap<Uuid, Arc<Mutex<()>>>,
    degraded: watch::Sender<bool>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is installed.
    pub fn new(config: AppConfig) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            config,
            match_store: RwLock::new(None),
            sse: SseHub::new(SSE_CHANNEL_CAPACITY),
            changes: ChangeHub::new(CHANGE_CHANNEL_CAPACITY),
            advancement_locks: DashMap::new(),
            degraded: degraded_tx,
        })
    }

    /// Immutable runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Obtain a handle to the current match store, if one is installed.
    pub async fn match_store(&self) -> Option<Arc<dyn MatchStore>> {
        let guard = self.match_store.read().await;
        guard.as_ref().cloned()
    }

    /// Obtain the match store or fail with a degraded-mode error.
    pub async fn require_match_store(&self) -> Result<Arc<dyn MatchStore>, ServiceError> {
        self.match_store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a new match store implementation and leave degraded mode.
    pub async fn set_match_store(&self, store: Arc<dyn MatchStore>) {
        {
            let mut guard = self.match_store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false).await;
    }

    /// Remove the current match store and enter degraded mode.
    pub async fn clear_match_store(&self) {
        {
            let mut guard = self.match_store.write().await;
            guard.take();
        }
        self.update_degraded(true).await;
    }

    /// Current degraded flag.
    pub async fn is_degraded(&self) -> bool {
        *self.degraded.borrow()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Update and broadcast the degraded flag when the value changes.
    pub async fn update_degraded(&self, value: bool) {
        self.degraded.send_if_modified(|current| {
            let changed = *current != value;
            *current = value;
            changed
        });
    }

    /// Broadcast hub used for the realtime SSE stream.
    pub fn events_sse(&self) -> &SseHub {
        &self.sse
    }

    /// Bus carrying match-table change records.
    pub fn changes(&self) -> &ChangeHub {
        &self.changes
    }

    /// Lock serializing bracket advancement per child match.
    ///
    /// Both parents of a bracket slot can complete nearly simultaneously;
    /// holding this lock while reading the sibling and writing the child
    /// keeps the two progression invocations from interleaving.
    pub fn advancement_lock(&self, child_id: Uuid) -> Arc<Mutex<()>> {
        self.advancement_locks
            .entry(child_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
