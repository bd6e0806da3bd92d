//! Courtside Back binary entrypoint wiring REST, SSE, and storage layers.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use courtside_back::{
    config::AppConfig,
    routes,
    services::{progression, sse_service},
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let app_state = AppState::new(config);

    spawn_storage(app_state.clone());
    tokio::spawn(progression::run(app_state.clone()));
    tokio::spawn(sse_service::run_system_status(app_state.clone()));

    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state);

    let port = std::env::var("PORT")
        .or_else(|_| std::env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Start the supervised MongoDB backend.
#[cfg(feature = "mongo-store")]
fn spawn_storage(state: SharedState) {
    use courtside_back::dao::match_store::MatchStore;
    use courtside_back::dao::match_store::mongodb::{MongoConfig, MongoMatchStore};
    use courtside_back::dao::storage::StorageError;
    use courtside_back::services::storage_supervisor;

    let uri =
        std::env::var("MONGO_URI").unwrap_or_else(|_| "mongodb://localhost:27017".into());
    let db_name = std::env::var("MONGO_DB").ok();

    tokio::spawn(storage_supervisor::run(state, move || {
        let uri = uri.clone();
        let db_name = db_name.clone();
        async move {
            let config = MongoConfig::from_uri(&uri, db_name.as_deref())
                .await
                .map_err(|err| StorageError::unavailable(err.to_string(), err))?;
            let store = MongoMatchStore::connect(config)
                .await
                .map_err(|err| StorageError::unavailable(err.to_string(), err))?;
            Ok(Arc::new(store) as Arc<dyn MatchStore>)
        }
    }));
}

/// Install the in-memory backend when the build carries no MongoDB support.
#[cfg(not(feature = "mongo-store"))]
fn spawn_storage(state: SharedState) {
    use courtside_back::dao::match_store::memory::MemoryMatchStore;

    tokio::spawn(async move {
        state.set_match_store(Arc::new(MemoryMatchStore::new())).await;
        info!("in-memory storage installed; data will not survive a restart");
    });
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
