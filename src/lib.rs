//! Library crate for courtside-back, exposing modules for binaries and integration tests.

/// Runtime configuration and schedule-size limits.
pub mod config;
/// Persistence entities and the match store backends.
pub mod dao;
/// Request and response payloads.
pub mod dto;
/// Error ladder from storage up to HTTP responses.
pub mod error;
/// Axum routers per concern.
pub mod routes;
/// Scheduling logic and the background tasks around it.
pub mod services;
/// Shared application state: store slot, hubs, locks.
pub mod state;
