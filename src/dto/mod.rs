//! Request and response payloads for the REST and SSE surfaces.

use std::time::SystemTime;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Event creation and summaries.
pub mod event;
/// Health check body.
pub mod health;
/// Match summaries, score reports, lifecycle transitions, standings rows.
pub mod matches;
/// Pairing strategy requests and matchup summaries.
pub mod pairing;
/// Payloads pushed over the SSE stream.
pub mod sse;
/// Team registration and summaries.
pub mod team;
/// Shared field validators.
pub mod validation;

fn format_system_time(time: SystemTime) -> String {
    OffsetDateTime::from(time)
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}
