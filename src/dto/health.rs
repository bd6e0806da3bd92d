use serde::Serialize;
use utoipa::ToSchema;

/// Body of `/healthcheck`: whether the scheduling engine can reach its
/// match store.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `"ok"` when the store answers, `"degraded"` while it is unreachable.
    pub status: &'static str,
}

impl HealthResponse {
    /// The store responded to a ping; schedules and brackets can be served.
    pub fn ok() -> Self {
        Self { status: "ok" }
    }

    /// The store is unreachable; writes are refused until the supervisor
    /// reconnects.
    pub fn degraded() -> Self {
        Self { status: "degraded" }
    }
}
