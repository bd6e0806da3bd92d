/// Single-elimination bracket construction and advancement.
pub mod bracket;
/// OpenAPI documentation generation.
pub mod documentation;
/// Event and roster management.
pub mod event_service;
/// Health check service.
pub mod health_service;
/// Matchup strategies for mix-and-match formats.
pub mod pairing;
/// Pool-play schedule construction.
pub mod pool_schedule;
/// Event-driven bracket progression.
pub mod progression;
/// Referee rotation for pool matches.
pub mod referee;
/// Circle-method round-robin pairing.
pub mod roundrobin;
/// Schedule generation, score reporting, and standings orchestration.
pub mod schedule_service;
/// Server-Sent Events message generation.
pub mod sse_events;
/// Server-Sent Events broadcasting service.
pub mod sse_service;
/// Standings aggregation for bracket seeding.
pub mod standings;
/// Storage connection supervision.
pub mod storage_supervisor;
