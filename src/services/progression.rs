//! Event-driven bracket progression.
//!
//! A spawned task consumes the match change bus and reacts to completed
//! bracket matches by advancing winners into their child slot. Failures are
//! logged and swallowed here: progression runs off a notification and no
//! caller is waiting on it.

use std::future::Future;

use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::{
    dao::models::{MatchEntity, MatchFilter, MatchKind, MatchStatus},
    error::ServiceError,
    services::{bracket, sse_events},
    state::{SharedState, changes::{ChangeKind, MatchChange}},
};

/// Consume match changes until the application shuts down.
///
/// The bus subscription is taken before the returned future is handed to the
/// runtime, so completions published between spawning the task and its first
/// poll are not lost.
pub fn run(state: SharedState) -> impl Future<Output = ()> {
    let mut receiver = state.changes().subscribe();

    async move {
        loop {
            match receiver.recv().await {
                Ok(change) => {
                    let Some(completed) = completed_bracket_update(&change) else {
                        continue;
                    };
                    if let Err(err) = advance_from(&state, completed).await {
                        warn!(match_id = %completed.id, error = %err, "bracket progression failed");
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "bracket progression lagged behind the change bus");
                }
                Err(RecvError::Closed) => break,
            }
        }
    }
}

/// The updated match, when a change is a bracket completion worth reacting to.
fn completed_bracket_update(change: &MatchChange) -> Option<&MatchEntity> {
    if change.kind != ChangeKind::Updated {
        return None;
    }
    let after = change.after.as_ref()?;
    (after.kind == MatchKind::Bracket && after.status == MatchStatus::Complete).then_some(after)
}

/// Advance the winner of `completed` into its child bracket slot.
///
/// Each read-evaluate-write sequence holds the child's advancement lock, so
/// two parents completing at the same time cannot interleave their writes.
/// When the write half-fills a child, that child is a bye that will never see
/// a completion event of its own, so its lone team keeps moving up the tree
/// here and now.
pub async fn advance_from(
    state: &SharedState,
    completed: &MatchEntity,
) -> Result<(), ServiceError> {
    let mut source = completed.clone();

    loop {
        let Some(child_id) = source.child else {
            // Final match: nothing to advance into.
            return Ok(());
        };

        let lock = state.advancement_lock(child_id);
        let _guard = lock.lock().await;

        let store = state.require_match_store().await?;
        let Some(child) = store.find_match(child_id).await? else {
            warn!(%child_id, "bracket child vanished before advancement");
            return Ok(());
        };

        // The sibling is whichever other match feeds the same child.
        let bracket_matches = store
            .load_matches(source.event_id, Some(MatchFilter::kind(MatchKind::Bracket)))
            .await?;
        let sibling = bracket_matches
            .iter()
            .find(|entity| entity.child == Some(child_id) && entity.id != source.id);

        match bracket::advance_child(&source, sibling, &child) {
            bracket::Advance::Waiting => {
                debug!(match_id = %source.id, %child_id, "sibling not decided; advancement deferred");
                return Ok(());
            }
            bracket::Advance::AlreadyApplied => {
                debug!(%child_id, "bracket child already advanced");
                return Ok(());
            }
            bracket::Advance::Apply(next) => {
                let updated = store.update_match(next).await?;
                state
                    .changes()
                    .publish(MatchChange::updated(child, updated.clone()));
                sse_events::broadcast_bracket_advanced(state, &updated);
                if !updated.is_bye() {
                    return Ok(());
                }
                source = updated;
            }
        }
    }
}
