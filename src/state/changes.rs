//! Internal change-notification bus for the match table.
//!
//! Services publish immutable before/after records here instead of patching
//! shared objects in place; consumers (the SSE fan-out and the bracket
//! progression task) subscribe independently.

use tokio::sync::broadcast;

use crate::dao::models::MatchEntity;

/// What happened to the match record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Record was created.
    Inserted,
    /// Record was replaced with a new value.
    Updated,
    /// Record was removed.
    Deleted,
}

/// One change record carrying the old and new values, when they exist.
#[derive(Debug, Clone)]
pub struct MatchChange {
    /// Kind of mutation.
    pub kind: ChangeKind,
    /// Value before the mutation (`None` for inserts).
    pub before: Option<MatchEntity>,
    /// Value after the mutation (`None` for deletes).
    pub after: Option<MatchEntity>,
}

impl MatchChange {
    /// Change record for a freshly inserted match.
    pub fn inserted(after: MatchEntity) -> Self {
        Self {
            kind: ChangeKind::Inserted,
            before: None,
            after: Some(after),
        }
    }

    /// Change record for a replaced match.
    pub fn updated(before: MatchEntity, after: MatchEntity) -> Self {
        Self {
            kind: ChangeKind::Updated,
            before: Some(before),
            after: Some(after),
        }
    }

    /// Change record for a deleted match.
    pub fn deleted(before: MatchEntity) -> Self {
        Self {
            kind: ChangeKind::Deleted,
            before: Some(before),
            after: None,
        }
    }
}

/// Broadcast hub distributing [`MatchChange`] records to subscribers.
pub struct ChangeHub {
    sender: broadcast::Sender<MatchChange>,
}

impl ChangeHub {
    /// Hub backed by a broadcast channel of the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to subsequent change records.
    pub fn subscribe(&self) -> broadcast::Receiver<MatchChange> {
        self.sender.subscribe()
    }

    /// Publish a change, ignoring the no-subscriber case.
    pub fn publish(&self, change: MatchChange) {
        let _ = self.sender.send(change);
    }
}
