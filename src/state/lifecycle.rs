use thiserror::Error;

use crate::dao::models::MatchStatus;

/// Events that can be applied to a match's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEvent {
    /// Play begins on a scheduled match.
    Begin,
    /// A final score is reported.
    ReportScore,
    /// The match is abandoned.
    Cancel,
}

/// Error returned when attempting to apply an invalid lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid transition: {event:?} cannot be applied while {from:?}")]
pub struct InvalidTransition {
    /// Status the match was in when the invalid event was received.
    pub from: MatchStatus,
    /// The event that cannot be applied from this status.
    pub event: MatchEvent,
}

/// Compute the next status for an event, rejecting invalid transitions.
///
/// Re-reporting a score on a completed match is allowed so score corrections
/// stay possible; bracket progression tolerates the repeat via its
/// idempotency check.
pub fn apply(from: MatchStatus, event: MatchEvent) -> Result<MatchStatus, InvalidTransition> {
    let next = match (from, event) {
        (MatchStatus::Incomplete, MatchEvent::Begin) => MatchStatus::InProgress,
        (MatchStatus::Incomplete | MatchStatus::InProgress, MatchEvent::ReportScore) => {
            MatchStatus::Complete
        }
        (MatchStatus::Complete, MatchEvent::ReportScore) => MatchStatus::Complete,
        (MatchStatus::Incomplete | MatchStatus::InProgress, MatchEvent::Cancel) => {
            MatchStatus::Cancelled
        }
        (from, event) => return Err(InvalidTransition { from, event }),
    };

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_report_completes_from_either_live_status() {
        assert_eq!(
            apply(MatchStatus::Incomplete, MatchEvent::ReportScore).unwrap(),
            MatchStatus::Complete
        );
        assert_eq!(
            apply(MatchStatus::InProgress, MatchEvent::ReportScore).unwrap(),
            MatchStatus::Complete
        );
    }

    #[test]
    fn score_correction_keeps_match_complete() {
        assert_eq!(
            apply(MatchStatus::Complete, MatchEvent::ReportScore).unwrap(),
            MatchStatus::Complete
        );
    }

    #[test]
    fn cancelled_matches_are_terminal() {
        let err = apply(MatchStatus::Cancelled, MatchEvent::ReportScore).unwrap_err();
        assert_eq!(err.from, MatchStatus::Cancelled);
        assert_eq!(err.event, MatchEvent::ReportScore);
        assert!(apply(MatchStatus::Cancelled, MatchEvent::Begin).is_err());
        assert!(apply(MatchStatus::Cancelled, MatchEvent::Cancel).is_err());
    }

    #[test]
    fn completed_matches_cannot_restart_or_cancel() {
        assert!(apply(MatchStatus::Complete, MatchEvent::Begin).is_err());
        assert!(apply(MatchStatus::Complete, MatchEvent::Cancel).is_err());
    }
}
