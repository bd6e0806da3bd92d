//! Standings aggregation used to seed the elimination bracket.

use indexmap::IndexMap;
use uuid::Uuid;

use crate::dao::models::{MatchEntity, MatchStatus, ScoringMode};

/// Per-team aggregate over completed matches; derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Standing {
    /// Matches won outright (strictly higher score).
    pub wins: u32,
    /// Own points minus opponent points.
    pub point_diff: i64,
    /// Total points scored.
    pub points_for: u64,
}

impl Standing {
    /// Seeding score under the given mode.
    fn score(&self, mode: ScoringMode) -> u64 {
        match mode {
            ScoringMode::Wins => self.wins as u64,
            ScoringMode::Points => self.points_for,
        }
    }
}

/// Aggregate completed matches into a ranked seeding order, best first.
///
/// Only matches in `Complete` status with both scores reported count; a
/// reported score of 0 counts like any other. Ranking is a stable descending
/// sort, so teams tied on score keep their roster order.
pub fn compute(
    matches: &[MatchEntity],
    teams: &[Uuid],
    mode: ScoringMode,
) -> Vec<(Uuid, Standing)> {
    let mut table: IndexMap<Uuid, Standing> = teams
        .iter()
        .map(|team| (*team, Standing::default()))
        .collect();

    for entity in matches {
        if entity.status != MatchStatus::Complete {
            continue;
        }
        let (Some(team1), Some(team2)) = (entity.team1, entity.team2) else {
            continue;
        };
        let (Some(score1), Some(score2)) = (entity.team1_score, entity.team2_score) else {
            continue;
        };

        if let Some(standing) = table.get_mut(&team1) {
            standing.points_for += score1 as u64;
            standing.point_diff += score1 as i64 - score2 as i64;
            if score1 > score2 {
                standing.wins += 1;
            }
        }
        if let Some(standing) = table.get_mut(&team2) {
            standing.points_for += score2 as u64;
            standing.point_diff += score2 as i64 - score1 as i64;
            if score2 > score1 {
                standing.wins += 1;
            }
        }
    }

    let mut ranked: Vec<(Uuid, Standing)> = table.into_iter().collect();
    ranked.sort_by_key(|(_, standing)| std::cmp::Reverse(standing.score(mode)));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::models::MatchKind;

    fn completed(event: Uuid, a: Uuid, b: Uuid, sa: u32, sb: u32) -> MatchEntity {
        let mut entity = MatchEntity::new(event, MatchKind::Pool);
        entity.team1 = Some(a);
        entity.team2 = Some(b);
        entity.team1_score = Some(sa);
        entity.team2_score = Some(sb);
        entity.status = MatchStatus::Complete;
        entity
    }

    #[test]
    fn win_counts_sum_to_decided_matches() {
        let event = Uuid::new_v4();
        let teams: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let matches = vec![
            completed(event, teams[0], teams[1], 21, 15),
            completed(event, teams[2], teams[3], 10, 21),
            completed(event, teams[0], teams[2], 18, 18), // tie: nobody scores a win
            completed(event, teams[1], teams[3], 25, 23),
        ];

        let ranked = compute(&matches, &teams, ScoringMode::Wins);
        let total_wins: u32 = ranked.iter().map(|(_, s)| s.wins).sum();
        assert_eq!(total_wins, 3);
    }

    #[test]
    fn points_mode_accumulates_own_scores() {
        let event = Uuid::new_v4();
        let teams: Vec<Uuid> = (0..2).map(|_| Uuid::new_v4()).collect();
        let matches = vec![
            completed(event, teams[0], teams[1], 21, 15),
            completed(event, teams[1], teams[0], 11, 21),
        ];

        let ranked = compute(&matches, &teams, ScoringMode::Points);
        assert_eq!(ranked[0].0, teams[0]);
        assert_eq!(ranked[0].1.points_for, 42);
        assert_eq!(ranked[1].1.points_for, 26);
    }

    #[test]
    fn zero_scores_still_count_as_reported() {
        let event = Uuid::new_v4();
        let teams: Vec<Uuid> = (0..2).map(|_| Uuid::new_v4()).collect();
        let matches = vec![completed(event, teams[0], teams[1], 21, 0)];

        let ranked = compute(&matches, &teams, ScoringMode::Wins);
        assert_eq!(ranked[0].0, teams[0]);
        assert_eq!(ranked[0].1.wins, 1);
        assert_eq!(ranked[1].1.point_diff, -21);
    }

    #[test]
    fn incomplete_and_unscored_matches_are_ignored() {
        let event = Uuid::new_v4();
        let teams: Vec<Uuid> = (0..2).map(|_| Uuid::new_v4()).collect();

        let mut pending = completed(event, teams[0], teams[1], 21, 5);
        pending.status = MatchStatus::InProgress;
        let mut unscored = completed(event, teams[1], teams[0], 0, 0);
        unscored.team2_score = None;

        let ranked = compute(&[pending, unscored], &teams, ScoringMode::Wins);
        assert!(ranked.iter().all(|(_, s)| *s == Standing::default()));
    }

    #[test]
    fn ties_keep_roster_order() {
        let event = Uuid::new_v4();
        let teams: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        // Nobody has played: all scores equal, roster order preserved.
        let ranked = compute(&[], &teams, ScoringMode::Wins);
        let order: Vec<Uuid> = ranked.into_iter().map(|(team, _)| team).collect();
        assert_eq!(order, teams);

        let matches = vec![completed(event, teams[2], teams[1], 21, 10)];
        let ranked = compute(&matches, &teams, ScoringMode::Wins);
        assert_eq!(ranked[0].0, teams[2]);
        assert_eq!(ranked[1].0, teams[0]);
        assert_eq!(ranked[2].0, teams[1]);
    }
}
