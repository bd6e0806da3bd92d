//! Matchup generation for mix-and-match formats.
//!
//! Unlike pool play, where a side is always a single team, these strategies
//! build matchups whose sides are groups of smaller units (individual
//! players, doubles pairs). They operate on a ranked list and a
//! teams-per-side parameter.

use rand::rng;
use rand::seq::SliceRandom;
use thiserror::Error;
use uuid::Uuid;

/// Rejection raised before any matchup is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PairingError {
    /// `teams_per_side` must be at least 1.
    #[error("teams per side must be at least 1")]
    InvalidTeamsPerSide,
    /// The roster must split evenly into sides.
    #[error("{teams} teams cannot be split into sides of {per_side}")]
    IndivisibleRoster {
        /// Roster size that failed to divide.
        teams: usize,
        /// Requested side size.
        per_side: usize,
    },
}

/// One generated matchup, two sides of equal size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchup {
    /// Units on the home side.
    pub home: Vec<Uuid>,
    /// Units on the away side.
    pub away: Vec<Uuid>,
}

fn check_divisibility(teams: &[Uuid], per_side: usize) -> Result<(), PairingError> {
    if per_side == 0 {
        return Err(PairingError::InvalidTeamsPerSide);
    }
    if teams.is_empty() || !teams.len().is_multiple_of(2 * per_side) {
        return Err(PairingError::IndivisibleRoster {
            teams: teams.len(),
            per_side,
        });
    }
    Ok(())
}

/// Contiguous blocks of `2 * per_side`: first half home, second half away.
pub fn consecutive(teams: &[Uuid], per_side: usize) -> Result<Vec<Matchup>, PairingError> {
    check_divisibility(teams, per_side)?;
    Ok(teams
        .chunks(2 * per_side)
        .map(|block| Matchup {
            home: block[..per_side].to_vec(),
            away: block[per_side..].to_vec(),
        })
        .collect())
}

/// Snake-draft split within each block of `2 * per_side`.
///
/// Picks alternate side in an ABBA pattern, so the strongest and weakest
/// ranks of a block land together. For one team per side this pairs
/// adjacent ranks; for two it pairs ranks 1 and 4 against 2 and 3.
pub fn snake(teams: &[Uuid], per_side: usize) -> Result<Vec<Matchup>, PairingError> {
    check_divisibility(teams, per_side)?;
    Ok(teams
        .chunks(2 * per_side)
        .map(|block| {
            let mut home = Vec::with_capacity(per_side);
            let mut away = Vec::with_capacity(per_side);
            for (i, unit) in block.iter().enumerate() {
                if i % 4 == 0 || i % 4 == 3 {
                    home.push(*unit);
                } else {
                    away.push(*unit);
                }
            }
            Matchup { home, away }
        })
        .collect())
}

/// Shuffle the roster, then split consecutively.
pub fn random(teams: &[Uuid], per_side: usize) -> Result<Vec<Matchup>, PairingError> {
    check_divisibility(teams, per_side)?;
    let mut shuffled = teams.to_vec();
    shuffled.shuffle(&mut rng());
    consecutive(&shuffled, per_side)
}

/// Round-robin matchups under a per-team game cap.
///
/// All unique pairs are generated up front, then rounds are filled greedily
/// with pairs of teams still below `max_games` that have not met yet.
/// Rematches are admitted only when no fresh pair can extend the round.
pub fn round_robin_capped(teams: &[Uuid], max_games: u32) -> Vec<Matchup> {
    let mut remaining: Vec<(Uuid, Uuid)> = Vec::new();
    for (i, a) in teams.iter().enumerate() {
        for b in &teams[i + 1..] {
            remaining.push((*a, *b));
        }
    }

    let mut games: indexmap::IndexMap<Uuid, u32> =
        teams.iter().map(|id| (*id, 0)).collect();
    let mut matchups = Vec::new();

    fn bump(games: &mut indexmap::IndexMap<Uuid, u32>, id: Uuid) {
        if let Some(count) = games.get_mut(&id) {
            *count += 1;
        }
    }

    loop {
        let mut busy: std::collections::HashSet<Uuid> = std::collections::HashSet::new();
        let mut scheduled_this_round = 0usize;

        // Fresh pairings first.
        let mut i = 0;
        while i < remaining.len() {
            let (a, b) = remaining[i];
            let capped = games.get(&a).copied().unwrap_or(0) >= max_games
                || games.get(&b).copied().unwrap_or(0) >= max_games;
            if capped {
                remaining.remove(i);
                continue;
            }
            if busy.contains(&a) || busy.contains(&b) {
                i += 1;
                continue;
            }
            busy.insert(a);
            busy.insert(b);
            bump(&mut games, a);
            bump(&mut games, b);
            matchups.push(Matchup {
                home: vec![a],
                away: vec![b],
            });
            scheduled_this_round += 1;
            remaining.remove(i);
        }

        // Force rematches for idle teams still under the cap, if two exist.
        let mut idle: Vec<Uuid> = games
            .iter()
            .filter(|&(id, count)| !busy.contains(id) && *count < max_games)
            .map(|(id, _)| *id)
            .collect();
        while idle.len() >= 2 {
            let a = idle.remove(0);
            let b = idle.remove(0);
            bump(&mut games, a);
            bump(&mut games, b);
            matchups.push(Matchup {
                home: vec![a],
                away: vec![b],
            });
            scheduled_this_round += 1;
        }

        if scheduled_this_round == 0 {
            break;
        }
    }

    matchups
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn team_ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn consecutive_splits_blocks_in_order() {
        let teams = team_ids(8);
        let matchups = consecutive(&teams, 2).unwrap();
        assert_eq!(matchups.len(), 2);
        assert_eq!(matchups[0].home, vec![teams[0], teams[1]]);
        assert_eq!(matchups[0].away, vec![teams[2], teams[3]]);
        assert_eq!(matchups[1].home, vec![teams[4], teams[5]]);
        assert_eq!(matchups[1].away, vec![teams[6], teams[7]]);
    }

    #[test]
    fn consecutive_rejects_indivisible_roster() {
        let teams = team_ids(6);
        assert_eq!(
            consecutive(&teams, 2).unwrap_err(),
            PairingError::IndivisibleRoster { teams: 6, per_side: 2 }
        );
        assert_eq!(
            consecutive(&teams, 0).unwrap_err(),
            PairingError::InvalidTeamsPerSide
        );
    }

    #[test]
    fn snake_singles_pair_adjacent_ranks() {
        let teams = team_ids(6);
        let matchups = snake(&teams, 1).unwrap();
        assert_eq!(matchups.len(), 3);
        assert_eq!(matchups[0].home, vec![teams[0]]);
        assert_eq!(matchups[0].away, vec![teams[1]]);
        assert_eq!(matchups[2].home, vec![teams[4]]);
        assert_eq!(matchups[2].away, vec![teams[5]]);
    }

    #[test]
    fn snake_doubles_pair_outer_ranks_against_inner() {
        let teams = team_ids(4);
        let matchups = snake(&teams, 2).unwrap();
        assert_eq!(matchups.len(), 1);
        assert_eq!(matchups[0].home, vec![teams[0], teams[3]]);
        assert_eq!(matchups[0].away, vec![teams[1], teams[2]]);
    }

    #[test]
    fn snake_larger_sides_alternate_picks() {
        let teams = team_ids(6);
        let matchups = snake(&teams, 3).unwrap();
        assert_eq!(matchups.len(), 1);
        assert_eq!(matchups[0].home, vec![teams[0], teams[3], teams[4]]);
        assert_eq!(matchups[0].away, vec![teams[1], teams[2], teams[5]]);
    }

    #[test]
    fn random_preserves_roster_and_shape() {
        let teams = team_ids(8);
        let matchups = random(&teams, 2).unwrap();
        assert_eq!(matchups.len(), 2);
        let mut seen: Vec<Uuid> = matchups
            .iter()
            .flat_map(|m| m.home.iter().chain(m.away.iter()).copied())
            .collect();
        seen.sort();
        let mut expected = teams.clone();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn capped_round_robin_respects_cap_without_rematch_need() {
        let teams = team_ids(4);
        let matchups = round_robin_capped(&teams, 3);
        // Four teams produce the full round robin within a cap of 3.
        assert_eq!(matchups.len(), 6);
        let mut counts: HashMap<Uuid, u32> = HashMap::new();
        for m in &matchups {
            *counts.entry(m.home[0]).or_default() += 1;
            *counts.entry(m.away[0]).or_default() += 1;
        }
        assert!(counts.values().all(|&c| c == 3));
    }

    #[test]
    fn capped_round_robin_prefers_fresh_pairs() {
        let teams = team_ids(4);
        let matchups = round_robin_capped(&teams, 2);
        let mut pairs: Vec<(Uuid, Uuid)> = matchups
            .iter()
            .map(|m| {
                let (a, b) = (m.home[0], m.away[0]);
                if a < b { (a, b) } else { (b, a) }
            })
            .collect();
        pairs.sort();
        let before = pairs.len();
        pairs.dedup();
        // A cap of 2 over 4 teams never forces a rematch.
        assert_eq!(pairs.len(), before);
        let mut counts: HashMap<Uuid, u32> = HashMap::new();
        for m in &matchups {
            *counts.entry(m.home[0]).or_default() += 1;
            *counts.entry(m.away[0]).or_default() += 1;
        }
        assert!(counts.values().all(|&c| c <= 2));
    }

    #[test]
    fn capped_round_robin_forces_rematches_for_tiny_rosters() {
        let teams = team_ids(2);
        let matchups = round_robin_capped(&teams, 3);
        // Only one possible pairing exists, so the cap is met via rematches.
        assert_eq!(matchups.len(), 3);
        assert!(matchups.iter().all(|m| {
            (m.home[0] == teams[0] && m.away[0] == teams[1])
                || (m.home[0] == teams[1] && m.away[0] == teams[0])
        }));
    }
}
