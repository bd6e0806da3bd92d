//! Referee rotation for pool schedules using non-playing teams.

use std::collections::{HashMap, HashSet, VecDeque};

use thiserror::Error;
use uuid::Uuid;

use crate::services::pool_schedule::PoolMatch;

/// Rejection raised before assignment starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RefereeError {
    /// With two or fewer teams every team plays every round, so no referee
    /// could ever be found.
    #[error("team referees require more than 2 teams, got {0}")]
    NotEnoughTeams(usize),
}

/// One reassignment along a shift chain: the match at `0` goes to team `1`.
type ShiftStep = (usize, Uuid);

/// Assign a referee to every match, preferring the non-playing team that has
/// refereed the least so far. Ties fall back to original team order.
///
/// The greedy pass alone can drift a couple of assignments apart depending on
/// the order matches arrive in, so a rebalancing pass then shifts single
/// assignments along eligibility chains until no team whistles two more
/// matches than another team could take over.
pub fn assign(matches: &mut [PoolMatch], teams: &[Uuid]) -> Result<(), RefereeError> {
    if teams.len() <= 2 {
        return Err(RefereeError::NotEnoughTeams(teams.len()));
    }

    let mut load: HashMap<Uuid, usize> = teams.iter().map(|team| (*team, 0)).collect();

    let mut playing: HashMap<u32, HashSet<Uuid>> = HashMap::new();
    for entry in matches.iter() {
        let on_court = playing.entry(entry.round).or_default();
        on_court.insert(entry.team1);
        on_court.insert(entry.team2);
    }

    let rounds: HashSet<u32> = matches.iter().map(|m| m.round).collect();
    let mut rounds: Vec<u32> = rounds.into_iter().collect();
    rounds.sort_unstable();

    for round in rounds {
        let Some(on_court) = playing.get(&round) else {
            continue;
        };
        for entry in matches.iter_mut().filter(|m| m.round == round) {
            let candidate = teams
                .iter()
                .copied()
                .filter(|team| !on_court.contains(team))
                .min_by_key(|team| load.get(team).copied().unwrap_or(0));

            if let Some(referee) = candidate {
                entry.referee = Some(referee);
                if let Some(count) = load.get_mut(&referee) {
                    *count += 1;
                }
            }
        }
    }

    while let Some(steps) = find_shift(matches, teams, &playing, &load) {
        for (index, to) in steps {
            if let Some(previous) = matches[index].referee.replace(to) {
                if let Some(count) = load.get_mut(&previous) {
                    *count -= 1;
                }
            }
            if let Some(count) = load.get_mut(&to) {
                *count += 1;
            }
        }
    }

    Ok(())
}

/// Find a chain of reassignments that moves one whistle from a busiest team
/// to a team at least two below it, with every hop staying off the court for
/// its round. A breadth-first search from all busiest teams keeps the chain
/// shortest; `None` means the spread cannot be tightened any further.
fn find_shift(
    matches: &[PoolMatch],
    teams: &[Uuid],
    playing: &HashMap<u32, HashSet<Uuid>>,
    load: &HashMap<Uuid, usize>,
) -> Option<Vec<ShiftStep>> {
    let busiest = teams.iter().filter_map(|team| load.get(team)).max()?;

    let mut queue: VecDeque<Uuid> = teams
        .iter()
        .copied()
        .filter(|team| load.get(team) == Some(busiest))
        .collect();
    let mut visited: HashSet<Uuid> = queue.iter().copied().collect();
    let mut came_from: HashMap<Uuid, ShiftStep> = HashMap::new();

    while let Some(from) = queue.pop_front() {
        for (index, entry) in matches.iter().enumerate() {
            if entry.referee != Some(from) {
                continue;
            }
            let Some(on_court) = playing.get(&entry.round) else {
                continue;
            };
            for team in teams {
                if visited.contains(team) || on_court.contains(team) {
                    continue;
                }
                visited.insert(*team);
                came_from.insert(*team, (index, from));

                if load.get(team).copied().unwrap_or(0) + 1 < *busiest {
                    // Walk back to the busiest source, handing one match
                    // forward per hop; only the endpoints change load.
                    let mut steps = Vec::new();
                    let mut stop = *team;
                    while let Some((hop, source)) = came_from.get(&stop).copied() {
                        steps.push((hop, stop));
                        stop = source;
                    }
                    return Some(steps);
                }
                queue.push_back(*team);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::pool_schedule;

    fn team_ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    fn referee_counts(matches: &[PoolMatch], teams: &[Uuid]) -> HashMap<Uuid, usize> {
        let mut counts: HashMap<Uuid, usize> = teams.iter().map(|team| (*team, 0)).collect();
        for m in matches {
            *counts.entry(m.referee.unwrap()).or_default() += 1;
        }
        counts
    }

    #[test]
    fn rejects_tiny_rosters() {
        let teams = team_ids(2);
        let mut matches = Vec::new();
        assert_eq!(
            assign(&mut matches, &teams).unwrap_err(),
            RefereeError::NotEnoughTeams(2)
        );
    }

    #[test]
    fn referees_never_play_their_own_match_round() {
        let teams = team_ids(5);
        let mut matches = pool_schedule::build(&teams, 3, 2, true).unwrap();
        assign(&mut matches, &teams).unwrap();

        for m in &matches {
            let referee = m.referee.expect("every match gets a referee");
            let playing: Vec<Uuid> = matches
                .iter()
                .filter(|other| other.round == m.round)
                .flat_map(|other| [other.team1, other.team2])
                .collect();
            assert!(!playing.contains(&referee));
        }
    }

    #[test]
    fn long_schedule_balances_exactly() {
        // 7 teams over 10 pools on one court: 35 whistle slots, 5 per team.
        let teams = team_ids(7);
        let mut matches = pool_schedule::build(&teams, 10, 1, true).unwrap();
        assign(&mut matches, &teams).unwrap();

        let counts = referee_counts(&matches, &teams);
        assert!(counts.values().all(|count| *count == 5));
    }

    #[test]
    fn shuffled_schedules_balance_exactly_too() {
        // The greedy pass alone drifts on shuffled match orders; the shift
        // chains must close the gap every time.
        let teams = team_ids(7);
        for _ in 0..25 {
            let mut matches = pool_schedule::build(&teams, 10, 1, false).unwrap();
            assign(&mut matches, &teams).unwrap();

            let counts = referee_counts(&matches, &teams);
            let max = counts.values().max().unwrap();
            let min = counts.values().min().unwrap();
            assert_eq!(max - min, 0, "referee load must balance exactly");

            for m in &matches {
                let referee = m.referee.unwrap();
                let on_court = matches
                    .iter()
                    .filter(|other| other.round == m.round)
                    .any(|other| other.team1 == referee || other.team2 == referee);
                assert!(!on_court, "rebalancing put a referee on the court");
            }
        }
    }

    #[test]
    fn least_loaded_candidate_wins_ties_by_roster_order() {
        let teams = team_ids(4);
        // Single round with one match: first two teams play, so the referee
        // must be the earliest non-playing team in roster order.
        let mut matches = vec![PoolMatch {
            round: 0,
            court: 0,
            team1: teams[0],
            team2: teams[1],
            referee: None,
        }];
        assign(&mut matches, &teams).unwrap();
        assert_eq!(matches[0].referee, Some(teams[2]));
    }
}
