//! Circle-method round-robin pairing generation.

use rand::seq::SliceRandom;
use uuid::Uuid;

/// One generated pairing; a `None` side marks that round's bye.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pairing {
    /// Round index assigned by the generator.
    pub round: u32,
    /// First participant.
    pub team1: Option<Uuid>,
    /// Second participant.
    pub team2: Option<Uuid>,
}

impl Pairing {
    /// Both sides of the pairing, when it is a real match rather than a bye.
    pub fn teams(&self) -> Option<(Uuid, Uuid)> {
        Some((self.team1?, self.team2?))
    }
}

/// Generate one full round-robin cycle over `teams` using the circle method.
///
/// Every team meets every other exactly once: N-1 rounds for even N, N rounds
/// with one bye per round for odd N. Rounds are numbered from
/// `starting_round`. Unless `ordered` is set the input order is shuffled
/// first, so repeated cycles produce different schedules; tests pass
/// `ordered = true` for determinism.
pub fn generate(teams: &[Uuid], starting_round: u32, ordered: bool) -> Vec<Pairing> {
    if teams.is_empty() {
        return Vec::new();
    }

    let mut slots: Vec<Option<Uuid>> = teams.iter().copied().map(Some).collect();
    if !ordered {
        slots.shuffle(&mut rand::rng());
    }
    // Odd rosters get a phantom slot; whoever faces it has a bye that round.
    if slots.len() % 2 == 1 {
        slots.push(None);
    }

    let count = slots.len();
    let rounds = count - 1;
    let mut pairings = Vec::with_capacity(rounds * count / 2);

    for round in 0..rounds {
        for i in 0..count / 2 {
            pairings.push(Pairing {
                round: starting_round + round as u32,
                team1: slots[i],
                team2: slots[count - 1 - i],
            });
        }

        // Rotate everything but the first slot one step clockwise.
        if let Some(last) = slots.pop() {
            slots.insert(1, last);
        }
    }

    pairings
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use super::*;

    fn team_ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    fn unordered(a: Uuid, b: Uuid) -> (Uuid, Uuid) {
        if a < b { (a, b) } else { (b, a) }
    }

    #[test]
    fn even_roster_is_a_perfect_matching_per_round() {
        let teams = team_ids(8);
        let pairings = generate(&teams, 0, true);

        let mut rounds: HashMap<u32, Vec<&Pairing>> = HashMap::new();
        for pairing in &pairings {
            rounds.entry(pairing.round).or_default().push(pairing);
        }

        assert_eq!(rounds.len(), 7);
        for (_, round) in rounds {
            assert_eq!(round.len(), 4);
            let mut seen = HashSet::new();
            for pairing in round {
                let (a, b) = pairing.teams().expect("even roster has no byes");
                assert!(seen.insert(a));
                assert!(seen.insert(b));
            }
        }
    }

    #[test]
    fn every_unordered_pair_occurs_exactly_once() {
        let teams = team_ids(8);
        let pairings = generate(&teams, 0, true);

        let mut pairs = HashSet::new();
        for pairing in &pairings {
            let (a, b) = pairing.teams().unwrap();
            assert!(pairs.insert(unordered(a, b)), "repeated pairing");
        }
        assert_eq!(pairs.len(), 8 * 7 / 2);
    }

    #[test]
    fn odd_roster_rotates_the_bye() {
        let teams = team_ids(5);
        let pairings = generate(&teams, 0, true);

        let mut byes_by_round: HashMap<u32, Vec<Uuid>> = HashMap::new();
        for pairing in &pairings {
            if pairing.teams().is_none() {
                let lone = pairing.team1.or(pairing.team2).unwrap();
                byes_by_round.entry(pairing.round).or_default().push(lone);
            }
        }

        // One bye per round, and no team byes twice across the cycle.
        assert_eq!(byes_by_round.len(), 5);
        let mut byed = HashSet::new();
        for (_, byes) in byes_by_round {
            assert_eq!(byes.len(), 1);
            assert!(byed.insert(byes[0]));
        }
    }

    #[test]
    fn starting_round_offsets_numbering() {
        let teams = team_ids(4);
        let pairings = generate(&teams, 10, true);
        let rounds: HashSet<u32> = pairings.iter().map(|p| p.round).collect();
        assert_eq!(rounds, HashSet::from([10, 11, 12]));
    }

    #[test]
    fn degenerate_rosters_yield_no_matches() {
        assert!(generate(&[], 0, true).is_empty());

        let lone = team_ids(1);
        let pairings = generate(&lone, 0, true);
        assert!(pairings.iter().all(|p| p.teams().is_none()));
    }
}
