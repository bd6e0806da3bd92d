//! Pool-play schedule construction: packs round-robin cycles into playable
//! rounds and deals matches out across courts.

use std::collections::HashSet;

use thiserror::Error;
use uuid::Uuid;

use crate::services::roundrobin;

/// A fully placed pool match ready to persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolMatch {
    /// Playable round bucket the match landed in.
    pub round: u32,
    /// Court assigned by arrival order.
    pub court: u32,
    /// First participant.
    pub team1: Uuid,
    /// Second participant.
    pub team2: Uuid,
    /// Referee slot, filled by a later assignment pass when the event uses
    /// team referees.
    pub referee: Option<Uuid>,
}

/// Configuration problems rejected before any generation work begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// Fewer than two teams can never produce a match.
    #[error("pool schedule requires at least 2 teams, got {0}")]
    NotEnoughTeams(usize),
    /// Pool count must be positive.
    #[error("pool count must be at least 1, got {0}")]
    InvalidPools(u32),
    /// Court count must be positive.
    #[error("court count must be at least 1, got {0}")]
    InvalidCourts(u32),
}

/// One playable round in the making: which teams are still free, and how
/// many courts are still open.
struct Bucket {
    free: HashSet<Uuid>,
    matches: u32,
}

/// Build the pool-play schedule: `pools` round-robin cycles compacted into
/// the minimum number of playable rounds, capped so each team plays `pools`
/// games, with courts dealt by arrival order.
///
/// A round admits a match only while no team repeats and a court is still
/// open, so every full round holds exactly `courts` matches and the
/// arrival-order court assignment never collides within a round.
///
/// `ordered` skips the per-cycle shuffle for deterministic output.
pub fn build(
    teams: &[Uuid],
    pools: u32,
    courts: u32,
    ordered: bool,
) -> Result<Vec<PoolMatch>, ScheduleError> {
    if teams.len() < 2 {
        return Err(ScheduleError::NotEnoughTeams(teams.len()));
    }
    if pools == 0 {
        return Err(ScheduleError::InvalidPools(pools));
    }
    if courts == 0 {
        return Err(ScheduleError::InvalidCourts(courts));
    }

    // One full cycle per pool. Each cycle continues the previous one's round
    // numbering so the merged stream keeps cycles in sequence.
    let rounds_per_cycle = if teams.len() % 2 == 0 {
        teams.len() - 1
    } else {
        teams.len()
    } as u32;
    let mut stream: Vec<roundrobin::Pairing> = Vec::new();
    for pool in 0..pools {
        stream.extend(roundrobin::generate(teams, pool * rounds_per_cycle, ordered));
    }
    stream.sort_by_key(|pairing| pairing.round);

    // Each team plays `pools` games in total.
    let cap = pools as usize * teams.len() / 2;

    let roster: HashSet<Uuid> = teams.iter().copied().collect();
    let fresh_bucket = || Bucket {
        free: roster.clone(),
        matches: 0,
    };
    let mut buckets: Vec<Bucket> = (0..teams.len().saturating_sub(1))
        .map(|_| fresh_bucket())
        .collect();
    let mut current = 0;

    let mut emitted = Vec::with_capacity(cap);
    for pairing in stream {
        if emitted.len() >= cap {
            break;
        }
        // Byes carry no opponent and are not scheduled.
        let Some((team1, team2)) = pairing.teams() else {
            continue;
        };

        // The cursor only moves forward: once a round is out of courts or a
        // team repeats, later matches spill into fresh buckets. With several
        // pools this can exceed T-1 buckets, which is expected.
        while buckets[current].matches >= courts
            || !buckets[current].free.contains(&team1)
            || !buckets[current].free.contains(&team2)
        {
            current += 1;
            if current == buckets.len() {
                buckets.push(fresh_bucket());
            }
        }

        buckets[current].free.remove(&team1);
        buckets[current].free.remove(&team2);
        buckets[current].matches += 1;

        emitted.push(PoolMatch {
            round: current as u32,
            court: (emitted.len() % courts as usize) as u32,
            team1,
            team2,
            referee: None,
        });
    }

    Ok(emitted)
}
