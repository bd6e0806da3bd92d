//! Single-elimination bracket construction and advancement.

use thiserror::Error;
use uuid::Uuid;

use crate::dao::models::{MatchEntity, MatchKind, MatchStatus};

/// Rejection raised before any bracket match is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BracketError {
    /// A bracket needs at least two teams.
    #[error("bracket requires at least 2 teams, got {0}")]
    NotEnoughTeams(usize),
}

/// Number of rounds needed to eliminate down to one winner.
fn total_rounds(team_count: usize) -> u32 {
    team_count.next_power_of_two().trailing_zeros()
}

/// Build the full match tree for `ranked` (best seed first).
///
/// Round 0 pairs seeds sequentially; an odd seed out becomes a one-team bye
/// placeholder that advancement treats as already decided. Each later round
/// holds half the previous round's matches, rounded up, and is linked by
/// indexed pairing: parents `2i` and `2i+1` of a round feed match `i` of the
/// next. A bye that ends up as a slot's only feeder can never complete, so
/// its team is carried into that slot at build time; the slot then reads as
/// a bye itself and the carry continues through later rounds.
pub fn build(event_id: Uuid, ranked: &[Uuid]) -> Result<Vec<MatchEntity>, BracketError> {
    if ranked.len() < 2 {
        return Err(BracketError::NotEnoughTeams(ranked.len()));
    }

    let rounds = total_rounds(ranked.len());
    let mut bracket: Vec<MatchEntity> = Vec::new();

    // Round 0: consecutive seed pairs, bye placeholder last.
    let mut previous: Vec<usize> = Vec::new();
    let mut seeds = ranked.chunks_exact(2);
    for pair in seeds.by_ref() {
        let mut entity = MatchEntity::new(event_id, MatchKind::Bracket);
        entity.team1 = Some(pair[0]);
        entity.team2 = Some(pair[1]);
        previous.push(bracket.len());
        bracket.push(entity);
    }
    if let Some(odd_seed) = seeds.remainder().first() {
        let mut bye = MatchEntity::new(event_id, MatchKind::Bracket);
        bye.team1 = Some(*odd_seed);
        previous.push(bracket.len());
        bracket.push(bye);
    }

    for round in 1..rounds {
        let count = previous.len().div_ceil(2);
        let mut created: Vec<usize> = Vec::with_capacity(count);
        for _ in 0..count {
            let mut entity = MatchEntity::new(event_id, MatchKind::Bracket);
            entity.round = round;
            created.push(bracket.len());
            bracket.push(entity);
        }

        for (i, parents) in previous.chunks(2).enumerate() {
            let child = created[i];
            let child_id = bracket[child].id;
            for parent in parents {
                bracket[*parent].child = Some(child_id);
            }
            // A lone feeder that is already decided will never produce a
            // completion event, so its team moves up immediately.
            if parents.len() == 1 && bracket[parents[0]].is_bye() {
                bracket[child].team1 = bracket[parents[0]].winner();
            }
        }

        previous = created;
    }

    Ok(bracket)
}

/// Outcome of evaluating one completed parent against its bracket slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The sibling parent is not decided yet; try again on its completion.
    Waiting,
    /// The child already holds exactly this winner pair; nothing to write.
    AlreadyApplied,
    /// The child should be replaced with this value.
    Apply(MatchEntity),
}

/// Decide whether `completed` advances winners into `child`.
///
/// The sibling parent counts as decided when it does not exist, is a
/// one-team bye, or is complete. Winners are written into the child and its
/// scores reset to 0/0; the child's status is left untouched. Re-evaluating
/// after the child was already filled is a no-op, which makes repeated
/// completion notifications safe.
pub fn advance_child(
    completed: &MatchEntity,
    sibling: Option<&MatchEntity>,
    child: &MatchEntity,
) -> Advance {
    let sibling_decided = sibling
        .is_none_or(|entity| entity.status == MatchStatus::Complete || entity.is_bye());
    if !sibling_decided {
        return Advance::Waiting;
    }

    let Some(winner) = completed.winner() else {
        // Tied or unreported score: nothing can advance.
        return Advance::Waiting;
    };
    let sibling_winner = match sibling {
        Some(entity) => match entity.winner() {
            Some(team) => Some(team),
            // A decided sibling without a winner is a tie; hold off.
            None => return Advance::Waiting,
        },
        None => None,
    };

    let incoming = [Some(winner), sibling_winner];
    let reversed = [sibling_winner, Some(winner)];
    let current = [child.team1, child.team2];
    if current == incoming || current == reversed {
        return Advance::AlreadyApplied;
    }

    let mut next = child.clone();
    next.team1 = Some(winner);
    next.team2 = sibling_winner;
    next.team1_score = Some(0);
    next.team2_score = Some(0);
    Advance::Apply(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team_ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    fn matches_in_round(bracket: &[MatchEntity], round: u32) -> Vec<&MatchEntity> {
        bracket.iter().filter(|m| m.round == round).collect()
    }

    #[test]
    fn eight_team_bracket_shape() {
        let teams = team_ids(8);
        let bracket = build(Uuid::new_v4(), &teams).unwrap();

        assert_eq!(bracket.len(), 4 + 2 + 1);
        let round0 = matches_in_round(&bracket, 0);
        assert_eq!(round0.len(), 4);
        assert!(round0.iter().all(|m| !m.is_bye()));
        assert_eq!(matches_in_round(&bracket, 1).len(), 2);
        assert_eq!(matches_in_round(&bracket, 2).len(), 1);

        // The final has no child; everything else has one.
        let final_match = matches_in_round(&bracket, 2)[0];
        assert!(final_match.child.is_none());
        assert!(
            bracket
                .iter()
                .filter(|m| m.id != final_match.id)
                .all(|m| m.child.is_some())
        );
    }

    #[test]
    fn five_team_bracket_has_one_bye() {
        let teams = team_ids(5);
        let bracket = build(Uuid::new_v4(), &teams).unwrap();

        let round0 = matches_in_round(&bracket, 0);
        assert_eq!(round0.len(), 3);
        assert_eq!(round0.iter().filter(|m| !m.is_bye()).count(), 2);
        let byes: Vec<_> = round0.iter().filter(|m| m.is_bye()).collect();
        assert_eq!(byes.len(), 1);
        assert_eq!(byes[0].team1, Some(teams[4]));
    }

    #[test]
    fn parents_pair_by_index_into_children() {
        let teams = team_ids(8);
        let bracket = build(Uuid::new_v4(), &teams).unwrap();
        let round0 = matches_in_round(&bracket, 0);
        let round1 = matches_in_round(&bracket, 1);

        assert_eq!(round0[0].child, Some(round1[0].id));
        assert_eq!(round0[1].child, Some(round1[0].id));
        assert_eq!(round0[2].child, Some(round1[1].id));
        assert_eq!(round0[3].child, Some(round1[1].id));

        // At most two matches share any child.
        for child in round1 {
            let feeders = round0
                .iter()
                .filter(|m| m.child == Some(child.id))
                .count();
            assert!(feeders <= 2);
        }
    }

    #[test]
    fn lone_bye_feeder_carries_its_team_at_build_time() {
        let teams = team_ids(5);
        let bracket = build(Uuid::new_v4(), &teams).unwrap();
        let round1 = matches_in_round(&bracket, 1);

        // Seeds 1-4 feed the first slot; the fifth seed's bye is the only
        // feeder of the second, so its team is already waiting there.
        assert_eq!(round1.len(), 2);
        assert_eq!(round1[0].team1, None);
        assert_eq!(round1[0].team2, None);
        assert_eq!(round1[1].team1, Some(teams[4]));
        assert_eq!(round1[1].team2, None);
    }

    #[test]
    fn nine_team_bracket_carries_the_bye_through_every_round() {
        let teams = team_ids(9);
        let bracket = build(Uuid::new_v4(), &teams).unwrap();

        assert_eq!(matches_in_round(&bracket, 0).len(), 5);
        assert_eq!(matches_in_round(&bracket, 1).len(), 3);
        assert_eq!(matches_in_round(&bracket, 2).len(), 2);
        assert_eq!(matches_in_round(&bracket, 3).len(), 1);

        // Every non-entry match has at least one feeder.
        for entity in bracket.iter().filter(|m| m.round > 0) {
            let feeders = bracket
                .iter()
                .filter(|m| m.child == Some(entity.id))
                .count();
            assert!(feeders >= 1, "round {} slot has no feeder", entity.round);
        }

        // The ninth seed rides its bye until a decided opponent shows up.
        let round1 = matches_in_round(&bracket, 1);
        let round2 = matches_in_round(&bracket, 2);
        assert_eq!(round1[2].team1, Some(teams[8]));
        assert_eq!(round2[1].team1, Some(teams[8]));
    }

    #[test]
    fn rejects_single_team() {
        let teams = team_ids(1);
        assert_eq!(
            build(Uuid::new_v4(), &teams).unwrap_err(),
            BracketError::NotEnoughTeams(1)
        );
    }

    fn completed_parent(
        event: Uuid,
        child: Uuid,
        team1: Uuid,
        team2: Uuid,
        score1: u32,
        score2: u32,
    ) -> MatchEntity {
        let mut entity = MatchEntity::new(event, MatchKind::Bracket);
        entity.team1 = Some(team1);
        entity.team2 = Some(team2);
        entity.team1_score = Some(score1);
        entity.team2_score = Some(score2);
        entity.status = MatchStatus::Complete;
        entity.child = Some(child);
        entity
    }

    #[test]
    fn both_parents_complete_fills_child_and_resets_scores() {
        let event = Uuid::new_v4();
        let [x, y, z, w] = [(); 4].map(|_| Uuid::new_v4());
        let mut child = MatchEntity::new(event, MatchKind::Bracket);
        child.round = 1;

        let parent_a = completed_parent(event, child.id, x, y, 21, 15);
        let parent_b = completed_parent(event, child.id, z, w, 10, 21);

        let Advance::Apply(updated) = advance_child(&parent_a, Some(&parent_b), &child) else {
            panic!("expected an apply outcome");
        };
        let teams = [updated.team1, updated.team2];
        assert!(teams.contains(&Some(x)));
        assert!(teams.contains(&Some(w)));
        assert_eq!(updated.team1_score, Some(0));
        assert_eq!(updated.team2_score, Some(0));
        assert_eq!(updated.status, child.status);
    }

    #[test]
    fn second_notification_is_idempotent() {
        let event = Uuid::new_v4();
        let [x, y, z, w] = [(); 4].map(|_| Uuid::new_v4());
        let mut child = MatchEntity::new(event, MatchKind::Bracket);
        child.round = 1;

        let parent_a = completed_parent(event, child.id, x, y, 21, 15);
        let parent_b = completed_parent(event, child.id, z, w, 10, 21);

        let Advance::Apply(updated) = advance_child(&parent_a, Some(&parent_b), &child) else {
            panic!("expected an apply outcome");
        };
        // Replaying either parent's completion against the filled child is a no-op.
        assert_eq!(
            advance_child(&parent_a, Some(&parent_b), &updated),
            Advance::AlreadyApplied
        );
        assert_eq!(
            advance_child(&parent_b, Some(&parent_a), &updated),
            Advance::AlreadyApplied
        );
    }

    #[test]
    fn waits_for_undecided_sibling() {
        let event = Uuid::new_v4();
        let [x, y, z, w] = [(); 4].map(|_| Uuid::new_v4());
        let child = MatchEntity::new(event, MatchKind::Bracket);

        let parent_a = completed_parent(event, child.id, x, y, 21, 15);
        let mut parent_b = completed_parent(event, child.id, z, w, 0, 0);
        parent_b.status = MatchStatus::Incomplete;
        parent_b.team1_score = None;
        parent_b.team2_score = None;

        assert_eq!(
            advance_child(&parent_a, Some(&parent_b), &child),
            Advance::Waiting
        );
    }

    #[test]
    fn bye_sibling_advances_its_lone_team() {
        let event = Uuid::new_v4();
        let [x, y, lone] = [(); 3].map(|_| Uuid::new_v4());
        let child = MatchEntity::new(event, MatchKind::Bracket);

        let parent = completed_parent(event, child.id, x, y, 25, 20);
        let mut bye = MatchEntity::new(event, MatchKind::Bracket);
        bye.team1 = Some(lone);
        bye.child = Some(child.id);

        let Advance::Apply(updated) = advance_child(&parent, Some(&bye), &child) else {
            panic!("expected an apply outcome");
        };
        assert_eq!(updated.team1, Some(x));
        assert_eq!(updated.team2, Some(lone));
    }

    #[test]
    fn missing_sibling_half_fills_child() {
        let event = Uuid::new_v4();
        let [x, y] = [(); 2].map(|_| Uuid::new_v4());
        let child = MatchEntity::new(event, MatchKind::Bracket);

        let parent = completed_parent(event, child.id, x, y, 15, 11);
        let Advance::Apply(updated) = advance_child(&parent, None, &child) else {
            panic!("expected an apply outcome");
        };
        assert_eq!(updated.team1, Some(x));
        assert_eq!(updated.team2, None);
    }
}
