//! Seed ordering: standard "1 vs n, 2 vs n-1" pairings and seed validation.

use crate::models::{Team, TeamId, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Smallest power of two that is `>= n` (1 for n = 0).
pub fn bracket_size(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

/// First-round pairings for a bracket of `bracket_size` slots.
///
/// Teams are taken in seed order and placed through the index sequence
/// `0, size-1, 1, size-2, ...`; slots past `teams.len()` are byes (`None`).
/// Identical input order always yields identical output order.
pub fn pairings(teams: &[Team], bracket_size: usize) -> Vec<(Option<TeamId>, Option<TeamId>)> {
    let mut sorted: Vec<&Team> = teams.iter().collect();
    sorted.sort_by_key(|t| t.seed);
    let at = |index: usize| sorted.get(index).map(|t| t.id);

    (0..bracket_size / 2)
        .map(|i| (at(i), at(bracket_size - 1 - i)))
        .collect()
}

/// Reject duplicate ids and seeds that are not exactly `1..=n`.
pub fn validate_teams(teams: &[Team]) -> Result<(), TournamentError> {
    let mut ids = HashSet::new();
    for team in teams {
        if !ids.insert(team.id) {
            return Err(TournamentError::DuplicateTeam(team.id));
        }
    }
    let seeds: HashSet<u32> = teams.iter().map(|t| t.seed).collect();
    let expected: HashSet<u32> = (1..=teams.len() as u32).collect();
    if seeds != expected {
        return Err(TournamentError::InvalidSeeds);
    }
    Ok(())
}

/// Teams ordered by seed (strongest first).
pub fn by_seed(teams: &[Team]) -> Vec<Team> {
    let mut sorted = teams.to_vec();
    sorted.sort_by_key(|t| t.seed);
    sorted
}

/// Reassign seeds `1..=n` in random order (a random draw instead of a ranked one).
pub fn shuffle_seeds<R: Rng + ?Sized>(teams: &mut [Team], rng: &mut R) {
    let mut seeds: Vec<u32> = (1..=teams.len() as u32).collect();
    seeds.shuffle(rng);
    for (team, seed) in teams.iter_mut().zip(seeds) {
        team.seed = seed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(n: u32) -> Vec<Team> {
        (1..=n).map(|s| Team::new(format!("T{s}"), s)).collect()
    }

    #[test]
    fn eight_teams_pair_one_with_eight() {
        let teams = seeded(8);
        let pairs = pairings(&teams, 8);
        let seed_of = |id: Option<TeamId>| id.and_then(|id| teams.iter().find(|t| t.id == id)).map(|t| t.seed);
        let seeds: Vec<_> = pairs.iter().map(|(a, b)| (seed_of(*a), seed_of(*b))).collect();
        assert_eq!(
            seeds,
            vec![(Some(1), Some(8)), (Some(2), Some(7)), (Some(3), Some(6)), (Some(4), Some(5))]
        );
    }

    #[test]
    fn missing_slots_become_byes_for_top_seeds() {
        let teams = seeded(5);
        let pairs = pairings(&teams, bracket_size(5));
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs.iter().filter(|(_, b)| b.is_none()).count(), 3);
        assert!(pairs.iter().all(|(a, _)| a.is_some()));
    }

    #[test]
    fn seeds_must_be_contiguous() {
        let mut teams = seeded(4);
        teams[3].seed = 7;
        assert_eq!(validate_teams(&teams), Err(TournamentError::InvalidSeeds));
    }

    #[test]
    fn shuffled_seeds_stay_a_permutation() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut teams = seeded(9);
        shuffle_seeds(&mut teams, &mut StdRng::seed_from_u64(7));
        assert_eq!(validate_teams(&teams), Ok(()));
    }
}
