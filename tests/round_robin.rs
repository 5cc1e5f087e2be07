//! Integration tests for round robin (circle method).

mod common;

use common::{play_out, seed_of, seeded_teams, tournament};
use court_bracket_engine::{
    generate_bracket, get_standings, BracketOptions, StandingsScope, TeamId, TournamentError,
    TournamentFormat, TournamentState,
};
use std::collections::{HashMap, HashSet};

#[test]
fn generate_requires_at_least_4_teams() {
    let result = generate_bracket(
        TournamentFormat::RoundRobin,
        &seeded_teams(3),
        &BracketOptions::default(),
    );
    assert!(matches!(
        result,
        Err(TournamentError::NotEnoughTeams { required: 4, actual: 3 })
    ));
}

#[test]
fn every_pair_meets_exactly_once() {
    for n in 4..=13u32 {
        let (bracket, _) = generate_bracket(
            TournamentFormat::RoundRobin,
            &seeded_teams(n),
            &BracketOptions::default(),
        )
        .unwrap();
        let n = n as usize;
        assert_eq!(bracket.len(), n * (n - 1) / 2, "n = {n}");

        let mut pairs: HashSet<(TeamId, TeamId)> = HashSet::new();
        let mut appearances: HashMap<TeamId, usize> = HashMap::new();
        let mut per_round: HashMap<u32, usize> = HashMap::new();
        for m in bracket.iter() {
            let a = m.team_1.team().unwrap();
            let b = m.team_2.team().unwrap();
            assert!(pairs.insert((a.min(b), a.max(b))), "pair repeated, n = {n}");
            *appearances.entry(a).or_default() += 1;
            *appearances.entry(b).or_default() += 1;
            *per_round.entry(m.round).or_default() += 1;
        }
        assert!(appearances.values().all(|count| *count == n - 1));
        assert!(per_round.values().all(|count| *count == n / 2));
        bracket.check_integrity().unwrap();
    }
}

#[test]
fn five_teams_one_bye_per_round() {
    let (bracket, _) = generate_bracket(
        TournamentFormat::RoundRobin,
        &seeded_teams(5),
        &BracketOptions::default(),
    )
    .unwrap();
    assert_eq!(bracket.len(), 10);
    let rounds = bracket.iter().map(|m| m.round).max().unwrap();
    assert_eq!(rounds, 5);
    for round in 1..=rounds {
        let playing: HashSet<TeamId> = bracket
            .iter()
            .filter(|m| m.round == round)
            .flat_map(|m| [m.team_1.team().unwrap(), m.team_2.team().unwrap()])
            .collect();
        assert_eq!(playing.len(), 4, "round {round} should leave one team out");
    }
}

#[test]
fn first_round_pairs_top_seed_with_bottom() {
    let t = tournament(TournamentFormat::RoundRobin, 6);
    let first = t.get_match(0).unwrap();
    assert_eq!(first.round, 1);
    assert_eq!(seed_of(&t, first.team_1.team().unwrap()), 1);
    assert_eq!(seed_of(&t, first.team_2.team().unwrap()), 6);
}

#[test]
fn completed_round_robin_ranks_by_wins() {
    let mut t = tournament(TournamentFormat::RoundRobin, 6);
    play_out(&mut t);
    assert_eq!(t.state, TournamentState::Completed);

    let table = get_standings(&t, StandingsScope::Tournament).unwrap();
    let seeds: Vec<u32> = table.iter().map(|r| seed_of(&t, r.team_id)).collect();
    assert_eq!(seeds, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(table[0].stats.wins, 5);
    assert_eq!(table[5].stats.losses, 5);
    for r in &table {
        assert_eq!(t.stats_for(r.team_id).unwrap().final_position, Some(r.position));
    }
}
