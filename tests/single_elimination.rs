//! Integration tests for single-elimination generation and progression.

mod common;

use common::{play_by_seed, play_out, seed_of, seeded_teams, tournament};
use court_bracket_engine::{
    generate_bracket, BracketOptions, MatchStatus, Segment, Slot, TournamentError,
    TournamentFormat, TournamentState,
};

#[test]
fn generate_requires_at_least_4_teams() {
    let result = generate_bracket(
        TournamentFormat::SingleElimination,
        &seeded_teams(3),
        &BracketOptions::default(),
    );
    assert_eq!(
        result.unwrap_err(),
        TournamentError::NotEnoughTeams { required: 4, actual: 3 }
    );
}

#[test]
fn match_and_round_counts_follow_bracket_size() {
    for n in 4..=20u32 {
        let (bracket, _) = generate_bracket(
            TournamentFormat::SingleElimination,
            &seeded_teams(n),
            &BracketOptions::default(),
        )
        .unwrap();
        let size = (n as usize).next_power_of_two();
        assert_eq!(bracket.len(), size - 1, "n = {n}");
        let rounds = bracket.iter().map(|m| m.round).max().unwrap();
        assert_eq!(rounds, size.trailing_zeros(), "n = {n}");
        bracket.check_integrity().unwrap();

        let finals: Vec<_> = bracket.segment(Segment::Finals).collect();
        assert_eq!(finals.len(), 1);
        for m in bracket.iter().filter(|m| m.segment != Segment::Finals) {
            assert!(m.winner_to.is_some(), "match {} has no child", m.id);
            assert!(m.loser_to.is_none());
        }
    }
}

#[test]
fn byes_are_completed_at_generation() {
    let t = tournament(TournamentFormat::SingleElimination, 5);
    let byes: Vec<_> = t
        .bracket
        .iter()
        .filter(|m| m.team_1 == Slot::Bye || m.team_2 == Slot::Bye)
        .collect();
    assert_eq!(byes.len(), 3);
    for m in &byes {
        assert_eq!(m.status, MatchStatus::Completed);
        assert_eq!((m.team_1_score, m.team_2_score), (Some(0), Some(0)));
        assert!(m.winner.is_some());
    }
    // Seeds 1 and 2 both had byes and meet straight away in round 2.
    let semi = t.get_match(4).unwrap();
    assert_eq!(semi.status, MatchStatus::Scheduled);
    assert_eq!(seed_of(&t, semi.team_1.team().unwrap()), 1);
    assert_eq!(seed_of(&t, semi.team_2.team().unwrap()), 2);
    // Byes do not count as wins.
    assert!(t.stats.iter().all(|s| s.wins == 0 && s.losses == 0));
}

#[test]
fn eight_teams_seed_one_reaches_final() {
    let mut t = tournament(TournamentFormat::SingleElimination, 8);
    assert_eq!(t.bracket.len(), 7);
    assert_eq!(t.bracket.iter().map(|m| m.round).max(), Some(3));

    let round_one: Vec<_> = t.bracket.iter().filter(|m| m.round == 1).map(|m| m.id).collect();
    assert_eq!(round_one.len(), 4);
    for id in round_one {
        play_by_seed(&mut t, id);
    }
    let round_two: Vec<_> = t.bracket.iter().filter(|m| m.round == 2).map(|m| m.id).collect();
    for id in &round_two {
        assert_eq!(t.get_match(*id).unwrap().status, MatchStatus::Scheduled);
    }
    for id in round_two {
        play_by_seed(&mut t, id);
    }

    let final_match = t.bracket.segment(Segment::Finals).next().unwrap();
    assert_eq!(final_match.status, MatchStatus::Scheduled);
    assert_eq!(seed_of(&t, final_match.team_1.team().unwrap()), 1);
    assert_eq!(seed_of(&t, final_match.team_2.team().unwrap()), 3);
    assert_eq!(final_match.parents, vec![4, 5]);
}

#[test]
fn final_result_completes_tournament_with_positions() {
    let mut t = tournament(TournamentFormat::SingleElimination, 8);
    play_out(&mut t);

    assert_eq!(t.state, TournamentState::Completed);
    assert!(t.all_matches_decided());
    let champion = t.stats.iter().find(|s| s.final_position == Some(1)).unwrap();
    assert_eq!(champion.seed, 1);
    assert_eq!(champion.wins, 3);
    let runner_up = t.stats.iter().find(|s| s.final_position == Some(2)).unwrap();
    assert_eq!(runner_up.seed, 3);
    let mut positions: Vec<u32> = t.stats.iter().filter_map(|s| s.final_position).collect();
    positions.sort_unstable();
    assert_eq!(positions, (1..=8).collect::<Vec<_>>());
}

#[test]
fn odd_field_plays_out_to_completion() {
    for n in [5, 6, 7, 11, 13] {
        let mut t = tournament(TournamentFormat::SingleElimination, n);
        play_out(&mut t);
        assert_eq!(t.state, TournamentState::Completed, "n = {n}");
    }
}
