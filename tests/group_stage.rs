//! Integration tests for the group stage and its deferred knockout.

mod common;

use common::{play_by_seed, play_out, roomy_config, seed_of, seeded_teams, tournament};
use court_bracket_engine::logic::{advancing_for, generate_knockout, group_count, snake_draft};
use court_bracket_engine::{
    create_tournament, get_standings, BracketOptions, MatchStatus, Segment, StandingsScope,
    TournamentError, TournamentFormat, TournamentState,
};

#[test]
fn group_count_table() {
    assert_eq!(group_count(6), 2);
    assert_eq!(group_count(8), 2);
    assert_eq!(group_count(12), 3);
    assert_eq!(group_count(16), 4);
    assert_eq!(group_count(20), 4);
    assert_eq!(group_count(24), 5);
    assert_eq!(group_count(30), 5);
}

#[test]
fn snake_draft_balances_seeds() {
    let groups = snake_draft(&seeded_teams(8), 2);
    let seeds: Vec<Vec<u32>> = groups
        .iter()
        .map(|g| g.iter().map(|t| t.seed).collect())
        .collect();
    assert_eq!(seeds, vec![vec![1, 4, 5, 8], vec![2, 3, 6, 7]]);
}

#[test]
fn advancing_defaults_depend_on_group_size() {
    let options = BracketOptions::default();
    assert_eq!(advancing_for(4, &options), 2);
    assert_eq!(advancing_for(6, &options), 3);
    let fixed = BracketOptions { advancing_per_group: Some(1) };
    assert_eq!(advancing_for(6, &fixed), 1);
}

#[test]
fn group_stage_rejects_small_fields_and_bad_options() {
    let err = create_tournament(
        TournamentFormat::GroupStage,
        seeded_teams(5),
        BracketOptions::default(),
        roomy_config(),
    )
    .unwrap_err();
    assert!(matches!(err, TournamentError::NotEnoughTeams { required: 6, .. }));

    let err = create_tournament(
        TournamentFormat::GroupStage,
        seeded_teams(8),
        BracketOptions { advancing_per_group: Some(1) },
        roomy_config(),
    )
    .unwrap_err();
    assert!(matches!(err, TournamentError::InvalidOptions(_)));
}

#[test]
fn groups_play_round_robins_and_defer_knockout() {
    let mut t = tournament(TournamentFormat::GroupStage, 8);
    assert_eq!(t.state, TournamentState::GroupStage);
    assert_eq!(t.groups.len(), 2);
    assert_eq!(t.bracket.len(), 12);
    assert!(t.bracket.iter().all(|m| m.segment == Segment::Group && m.group.is_some()));
    assert!(!t.has_knockout());
    assert_eq!(generate_knockout(&mut t), Err(TournamentError::GroupStageIncomplete));

    let group_matches: Vec<_> = t.bracket.iter().map(|m| m.id).collect();
    let (last, rest) = group_matches.split_last().unwrap();
    for id in rest {
        let outcome = play_by_seed(&mut t, *id);
        assert!(!outcome.tournament_complete);
    }
    let outcome = play_by_seed(&mut t, *last);
    assert!(outcome.next_match_generated);
    assert_eq!(t.state, TournamentState::InProgress);

    let knockout: Vec<_> = t.bracket.iter().filter(|m| m.id >= 12).collect();
    assert_eq!(knockout.len(), 3);
    assert!(knockout.iter().all(|m| m.round > 3));
    assert_eq!(knockout.iter().filter(|m| m.segment == Segment::Finals).count(), 1);

    // Group winners are knockout seeds 1 and 2, runners-up 3 and 4.
    let semis: Vec<_> = knockout.iter().filter(|m| m.segment == Segment::Knockout).collect();
    let pairs: Vec<(u32, u32)> = semis
        .iter()
        .map(|m| {
            (
                seed_of(&t, m.team_1.team().unwrap()),
                seed_of(&t, m.team_2.team().unwrap()),
            )
        })
        .collect();
    assert_eq!(pairs, vec![(1, 3), (2, 4)]);
    assert!(semis.iter().all(|m| m.status == MatchStatus::Scheduled));
    t.bracket.check_integrity().unwrap();
}

#[test]
fn group_standings_use_group_matches_only() {
    let mut t = tournament(TournamentFormat::GroupStage, 8);
    play_out(&mut t);
    assert_eq!(t.state, TournamentState::Completed);

    let group_a = get_standings(&t, StandingsScope::Group(1)).unwrap();
    let seeds: Vec<u32> = group_a.iter().map(|r| seed_of(&t, r.team_id)).collect();
    assert_eq!(seeds, vec![1, 4, 5, 8]);
    assert_eq!(group_a[0].stats.wins, 3);

    assert_eq!(
        get_standings(&t, StandingsScope::Group(9)),
        Err(TournamentError::GroupNotFound(9))
    );
    let overall = get_standings(&t, StandingsScope::Tournament).unwrap();
    assert_eq!(seed_of(&t, overall[0].team_id), 1);
}

#[test]
fn uneven_groups_still_fill_the_knockout() {
    // 13 teams -> 4 groups of 4/3/3/3, two qualifiers each.
    let mut t = tournament(TournamentFormat::GroupStage, 13);
    assert_eq!(t.groups.len(), 4);
    play_out(&mut t);
    assert_eq!(t.state, TournamentState::Completed);
    assert_eq!(t.bracket.segment(Segment::Knockout).count(), 6);
    assert_eq!(t.bracket.segment(Segment::Finals).count(), 1);
}

#[test]
fn groups_of_six_send_three_teams_through() {
    // 30 teams -> 5 groups of 6 -> 15 qualifiers in a 16-slot knockout.
    let mut t = tournament(TournamentFormat::GroupStage, 30);
    assert_eq!(t.groups.len(), 5);
    assert!(t.groups.iter().all(|g| g.team_ids.len() == 6));
    play_out(&mut t);
    assert_eq!(t.state, TournamentState::Completed);

    let knockout: Vec<_> = t
        .bracket
        .iter()
        .filter(|m| matches!(m.segment, Segment::Knockout | Segment::Finals))
        .collect();
    assert_eq!(knockout.len(), 15);
    let qualifiers: std::collections::HashSet<_> = knockout
        .iter()
        .flat_map(|m| [m.team_1.team(), m.team_2.team()])
        .flatten()
        .collect();
    assert_eq!(qualifiers.len(), 15);
}
