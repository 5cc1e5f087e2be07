//! Integration tests for CSV roster import.

use court_bracket_engine::{load_roster, TournamentError};

#[test]
fn loads_names_and_seeds() {
    let csv = "name,seed\nEagles,2\n Hawks ,1\nOwls,3\nKites,4\n";
    let teams = load_roster(csv.as_bytes()).unwrap();
    assert_eq!(teams.len(), 4);
    assert_eq!(teams[1].name, "Hawks");
    assert_eq!(teams[1].seed, 1);
}

#[test]
fn missing_seed_column_uses_row_order() {
    let teams = load_roster("name\nA\nB\nC\nD\n".as_bytes()).unwrap();
    let seeds: Vec<u32> = teams.iter().map(|t| t.seed).collect();
    assert_eq!(seeds, vec![1, 2, 3, 4]);
}

#[test]
fn rejects_duplicate_names_and_partial_seeds() {
    let err = load_roster("name\nAlpha\nalpha\n".as_bytes()).unwrap_err();
    assert_eq!(err, TournamentError::DuplicateTeamName("alpha".into()));

    let err = load_roster("name,seed\nA,1\nB,\nC,3\n".as_bytes()).unwrap_err();
    assert!(matches!(err, TournamentError::InvalidRoster(_)));

    let err = load_roster("name,seed\nA,1\nB,1\n".as_bytes()).unwrap_err();
    assert_eq!(err, TournamentError::InvalidSeeds);

    let err = load_roster("name\n\"\"\n".as_bytes()).unwrap_err();
    assert!(matches!(err, TournamentError::InvalidRoster(_)));
}
