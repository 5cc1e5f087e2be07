//! Shared helpers for the integration tests.
#![allow(dead_code)]

use chrono::NaiveDate;
use court_bracket_engine::{
    create_tournament, report_result, BracketOptions, MatchId, MatchReport, MatchStatus,
    ProgressionOutcome, ScheduleConfig, Team, TeamId, Tournament, TournamentFormat,
};

/// Teams "T1".."Tn" seeded 1..n.
pub fn seeded_teams(n: u32) -> Vec<Team> {
    (1..=n).map(|s| Team::new(format!("T{s}"), s)).collect()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Plenty of courts and days so scheduling never gets in the way.
pub fn roomy_config() -> ScheduleConfig {
    ScheduleConfig::new(4, 30, date(2024, 6, 3), 30, "08:00", "22:00").unwrap()
}

pub fn tournament(format: TournamentFormat, n: u32) -> Tournament {
    create_tournament(format, seeded_teams(n), BracketOptions::default(), roomy_config()).unwrap()
}

pub fn seed_of(t: &Tournament, id: TeamId) -> u32 {
    t.team(id).unwrap().seed
}

pub fn team_with_seed(t: &Tournament, seed: u32) -> TeamId {
    t.teams.iter().find(|team| team.seed == seed).unwrap().id
}

/// Report a 21-10 win for the better-seeded side.
pub fn play_by_seed(t: &mut Tournament, id: MatchId) -> ProgressionOutcome {
    let m = t.get_match(id).unwrap().clone();
    let s1 = seed_of(t, m.team_1.team().unwrap());
    let s2 = seed_of(t, m.team_2.team().unwrap());
    let report = if s1 < s2 {
        MatchReport::score(21, 10)
    } else {
        MatchReport::score(10, 21)
    };
    report_result(t, id, report).unwrap()
}

/// Play scheduled matches in calendar order, better seed winning, until none remain.
pub fn play_out(t: &mut Tournament) {
    loop {
        let next = t
            .bracket
            .iter()
            .filter(|m| m.status == MatchStatus::Scheduled)
            .min_by_key(|m| (m.scheduled_time, m.court))
            .map(|m| m.id);
        match next {
            Some(id) => {
                play_by_seed(t, id);
            }
            None => break,
        }
    }
}
