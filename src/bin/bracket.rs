//! Command-line front end: generate a bracket from a CSV roster, schedule the ready
//! matches and print the tournament as JSON.
//! Run with: cargo run --bin bracket -- <format> <roster.csv> [schedule.json]
//! Without a schedule file the calendar comes from env: COURTS, GAME_MINUTES, DAYS,
//! DAY_START, DAY_END (defaults 2, 30, 3, 09:00, 18:00, starting today).

use court_bracket_engine::{
    create_tournament, load_roster, BracketOptions, ScheduleConfig, TournamentFormat,
};
use std::error::Error;
use std::fs::File;

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn default_config() -> Result<ScheduleConfig, Box<dyn Error>> {
    let start = chrono::Local::now().date_naive();
    let day_start = std::env::var("DAY_START").unwrap_or_else(|_| "09:00".to_string());
    let day_end = std::env::var("DAY_END").unwrap_or_else(|_| "18:00".to_string());
    let config = ScheduleConfig::new(
        env_or("COURTS", 2),
        env_or("GAME_MINUTES", 30),
        start,
        env_or("DAYS", 3),
        &day_start,
        &day_end,
    )?;
    Ok(config.with_break(env_or("BREAK_MINUTES", 0)))
}

fn usage() -> String {
    "usage: bracket <single|double|round_robin|group_stage> <roster.csv> [schedule.json]".to_string()
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (format, roster_path) = match args.as_slice() {
        [format, roster, ..] => (format.parse::<TournamentFormat>()?, roster.clone()),
        _ => return Err(usage().into()),
    };

    let teams = load_roster(File::open(&roster_path)?)?;
    let config = match args.get(2) {
        Some(path) => serde_json::from_reader(File::open(path)?)?,
        None => default_config()?,
    };
    let options = BracketOptions {
        advancing_per_group: std::env::var("ADVANCING_PER_GROUP")
            .ok()
            .and_then(|v| v.parse().ok()),
    };

    let tournament = create_tournament(format, teams, options, config)?;
    log::info!(
        "{} matches ready on the calendar",
        tournament.upcoming_matches().len()
    );
    println!("{}", serde_json::to_string_pretty(&tournament.snapshot())?);
    Ok(())
}
