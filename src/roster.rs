//! Roster import: teams from CSV with `name` and optional `seed` columns.

use crate::models::{Team, TournamentError};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct RosterRow {
    name: String,
    #[serde(default)]
    seed: Option<u32>,
}

/// Read teams from CSV. Rows without a seed are seeded by row order; when seeds are
/// given they must cover every row and form exactly `1..=n`.
pub fn load_roster<R: Read>(reader: R) -> Result<Vec<Team>, TournamentError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut teams: Vec<Team> = Vec::new();
    let mut explicit = 0;
    for (row_index, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
        let row = record.map_err(|e| TournamentError::InvalidRoster(e.to_string()))?;
        let name = row.name.trim();
        if name.is_empty() {
            return Err(TournamentError::InvalidRoster(format!(
                "row {} has an empty name",
                row_index + 1
            )));
        }
        if teams.iter().any(|t| t.name.eq_ignore_ascii_case(name)) {
            return Err(TournamentError::DuplicateTeamName(name.to_string()));
        }
        if row.seed.is_some() {
            explicit += 1;
        }
        let seed = row.seed.unwrap_or(row_index as u32 + 1);
        teams.push(Team::new(name, seed));
    }

    if explicit != 0 && explicit != teams.len() {
        return Err(TournamentError::InvalidRoster(
            "either every row has a seed or none does".into(),
        ));
    }
    crate::logic::seeding::validate_teams(&teams)?;
    log::debug!("loaded roster of {} teams", teams.len());
    Ok(teams)
}
