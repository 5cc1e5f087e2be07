//! Group stage: group sizing, snake draft, per-group round robins and the deferred knockout.

use crate::logic::progression::settle_byes;
use crate::logic::round_robin::append_round_robin;
use crate::logic::seeding::by_seed;
use crate::logic::single_elimination::{self, build_tree};
use crate::logic::standings::group_standings;
use crate::models::{
    Bracket, BracketOptions, Group, GroupId, MatchId, Segment, Team, Tournament, TournamentError,
};

pub const MIN_TEAMS: usize = 6;

/// Number of groups for `n` teams, keeping groups at 3 to 7 teams.
pub fn group_count(n: usize) -> usize {
    match n {
        0..=8 => 2,
        9..=12 => 3,
        13..=16 => 4,
        17..=24 => n.div_ceil(5),
        _ => n.div_ceil(6),
    }
}

/// Distribute teams over `groups` by snake draft: seeds 1..g go to groups 1..g,
/// the next g seeds go back from group g to group 1, and so on.
pub fn snake_draft(teams: &[Team], groups: usize) -> Vec<Vec<Team>> {
    let mut drawn: Vec<Vec<Team>> = vec![Vec::new(); groups];
    for (i, team) in by_seed(teams).into_iter().enumerate() {
        let pass = i / groups;
        let pos = i % groups;
        let group = if pass % 2 == 0 { pos } else { groups - 1 - pos };
        drawn[group].push(team);
    }
    drawn
}

/// Teams a group of `size` sends to the knockout.
pub fn advancing_for(size: usize, options: &BracketOptions) -> usize {
    options
        .advancing_per_group
        .unwrap_or(if size >= 6 { 3 } else { 2 })
}

/// Generate the group phase: groups plus one round robin per group.
/// The knockout is generated later by [`generate_knockout`].
pub fn generate_group_stage(
    teams: &[Team],
    options: &BracketOptions,
) -> Result<(Bracket, Vec<Group>), TournamentError> {
    if teams.len() < MIN_TEAMS {
        return Err(TournamentError::NotEnoughTeams {
            required: MIN_TEAMS,
            actual: teams.len(),
        });
    }
    let drawn = snake_draft(teams, group_count(teams.len()));

    let mut qualifiers = 0;
    for members in &drawn {
        let advancing = advancing_for(members.len(), options);
        if advancing == 0 || advancing > members.len() {
            return Err(TournamentError::InvalidOptions(format!(
                "{} teams cannot advance from a group of {}",
                advancing,
                members.len()
            )));
        }
        qualifiers += advancing;
    }
    if qualifiers < single_elimination::MIN_TEAMS {
        return Err(TournamentError::InvalidOptions(format!(
            "only {} teams would reach the knockout",
            qualifiers
        )));
    }

    let mut bracket = Bracket::new();
    let mut groups = Vec::with_capacity(drawn.len());
    for (i, members) in drawn.iter().enumerate() {
        let id = i as GroupId + 1;
        append_round_robin(&mut bracket, members, Segment::Group, Some(id));
        groups.push(Group {
            id,
            name: group_name(i),
            team_ids: members.iter().map(|t| t.id).collect(),
        });
    }
    log::debug!(
        "drew {} teams into {} groups, {} group matches",
        teams.len(),
        groups.len(),
        bracket.len()
    );
    Ok((bracket, groups))
}

fn group_name(index: usize) -> String {
    match u8::try_from(index).ok().filter(|i| *i < 26) {
        Some(i) => format!("Group {}", char::from(b'A' + i)),
        None => format!("Group {}", index + 1),
    }
}

/// Whether every group match has been completed.
pub fn group_phase_complete(tournament: &Tournament) -> bool {
    tournament
        .bracket
        .segment(Segment::Group)
        .all(|m| m.status.is_terminal())
}

/// Append the knockout bracket once the group phase is complete.
///
/// Qualifiers are reseeded by finishing place, then group order (all group winners
/// first, then all runners-up, ...). Knockout rounds continue after the last group round.
pub fn generate_knockout(tournament: &mut Tournament) -> Result<Vec<MatchId>, TournamentError> {
    if !group_phase_complete(tournament) {
        return Err(TournamentError::GroupStageIncomplete);
    }
    if tournament.has_knockout() {
        return Err(TournamentError::InvalidOptions("knockout already generated".into()));
    }

    let tables: Vec<(usize, Vec<_>)> = tournament
        .groups
        .iter()
        .map(|g| {
            (
                advancing_for(g.team_ids.len(), &tournament.options),
                group_standings(tournament, g.id, &g.team_ids),
            )
        })
        .collect();
    let deepest = tables.iter().map(|(adv, _)| *adv).max().unwrap_or(0);

    let mut qualifiers: Vec<Team> = Vec::new();
    for place in 0..deepest {
        for (advancing, table) in &tables {
            if place >= *advancing {
                continue;
            }
            if let Some(entry) = table.get(place) {
                let team = tournament
                    .team(entry.team_id)
                    .ok_or(TournamentError::TeamNotFound(entry.team_id))?;
                let seed = qualifiers.len() as u32 + 1;
                qualifiers.push(Team {
                    seed,
                    ..team.clone()
                });
            }
        }
    }
    if qualifiers.len() < single_elimination::MIN_TEAMS {
        return Err(TournamentError::NotEnoughTeams {
            required: single_elimination::MIN_TEAMS,
            actual: qualifiers.len(),
        });
    }

    let mut bracket = tournament.bracket.clone();
    let first_new = bracket.len() as MatchId;
    let offset = bracket.max_round(Segment::Group);
    build_tree(
        &mut bracket,
        &qualifiers,
        Segment::Knockout,
        Some(Segment::Finals),
        offset,
    );
    settle_byes(&mut bracket);
    bracket.check_integrity()?;

    tournament.bracket = bracket;
    log::info!(
        "tournament {}: knockout generated with {} qualifiers",
        tournament.id,
        qualifiers.len()
    );
    Ok((first_new..tournament.bracket.len() as MatchId).collect())
}
