//! Setup: bracket generation entry point, tournament creation and match scheduling.

use crate::logic::double_elimination::generate_double_elimination;
use crate::logic::group_stage::generate_group_stage;
use crate::logic::progression::settle_byes;
use crate::logic::round_robin::generate_round_robin;
use crate::logic::scheduler::TimeScheduler;
use crate::logic::seeding::validate_teams;
use crate::logic::single_elimination::generate_single_elimination;
use crate::models::{
    Bracket, BracketOptions, GameMatch, Group, MatchId, MatchStatus, ScheduleConfig,
    ScheduledMatch, Team, TeamStats, Tournament, TournamentError, TournamentFormat,
    TournamentState,
};
use uuid::Uuid;

/// Build the complete match graph for `format`. Byes are settled before returning.
/// Groups are returned for the group stage and empty otherwise.
pub fn generate_bracket(
    format: TournamentFormat,
    teams: &[Team],
    options: &BracketOptions,
) -> Result<(Bracket, Vec<Group>), TournamentError> {
    validate_teams(teams)?;
    let (mut bracket, groups) = match format {
        TournamentFormat::SingleElimination => (generate_single_elimination(teams)?, Vec::new()),
        TournamentFormat::DoubleElimination => (generate_double_elimination(teams)?, Vec::new()),
        TournamentFormat::RoundRobin => (generate_round_robin(teams)?, Vec::new()),
        TournamentFormat::GroupStage => generate_group_stage(teams, options)?,
    };
    settle_byes(&mut bracket);
    bracket.check_integrity()?;
    Ok((bracket, groups))
}

/// Create a tournament: generate the bracket and schedule every match that is ready.
/// Fails without side effects if generation or scheduling fails.
pub fn create_tournament(
    format: TournamentFormat,
    teams: Vec<Team>,
    options: BracketOptions,
    config: ScheduleConfig,
) -> Result<Tournament, TournamentError> {
    let (bracket, groups) = generate_bracket(format, &teams, &options)?;
    let scheduler = TimeScheduler::new(config)?;
    let mut tournament = Tournament {
        id: Uuid::new_v4(),
        format,
        options,
        stats: teams.iter().map(TeamStats::for_team).collect(),
        teams,
        bracket,
        groups,
        scheduler,
        state: match format {
            TournamentFormat::GroupStage => TournamentState::GroupStage,
            _ => TournamentState::InProgress,
        },
    };
    let placed = schedule_ready_matches(&mut tournament)?;
    log::info!(
        "tournament {} created: {:?}, {} teams, {} matches, {} scheduled",
        tournament.id,
        format,
        tournament.teams.len(),
        tournament.bracket.len(),
        placed.len()
    );
    Ok(tournament)
}

/// Schedule `matches` in the given order on a fresh calendar.
pub fn schedule_matches(
    matches: &[GameMatch],
    config: &ScheduleConfig,
) -> Result<Vec<ScheduledMatch>, TournamentError> {
    let mut scheduler = TimeScheduler::new(config.clone())?;
    let refs: Vec<&GameMatch> = matches.iter().collect();
    scheduler.schedule_matches(&refs)
}

/// Schedule every ready match with the tournament's current clocks, ordered by round,
/// segment priority and game number. All or nothing.
pub fn schedule_ready_matches(
    tournament: &mut Tournament,
) -> Result<Vec<ScheduledMatch>, TournamentError> {
    let mut ready: Vec<&GameMatch> = tournament.bracket.iter().filter(|m| m.is_ready()).collect();
    ready.sort_by_key(|m| m.schedule_key());
    let placed = tournament.scheduler.schedule_matches(&ready)?;
    for p in &placed {
        stamp(tournament, p);
    }
    Ok(placed)
}

/// Replace the schedule configuration; affects placements made from now on.
pub fn update_schedule_config(
    tournament: &mut Tournament,
    config: ScheduleConfig,
) -> Result<(), TournamentError> {
    tournament.scheduler.update_config(config)
}

/// Place the given matches one at a time in scheduling order. Matches that do not fit stay
/// pending and are returned in the second list.
pub(crate) fn place_matches(
    tournament: &mut Tournament,
    ids: &[MatchId],
) -> (Vec<ScheduledMatch>, Vec<MatchId>) {
    let mut pending: Vec<GameMatch> = ids
        .iter()
        .filter_map(|id| tournament.bracket.get(*id))
        .filter(|m| m.is_ready())
        .cloned()
        .collect();
    pending.sort_by_key(|m| m.schedule_key());

    let mut placed = Vec::new();
    let mut skipped = Vec::new();
    for m in &pending {
        match tournament.scheduler.schedule_matches(&[m]) {
            Ok(mut one) => {
                for p in &one {
                    stamp(tournament, p);
                }
                placed.append(&mut one);
            }
            Err(e) => {
                log::warn!("match {} left unscheduled: {}", m.id, e);
                skipped.push(m.id);
            }
        }
    }
    (placed, skipped)
}

fn stamp(tournament: &mut Tournament, placement: &ScheduledMatch) {
    if let Some(m) = tournament.bracket.get_mut(placement.match_id) {
        m.scheduled_time = Some(placement.start);
        m.court = Some(placement.court);
        m.status = MatchStatus::Scheduled;
    }
}
