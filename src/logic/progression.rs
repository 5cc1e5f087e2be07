//! Result progression: validate a reported result, advance winner and loser through the
//! bracket graph, settle byes, update statistics and detect completion.

use crate::logic::group_stage::{generate_knockout, group_phase_complete};
use crate::logic::setup::place_matches;
use crate::logic::standings::rank;
use crate::models::{
    Bracket, GameMatch, MatchId, MatchStatus, ScheduledMatch, Side, Slot, TeamId, Tournament,
    TournamentError, TournamentFormat, TournamentState,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A result as reported by the caller.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub team_1_score: u32,
    pub team_2_score: u32,
    /// Optional for scored results (checked against the scores), required for forfeits.
    #[serde(default)]
    pub winner: Option<TeamId>,
    #[serde(default)]
    pub forfeit: bool,
}

impl MatchReport {
    pub fn score(team_1_score: u32, team_2_score: u32) -> Self {
        Self {
            team_1_score,
            team_2_score,
            ..Self::default()
        }
    }

    /// The named team wins without playing; recorded as 0-0.
    pub fn forfeit(winner: TeamId) -> Self {
        Self {
            winner: Some(winner),
            forfeit: true,
            ..Self::default()
        }
    }

    pub fn with_winner(mut self, winner: TeamId) -> Self {
        self.winner = Some(winner);
        self
    }
}

/// What changed after a result was accepted.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ProgressionOutcome {
    /// A downstream match got both teams, or the knockout was generated.
    pub next_match_generated: bool,
    pub tournament_complete: bool,
    /// Matches that became playable because of this result.
    pub ready: Vec<MatchId>,
    /// Placements made for those matches.
    pub scheduled: Vec<ScheduledMatch>,
    /// Playable matches the scheduler could not place; they stay pending.
    pub unscheduled: Vec<MatchId>,
}

/// Move a scheduled match to in-progress.
pub fn start_match(tournament: &mut Tournament, match_id: MatchId) -> Result<(), TournamentError> {
    let m = tournament
        .bracket
        .get_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    match m.status {
        MatchStatus::Scheduled => {
            m.status = MatchStatus::InProgress;
            Ok(())
        }
        MatchStatus::InProgress => Err(TournamentError::AlreadyInProgress(match_id)),
        MatchStatus::Completed | MatchStatus::Cancelled => {
            Err(TournamentError::MatchAlreadyFinished(match_id))
        }
        MatchStatus::Pending if !m.is_playable() => Err(TournamentError::SlotsUnresolved(match_id)),
        MatchStatus::Pending => Err(TournamentError::NotScheduled(match_id)),
    }
}

/// Accept a result for a scheduled or in-progress match and propagate it.
///
/// Rejections leave the tournament untouched. On success the match is completed, both
/// teams' statistics change exactly once, the winner (and, in the winners bracket of a
/// double elimination, the loser) move on, newly playable matches are handed to the
/// scheduler, and completion is checked.
pub fn report_result(
    tournament: &mut Tournament,
    match_id: MatchId,
    report: MatchReport,
) -> Result<ProgressionOutcome, TournamentError> {
    let m = tournament
        .bracket
        .get(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    let (winner, score_1, score_2) = validate_report(m, report)?;

    let mut staged = tournament.clone();
    let mut outcome = ProgressionOutcome::default();

    let (loser, winner_side) = {
        let m = staged
            .bracket
            .get_mut(match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        m.team_1_score = Some(score_1);
        m.team_2_score = Some(score_2);
        m.winner = Some(winner);
        m.forfeit = report.forfeit;
        m.status = MatchStatus::Completed;
        let loser = m.loser().ok_or(TournamentError::WinnerMismatch)?;
        (loser, m.side_of(winner).unwrap_or(Side::One))
    };

    let (winner_points, loser_points) = match winner_side {
        Side::One => (score_1, score_2),
        Side::Two => (score_2, score_1),
    };
    staged
        .stats_for_mut(winner)
        .ok_or(TournamentError::TeamNotFound(winner))?
        .add_win(winner_points, loser_points);
    staged
        .stats_for_mut(loser)
        .ok_or(TournamentError::TeamNotFound(loser))?
        .add_loss(loser_points, winner_points);
    log::debug!("match {}: {} beat {} {}-{}", match_id, winner, loser, winner_points, loser_points);

    outcome.ready = advance(&mut staged.bracket, match_id);

    if let Some(gf) = staged.bracket.grand_finals.filter(|gf| gf.first == match_id) {
        outcome.ready.extend(decide_reset(&mut staged.bracket, gf.first, gf.reset, winner_side));
    }

    if staged.state == TournamentState::GroupStage && group_phase_complete(&staged) {
        generate_knockout(&mut staged)?;
        staged.state = TournamentState::InProgress;
        outcome.next_match_generated = true;
        outcome.ready.extend(staged.ready_matches());
    }
    outcome.ready.sort_unstable();
    outcome.ready.dedup();
    outcome.next_match_generated |= !outcome.ready.is_empty();

    let (scheduled, unscheduled) = place_matches(&mut staged, &outcome.ready);
    outcome.scheduled = scheduled;
    outcome.unscheduled = unscheduled;

    if is_complete(&staged) {
        finalize(&mut staged);
        outcome.tournament_complete = true;
    }

    *tournament = staged;
    Ok(outcome)
}

/// Check the match accepts a result and work out the winner and the recorded score line.
fn validate_report(m: &GameMatch, report: MatchReport) -> Result<(TeamId, u32, u32), TournamentError> {
    match m.status {
        MatchStatus::Completed | MatchStatus::Cancelled => {
            return Err(TournamentError::MatchAlreadyFinished(m.id))
        }
        _ if !m.is_playable() => return Err(TournamentError::SlotsUnresolved(m.id)),
        MatchStatus::Pending => return Err(TournamentError::NotScheduled(m.id)),
        MatchStatus::Scheduled | MatchStatus::InProgress => {}
    }

    if report.forfeit {
        let winner = report.winner.ok_or(TournamentError::ForfeitWithoutWinner)?;
        if !m.involves(winner) {
            return Err(TournamentError::WinnerMismatch);
        }
        return Ok((winner, 0, 0));
    }

    let side = match report.team_1_score.cmp(&report.team_2_score) {
        std::cmp::Ordering::Equal => return Err(TournamentError::TiedScore),
        std::cmp::Ordering::Greater => Side::One,
        std::cmp::Ordering::Less => Side::Two,
    };
    let winner = m.slot(side).team().ok_or(TournamentError::SlotsUnresolved(m.id))?;
    if report.winner.is_some_and(|w| w != winner) {
        return Err(TournamentError::WinnerMismatch);
    }
    Ok((winner, report.team_1_score, report.team_2_score))
}

/// Push the result of a decided match along its winner/loser edges, settling any byes
/// reached on the way. Returns matches that became playable.
pub(crate) fn advance(bracket: &mut Bracket, from: MatchId) -> Vec<MatchId> {
    let mut ready = Vec::new();
    let mut queue = VecDeque::from([from]);
    while let Some(id) = queue.pop_front() {
        let Some(m) = bracket.get(id) else { continue };
        let (winner_slot, loser_slot) = match m.status {
            MatchStatus::Completed => (
                m.winner.map_or(Slot::Bye, Slot::Team),
                m.loser().map_or(Slot::Bye, Slot::Team),
            ),
            MatchStatus::Cancelled => (Slot::Bye, Slot::Bye),
            _ => continue,
        };
        let edges = [(m.winner_to, winner_slot), (m.loser_to, loser_slot)];

        for (link, slot) in edges {
            let Some(link) = link else { continue };
            let Some(target) = bracket.get_mut(link.match_id) else { continue };
            if target.status.is_terminal() || !target.slot(link.side).is_open() {
                continue;
            }
            *target.slot_mut(link.side) = slot;
            if !target.slots_resolved() {
                continue;
            }
            if target.is_playable() {
                ready.push(target.id);
            } else {
                resolve_bye(target);
                queue.push_back(target.id);
            }
        }
    }
    ready
}

/// Auto-decide a match with a bye: the present team wins 0-0, two byes cancel the match.
fn resolve_bye(m: &mut GameMatch) {
    match (m.team_1.team(), m.team_2.team()) {
        (Some(team), None) | (None, Some(team)) => {
            m.winner = Some(team);
            m.team_1_score = Some(0);
            m.team_2_score = Some(0);
            m.status = MatchStatus::Completed;
            log::debug!("match {}: bye for {}", m.id, team);
        }
        _ => {
            m.status = MatchStatus::Cancelled;
            log::debug!("match {}: double bye, cancelled", m.id);
        }
    }
}

/// Auto-complete every pending match that has a bye and both slots resolved, cascading
/// downstream. Returns matches that became playable.
pub fn settle_byes(bracket: &mut Bracket) -> Vec<MatchId> {
    let mut ready = Vec::new();
    for index in 0..bracket.len() {
        let id = index as MatchId;
        let Some(m) = bracket.get_mut(id) else { continue };
        if m.status != MatchStatus::Pending || !m.slots_resolved() || m.is_playable() {
            continue;
        }
        resolve_bye(m);
        ready.extend(advance(bracket, id));
    }
    ready
}

/// After grand finals game 1: fill the reset match when the losers-bracket champion
/// (team_2) won, cancel it otherwise.
fn decide_reset(bracket: &mut Bracket, first: MatchId, reset: MatchId, winner_side: Side) -> Vec<MatchId> {
    let Some((team_1, team_2)) = bracket.get(first).map(|m| (m.team_1, m.team_2)) else {
        return Vec::new();
    };
    let Some(reset_match) = bracket.get_mut(reset) else {
        return Vec::new();
    };
    match winner_side {
        Side::Two => {
            reset_match.team_1 = team_1;
            reset_match.team_2 = team_2;
            reset_match.parents = vec![first];
            log::info!("grand finals reset: match {} activated", reset);
            vec![reset]
        }
        Side::One => {
            reset_match.status = MatchStatus::Cancelled;
            Vec::new()
        }
    }
}

/// All matches decided, and for group stage the knockout has been played too.
fn is_complete(tournament: &Tournament) -> bool {
    tournament.state != TournamentState::Completed
        && tournament.all_matches_decided()
        && (tournament.format != TournamentFormat::GroupStage || tournament.has_knockout())
}

/// Rank every team and record final positions.
fn finalize(tournament: &mut Tournament) {
    let completed: Vec<GameMatch> = tournament.bracket.completed().cloned().collect();
    for ranked in rank(&tournament.stats, &completed) {
        if let Some(stats) = tournament.stats_for_mut(ranked.team_id) {
            stats.final_position = Some(ranked.position);
        }
    }
    tournament.state = TournamentState::Completed;
    log::info!("tournament {} complete", tournament.id);
}
