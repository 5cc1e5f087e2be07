//! Standings: the single ranking function shared by round robin, groups and final positions.

use crate::models::{
    GameMatch, GroupId, MatchStatus, Team, TeamId, TeamStats, Tournament, TournamentError,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A team with its position in a ranking.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RankedTeam {
    /// 1-based.
    pub position: u32,
    pub team_id: TeamId,
    pub stats: TeamStats,
}

/// What a standings query covers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandingsScope {
    Tournament,
    Group(GroupId),
}

/// Rank teams by the tiebreaker cascade:
/// 1. wins, descending;
/// 2. a two-way tie is settled by head-to-head if the teams met and one won more often;
/// 3. otherwise point differential, then points scored (both descending), then seed ascending.
pub fn rank(teams: &[TeamStats], completed: &[GameMatch]) -> Vec<RankedTeam> {
    let mut sorted: Vec<TeamStats> = teams.to_vec();
    sorted.sort_by(|a, b| b.wins.cmp(&a.wins).then_with(|| fallback(a, b)));

    let mut ordered: Vec<TeamStats> = Vec::with_capacity(sorted.len());
    let mut start = 0;
    while start < sorted.len() {
        let wins = sorted[start].wins;
        let end = sorted[start..]
            .iter()
            .position(|s| s.wins != wins)
            .map_or(sorted.len(), |offset| start + offset);
        let mut tied = sorted[start..end].to_vec();
        if tied.len() == 2 {
            match head_to_head(tied[0].team_id, tied[1].team_id, completed) {
                Ordering::Less => tied.swap(0, 1),
                Ordering::Greater => {}
                Ordering::Equal => tied.sort_by(fallback),
            }
        }
        ordered.extend(tied);
        start = end;
    }

    ordered
        .into_iter()
        .enumerate()
        .map(|(i, stats)| RankedTeam {
            position: i as u32 + 1,
            team_id: stats.team_id,
            stats,
        })
        .collect()
}

fn fallback(a: &TeamStats, b: &TeamStats) -> Ordering {
    b.point_differential()
        .cmp(&a.point_differential())
        .then(b.points_scored.cmp(&a.points_scored))
        .then(a.seed.cmp(&b.seed))
}

/// `Greater` when `a` beat `b` more often than the reverse.
fn head_to_head(a: TeamId, b: TeamId, completed: &[GameMatch]) -> Ordering {
    let (mut a_wins, mut b_wins) = (0u32, 0u32);
    for m in completed
        .iter()
        .filter(|m| m.status == MatchStatus::Completed && m.involves(a) && m.involves(b))
    {
        match m.winner {
            Some(w) if w == a => a_wins += 1,
            Some(w) if w == b => b_wins += 1,
            _ => {}
        }
    }
    a_wins.cmp(&b_wins)
}

/// Statistics for `teams` computed only from the given matches.
pub fn tally<'a>(teams: &[&Team], matches: impl IntoIterator<Item = &'a GameMatch>) -> Vec<TeamStats> {
    let mut stats: Vec<TeamStats> = teams.iter().map(|t| TeamStats::for_team(t)).collect();
    for m in matches
        .into_iter()
        .filter(|m| m.status == MatchStatus::Completed)
    {
        let (Some(t1), Some(t2), Some(winner)) = (m.team_1.team(), m.team_2.team(), m.winner)
        else {
            continue;
        };
        let s1 = m.team_1_score.unwrap_or(0);
        let s2 = m.team_2_score.unwrap_or(0);
        for (team, scored, allowed) in [(t1, s1, s2), (t2, s2, s1)] {
            if let Some(entry) = stats.iter_mut().find(|s| s.team_id == team) {
                if team == winner {
                    entry.add_win(scored, allowed);
                } else {
                    entry.add_loss(scored, allowed);
                }
            }
        }
    }
    stats
}

/// Read-only standings for the whole tournament or one group.
pub fn get_standings(
    tournament: &Tournament,
    scope: StandingsScope,
) -> Result<Vec<RankedTeam>, TournamentError> {
    match scope {
        StandingsScope::Tournament => {
            let completed: Vec<GameMatch> = tournament.bracket.completed().cloned().collect();
            Ok(rank(&tournament.stats, &completed))
        }
        StandingsScope::Group(id) => {
            let group = tournament.group(id).ok_or(TournamentError::GroupNotFound(id))?;
            Ok(group_standings(tournament, group.id, &group.team_ids))
        }
    }
}

/// Standings of one group, from that group's completed matches only.
pub(crate) fn group_standings(
    tournament: &Tournament,
    group: GroupId,
    team_ids: &[TeamId],
) -> Vec<RankedTeam> {
    let members: Vec<&Team> = team_ids
        .iter()
        .filter_map(|id| tournament.team(*id))
        .collect();
    let completed: Vec<GameMatch> = tournament
        .bracket
        .completed()
        .filter(|m| m.group == Some(group))
        .cloned()
        .collect();
    let stats = tally(&members, &completed);
    rank(&stats, &completed)
}
