//! Round robin (circle method): every team meets every other team exactly once.

use crate::logic::seeding::by_seed;
use crate::models::{Bracket, GroupId, MatchId, Segment, Slot, Team, TeamId, TournamentError};

pub const MIN_TEAMS: usize = 4;

/// Generate a standalone round robin.
pub fn generate_round_robin(teams: &[Team]) -> Result<Bracket, TournamentError> {
    if teams.len() < MIN_TEAMS {
        return Err(TournamentError::NotEnoughTeams {
            required: MIN_TEAMS,
            actual: teams.len(),
        });
    }
    let mut bracket = Bracket::new();
    append_round_robin(&mut bracket, teams, Segment::Group, None);
    Ok(bracket)
}

/// Pairings per round for the given participants, in seed order.
///
/// An odd field gets a bye participant; the first participant stays fixed and the rest
/// rotate one step per round. Position 0 plays the last position, then inward.
pub fn circle_rounds(team_ids: &[TeamId]) -> Vec<Vec<(TeamId, TeamId)>> {
    let mut participants: Vec<Option<TeamId>> = team_ids.iter().copied().map(Some).collect();
    if participants.len() % 2 == 1 {
        participants.push(None);
    }
    let n = participants.len();
    if n < 2 {
        return Vec::new();
    }

    let mut rounds = Vec::with_capacity(n - 1);
    for _ in 0..n - 1 {
        let pairs: Vec<(TeamId, TeamId)> = (0..n / 2)
            .filter_map(|i| match (participants[i], participants[n - 1 - i]) {
                (Some(a), Some(b)) => Some((a, b)),
                _ => None,
            })
            .collect();
        rounds.push(pairs);
        participants[1..].rotate_right(1);
    }
    rounds
}

/// Append one full round robin among `teams` to `bracket`, tagged with `segment` and `group`.
pub(crate) fn append_round_robin(
    bracket: &mut Bracket,
    teams: &[Team],
    segment: Segment,
    group: Option<GroupId>,
) -> Vec<MatchId> {
    let ids: Vec<TeamId> = by_seed(teams).iter().map(|t| t.id).collect();
    let mut created = Vec::new();
    for (r, pairs) in circle_rounds(&ids).into_iter().enumerate() {
        for (g, (a, b)) in pairs.into_iter().enumerate() {
            let id = bracket.push(segment, r as u32 + 1, g as u32 + 1);
            if let Some(m) = bracket.get_mut(id) {
                m.team_1 = Slot::Team(a);
                m.team_2 = Slot::Team(b);
                m.group = group;
            }
            created.push(id);
        }
    }
    log::debug!(
        "built round robin for {} teams (group {:?}): {} matches",
        teams.len(),
        group,
        created.len()
    );
    created
}
