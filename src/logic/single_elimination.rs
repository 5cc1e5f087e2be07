//! Single-elimination bracket generation (also used for the double-elimination winners
//! bracket and the group-stage knockout).

use crate::logic::seeding::{bracket_size, pairings};
use crate::models::{Bracket, MatchId, Segment, Side, Slot, Team, TournamentError};

pub const MIN_TEAMS: usize = 4;

/// Round-by-round match ids of an elimination tree, first round first.
pub(crate) type Rounds = Vec<Vec<MatchId>>;

/// Generate a standalone single-elimination bracket. The last round is tagged `Finals`.
pub fn generate_single_elimination(teams: &[Team]) -> Result<Bracket, TournamentError> {
    if teams.len() < MIN_TEAMS {
        return Err(TournamentError::NotEnoughTeams {
            required: MIN_TEAMS,
            actual: teams.len(),
        });
    }
    let mut bracket = Bracket::new();
    build_tree(&mut bracket, teams, Segment::Winners, Some(Segment::Finals), 0);
    Ok(bracket)
}

/// Append an elimination tree to `bracket`.
///
/// `rounds = log2(bracket_size)`; round 1 comes from the seed pairings, match `i` of
/// round `r` is fed by matches `2i` and `2i+1` of round `r-1`. Rounds are numbered from
/// `round_offset + 1`. When `final_segment` is set the last round uses it instead of `segment`.
pub(crate) fn build_tree(
    bracket: &mut Bracket,
    teams: &[Team],
    segment: Segment,
    final_segment: Option<Segment>,
    round_offset: u32,
) -> Rounds {
    let size = bracket_size(teams.len());
    let total_rounds = size.trailing_zeros();
    let segment_for = |round: u32| match final_segment {
        Some(last) if round == total_rounds => last,
        _ => segment,
    };

    let mut rounds: Rounds = Vec::with_capacity(total_rounds as usize);

    let first: Vec<MatchId> = pairings(teams, size)
        .into_iter()
        .enumerate()
        .map(|(i, (a, b))| {
            let id = bracket.push(segment_for(1), round_offset + 1, i as u32 + 1);
            if let Some(m) = bracket.get_mut(id) {
                m.team_1 = a.map_or(Slot::Bye, Slot::Team);
                m.team_2 = b.map_or(Slot::Bye, Slot::Team);
            }
            id
        })
        .collect();
    rounds.push(first);

    for round in 2..=total_rounds {
        let previous = rounds[rounds.len() - 1].clone();
        let current: Vec<MatchId> = previous
            .chunks(2)
            .enumerate()
            .map(|(i, feeders)| {
                let id = bracket.push(segment_for(round), round_offset + round, i as u32 + 1);
                bracket.link_winner(feeders[0], id, Side::One);
                bracket.link_winner(feeders[1], id, Side::Two);
                id
            })
            .collect();
        rounds.push(current);
    }

    log::debug!(
        "built {:?} tree: {} teams, bracket size {}, {} rounds",
        segment,
        teams.len(),
        size,
        total_rounds
    );
    rounds
}
