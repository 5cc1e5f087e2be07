//! Double-elimination bracket generation: winners tree, losers bracket with dropdowns,
//! grand finals plus an optional bracket-reset match.

use crate::logic::single_elimination::{build_tree, MIN_TEAMS};
use crate::models::{Bracket, GrandFinals, MatchId, Segment, Side, Team, TournamentError};

/// Generate a double-elimination bracket.
///
/// For a bracket size of `2^k` the winners bracket has `k` rounds and `2^k - 1` matches,
/// the losers bracket `2k - 2` rounds and `2^k - 2` matches:
/// - losers round 1 pairs the losers of winners-round-1 matches `2i` and `2i+1`;
/// - losers round `2r - 2` (r >= 2) sets the previous losers winners against the losers of
///   winners round `r`, dropped in reverse order so early opponents do not meet again;
/// - the remaining odd losers rounds pair the previous round's winners.
pub fn generate_double_elimination(teams: &[Team]) -> Result<Bracket, TournamentError> {
    if teams.len() < MIN_TEAMS {
        return Err(TournamentError::NotEnoughTeams {
            required: MIN_TEAMS,
            actual: teams.len(),
        });
    }
    let mut bracket = Bracket::new();
    let winners = build_tree(&mut bracket, teams, Segment::Winners, None, 0);
    let winners_rounds = winners.len() as u32;

    let mut losers: Vec<Vec<MatchId>> = Vec::new();

    // Losers round 1: two winners-round-1 losers per match.
    let round_one: Vec<MatchId> = winners[0]
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| {
            let id = bracket.push(Segment::Losers, 1, i as u32 + 1);
            bracket.link_loser(pair[0], id, Side::One);
            bracket.link_loser(pair[1], id, Side::Two);
            id
        })
        .collect();
    losers.push(round_one);

    for r in 2..=winners_rounds as usize {
        if r >= 3 {
            let round = losers.len() as u32 + 1;
            let previous = losers[losers.len() - 1].clone();
            let pairing: Vec<MatchId> = previous
                .chunks(2)
                .enumerate()
                .map(|(i, pair)| {
                    let id = bracket.push(Segment::Losers, round, i as u32 + 1);
                    bracket.link_winner(pair[0], id, Side::One);
                    bracket.link_winner(pair[1], id, Side::Two);
                    id
                })
                .collect();
            losers.push(pairing);
        }

        let round = losers.len() as u32 + 1;
        let previous = losers[losers.len() - 1].clone();
        let dropping = &winners[r - 1];
        let dropdown: Vec<MatchId> = previous
            .iter()
            .enumerate()
            .map(|(j, &survivor)| {
                let id = bracket.push(Segment::Losers, round, j as u32 + 1);
                bracket.link_winner(survivor, id, Side::One);
                bracket.link_loser(dropping[dropping.len() - 1 - j], id, Side::Two);
                id
            })
            .collect();
        losers.push(dropdown);
    }

    let winners_final = winners[winners.len() - 1][0];
    let losers_final = losers[losers.len() - 1][0];
    let finals_round = 2 * winners_rounds - 1;

    let first = bracket.push(Segment::Finals, finals_round, 1);
    bracket.link_winner(winners_final, first, Side::One);
    bracket.link_winner(losers_final, first, Side::Two);
    let reset = bracket.push(Segment::Finals, finals_round + 1, 1);
    bracket.grand_finals = Some(GrandFinals { first, reset });

    log::debug!(
        "built double elimination: {} winners rounds, {} losers rounds, {} matches",
        winners_rounds,
        losers.len(),
        bracket.len()
    );
    Ok(bracket)
}
