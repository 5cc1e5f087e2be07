//! Bracket: arena of matches keyed by `MatchId`, plus the forward wiring between them.

use crate::models::game::{GameMatch, Link, MatchId, MatchStatus, Segment, Side, Slot};
use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The two grand-finals matches of a double-elimination bracket.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GrandFinals {
    /// Winners-bracket champion (team_1) vs losers-bracket champion (team_2).
    pub first: MatchId,
    /// Only played when the losers-bracket champion wins `first`.
    pub reset: MatchId,
}

/// All matches of a tournament. A match's id is its index in `matches`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub matches: Vec<GameMatch>,
    pub grand_finals: Option<GrandFinals>,
}

impl Bracket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new empty match and return its id.
    pub fn push(&mut self, segment: Segment, round: u32, game: u32) -> MatchId {
        let id = self.matches.len() as MatchId;
        self.matches.push(GameMatch::new(id, segment, round, game));
        id
    }

    pub fn get(&self, id: MatchId) -> Option<&GameMatch> {
        self.matches.get(id as usize)
    }

    pub fn get_mut(&mut self, id: MatchId) -> Option<&mut GameMatch> {
        self.matches.get_mut(id as usize)
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameMatch> {
        self.matches.iter()
    }

    /// Wire `from`'s winner into `to`'s slot `side`.
    pub fn link_winner(&mut self, from: MatchId, to: MatchId, side: Side) {
        if let Some(m) = self.get_mut(from) {
            m.winner_to = Some(Link { match_id: to, side });
        }
        self.add_parent(to, from, side);
    }

    /// Wire `from`'s loser into `to`'s slot `side`.
    pub fn link_loser(&mut self, from: MatchId, to: MatchId, side: Side) {
        if let Some(m) = self.get_mut(from) {
            m.loser_to = Some(Link { match_id: to, side });
        }
        self.add_parent(to, from, side);
    }

    fn add_parent(&mut self, to: MatchId, from: MatchId, side: Side) {
        if let Some(m) = self.get_mut(to) {
            match side {
                Side::One => m.parents.insert(0, from),
                Side::Two => m.parents.push(from),
            }
        }
    }

    /// Matches in one segment, in id order.
    pub fn segment(&self, segment: Segment) -> impl Iterator<Item = &GameMatch> {
        self.matches.iter().filter(move |m| m.segment == segment)
    }

    /// Highest round number among matches of the given segment, or 0.
    pub fn max_round(&self, segment: Segment) -> u32 {
        self.segment(segment).map(|m| m.round).max().unwrap_or(0)
    }

    pub fn completed(&self) -> impl Iterator<Item = &GameMatch> {
        self.matches
            .iter()
            .filter(|m| m.status == MatchStatus::Completed)
    }

    pub fn is_reset_match(&self, id: MatchId) -> bool {
        self.grand_finals.is_some_and(|gf| gf.reset == id)
    }

    /// Verify the graph invariants: edges point at existing, later matches; each slot has
    /// at most one feeder; every open slot is fed by something (the reset match excepted).
    pub fn check_integrity(&self) -> Result<(), TournamentError> {
        let mut fed: HashSet<(MatchId, Side)> = HashSet::new();
        for (index, m) in self.matches.iter().enumerate() {
            if m.id as usize != index {
                return Err(TournamentError::BrokenBracket(format!(
                    "match at index {} carries id {}",
                    index, m.id
                )));
            }
            let mut outgoing = 0;
            for link in [m.winner_to, m.loser_to].into_iter().flatten() {
                outgoing += 1;
                if link.match_id <= m.id || self.get(link.match_id).is_none() {
                    return Err(TournamentError::BrokenBracket(format!(
                        "match {} links to match {}",
                        m.id, link.match_id
                    )));
                }
                if !fed.insert((link.match_id, link.side)) {
                    return Err(TournamentError::BrokenBracket(format!(
                        "match {} slot {:?} has two feeders",
                        link.match_id, link.side
                    )));
                }
            }
            if outgoing > 2 || m.parents.len() > 2 {
                return Err(TournamentError::BrokenBracket(format!(
                    "match {} exceeds fan-in/fan-out of two",
                    m.id
                )));
            }
        }
        for m in &self.matches {
            if self.is_reset_match(m.id) || m.status.is_terminal() {
                continue;
            }
            for side in [Side::One, Side::Two] {
                if m.slot(side) == Slot::Open && !fed.contains(&(m.id, side)) {
                    return Err(TournamentError::BrokenBracket(format!(
                        "match {} slot {:?} can never be filled",
                        m.id, side
                    )));
                }
            }
        }
        Ok(())
    }
}
