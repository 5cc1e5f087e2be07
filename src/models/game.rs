//! Match (game) node of the bracket graph: slots, segment, status and result.

use crate::models::team::TeamId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Index of a match inside its tournament's [`Bracket`](crate::models::Bracket).
pub type MatchId = u32;

/// 1-based group number for group-stage matches.
pub type GroupId = u32;

/// One side of a match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    One,
    Two,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

/// Occupant of a team slot.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "team_id")]
pub enum Slot {
    /// Not decided yet; filled later by an upstream result.
    #[default]
    Open,
    Team(TeamId),
    /// Intentional walkover: the opponent advances without playing.
    Bye,
}

impl Slot {
    pub fn team(self) -> Option<TeamId> {
        match self {
            Slot::Team(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_open(self) -> bool {
        self == Slot::Open
    }
}

/// Which sub-structure of the tournament a match belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Winners,
    Losers,
    Finals,
    Group,
    Knockout,
}

impl Segment {
    /// Ordering used when several ready matches share a round.
    pub fn priority(self) -> u8 {
        match self {
            Segment::Group => 0,
            Segment::Winners | Segment::Knockout => 1,
            Segment::Losers => 2,
            Segment::Finals => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// At least one slot unresolved, or resolved but not yet placed on a court.
    #[default]
    Pending,
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl MatchStatus {
    /// Completed and cancelled matches never change again.
    pub fn is_terminal(self) -> bool {
        matches!(self, MatchStatus::Completed | MatchStatus::Cancelled)
    }
}

/// Forward edge: the match and slot a team moves into.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub match_id: MatchId,
    pub side: Side,
}

/// A single match in the bracket graph.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub team_1: Slot,
    pub team_2: Slot,
    pub round: u32,
    /// 1-based position within its round and segment.
    pub game: u32,
    pub segment: Segment,
    pub group: Option<GroupId>,
    /// Upstream matches feeding team_1 then team_2 (0 to 2 entries).
    pub parents: Vec<MatchId>,
    /// Where the winner goes.
    pub winner_to: Option<Link>,
    /// Where the loser goes (winners bracket of double elimination only).
    pub loser_to: Option<Link>,
    pub status: MatchStatus,
    pub scheduled_time: Option<NaiveDateTime>,
    /// 1-based court number.
    pub court: Option<u32>,
    pub team_1_score: Option<u32>,
    pub team_2_score: Option<u32>,
    pub winner: Option<TeamId>,
    pub forfeit: bool,
}

impl GameMatch {
    pub fn new(id: MatchId, segment: Segment, round: u32, game: u32) -> Self {
        Self {
            id,
            team_1: Slot::Open,
            team_2: Slot::Open,
            round,
            game,
            segment,
            group: None,
            parents: Vec::new(),
            winner_to: None,
            loser_to: None,
            status: MatchStatus::Pending,
            scheduled_time: None,
            court: None,
            team_1_score: None,
            team_2_score: None,
            winner: None,
            forfeit: false,
        }
    }

    pub fn slot(&self, side: Side) -> Slot {
        match side {
            Side::One => self.team_1,
            Side::Two => self.team_2,
        }
    }

    pub fn slot_mut(&mut self, side: Side) -> &mut Slot {
        match side {
            Side::One => &mut self.team_1,
            Side::Two => &mut self.team_2,
        }
    }

    /// Both slots hold something other than `Open`.
    pub fn slots_resolved(&self) -> bool {
        !self.team_1.is_open() && !self.team_2.is_open()
    }

    /// Both slots hold real teams, so the match needs a court.
    pub fn is_playable(&self) -> bool {
        self.team_1.team().is_some() && self.team_2.team().is_some()
    }

    /// Playable and still waiting for a time and court.
    pub fn is_ready(&self) -> bool {
        self.status == MatchStatus::Pending && self.is_playable()
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.team_1.team() == Some(team) || self.team_2.team() == Some(team)
    }

    /// Side the given team occupies, if any.
    pub fn side_of(&self, team: TeamId) -> Option<Side> {
        if self.team_1.team() == Some(team) {
            Some(Side::One)
        } else if self.team_2.team() == Some(team) {
            Some(Side::Two)
        } else {
            None
        }
    }

    /// The team that lost, once the match is completed.
    pub fn loser(&self) -> Option<TeamId> {
        let winner = self.winner?;
        match self.side_of(winner)? {
            Side::One => self.team_2.team(),
            Side::Two => self.team_1.team(),
        }
    }

    /// Ordering key used by the scheduler: round, segment priority, game number.
    pub fn schedule_key(&self) -> (u32, u8, u32, MatchId) {
        (self.round, self.segment.priority(), self.game, self.id)
    }
}
