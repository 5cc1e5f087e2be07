//! Data structures for the tournament engine: teams, matches, bracket graph, schedule config.

mod bracket;
mod game;
mod schedule;
mod team;
mod tournament;

pub use bracket::{Bracket, GrandFinals};
pub use game::{GameMatch, GroupId, Link, MatchId, MatchStatus, Segment, Side, Slot};
pub use schedule::{hh_mm, ScheduleConfig, ScheduledMatch};
pub use team::{Team, TeamId, TeamStats};
pub use tournament::{
    BracketOptions, ErrorKind, Group, Tournament, TournamentError, TournamentFormat,
    TournamentId, TournamentState,
};
