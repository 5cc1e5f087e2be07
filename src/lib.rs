//! Tournament engine: bracket generation, court scheduling and result progression.

pub mod logic;
pub mod models;
pub mod roster;

pub use logic::{
    create_tournament, generate_bracket, get_standings, rank, report_result, schedule_matches,
    schedule_ready_matches, start_match, update_schedule_config, MatchReport, ProgressionOutcome,
    RankedTeam, StandingsScope, TimeScheduler,
};
pub use models::{
    Bracket, BracketOptions, ErrorKind, GameMatch, Group, GroupId, MatchId, MatchStatus,
    ScheduleConfig, ScheduledMatch, Segment, Side, Slot, Team, TeamId, TeamStats, Tournament,
    TournamentError, TournamentFormat, TournamentId, TournamentState,
};
pub use roster::load_roster;
