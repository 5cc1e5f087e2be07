//! Tournament, TournamentState and TournamentError.

use crate::logic::TimeScheduler;
use crate::models::bracket::Bracket;
use crate::models::game::{GameMatch, GroupId, MatchId, MatchStatus, Segment};
use crate::models::team::{Team, TeamId, TeamStats};
use serde::{Deserialize, Serialize};

/// Broad class of a failure, for callers that only care how to recover.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Bad teams, options or result submission. Fix the input and retry.
    InvalidInput,
    /// No slot satisfies the calendar/court/rest constraints. Adjust config and retry.
    SchedulingInfeasible,
    /// The match is not in a state that accepts the operation.
    InvalidTransition,
}

/// Errors that can occur during tournament operations. None of them leave partial state behind.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Too few teams for the chosen format.
    NotEnoughTeams { required: usize, actual: usize },
    /// The same team id appears twice.
    DuplicateTeam(TeamId),
    /// Two teams share a name (names are unique, case-insensitive).
    DuplicateTeamName(String),
    /// Seeds must be exactly 1..=n.
    InvalidSeeds,
    /// Format options that cannot be satisfied.
    InvalidOptions(String),
    /// Schedule configuration rejected by validation.
    InvalidConfig(String),
    /// Roster file could not be read.
    InvalidRoster(String),
    MatchNotFound(MatchId),
    TeamNotFound(TeamId),
    GroupNotFound(GroupId),
    /// Both scores equal; every match needs a winner.
    TiedScore,
    /// The supplied winner is not a participant or disagrees with the scores.
    WinnerMismatch,
    /// A forfeit was reported without naming the winner.
    ForfeitWithoutWinner,
    /// Generated graph violates the bracket invariants.
    BrokenBracket(String),
    /// No court/time slot could be found for a match.
    SchedulingInfeasible { match_id: MatchId, reason: String },
    /// The match is finished or cancelled.
    MatchAlreadyFinished(MatchId),
    /// One or both team slots are not decided yet.
    SlotsUnresolved(MatchId),
    /// The match has not been given a time and court yet.
    NotScheduled(MatchId),
    /// The match has already been started.
    AlreadyInProgress(MatchId),
    /// Knockout requested while group matches are still open.
    GroupStageIncomplete,
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        use TournamentError::*;
        match self {
            SchedulingInfeasible { .. } => ErrorKind::SchedulingInfeasible,
            MatchAlreadyFinished(_)
            | SlotsUnresolved(_)
            | NotScheduled(_)
            | AlreadyInProgress(_)
            | GroupStageIncomplete => ErrorKind::InvalidTransition,
            _ => ErrorKind::InvalidInput,
        }
    }
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NotEnoughTeams { required, actual } => {
                write!(f, "Need at least {} teams (got {})", required, actual)
            }
            TournamentError::DuplicateTeam(id) => write!(f, "Team {} appears more than once", id),
            TournamentError::DuplicateTeamName(name) => {
                write!(f, "A team named {:?} already exists", name)
            }
            TournamentError::InvalidSeeds => write!(f, "Seeds must be exactly 1..=n"),
            TournamentError::InvalidOptions(msg) => write!(f, "Invalid bracket options: {}", msg),
            TournamentError::InvalidConfig(msg) => write!(f, "Invalid schedule config: {}", msg),
            TournamentError::InvalidRoster(msg) => write!(f, "Invalid roster: {}", msg),
            TournamentError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            TournamentError::TeamNotFound(id) => write!(f, "Team {} not found", id),
            TournamentError::GroupNotFound(id) => write!(f, "Group {} not found", id),
            TournamentError::TiedScore => write!(f, "Scores are tied; a match must have a winner"),
            TournamentError::WinnerMismatch => {
                write!(f, "Reported winner does not match the scores or the participants")
            }
            TournamentError::ForfeitWithoutWinner => write!(f, "A forfeit must name the winner"),
            TournamentError::BrokenBracket(msg) => write!(f, "Bracket integrity violated: {}", msg),
            TournamentError::SchedulingInfeasible { match_id, reason } => {
                write!(f, "Cannot schedule match {}: {}", match_id, reason)
            }
            TournamentError::MatchAlreadyFinished(id) => {
                write!(f, "Match {} is already completed or cancelled", id)
            }
            TournamentError::SlotsUnresolved(id) => {
                write!(f, "Match {} does not have both teams yet", id)
            }
            TournamentError::NotScheduled(id) => write!(f, "Match {} has not been scheduled", id),
            TournamentError::AlreadyInProgress(id) => write!(f, "Match {} is already in progress", id),
            TournamentError::GroupStageIncomplete => {
                write!(f, "Group stage still has matches to play")
            }
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = uuid::Uuid;

/// Bracket format chosen at creation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    SingleElimination,
    DoubleElimination,
    RoundRobin,
    /// Round-robin groups, then a single-elimination knockout.
    GroupStage,
}

impl std::str::FromStr for TournamentFormat {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "single_elimination" | "single" => Ok(TournamentFormat::SingleElimination),
            "double_elimination" | "double" => Ok(TournamentFormat::DoubleElimination),
            "round_robin" => Ok(TournamentFormat::RoundRobin),
            "group_stage" | "groups" => Ok(TournamentFormat::GroupStage),
            other => Err(TournamentError::InvalidOptions(format!("unknown format {:?}", other))),
        }
    }
}

/// Format-specific options.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketOptions {
    /// Teams advancing from each group. Default: 2, or 3 for groups of 6 or more.
    #[serde(default)]
    pub advancing_per_group: Option<usize>,
}

/// A group of the group stage.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    /// Members in draw order.
    pub team_ids: Vec<TeamId>,
}

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Group matches being played; knockout not generated yet.
    GroupStage,
    /// Bracket (or knockout) matches being played.
    #[default]
    InProgress,
    /// All matches decided; final positions assigned.
    Completed,
}

/// Full tournament state: teams, statistics, match graph and scheduler clocks.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub format: TournamentFormat,
    pub options: BracketOptions,
    pub teams: Vec<Team>,
    pub stats: Vec<TeamStats>,
    pub bracket: Bracket,
    /// Empty unless the format is `GroupStage`.
    pub groups: Vec<Group>,
    pub scheduler: TimeScheduler,
    pub state: TournamentState,
}

impl Tournament {
    /// Immutable copy for concurrent readers.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn stats_for(&self, id: TeamId) -> Option<&TeamStats> {
        self.stats.iter().find(|s| s.team_id == id)
    }

    pub fn stats_for_mut(&mut self, id: TeamId) -> Option<&mut TeamStats> {
        self.stats.iter_mut().find(|s| s.team_id == id)
    }

    pub fn get_match(&self, id: MatchId) -> Option<&GameMatch> {
        self.bracket.get(id)
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Whether the knockout bracket of a group-stage tournament has been generated.
    pub fn has_knockout(&self) -> bool {
        self.bracket.segment(Segment::Knockout).next().is_some()
            || self.bracket.segment(Segment::Finals).next().is_some()
    }

    /// Every match is completed or cancelled.
    pub fn all_matches_decided(&self) -> bool {
        self.bracket.iter().all(|m| m.status.is_terminal())
    }

    /// Matches currently waiting for a court (both teams known, no time yet).
    pub fn ready_matches(&self) -> Vec<MatchId> {
        self.bracket
            .iter()
            .filter(|m| m.is_ready())
            .map(|m| m.id)
            .collect()
    }

    /// Matches with a time and court that have not finished.
    pub fn upcoming_matches(&self) -> Vec<&GameMatch> {
        let mut upcoming: Vec<_> = self
            .bracket
            .iter()
            .filter(|m| matches!(m.status, MatchStatus::Scheduled | MatchStatus::InProgress))
            .collect();
        upcoming.sort_by_key(|m| (m.scheduled_time, m.court));
        upcoming
    }
}
