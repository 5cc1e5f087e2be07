//! Tournament engine logic: bracket generators, scheduler, progression, standings.

mod double_elimination;
mod group_stage;
mod progression;
mod round_robin;
mod scheduler;
pub mod seeding;
mod setup;
mod single_elimination;
mod standings;

pub use double_elimination::generate_double_elimination;
pub use group_stage::{
    advancing_for, generate_group_stage, generate_knockout, group_count, group_phase_complete,
    snake_draft,
};
pub use progression::{report_result, settle_byes, start_match, MatchReport, ProgressionOutcome};
pub use round_robin::{circle_rounds, generate_round_robin};
pub use scheduler::TimeScheduler;
pub use setup::{
    create_tournament, generate_bracket, schedule_matches, schedule_ready_matches,
    update_schedule_config,
};
pub use single_elimination::generate_single_elimination;
pub use standings::{get_standings, rank, tally, RankedTeam, StandingsScope};
