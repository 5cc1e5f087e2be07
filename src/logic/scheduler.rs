//! Time/court assignment: greedy single pass over ready matches with per-court and
//! per-team clocks that only move forward.

use crate::models::{
    GameMatch, MatchId, ScheduleConfig, ScheduledMatch, TeamId, TournamentError,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stateful scheduler for one tournament. Clocks persist across calls so matches
/// resolved later are placed after everything already on the calendar.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimeScheduler {
    config: ScheduleConfig,
    days: Vec<NaiveDate>,
    /// Next free instant per court (index 0 is court 1).
    court_clocks: Vec<NaiveDateTime>,
    /// Next instant each team may start another match.
    team_clocks: HashMap<TeamId, NaiveDateTime>,
    /// Date of each team's latest scheduled match.
    last_played: HashMap<TeamId, NaiveDate>,
}

impl TimeScheduler {
    pub fn new(config: ScheduleConfig) -> Result<Self, TournamentError> {
        config.validate()?;
        let days = config.playing_days();
        let opening = days[0].and_time(config.daily_start_time);
        Ok(Self {
            court_clocks: vec![opening; config.number_of_courts as usize],
            days,
            config,
            team_clocks: HashMap::new(),
            last_played: HashMap::new(),
        })
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Start of the first playing day.
    pub fn opening(&self) -> NaiveDateTime {
        self.days[0].and_time(self.config.daily_start_time)
    }

    /// Next instant the team is free (the opening if it has not played yet).
    pub fn team_available_at(&self, team: TeamId) -> NaiveDateTime {
        self.team_clocks
            .get(&team)
            .copied()
            .unwrap_or_else(|| self.opening())
    }

    /// Replace the configuration for future placements. Existing clocks are kept;
    /// courts added by the new config open at the current earliest court clock.
    pub fn update_config(&mut self, config: ScheduleConfig) -> Result<(), TournamentError> {
        config.validate()?;
        let days = config.playing_days();
        let opening = days[0].and_time(config.daily_start_time);
        let floor = self
            .court_clocks
            .iter()
            .min()
            .copied()
            .unwrap_or(opening)
            .max(opening);
        let mut clocks: Vec<NaiveDateTime> = self
            .court_clocks
            .iter()
            .map(|c| (*c).max(opening))
            .take(config.number_of_courts as usize)
            .collect();
        clocks.resize(config.number_of_courts as usize, floor);

        self.court_clocks = clocks;
        self.days = days;
        self.config = config;
        Ok(())
    }

    /// Place matches in the given order. Nothing is committed unless every match fits.
    pub fn schedule_matches(
        &mut self,
        matches: &[&GameMatch],
    ) -> Result<Vec<ScheduledMatch>, TournamentError> {
        let mut staged = self.clone();
        let mut placed = Vec::with_capacity(matches.len());
        for m in matches {
            let (Some(t1), Some(t2)) = (m.team_1.team(), m.team_2.team()) else {
                return Err(TournamentError::SlotsUnresolved(m.id));
            };
            placed.push(staged.place(m.id, [t1, t2])?);
        }
        *self = staged;
        Ok(placed)
    }

    /// Earliest court and start for one match, then advance the clocks.
    fn place(&mut self, match_id: MatchId, teams: [TeamId; 2]) -> Result<ScheduledMatch, TournamentError> {
        let earliest_team = teams
            .iter()
            .map(|t| self.team_available_at(*t))
            .max()
            .unwrap_or_else(|| self.opening());

        // Each court tries each day at most once, so rejections are bounded by courts * days.
        let mut attempts = 0;
        let mut best: Option<(NaiveDateTime, usize)> = None;
        for court in 0..self.court_clocks.len() {
            let from = self.court_clocks[court].max(earliest_team);
            let Some(start) = self.first_fit(from, &teams, &mut attempts) else {
                continue;
            };
            if best.map_or(true, |(s, _)| start < s) {
                best = Some((start, court));
            }
        }

        let Some((start, court)) = best else {
            return Err(TournamentError::SchedulingInfeasible {
                match_id,
                reason: if attempts > 0 {
                    format!(
                        "no day within the window satisfies {} rest day(s) ({} placements refused)",
                        self.config.rest_days_between_matches, attempts
                    )
                } else {
                    "no free court slot within the configured days".to_string()
                },
            });
        };

        let end = start + self.config.game_duration();
        let free_at = end + self.config.break_duration();
        self.court_clocks[court] = free_at;
        for team in teams {
            self.team_clocks.insert(team, free_at);
            self.last_played.insert(team, start.date());
        }
        log::debug!("match {} placed on court {} at {}", match_id, court + 1, start);
        Ok(ScheduledMatch {
            match_id,
            start,
            end,
            court: court as u32 + 1,
        })
    }

    /// First start at or after `from` that fits inside a playing day and respects rest days.
    fn first_fit(&self, from: NaiveDateTime, teams: &[TeamId; 2], attempts: &mut usize) -> Option<NaiveDateTime> {
        let duration = self.config.game_duration();
        for day in self.days.iter().filter(|d| **d >= from.date()) {
            let day_start = day.and_time(self.config.daily_start_time);
            let day_end = day.and_time(self.config.daily_end_time);
            let start = from.max(day_start);
            if start + duration > day_end {
                continue;
            }
            if !self.rested(teams, *day) {
                *attempts += 1;
                continue;
            }
            return Some(start);
        }
        None
    }

    fn rested(&self, teams: &[TeamId; 2], day: NaiveDate) -> bool {
        let rest = i64::from(self.config.rest_days_between_matches);
        teams.iter().all(|t| match self.last_played.get(t) {
            Some(last) => (day - *last).num_days() >= rest,
            None => true,
        })
    }
}
