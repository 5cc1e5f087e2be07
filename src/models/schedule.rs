//! Schedule configuration and scheduled-match output.

use crate::models::game::MatchId;
use crate::models::tournament::TournamentError;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Calendar and court settings for the time scheduler.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub number_of_courts: u32,
    pub game_duration_minutes: u32,
    #[serde(default)]
    pub break_duration_minutes: u32,
    pub tournament_start_date: NaiveDate,
    pub number_of_days: u32,
    /// "HH:MM"
    #[serde(with = "hh_mm")]
    pub daily_start_time: NaiveTime,
    /// "HH:MM", must be after `daily_start_time`.
    #[serde(with = "hh_mm")]
    pub daily_end_time: NaiveTime,
    #[serde(default)]
    pub rest_days_between_matches: u32,
    #[serde(default = "default_include_weekends")]
    pub include_weekends: bool,
}

fn default_include_weekends() -> bool {
    true
}

impl ScheduleConfig {
    /// Build a config from "HH:MM" strings; other fields take their defaults.
    pub fn new(
        number_of_courts: u32,
        game_duration_minutes: u32,
        tournament_start_date: NaiveDate,
        number_of_days: u32,
        daily_start_time: &str,
        daily_end_time: &str,
    ) -> Result<Self, TournamentError> {
        let config = Self {
            number_of_courts,
            game_duration_minutes,
            break_duration_minutes: 0,
            tournament_start_date,
            number_of_days,
            daily_start_time: hh_mm::parse(daily_start_time)?,
            daily_end_time: hh_mm::parse(daily_end_time)?,
            rest_days_between_matches: 0,
            include_weekends: default_include_weekends(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_break(mut self, minutes: u32) -> Self {
        self.break_duration_minutes = minutes;
        self
    }

    pub fn with_rest_days(mut self, days: u32) -> Self {
        self.rest_days_between_matches = days;
        self
    }

    pub fn with_weekends(mut self, include: bool) -> Self {
        self.include_weekends = include;
        self
    }

    /// Check the options the scheduler relies on.
    pub fn validate(&self) -> Result<(), TournamentError> {
        if self.number_of_courts == 0 {
            return Err(TournamentError::InvalidConfig("number_of_courts must be at least 1".into()));
        }
        if self.game_duration_minutes == 0 {
            return Err(TournamentError::InvalidConfig("game_duration_minutes must be positive".into()));
        }
        if self.number_of_days == 0 {
            return Err(TournamentError::InvalidConfig("number_of_days must be at least 1".into()));
        }
        if self.daily_end_time <= self.daily_start_time {
            return Err(TournamentError::InvalidConfig(
                "daily_end_time must be after daily_start_time".into(),
            ));
        }
        let (first_end, wrapped) = self
            .daily_start_time
            .overflowing_add_signed(self.game_duration());
        if wrapped != 0 || first_end > self.daily_end_time {
            return Err(TournamentError::InvalidConfig(
                "a game does not fit into the daily window".into(),
            ));
        }
        if self.playing_days().is_empty() {
            return Err(TournamentError::InvalidConfig(
                "the calendar window has no playing day".into(),
            ));
        }
        Ok(())
    }

    pub fn game_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.game_duration_minutes))
    }

    pub fn break_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.break_duration_minutes))
    }

    /// Dates inside the `number_of_days` window that host games.
    pub fn playing_days(&self) -> Vec<NaiveDate> {
        self.tournament_start_date
            .iter_days()
            .take(self.number_of_days as usize)
            .filter(|d| self.include_weekends || !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
            .collect()
    }
}

/// Placement handed back for one match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduledMatch {
    pub match_id: MatchId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// 1-based court number.
    pub court: u32,
}

/// Serde helper for "HH:MM" times.
pub mod hh_mm {
    use crate::models::tournament::TournamentError;
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn parse(s: &str) -> Result<NaiveTime, TournamentError> {
        NaiveTime::parse_from_str(s.trim(), FORMAT)
            .map_err(|_| TournamentError::InvalidConfig(format!("expected HH:MM, got {:?}", s)))
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(serde::de::Error::custom)
    }
}
