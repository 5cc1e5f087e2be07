//! Team and TeamStats data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in matches and lookups).
pub type TeamId = Uuid;

/// A seeded entrant. Seeds are 1-based; seed 1 is the strongest team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub seed: u32,
    pub name: String,
}

impl Team {
    /// Create a new team with a fresh id.
    pub fn new(name: impl Into<String>, seed: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            seed,
            name: name.into(),
        }
    }
}

/// Cumulative per-tournament statistics for one team.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub team_id: TeamId,
    pub seed: u32,
    pub wins: u32,
    pub losses: u32,
    pub points_scored: u32,
    pub points_allowed: u32,
    /// Set once the tournament is complete.
    pub final_position: Option<u32>,
}

impl TeamStats {
    /// Empty statistics for a team.
    pub fn for_team(team: &Team) -> Self {
        Self {
            team_id: team.id,
            seed: team.seed,
            ..Self::default()
        }
    }

    /// Record a win with the given score line.
    pub fn add_win(&mut self, scored: u32, allowed: u32) {
        self.wins += 1;
        self.points_scored += scored;
        self.points_allowed += allowed;
    }

    /// Record a loss with the given score line.
    pub fn add_loss(&mut self, scored: u32, allowed: u32) {
        self.losses += 1;
        self.points_scored += scored;
        self.points_allowed += allowed;
    }

    pub fn point_differential(&self) -> i64 {
        i64::from(self.points_scored) - i64::from(self.points_allowed)
    }
}
