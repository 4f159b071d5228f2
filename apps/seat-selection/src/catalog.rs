//! Static coach configuration: capacity and prebooked seats per coach type.

use crate::layout::{self, SeatMap};
use crate::types::{CoachType, SeatId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Capacity and prebooked seats of one coach type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachConfig {
    /// Seats generated for the coach
    pub total_seats: usize,
    /// Seats sold before the session started
    pub prebooked: BTreeSet<SeatId>,
}

impl CoachConfig {
    /// Creates a coach configuration
    #[must_use]
    pub fn new<I, S>(total_seats: usize, prebooked: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SeatId>,
    {
        Self {
            total_seats,
            prebooked: prebooked.into_iter().map(Into::into).collect(),
        }
    }
}

/// Coach configuration for every [`CoachType`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatCatalog {
    coaches: [CoachConfig; 4],
}

impl SeatCatalog {
    /// The configuration shipped with the booking form
    #[must_use]
    pub fn standard() -> Self {
        Self {
            coaches: [
                CoachConfig::new(78, ["1A", "1B", "3D", "5E", "7A", "12C", "15B"]),
                CoachConfig::new(108, ["2A", "2B", "4D", "6F", "8A", "10C", "13E"]),
                CoachConfig::new(54, ["1LB", "3UB", "5SL", "8LB", "12UB", "15SU"]),
                CoachConfig::new(72, ["2MB", "4UB", "7SL", "9LB", "11MB", "14SU", "18UB"]),
            ],
        }
    }

    /// Replaces the configuration of one coach type
    #[must_use]
    pub fn with_coach(mut self, coach: CoachType, config: CoachConfig) -> Self {
        self.coaches[coach.index()] = config;
        self
    }

    /// Configuration of a coach type
    #[must_use]
    pub const fn coach(&self, coach: CoachType) -> &CoachConfig {
        &self.coaches[coach.index()]
    }

    /// Generates the seat map of a coach type
    #[must_use]
    pub fn seat_map(&self, coach: CoachType) -> SeatMap {
        let config = self.coach(coach);
        layout::generate(coach, config.total_seats, &config.prebooked)
    }
}

impl Default for SeatCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
