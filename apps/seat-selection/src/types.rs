//! Domain value types shared by every seat selection module.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

// ============================================================================
// Coach types
// ============================================================================

/// Travel class with a fixed physical seat or berth layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CoachType {
    /// Chair car: bus-style rows of 3 + 2 seats
    #[serde(rename = "chair-car")]
    ChairCar,
    /// Second sitting: bus-style rows of 3 + 3 seats
    #[serde(rename = "2s")]
    SecondSitting,
    /// AC two tier: bays of 6 berths
    #[serde(rename = "2a")]
    AcTwoTier,
    /// AC three tier: bays of 8 berths
    #[serde(rename = "3a")]
    AcThreeTier,
}

impl CoachType {
    /// Every coach type, in form order
    pub const ALL: [Self; 4] = [
        Self::ChairCar,
        Self::SecondSitting,
        Self::AcTwoTier,
        Self::AcThreeTier,
    ];

    /// Form value of the coach type (`chair-car`, `2s`, `2a`, `3a`)
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ChairCar => "chair-car",
            Self::SecondSitting => "2s",
            Self::AcTwoTier => "2a",
            Self::AcThreeTier => "3a",
        }
    }

    /// Human readable label shown in summaries and receipts
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ChairCar => "Chair Car (CC)",
            Self::SecondSitting => "Second Sitting (2S)",
            Self::AcTwoTier => "AC 2 Tier (2A)",
            Self::AcThreeTier => "AC 3 Tier (3A)",
        }
    }

    /// Whether the coach is laid out in sleeper bays rather than seat rows
    #[must_use]
    pub const fn is_sleeper(self) -> bool {
        matches!(self, Self::AcTwoTier | Self::AcThreeTier)
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::ChairCar => 0,
            Self::SecondSitting => 1,
            Self::AcTwoTier => 2,
            Self::AcThreeTier => 3,
        }
    }
}

impl fmt::Display for CoachType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CoachType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|coach| coach.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseError::UnknownCoachType(wanted.to_string()))
    }
}

// ============================================================================
// Berths
// ============================================================================

/// Sleeper berth position within a bay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BerthType {
    /// Lower berth (`LB`)
    #[serde(rename = "LB")]
    Lower,
    /// Middle berth (`MB`), three tier only
    #[serde(rename = "MB")]
    Middle,
    /// Upper berth (`UB`)
    #[serde(rename = "UB")]
    Upper,
    /// Side lower berth (`SL`)
    #[serde(rename = "SL")]
    SideLower,
    /// Side upper berth (`SU`)
    #[serde(rename = "SU")]
    SideUpper,
}

impl BerthType {
    /// Two letter code used in berth identifiers
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Lower => "LB",
            Self::Middle => "MB",
            Self::Upper => "UB",
            Self::SideLower => "SL",
            Self::SideUpper => "SU",
        }
    }

    /// Long name of the berth
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lower => "Lower",
            Self::Middle => "Middle",
            Self::Upper => "Upper",
            Self::SideLower => "Side Lower",
            Self::SideUpper => "Side Upper",
        }
    }
}

impl fmt::Display for BerthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Seat identifiers
// ============================================================================

/// Seat identifier, unique within one seat map (`12C`, `3LB`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeatId(String);

impl SeatId {
    /// Creates a new `SeatId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for SeatId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SeatId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ============================================================================
// Party size
// ============================================================================

/// Number of seats one booking must reserve (always at least one)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartySize(NonZeroU32);

impl PartySize {
    /// A party of one
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Creates a party size, `None` for zero
    #[must_use]
    pub const fn new(size: u32) -> Option<Self> {
        match NonZeroU32::new(size) {
            Some(size) => Some(Self(size)),
            None => None,
        }
    }

    /// Party size as a plain integer
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Party size as a collection length
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0.get() as usize
    }
}

impl Default for PartySize {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for PartySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PartySize {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| ParseError::InvalidPartySize(s.trim().to_string()))
    }
}

// ============================================================================
// Notifications
// ============================================================================

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational (selection cleared)
    Info,
    /// Successful outcome (booking confirmed)
    Success,
    /// Rejected intent that needs no correction (capacity reached)
    Warning,
    /// Rejected intent the user must correct (missing name)
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// Identifier of a shown notification, used to match its expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a `NotificationId` from its sequence number
    #[must_use]
    pub const fn new(sequence: u64) -> Self {
        Self(sequence)
    }

    /// The identifier that follows this one
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
