//! Error types for the seat selection domain.

use crate::types::SeatId;
use thiserror::Error;

/// A seat toggle the selection engine refused
///
/// These never reach the user as failures: the reducer turns them into
/// notifications or ignores them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The seat was prebooked or booked earlier in this session
    #[error("seat {0} is not available")]
    SeatUnavailable(SeatId),

    /// The party is already fully seated
    #[error("maximum of {max} seat(s) already selected")]
    CapacityReached {
        /// Current party size
        max: usize,
    },
}

/// Why a booking cannot be confirmed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Passenger name is empty after trimming
    #[error("passenger name is required")]
    MissingName,

    /// Selected seat count differs from the party size
    #[error("expected exactly {expected} seat(s), {selected} selected")]
    IncompleteSelection {
        /// Party size
        expected: usize,
        /// Seats currently selected
        selected: usize,
    },
}

/// Input the adapter could not turn into an intent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Not one of `chair-car`, `2s`, `2a`, `3a`
    #[error("unknown coach type: {0:?}")]
    UnknownCoachType(String),

    /// Not a positive integer
    #[error("invalid party size: {0:?}")]
    InvalidPartySize(String),

    /// Party size above the configured maximum
    #[error("party size {requested} exceeds the maximum of {max}")]
    PartyTooLarge {
        /// Requested size
        requested: u32,
        /// Configured maximum
        max: u32,
    },

    /// Unrecognised terminal command
    #[error("unknown command: {0:?} (type `help` for a list)")]
    UnknownCommand(String),

    /// Command given without its required argument
    #[error("command `{0}` needs an argument")]
    MissingArgument(&'static str),
}
