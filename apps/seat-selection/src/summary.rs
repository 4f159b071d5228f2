//! Booking summary projection and confirmation gate.

use crate::error::ValidationError;
use crate::layout::SeatMap;
use crate::selection::Selection;
use crate::types::{BerthType, CoachType, SeatId};
use serde::Serialize;
use std::fmt;

/// A selected seat with its berth, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatTag {
    /// Seat identifier
    pub seat_id: SeatId,
    /// Berth position for sleeper seats
    pub berth: Option<BerthType>,
}

impl fmt::Display for SeatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.berth {
            Some(berth) => write!(f, "{} ({berth})", self.seat_id),
            None => write!(f, "{}", self.seat_id),
        }
    }
}

/// Derived view of the booking form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingSummary {
    /// Trimmed passenger name
    pub passenger: String,
    /// Coach label (`AC 2 Tier (2A)`)
    pub coach_label: &'static str,
    /// Selected seats in selection order
    pub seats: Vec<SeatTag>,
    /// Party size
    pub max_people: usize,
    /// Whether confirmation is currently allowed
    pub can_confirm: bool,
}

impl BookingSummary {
    /// Passenger name, `-` while empty
    #[must_use]
    pub fn passenger_display(&self) -> &str {
        if self.passenger.is_empty() {
            "-"
        } else {
            &self.passenger
        }
    }

    /// Selected seat ids joined by spaces, `None selected` while empty
    #[must_use]
    pub fn seats_display(&self) -> String {
        if self.seats.is_empty() {
            return "None selected".to_string();
        }
        self.seats
            .iter()
            .map(|tag| tag.seat_id.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Confirmation handed back after a successful booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingReceipt {
    /// Trimmed passenger name
    pub passenger: String,
    /// Coach label
    pub coach_label: &'static str,
    /// Booked seats in selection order
    pub seats: Vec<SeatTag>,
}

impl fmt::Display for BookingReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seats = self
            .seats
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "Booking Confirmed!\n\nPassenger: {}\nCoach: {}\nSeats: {seats}",
            self.passenger, self.coach_label
        )
    }
}

fn tags(selection: &Selection, seat_map: &SeatMap) -> Vec<SeatTag> {
    selection
        .seats()
        .iter()
        .map(|seat_id| SeatTag {
            seat_id: seat_id.clone(),
            berth: seat_map.get(seat_id).and_then(|seat| seat.berth),
        })
        .collect()
}

/// Whether a booking may be confirmed
///
/// Requires a non-blank name and exactly `max_people` seats.
#[must_use]
pub fn can_confirm(name: &str, selected: usize, max_people: usize) -> bool {
    !name.trim().is_empty() && selected == max_people
}

/// Projects the summary panel for the current form state
#[must_use]
pub fn project(
    name: &str,
    coach: CoachType,
    selection: &Selection,
    seat_map: &SeatMap,
) -> BookingSummary {
    let max_people = selection.max_people().as_usize();
    BookingSummary {
        passenger: name.trim().to_string(),
        coach_label: coach.label(),
        seats: tags(selection, seat_map),
        max_people,
        can_confirm: can_confirm(name, selection.len(), max_people),
    }
}

/// Validates the form and builds the booking receipt
///
/// Does not touch the selection; marking seats booked is up to the caller.
///
/// # Errors
///
/// - [`ValidationError::MissingName`] if the trimmed name is empty
/// - [`ValidationError::IncompleteSelection`] if the seat count differs from the party size
pub fn confirm(
    name: &str,
    coach: CoachType,
    selection: &Selection,
    seat_map: &SeatMap,
) -> Result<BookingReceipt, ValidationError> {
    let passenger = name.trim();
    if passenger.is_empty() {
        return Err(ValidationError::MissingName);
    }
    let expected = selection.max_people().as_usize();
    if selection.len() != expected {
        return Err(ValidationError::IncompleteSelection {
            expected,
            selected: selection.len(),
        });
    }
    Ok(BookingReceipt {
        passenger: passenger.to_string(),
        coach_label: coach.label(),
        seats: tags(selection, seat_map),
    })
}
