//! Ordered, bounded seat selection.

use crate::error::SelectionError;
use crate::types::{PartySize, SeatId};
use serde::{Deserialize, Serialize};

/// Whether a seat can currently be selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatAvailability {
    /// Free to select
    Available,
    /// Sold before the session started
    Prebooked,
    /// Booked earlier in this session
    Booked,
}

impl SeatAvailability {
    /// Whether the seat can be selected
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// What a successful toggle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Seat appended to the selection
    Selected,
    /// Seat removed from the selection
    Deselected,
}

/// Seats picked for the current party, in click order
///
/// Never holds duplicates or more than `max_people` seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    seats: Vec<SeatId>,
    max_people: PartySize,
}

impl Selection {
    /// Empty selection for a party of `max_people`
    #[must_use]
    pub const fn new(max_people: PartySize) -> Self {
        Self {
            seats: Vec::new(),
            max_people,
        }
    }

    /// Selected seats in selection order
    #[must_use]
    pub fn seats(&self) -> &[SeatId] {
        &self.seats
    }

    /// Party size bounding the selection
    #[must_use]
    pub const fn max_people(&self) -> PartySize {
        self.max_people
    }

    /// Number of selected seats
    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Whether nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Whether the party is fully seated
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.seats.len() >= self.max_people.as_usize()
    }

    /// Whether `seat_id` is selected
    #[must_use]
    pub fn contains(&self, seat_id: &SeatId) -> bool {
        self.seats.contains(seat_id)
    }

    /// Changes the party size, returning the seats dropped to fit it
    ///
    /// Seats are kept in selection order; the most recent ones go first.
    pub fn set_party_size(&mut self, max_people: PartySize) -> Vec<SeatId> {
        self.max_people = max_people;
        if self.seats.len() > max_people.as_usize() {
            self.seats.split_off(max_people.as_usize())
        } else {
            Vec::new()
        }
    }

    /// Selects or deselects a seat
    ///
    /// # Errors
    ///
    /// - [`SelectionError::SeatUnavailable`] if the seat is prebooked or booked
    /// - [`SelectionError::CapacityReached`] if selecting would exceed the party size
    ///
    /// The selection is unchanged on error.
    pub fn toggle(
        &mut self,
        seat_id: &SeatId,
        availability: SeatAvailability,
    ) -> Result<ToggleOutcome, SelectionError> {
        if !availability.is_available() {
            return Err(SelectionError::SeatUnavailable(seat_id.clone()));
        }
        if let Some(index) = self.seats.iter().position(|s| s == seat_id) {
            self.seats.remove(index);
            return Ok(ToggleOutcome::Deselected);
        }
        if self.is_full() {
            return Err(SelectionError::CapacityReached {
                max: self.max_people.as_usize(),
            });
        }
        self.seats.push(seat_id.clone());
        Ok(ToggleOutcome::Selected)
    }

    /// Deselects every seat, returning how many were selected
    pub fn clear(&mut self) -> usize {
        let cleared = self.seats.len();
        self.seats.clear();
        cleared
    }

    /// Empties the selection, handing back its seats in order
    pub fn take(&mut self) -> Vec<SeatId> {
        std::mem::take(&mut self.seats)
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(PartySize::ONE)
    }
}
