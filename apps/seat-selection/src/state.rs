//! Session state owned by the store.

use crate::catalog::SeatCatalog;
use crate::layout::SeatMap;
use crate::render::Notification;
use crate::selection::{SeatAvailability, Selection};
use crate::types::{CoachType, NotificationId, PartySize, SeatId};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Everything one booking form session knows
///
/// Only the session reducer mutates it.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub(crate) coach: CoachType,
    pub(crate) seat_map: Arc<SeatMap>,
    pub(crate) selection: Selection,
    pub(crate) passenger_name: String,
    pub(crate) booked: BTreeMap<CoachType, BTreeSet<SeatId>>,
    pub(crate) focus: Option<usize>,
    pub(crate) notification: Option<Notification>,
    pub(crate) next_notification: NotificationId,
}

impl SessionState {
    /// Fresh session showing `coach` for a party of `party_size`
    #[must_use]
    pub fn new(catalog: &SeatCatalog, coach: CoachType, party_size: PartySize) -> Self {
        Self {
            coach,
            seat_map: Arc::new(catalog.seat_map(coach)),
            selection: Selection::new(party_size),
            passenger_name: String::new(),
            booked: BTreeMap::new(),
            focus: None,
            notification: None,
            next_notification: NotificationId::new(1),
        }
    }

    /// Coach type on screen
    #[must_use]
    pub const fn coach(&self) -> CoachType {
        self.coach
    }

    /// Seat map of the current coach type
    #[must_use]
    pub fn seat_map(&self) -> &SeatMap {
        &self.seat_map
    }

    /// Current selection
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Party size
    #[must_use]
    pub const fn party_size(&self) -> PartySize {
        self.selection.max_people()
    }

    /// Raw passenger name as typed
    #[must_use]
    pub fn passenger_name(&self) -> &str {
        &self.passenger_name
    }

    /// Index of the focused seat
    #[must_use]
    pub const fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// Identifier of the focused seat
    #[must_use]
    pub fn focused_seat(&self) -> Option<&SeatId> {
        self.focus
            .and_then(|index| self.seat_map.at(index))
            .map(|seat| &seat.seat_id)
    }

    /// Notification currently shown
    #[must_use]
    pub const fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Seats of `coach` booked during this session
    #[must_use]
    pub fn booked(&self, coach: CoachType) -> Vec<SeatId> {
        self.booked
            .get(&coach)
            .map(|seats| seats.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether `seat_id` was booked during this session on the current coach
    #[must_use]
    pub fn is_booked(&self, seat_id: &SeatId) -> bool {
        self.booked
            .get(&self.coach)
            .is_some_and(|seats| seats.contains(seat_id))
    }

    /// Availability of a seat on the current map, `None` if it is not on it
    #[must_use]
    pub fn availability(&self, seat_id: &SeatId) -> Option<SeatAvailability> {
        let seat = self.seat_map.get(seat_id)?;
        Some(if seat.is_prebooked {
            SeatAvailability::Prebooked
        } else if self.is_booked(seat_id) {
            SeatAvailability::Booked
        } else {
            SeatAvailability::Available
        })
    }
}
