//! Intents accepted by the session reducer.

use crate::focus::FocusDirection;
use crate::types::{CoachType, NotificationId, PartySize, SeatId};
use serde::{Deserialize, Serialize};

/// Everything that can happen to a booking form session
///
/// All variants except `NotificationExpired` come from the presentation
/// layer; `NotificationExpired` is fed back by a delay effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionAction {
    /// Draw the initial seat map and form state
    Initialize,

    /// Draw the whole form again from the current state
    RefreshRequested,

    /// Party size input changed
    PartySizeChanged {
        /// New party size
        size: PartySize,
    },

    /// Coach type select changed
    CoachTypeChanged {
        /// New coach type
        coach: CoachType,
    },

    /// Passenger name input changed
    PassengerNameChanged {
        /// Name as typed, untrimmed
        name: String,
    },

    /// A seat was clicked
    SeatClicked {
        /// Seat clicked
        seat_id: SeatId,
    },

    /// A seat received keyboard focus in the presentation layer
    SeatFocused {
        /// Seat focused
        seat_id: SeatId,
    },

    /// Arrow key pressed on the seat map
    FocusMoveRequested {
        /// Arrow direction
        direction: FocusDirection,
    },

    /// Enter or Space pressed on the focused seat
    FocusActivated,

    /// Clear button pressed
    ClearRequested,

    /// Confirm button pressed
    ConfirmRequested,

    /// A notification's display time ran out
    NotificationExpired {
        /// Notification that expired
        id: NotificationId,
    },
}
