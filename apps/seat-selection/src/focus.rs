//! Keyboard focus movement over the flattened seat order.

use crate::layout::SeatMap;
use serde::{Deserialize, Serialize};

/// Arrow key direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusDirection {
    /// Previous seat
    Left,
    /// Next seat
    Right,
    /// First seat of the previous row
    Up,
    /// First seat of the next row
    Down,
}

/// Moves focus from `current` in `direction`
///
/// Movement past either end of the map stays put, and no focus stays no
/// focus. A stale index beyond the map is clamped to the last seat.
#[must_use]
pub fn move_focus(
    seat_map: &SeatMap,
    current: Option<usize>,
    direction: FocusDirection,
) -> Option<usize> {
    let last = seat_map.len().checked_sub(1)?;
    let index = current?.min(last);
    let next = match direction {
        FocusDirection::Left => index.saturating_sub(1),
        FocusDirection::Right => (index + 1).min(last),
        FocusDirection::Up => seat_map
            .row_of(index)
            .and_then(|row| row.checked_sub(1))
            .and_then(|row| seat_map.row_start(row))
            .unwrap_or(index),
        FocusDirection::Down => seat_map
            .row_of(index)
            .and_then(|row| seat_map.row_start(row + 1))
            .unwrap_or(index),
    };
    Some(next)
}
