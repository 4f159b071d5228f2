//! Coach seat selection for a travel booking form
//!
//! Renders a coach-type-specific seat map, tracks a bounded selection of
//! seats for the travelling party, and validates the booking before it is
//! confirmed. Everything is modelled as one reducer over an explicit
//! session state.
//!
//! # Architecture
//!
//! ```text
//! intent ──► SessionReducer ──► SessionState
//!               │   (selection, layout, summary, focus)
//!               ▼
//!        render batch effect ──► RenderQueue ──► Presenter (terminal / recording)
//!        expiry delay effect ──► NotificationExpired ──► SessionReducer
//! ```
//!
//! # Coach layouts
//!
//! | Coach | Seats | Layout |
//! |-------|-------|--------|
//! | `chair-car` | 78 | rows of 3 + 2 seats |
//! | `2s` | 108 | rows of 3 + 3 seats |
//! | `2a` | 54 | bays of 2 lower, 2 upper, 2 side berths |
//! | `3a` | 72 | bays of 2 lower, 2 middle, 2 upper, 2 side berths |
//!
//! # Example
//!
//! ```ignore
//! let presenter = Arc::new(RecordingPresenter::new());
//! let env = SessionEnvironment::new(Arc::new(SystemClock), presenter, Arc::new(SeatCatalog::standard()));
//! let state = SessionState::new(&env.catalog, CoachType::ChairCar, PartySize::ONE);
//! let store = Store::new(state, SessionReducer::new(), env);
//!
//! store.send(SessionAction::Initialize).await?;
//! store.send(SessionAction::SeatClicked { seat_id: "1C".into() }).await?;
//! ```

pub mod actions;
pub mod catalog;
pub mod config;
pub mod environment;
pub mod error;
pub mod focus;
pub mod layout;
pub mod reducer;
pub mod render;
pub mod selection;
pub mod state;
pub mod summary;
pub mod terminal;
pub mod types;

pub use actions::SessionAction;
pub use catalog::{CoachConfig, SeatCatalog};
pub use config::{Config, SessionConfig};
pub use environment::SessionEnvironment;
pub use error::{ParseError, SelectionError, ValidationError};
pub use focus::{FocusDirection, move_focus};
pub use layout::{BlockKind, RowSegment, SeatDescriptor, SeatMap, SeatRow, generate};
pub use reducer::SessionReducer;
pub use render::{
    Notification, Presenter, RecordingPresenter, RenderInstruction, RenderQueue, RenderTicket,
};
pub use selection::{SeatAvailability, Selection, ToggleOutcome};
pub use state::SessionState;
pub use summary::{BookingReceipt, BookingSummary, SeatTag};
pub use types::{BerthType, CoachType, NotificationId, PartySize, SeatId, Severity};
