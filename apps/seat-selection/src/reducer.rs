//! Session reducer: turns form intents into state changes and render batches.
//!
//! Each reduce call produces at most two effects: one future that hands the
//! batch of render instructions to the presenter, and one delay that expires
//! the notification raised by the call. The batch takes its place in the
//! render queue during the reduce call, so batches reach the presenter in
//! the order their intents were reduced.

use crate::actions::SessionAction;
use crate::environment::SessionEnvironment;
use crate::error::{SelectionError, ValidationError};
use crate::focus::move_focus;
use crate::render::{Notification, RenderInstruction, RenderQueue};
use crate::selection::ToggleOutcome;
use crate::state::SessionState;
use crate::summary;
use crate::types::{CoachType, NotificationId, PartySize, SeatId, Severity};
use seating_core::effect::Effect;
use seating_core::reducer::Reducer;
use seating_core::{SmallVec, async_effect, delay};
use std::sync::Arc;

const CAPACITY_REACHED: &str = "Maximum seats selected for the number of people!";
const MISSING_NAME: &str = "Please enter passenger name!";
const SELECTION_CLEARED: &str = "Selection cleared!";
const BOOKING_CONFIRMED: &str = "Booking confirmed successfully!";

/// Reducer for one booking form session
#[derive(Clone, Debug, Default)]
pub struct SessionReducer;

impl SessionReducer {
    /// Creates a new `SessionReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Render batch and notification expiry collected during one reduce call
#[derive(Default)]
struct Frame {
    instructions: Vec<RenderInstruction>,
    expiry: Option<Effect<SessionAction>>,
}

impl Frame {
    fn push(&mut self, instruction: RenderInstruction) {
        self.instructions.push(instruction);
    }

    fn selection(&mut self, state: &SessionState) {
        self.push(RenderInstruction::RenderSelection {
            selected: state.selection.seats().to_vec(),
        });
    }

    /// Counter, summary panel and confirm button
    fn form(&mut self, state: &SessionState) {
        let summary = summary::project(
            &state.passenger_name,
            state.coach,
            &state.selection,
            &state.seat_map,
        );
        self.push(RenderInstruction::RenderSelectionCount {
            selected: state.selection.len(),
            max: summary.max_people,
        });
        self.push(RenderInstruction::SetConfirmEnabled(summary.can_confirm));
        self.push(RenderInstruction::RenderSummary(summary));
    }

    fn seat_map(&mut self, state: &SessionState) {
        self.push(RenderInstruction::RenderSeatMap {
            seat_map: Arc::clone(&state.seat_map),
            booked: state.booked(state.coach),
        });
    }

    fn notify(
        &mut self,
        state: &mut SessionState,
        env: &SessionEnvironment,
        message: impl Into<String>,
        severity: Severity,
    ) {
        let id = state.next_notification;
        state.next_notification = id.next();
        let notification = Notification {
            id,
            message: message.into(),
            severity,
            shown_at: env.clock.now(),
        };
        tracing::debug!(%id, %severity, message = %notification.message, "Notification raised");
        state.notification = Some(notification.clone());
        self.push(RenderInstruction::ShowNotification(notification));
        self.expiry = Some(delay! {
            duration: env.notification_ttl,
            action: SessionAction::NotificationExpired { id }
        });
    }

    fn into_effects(self, env: &SessionEnvironment) -> SmallVec<[Effect<SessionAction>; 4]> {
        let mut effects = SmallVec::new();
        if !self.instructions.is_empty() {
            let ticket = RenderQueue::issue(&env.renderer, self.instructions);
            effects.push(async_effect! {
                ticket.deliver();
                None
            });
        }
        if let Some(expiry) = self.expiry {
            effects.push(expiry);
        }
        effects
    }
}

impl SessionReducer {
    fn load_coach(state: &mut SessionState, env: &SessionEnvironment, coach: CoachType) {
        state.coach = coach;
        state.seat_map = Arc::new(env.catalog.seat_map(coach));
        state.selection.clear();
        state.focus = None;
    }

    fn initialize(state: &mut SessionState, env: &SessionEnvironment, frame: &mut Frame) {
        let coach = state.coach;
        Self::load_coach(state, env, coach);
        tracing::info!(
            coach = %state.coach,
            party_size = %state.party_size(),
            seats = state.seat_map.len(),
            "Session initialized"
        );
        frame.seat_map(state);
        frame.selection(state);
        frame.form(state);
    }

    fn refresh(state: &SessionState, frame: &mut Frame) {
        frame.seat_map(state);
        frame.selection(state);
        if let Some(seat_id) = state.focused_seat() {
            frame.push(RenderInstruction::FocusSeat(seat_id.clone()));
        }
        frame.form(state);
    }

    fn change_party_size(state: &mut SessionState, size: PartySize, frame: &mut Frame) {
        let dropped = state.selection.set_party_size(size);
        if !dropped.is_empty() {
            tracing::debug!(%size, dropped = dropped.len(), "Selection truncated to party size");
            frame.selection(state);
        }
        frame.form(state);
    }

    fn change_coach(
        state: &mut SessionState,
        env: &SessionEnvironment,
        coach: CoachType,
        frame: &mut Frame,
    ) {
        Self::load_coach(state, env, coach);
        tracing::info!(coach = %coach, seats = state.seat_map.len(), "Coach type changed");
        frame.seat_map(state);
        frame.selection(state);
        frame.form(state);
    }

    fn toggle_seat(
        state: &mut SessionState,
        env: &SessionEnvironment,
        seat_id: &SeatId,
        frame: &mut Frame,
    ) {
        let Some(availability) = state.availability(seat_id) else {
            Self::unknown_seat(state, seat_id);
            return;
        };
        match state.selection.toggle(seat_id, availability) {
            Ok(outcome) => {
                tracing::debug!(seat = %seat_id, ?outcome, "Seat toggled");
                if outcome == ToggleOutcome::Selected {
                    state.focus = state.seat_map.position(seat_id);
                }
                frame.selection(state);
                frame.form(state);
            },
            Err(SelectionError::CapacityReached { max }) => {
                tracing::debug!(seat = %seat_id, max, "Seat rejected: party fully seated");
                frame.notify(state, env, CAPACITY_REACHED, Severity::Warning);
            },
            Err(SelectionError::SeatUnavailable(_)) => {
                tracing::debug!(seat = %seat_id, ?availability, "Seat rejected: unavailable");
            },
        }
    }

    fn focus_seat(state: &mut SessionState, seat_id: &SeatId) {
        match state.seat_map.position(seat_id) {
            Some(index) => state.focus = Some(index),
            None => Self::unknown_seat(state, seat_id),
        }
    }

    fn clear(state: &mut SessionState, env: &SessionEnvironment, frame: &mut Frame) {
        let cleared = state.selection.clear();
        tracing::debug!(cleared, "Selection cleared");
        frame.selection(state);
        frame.form(state);
        frame.notify(state, env, SELECTION_CLEARED, Severity::Info);
    }

    fn confirm(state: &mut SessionState, env: &SessionEnvironment, frame: &mut Frame) {
        let result = summary::confirm(
            &state.passenger_name,
            state.coach,
            &state.selection,
            &state.seat_map,
        );
        let receipt = match result {
            Ok(receipt) => receipt,
            Err(ValidationError::MissingName) => {
                tracing::debug!("Confirmation rejected: missing passenger name");
                frame.notify(state, env, MISSING_NAME, Severity::Error);
                frame.push(RenderInstruction::FocusPassengerName);
                return;
            },
            Err(ValidationError::IncompleteSelection { expected, selected }) => {
                tracing::debug!(expected, selected, "Confirmation rejected: incomplete selection");
                frame.notify(
                    state,
                    env,
                    format!("Please select exactly {expected} seat(s)!"),
                    Severity::Error,
                );
                return;
            },
        };

        let seats = state.selection.take();
        state
            .booked
            .entry(state.coach)
            .or_default()
            .extend(seats.iter().cloned());
        state.passenger_name.clear();
        tracing::info!(
            coach = %state.coach,
            seats = ?seats,
            "Booking confirmed"
        );

        frame.push(RenderInstruction::ShowReceipt(receipt));
        frame.push(RenderInstruction::MarkSeatsBooked(seats));
        frame.selection(state);
        frame.push(RenderInstruction::ResetPassengerName);
        frame.form(state);
        frame.notify(state, env, BOOKING_CONFIRMED, Severity::Success);
    }

    fn expire_notification(state: &mut SessionState, id: NotificationId, frame: &mut Frame) {
        if state.notification.as_ref().is_some_and(|n| n.id == id) {
            state.notification = None;
            frame.push(RenderInstruction::DismissNotification(id));
        } else {
            tracing::trace!(%id, "Ignoring expiry of a replaced notification");
        }
    }

    /// Seat ids come from the rendered map, so a miss is an adapter bug
    fn unknown_seat(state: &SessionState, seat_id: &SeatId) {
        tracing::error!(seat = %seat_id, coach = %state.coach, "Intent for a seat not on the current map");
        debug_assert!(
            state.seat_map.contains(seat_id),
            "seat {seat_id} is not on the {} map",
            state.coach
        );
    }
}

impl Reducer for SessionReducer {
    type State = SessionState;
    type Action = SessionAction;
    type Environment = SessionEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut frame = Frame::default();

        match action {
            SessionAction::Initialize => Self::initialize(state, env, &mut frame),
            SessionAction::RefreshRequested => Self::refresh(state, &mut frame),
            SessionAction::PartySizeChanged { size } => {
                Self::change_party_size(state, size, &mut frame);
            },
            SessionAction::CoachTypeChanged { coach } => {
                Self::change_coach(state, env, coach, &mut frame);
            },
            SessionAction::PassengerNameChanged { name } => {
                state.passenger_name = name;
                frame.form(state);
            },
            SessionAction::SeatClicked { seat_id } => {
                Self::toggle_seat(state, env, &seat_id, &mut frame);
            },
            SessionAction::SeatFocused { seat_id } => Self::focus_seat(state, &seat_id),
            SessionAction::FocusMoveRequested { direction } => {
                let next = move_focus(&state.seat_map, state.focus, direction);
                if next != state.focus {
                    state.focus = next;
                    if let Some(seat_id) = state.focused_seat() {
                        frame.push(RenderInstruction::FocusSeat(seat_id.clone()));
                    }
                }
            },
            SessionAction::FocusActivated => {
                if let Some(seat_id) = state.focused_seat().cloned() {
                    Self::toggle_seat(state, env, &seat_id, &mut frame);
                }
            },
            SessionAction::ClearRequested => Self::clear(state, env, &mut frame),
            SessionAction::ConfirmRequested => Self::confirm(state, env, &mut frame),
            SessionAction::NotificationExpired { id } => {
                Self::expire_notification(state, id, &mut frame);
            },
        }

        frame.into_effects(env)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use crate::catalog::SeatCatalog;
    use crate::render::RecordingPresenter;
    use seating_testing::{ReducerTest, assertions, test_clock};

    fn env() -> SessionEnvironment {
        SessionEnvironment::new(
            Arc::new(test_clock()),
            Arc::new(RecordingPresenter::new()),
            Arc::new(SeatCatalog::standard()),
        )
    }

    fn session(coach: CoachType, party: u32) -> SessionState {
        SessionState::new(&SeatCatalog::standard(), coach, PartySize::new(party).unwrap())
    }

    #[test]
    fn seat_click_renders_one_batch() {
        ReducerTest::new(SessionReducer::new())
            .with_env(env())
            .given_state(session(CoachType::ChairCar, 2))
            .when_action(SessionAction::SeatClicked { seat_id: SeatId::from("1C") })
            .then_state(|state| {
                assert_eq!(state.selection().seats(), [SeatId::from("1C")]);
                assert_eq!(state.focus(), Some(2));
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn prebooked_click_is_silent() {
        ReducerTest::new(SessionReducer::new())
            .with_env(env())
            .given_state(session(CoachType::ChairCar, 2))
            .when_action(SessionAction::SeatClicked { seat_id: SeatId::from("1A") })
            .then_state(|state| assert!(state.selection().is_empty()))
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn capacity_warning_schedules_expiry() {
        let mut state = session(CoachType::ChairCar, 1);
        let _ = SessionReducer::new().reduce(
            &mut state,
            SessionAction::SeatClicked { seat_id: SeatId::from("1C") },
            &env(),
        );

        ReducerTest::new(SessionReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(SessionAction::SeatClicked { seat_id: SeatId::from("1D") })
            .then_state(|state| {
                let notification = state.notification().unwrap();
                assert_eq!(notification.severity, Severity::Warning);
                assert_eq!(notification.message, CAPACITY_REACHED);
                assert_eq!(state.selection().len(), 1);
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 2);
                assertions::assert_has_delay_effect(effects);
            })
            .then_driven(|driven| {
                assert!(driven.feedback.is_empty());
                assert_eq!(
                    driven.delayed,
                    vec![(
                        crate::environment::DEFAULT_NOTIFICATION_TTL,
                        SessionAction::NotificationExpired { id: NotificationId::new(1) }
                    )]
                );
            })
            .run();
    }

    #[test]
    fn refresh_redraws_current_state() {
        let mut state = session(CoachType::AcTwoTier, 2);
        let _ = SessionReducer::new().reduce(
            &mut state,
            SessionAction::SeatClicked { seat_id: SeatId::from("4UB") },
            &env(),
        );
        let presenter = RecordingPresenter::new();
        let env = SessionEnvironment::new(
            Arc::new(test_clock()),
            Arc::new(presenter.clone()),
            Arc::new(SeatCatalog::standard()),
        );

        ReducerTest::new(SessionReducer::new())
            .with_env(env)
            .given_state(state)
            .when_action(SessionAction::RefreshRequested)
            .then_state(|state| assert_eq!(state.selection().len(), 1))
            .then_driven(move |_| {
                let instructions = presenter.instructions();
                assert!(matches!(
                    &instructions[0],
                    RenderInstruction::RenderSeatMap { seat_map, .. } if seat_map.len() == 54
                ));
                assert_eq!(
                    instructions[1..3],
                    [
                        RenderInstruction::RenderSelection { selected: vec![SeatId::from("4UB")] },
                        RenderInstruction::FocusSeat(SeatId::from("4UB")),
                    ]
                );
                assert!(instructions.contains(&RenderInstruction::RenderSelectionCount {
                    selected: 1,
                    max: 2
                }));
            })
            .run();
    }

    #[test]
    fn focus_move_without_focus_is_a_no_op() {
        ReducerTest::new(SessionReducer::new())
            .with_env(env())
            .given_state(session(CoachType::AcTwoTier, 1))
            .when_action(SessionAction::FocusMoveRequested {
                direction: crate::focus::FocusDirection::Down,
            })
            .then_state(|state| assert_eq!(state.focus(), None))
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "is not on the"))]
    fn unknown_seat_trips_debug_assertion() {
        ReducerTest::new(SessionReducer::new())
            .with_env(env())
            .given_state(session(CoachType::ChairCar, 1))
            .when_action(SessionAction::SeatClicked { seat_id: SeatId::from("9LB") })
            .then_state(|state| assert!(state.selection().is_empty()))
            .run();
    }
}
