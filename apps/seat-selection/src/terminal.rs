//! Line-oriented terminal adapter: command parsing and an ASCII presenter.

use crate::actions::SessionAction;
use crate::config::SessionConfig;
use crate::error::ParseError;
use crate::focus::FocusDirection;
use crate::layout::{RowSegment, SeatMap};
use crate::render::{Notification, Presenter, RenderInstruction};
use crate::summary::{BookingReceipt, BookingSummary};
use crate::types::{BerthType, SeatId};
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

/// Commands understood by the binary
pub const HELP: &str = "\
Commands:
  people N      set the number of passengers
  coach TYPE    switch coach type (chair-car, 2s, 2a, 3a)
  name TEXT     set the passenger name
  seat ID       click a seat (e.g. 1B, 3LB)
  focus ID      focus a seat
  left|right|up|down
                move the seat focus
  enter         toggle the focused seat
  clear         clear the selection
  confirm       confirm the booking
  show          redraw the form
  help          show this help
  quit          exit
Legend: [1B] selected  (1A) booked  >1C focused";

// ============================================================================
// Commands
// ============================================================================

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forward an intent to the session
    Intent(SessionAction),
    /// Print the command list
    Help,
    /// Leave the loop
    Quit,
}

/// Parses one input line, `None` for a blank line
///
/// # Errors
///
/// Returns [`ParseError`] for unknown commands, missing arguments, or
/// arguments that do not parse.
pub fn parse_command(line: &str, config: &SessionConfig) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let intent = match word.to_ascii_lowercase().as_str() {
        "people" => SessionAction::PartySizeChanged {
            size: config.check_party_size(argument("people", rest)?.parse()?)?,
        },
        "coach" => SessionAction::CoachTypeChanged {
            coach: argument("coach", rest)?.parse()?,
        },
        "name" => SessionAction::PassengerNameChanged {
            name: rest.to_string(),
        },
        "seat" => SessionAction::SeatClicked {
            seat_id: seat_id(argument("seat", rest)?),
        },
        "focus" => SessionAction::SeatFocused {
            seat_id: seat_id(argument("focus", rest)?),
        },
        "left" => focus_move(FocusDirection::Left),
        "right" => focus_move(FocusDirection::Right),
        "up" => focus_move(FocusDirection::Up),
        "down" => focus_move(FocusDirection::Down),
        "enter" | "space" => SessionAction::FocusActivated,
        "clear" => SessionAction::ClearRequested,
        "confirm" => SessionAction::ConfirmRequested,
        "show" => SessionAction::RefreshRequested,
        "help" | "?" => return Ok(Some(Command::Help)),
        "quit" | "exit" => return Ok(Some(Command::Quit)),
        _ => return Err(ParseError::UnknownCommand(word.to_string())),
    };
    Ok(Some(Command::Intent(intent)))
}

const fn argument<'a>(command: &'static str, rest: &'a str) -> Result<&'a str, ParseError> {
    if rest.is_empty() {
        Err(ParseError::MissingArgument(command))
    } else {
        Ok(rest)
    }
}

fn seat_id(raw: &str) -> SeatId {
    SeatId::new(raw.to_ascii_uppercase())
}

const fn focus_move(direction: FocusDirection) -> SessionAction {
    SessionAction::FocusMoveRequested { direction }
}

// ============================================================================
// Presenter
// ============================================================================

/// Everything the terminal shows, rebuilt from render instructions
#[derive(Debug, Default)]
struct View {
    seat_map: Option<Arc<SeatMap>>,
    booked: BTreeSet<SeatId>,
    selected: Vec<SeatId>,
    focus: Option<SeatId>,
    count: (usize, usize),
    summary: Option<BookingSummary>,
    confirm_enabled: bool,
    notification: Option<Notification>,
    receipt: Option<BookingReceipt>,
    name_prompt: bool,
}

impl View {
    fn apply(&mut self, instruction: &RenderInstruction) {
        match instruction {
            RenderInstruction::RenderSeatMap { seat_map, booked } => {
                self.seat_map = Some(Arc::clone(seat_map));
                self.booked = booked.iter().cloned().collect();
                self.selected.clear();
                self.focus = None;
            },
            RenderInstruction::RenderSelection { selected } => self.selected.clone_from(selected),
            RenderInstruction::RenderSelectionCount { selected, max } => {
                self.count = (*selected, *max);
            },
            RenderInstruction::RenderSummary(summary) => self.summary = Some(summary.clone()),
            RenderInstruction::SetConfirmEnabled(enabled) => self.confirm_enabled = *enabled,
            RenderInstruction::ShowNotification(notification) => {
                self.notification = Some(notification.clone());
            },
            RenderInstruction::DismissNotification(id) => {
                if self.notification.as_ref().is_some_and(|n| n.id == *id) {
                    self.notification = None;
                }
            },
            RenderInstruction::MarkSeatsBooked(seats) => self.booked.extend(seats.iter().cloned()),
            RenderInstruction::ShowReceipt(receipt) => self.receipt = Some(receipt.clone()),
            RenderInstruction::FocusSeat(seat_id) => self.focus = Some(seat_id.clone()),
            RenderInstruction::FocusPassengerName => self.name_prompt = true,
            RenderInstruction::ResetPassengerName => {},
        }
    }

    fn cell(&self, seat_id: &SeatId, prebooked: bool) -> String {
        let focus = if self.focus.as_ref() == Some(seat_id) { '>' } else { ' ' };
        let (open, close) = if prebooked || self.booked.contains(seat_id) {
            ('(', ')')
        } else if self.selected.contains(seat_id) {
            ('[', ']')
        } else {
            (' ', ' ')
        };
        format!("{focus}{open}{seat_id:>4}{close}")
    }

    fn draw_map(&self, out: &mut String, seat_map: &SeatMap) {
        let _ = writeln!(out, "{} seat map", seat_map.coach().label());
        for row in seat_map.rows() {
            let mut line = String::new();
            for segment in row.segments() {
                match segment {
                    RowSegment::Block { seats, .. } => {
                        for seat in &seat_map.seats()[seats.clone()] {
                            line.push_str(&self.cell(&seat.seat_id, seat.is_prebooked));
                        }
                        line.push(' ');
                    },
                    RowSegment::Aisle => line.push_str(" | "),
                }
            }
            let _ = writeln!(out, "  {}", line.trim_end());
        }
        let mut berths: Vec<BerthType> = Vec::new();
        for berth in seat_map.seats().iter().filter_map(|seat| seat.berth) {
            if !berths.contains(&berth) {
                berths.push(berth);
            }
        }
        if !berths.is_empty() {
            let legend = berths
                .iter()
                .map(|berth| format!("{} {}", berth.code(), berth.name()))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(out, "  Berths: {legend}");
        }
    }

    fn draw(&mut self) -> String {
        let mut out = String::new();
        if let Some(receipt) = self.receipt.take() {
            let _ = writeln!(out, "{receipt}\n");
        }
        if let Some(seat_map) = self.seat_map.clone() {
            self.draw_map(&mut out, &seat_map);
        }
        let (selected, max) = self.count;
        let _ = writeln!(out, "Selected {selected} / {max}");
        if let Some(summary) = &self.summary {
            let _ = writeln!(out, "Passenger: {}", summary.passenger_display());
            let _ = writeln!(out, "Coach: {}", summary.coach_label);
            let _ = writeln!(out, "Seats: {}", summary.seats_display());
        }
        let _ = writeln!(
            out,
            "Confirm: {}",
            if self.confirm_enabled { "ready" } else { "disabled" }
        );
        if let Some(notification) = &self.notification {
            let _ = writeln!(out, "[{}] {}", notification.severity, notification.message);
        }
        if std::mem::take(&mut self.name_prompt) {
            let _ = writeln!(out, "> name TEXT");
        }
        out
    }
}

/// Presenter drawing the form as ASCII text
pub struct TerminalPresenter<W> {
    inner: Mutex<(View, W)>,
}

impl<W: Write + Send> TerminalPresenter<W> {
    /// Creates a presenter writing to `out`
    pub fn new(out: W) -> Self {
        Self {
            inner: Mutex::new((View::default(), out)),
        }
    }

    /// Consumes the presenter, returning its writer
    pub fn into_inner(self) -> W {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner).1
    }

    fn flush(view: &mut View, out: &mut W) {
        let frame = view.draw();
        if let Err(error) = out.write_all(frame.as_bytes()).and_then(|()| out.flush()) {
            tracing::warn!(%error, "Failed to draw seat map");
        }
    }
}

impl<W: Write + Send> Presenter for TerminalPresenter<W> {
    fn render(&self, instructions: &[RenderInstruction]) {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let (view, out) = &mut *guard;
        for instruction in instructions {
            view.apply(instruction);
        }
        let only_dismissals = instructions
            .iter()
            .all(|i| matches!(i, RenderInstruction::DismissNotification(_)));
        if !only_dismissals {
            Self::flush(view, out);
        }
    }
}
