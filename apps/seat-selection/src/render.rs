//! Presenter port: render instructions flowing out of the session reducer.
//!
//! The reducer never draws anything itself. Each reduce call produces one
//! ordered batch of [`RenderInstruction`]s, delivered to a [`Presenter`]
//! by an effect. Effects run on separate tasks, so batches go through a
//! [`RenderQueue`]: the reducer takes a [`RenderTicket`] while it holds the
//! state, and the queue hands batches to the presenter in ticket order.
//! The terminal binary ships one presenter, tests use [`RecordingPresenter`].

use crate::layout::SeatMap;
use crate::summary::{BookingReceipt, BookingSummary};
use crate::types::{NotificationId, SeatId, Severity};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// A toast shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Identifier matched against its expiry
    pub id: NotificationId,
    /// Text shown
    pub message: String,
    /// Severity
    pub severity: Severity,
    /// When the notification was raised
    pub shown_at: DateTime<Utc>,
}

/// One instruction for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderInstruction {
    /// Replace the seat map; `booked` lists seats booked this session
    RenderSeatMap {
        /// Newly generated map
        seat_map: Arc<SeatMap>,
        /// Seats to draw as booked on top of the prebooked ones
        booked: Vec<SeatId>,
    },
    /// Highlight exactly these seats as selected
    RenderSelection {
        /// Selected seats in selection order
        selected: Vec<SeatId>,
    },
    /// `Selected x / y` counter
    RenderSelectionCount {
        /// Seats selected
        selected: usize,
        /// Party size
        max: usize,
    },
    /// Summary panel
    RenderSummary(BookingSummary),
    /// Enable or disable the confirm button
    SetConfirmEnabled(bool),
    /// Show a toast, replacing any visible one
    ShowNotification(Notification),
    /// Remove a toast that expired
    DismissNotification(NotificationId),
    /// Draw these seats as booked and make them inert
    MarkSeatsBooked(Vec<SeatId>),
    /// Show the booking receipt
    ShowReceipt(BookingReceipt),
    /// Move keyboard focus to a seat
    FocusSeat(SeatId),
    /// Move keyboard focus to the passenger name input
    FocusPassengerName,
    /// Empty the passenger name input
    ResetPassengerName,
}

/// Presentation layer receiving render batches
pub trait Presenter: Send + Sync {
    /// Applies one batch of instructions in order
    fn render(&self, instructions: &[RenderInstruction]);
}

/// Forwards render batches to a presenter in the order they were issued
pub struct RenderQueue {
    presenter: Arc<dyn Presenter>,
    issued: AtomicU64,
    delivery: Mutex<Delivery>,
}

#[derive(Default)]
struct Delivery {
    next: u64,
    /// Completed tickets waiting on an earlier one; `None` marks a dropped ticket
    ready: BTreeMap<u64, Option<Vec<RenderInstruction>>>,
}

impl RenderQueue {
    /// Creates a queue in front of `presenter`
    #[must_use]
    pub fn new(presenter: Arc<dyn Presenter>) -> Self {
        Self {
            presenter,
            issued: AtomicU64::new(0),
            delivery: Mutex::new(Delivery::default()),
        }
    }

    /// Reserves the next delivery slot for `batch`
    ///
    /// Tickets are ordered by issue time, not by when they are delivered.
    #[must_use]
    pub fn issue(queue: &Arc<Self>, batch: Vec<RenderInstruction>) -> RenderTicket {
        RenderTicket {
            queue: Arc::clone(queue),
            seq: queue.issued.fetch_add(1, Ordering::SeqCst),
            batch: Some(batch),
        }
    }

    fn complete(&self, seq: u64, batch: Option<Vec<RenderInstruction>>) {
        let mut delivery = self.delivery.lock().unwrap_or_else(PoisonError::into_inner);
        delivery.ready.insert(seq, batch);
        loop {
            let next = delivery.next;
            let Some(batch) = delivery.ready.remove(&next) else {
                break;
            };
            delivery.next += 1;
            if let Some(batch) = batch {
                self.presenter.render(&batch);
            }
        }
        if !delivery.ready.is_empty() {
            tracing::trace!(
                waiting = delivery.ready.len(),
                next = delivery.next,
                "Render batches held for an earlier batch"
            );
        }
    }
}

impl fmt::Debug for RenderQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderQueue")
            .field("issued", &self.issued.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// A batch holding its place in a [`RenderQueue`]
///
/// Dropping an undelivered ticket releases its slot without rendering, so
/// later batches are not held back by an effect that never ran.
#[derive(Debug)]
pub struct RenderTicket {
    queue: Arc<RenderQueue>,
    seq: u64,
    batch: Option<Vec<RenderInstruction>>,
}

impl RenderTicket {
    /// Hands the batch to the presenter once every earlier ticket is done
    pub fn deliver(mut self) {
        let batch = self.batch.take();
        self.queue.complete(self.seq, batch);
    }
}

impl Drop for RenderTicket {
    fn drop(&mut self) {
        if self.batch.is_some() {
            self.queue.complete(self.seq, None);
        }
    }
}

/// Presenter that records every batch for assertions
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    batches: Arc<Mutex<Vec<Vec<RenderInstruction>>>>,
}

impl RecordingPresenter {
    /// Creates an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every batch received so far
    #[must_use]
    pub fn batches(&self) -> Vec<Vec<RenderInstruction>> {
        self.batches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Every instruction received so far, flattened
    #[must_use]
    pub fn instructions(&self) -> Vec<RenderInstruction> {
        self.batches().into_iter().flatten().collect()
    }

    /// Removes and returns every recorded instruction
    pub fn take(&self) -> Vec<RenderInstruction> {
        std::mem::take(&mut *self.batches.lock().unwrap_or_else(PoisonError::into_inner))
            .into_iter()
            .flatten()
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn render(&self, instructions: &[RenderInstruction]) {
        self.batches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(instructions.to_vec());
    }
}
