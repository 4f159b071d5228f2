//! Dependencies injected into the session reducer.

use crate::catalog::SeatCatalog;
use crate::render::{Presenter, RenderQueue};
use seating_core::environment::Clock;
use std::sync::Arc;
use std::time::Duration;

/// How long a notification stays visible unless configured otherwise
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Environment for the session reducer
#[derive(Clone)]
pub struct SessionEnvironment {
    /// Timestamps for notifications
    pub clock: Arc<dyn Clock>,
    /// Orders render batches in front of the presenter
    pub renderer: Arc<RenderQueue>,
    /// Coach configuration used to build seat maps
    pub catalog: Arc<SeatCatalog>,
    /// Display time of a notification
    pub notification_ttl: Duration,
}

impl SessionEnvironment {
    /// Creates a new `SessionEnvironment` with the default notification time
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        presenter: Arc<dyn Presenter>,
        catalog: Arc<SeatCatalog>,
    ) -> Self {
        Self {
            clock,
            renderer: Arc::new(RenderQueue::new(presenter)),
            catalog,
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }

    /// Overrides the notification display time
    #[must_use]
    pub fn with_notification_ttl(mut self, ttl: Duration) -> Self {
        self.notification_ttl = ttl;
        self
    }
}
