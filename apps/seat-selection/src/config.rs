//! Configuration management for the seat selection binary.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::error::ParseError;
use crate::types::{CoachType, PartySize};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Booking form configuration
    pub session: SessionConfig,
    /// Log level (trace, debug, info, warn, error), used when `RUST_LOG` is unset
    pub log_level: String,
}

/// Booking form configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Coach type shown on start
    pub default_coach: CoachType,
    /// Party size on start
    pub default_party_size: PartySize,
    /// Largest party size the form accepts
    pub max_party_size: PartySize,
    /// Notification display time in milliseconds (default: 3000)
    pub notification_ttl_ms: u64,
}

impl SessionConfig {
    /// Notification display time
    #[must_use]
    pub const fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    /// Checks a requested party size against the configured maximum
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::PartyTooLarge`] above `max_party_size`.
    pub const fn check_party_size(&self, size: PartySize) -> Result<PartySize, ParseError> {
        if size.get() > self.max_party_size.get() {
            return Err(ParseError::PartyTooLarge {
                requested: size.get(),
                max: self.max_party_size.get(),
            });
        }
        Ok(size)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable variables fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_party_size = lookup("SEATING_MAX_PARTY_SIZE")
            .and_then(|s| s.parse::<PartySize>().ok())
            .unwrap_or(PartySize::new(6).unwrap_or(PartySize::ONE));
        let default_party_size = lookup("SEATING_DEFAULT_PARTY_SIZE")
            .and_then(|s| s.parse::<PartySize>().ok())
            .unwrap_or(PartySize::ONE)
            .min(max_party_size);

        Self {
            session: SessionConfig {
                default_coach: lookup("SEATING_DEFAULT_COACH")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(CoachType::ChairCar),
                default_party_size,
                max_party_size,
                notification_ttl_ms: lookup("SEATING_NOTIFICATION_TTL_MS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3000),
            },
            log_level: lookup("SEATING_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        }
    }
}
