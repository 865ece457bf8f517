//! Port for the durable booking event log.
//!
//! The log is stored as one document and rewritten whole on every commit, so
//! `persist` always receives the complete ordered event sequence rather than
//! a single new event.

use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use crate::domain::BookingEvent;

/// Errors raised by booking log adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingLogError {
    /// The log file could not be read or written.
    #[error("booking log I/O failed at '{path}': {message}")]
    Io {
        /// Path of the log file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },
    /// The stored log is not a valid booking document.
    #[error("booking log is malformed: {message}")]
    Decode {
        /// Description of the parse error.
        message: String,
    },
    /// The event sequence could not be serialised.
    #[error("booking log could not be encoded: {message}")]
    Encode {
        /// Description of the serialisation error.
        message: String,
    },
}

impl BookingLogError {
    /// Build an [`BookingLogError::Io`] error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Build a [`BookingLogError::Decode`] error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Build a [`BookingLogError::Encode`] error.
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }
}

/// Port for loading and durably replacing the booking event log.
#[cfg_attr(test, mockall::automock)]
pub trait BookingLog: Send + Sync {
    /// Read every stored event in log order. A log that was never written is
    /// empty.
    fn load(&self) -> Result<Vec<BookingEvent>, BookingLogError>;

    /// Replace the stored log with `events`.
    fn persist(&self, events: &[BookingEvent]) -> Result<(), BookingLogError>;
}

/// Volatile log kept in memory, for tests and for running without a log file.
#[derive(Debug, Default)]
pub struct InMemoryBookingLog {
    events: Mutex<Vec<BookingEvent>>,
}

impl InMemoryBookingLog {
    /// Start from an existing event sequence.
    pub fn with_events(events: Vec<BookingEvent>) -> Self {
        Self {
            events: Mutex::new(events),
        }
    }

    /// Snapshot of the last persisted sequence.
    pub fn persisted(&self) -> Vec<BookingEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl BookingLog for InMemoryBookingLog {
    fn load(&self) -> Result<Vec<BookingEvent>, BookingLogError> {
        Ok(self.persisted())
    }

    fn persist(&self, events: &[BookingEvent]) -> Result<(), BookingLogError> {
        let mut stored = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        stored.clear();
        stored.extend_from_slice(events);
        Ok(())
    }
}
