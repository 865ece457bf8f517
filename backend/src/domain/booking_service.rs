//! Booking orchestration over the shared record store.
//!
//! A booking request is resolved, validated and committed as one unit while
//! the store-wide lock is held, so concurrent requests observe each other's
//! effects and can never oversubscribe points, places or the per-club cap.
//! The lock covers the whole store because club points are shared across
//! competitions.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info};

use super::ports::{BookingLog, BookingLogError};
use super::store::{RecordStore, StoreError};
use super::{BookingEvent, BookingRejection, Club, Competition, Error, validate_booking};

/// Message shown after a successful booking.
pub const BOOKING_COMPLETE_MESSAGE: &str = "Great-booking complete!";

/// Raw booking request as submitted by a club.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    /// Booking club name.
    pub club: String,
    /// Target competition name.
    pub competition: String,
    /// Unparsed place count from the form.
    pub places: String,
}

/// Club and competition a booking form is shown for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingContext {
    /// The booking club.
    pub club: Club,
    /// The competition being booked.
    pub competition: Competition,
}

/// Result of a booking request that reached validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    /// The booking was committed.
    Booked {
        /// Club and competition after the commit.
        context: BookingContext,
        /// The recorded event.
        event: BookingEvent,
    },
    /// The booking was refused; nothing changed.
    Rejected {
        /// Club and competition as they stand.
        context: BookingContext,
        /// The single applicable reason.
        reason: BookingRejection,
    },
}

impl BookingOutcome {
    /// User-facing message for this outcome.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Booked { .. } => BOOKING_COMPLETE_MESSAGE,
            Self::Rejected { reason, .. } => reason.message(),
        }
    }

    /// Club and competition to redisplay.
    pub fn context(&self) -> &BookingContext {
        match self {
            Self::Booked { context, .. } | Self::Rejected { context, .. } => context,
        }
    }
}

/// Failures that prevent a booking request from producing an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// The club or competition could not be resolved.
    #[error(transparent)]
    Lookup(StoreError),
    /// The booking log write failed; in-memory state is unchanged.
    #[error("booking could not be persisted: {0}")]
    Persistence(#[source] BookingLogError),
    /// A previous holder of the store lock panicked.
    #[error("record store is unavailable")]
    StoreUnavailable,
}

impl From<StoreError> for BookingError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Persistence(source) => Self::Persistence(source),
            other => Self::Lookup(other),
        }
    }
}

impl From<BookingError> for Error {
    fn from(value: BookingError) -> Self {
        match value {
            BookingError::Lookup(lookup) => {
                if matches!(
                    lookup,
                    StoreError::ClubNotFound { .. }
                        | StoreError::ClubEmailNotFound { .. }
                        | StoreError::CompetitionNotFound { .. }
                ) {
                    Self::not_found(lookup.to_string())
                } else {
                    Self::internal(lookup.to_string())
                }
            }
            BookingError::Persistence(source) => {
                Self::service_unavailable(format!("booking log unavailable: {source}"))
            }
            BookingError::StoreUnavailable => Self::internal("record store is unavailable"),
        }
    }
}

/// Booking service owning the shared store and the booking log port.
pub struct BookingService {
    store: Mutex<RecordStore>,
    log: Arc<dyn BookingLog>,
}

impl BookingService {
    /// Create a service over a loaded store and its durable log.
    pub fn new(store: RecordStore, log: Arc<dyn BookingLog>) -> Self {
        Self {
            store: Mutex::new(store),
            log,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, RecordStore>, BookingError> {
        self.store.lock().map_err(|_| {
            error!("record store lock poisoned");
            BookingError::StoreUnavailable
        })
    }

    /// Resolve, validate and commit a booking request.
    ///
    /// Business-rule and shape-check failures are returned as
    /// [`BookingOutcome::Rejected`]; only unresolvable records and log
    /// failures are errors.
    ///
    /// # Errors
    ///
    /// - [`BookingError::Lookup`] when the club or competition is unknown.
    /// - [`BookingError::Persistence`] when the booking log cannot be written.
    /// - [`BookingError::StoreUnavailable`] when the store lock is poisoned.
    pub fn book(&self, request: &BookingRequest) -> Result<BookingOutcome, BookingError> {
        let mut store = self.lock()?;
        let club = store.find_club_by_name(&request.club)?.clone();
        let competition = store
            .find_competition_by_name(&request.competition)?
            .clone();
        let history = store.bookings_for(club.email(), competition.name());

        let places = match validate_booking(&request.places, &club, &competition, &history) {
            Ok(places) => places,
            Err(reason) => {
                debug!(
                    club = club.name(),
                    competition = competition.name(),
                    places = request.places.as_str(),
                    reason = ?reason,
                    "booking rejected"
                );
                return Ok(BookingOutcome::Rejected {
                    context: BookingContext { club, competition },
                    reason,
                });
            }
        };

        let event = store
            .commit(places, club.name(), competition.name(), self.log.as_ref())
            .map_err(|err| {
                error!(
                    club = club.name(),
                    competition = competition.name(),
                    error = %err,
                    "booking commit failed"
                );
                BookingError::from(err)
            })?;
        let context = BookingContext {
            club: store.find_club_by_name(club.name())?.clone(),
            competition: store.find_competition_by_name(competition.name())?.clone(),
        };
        info!(
            booking_id = %event.id(),
            club = context.club.name(),
            competition = context.competition.name(),
            places = event.places(),
            points_left = context.club.points(),
            places_left = context.competition.number_of_places(),
            "booking committed"
        );
        Ok(BookingOutcome::Booked { context, event })
    }

    /// Resolve the club and competition a booking form is shown for.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Lookup`] when either name is unknown.
    pub fn booking_context(
        &self,
        club_name: &str,
        competition_name: &str,
    ) -> Result<BookingContext, BookingError> {
        let store = self.lock()?;
        Ok(BookingContext {
            club: store.find_club_by_name(club_name)?.clone(),
            competition: store.find_competition_by_name(competition_name)?.clone(),
        })
    }

    /// Find the club registered under a login email.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Lookup`] when no club uses the email.
    pub fn club_by_email(&self, email: &str) -> Result<Club, BookingError> {
        let store = self.lock()?;
        Ok(store.find_club_by_email(email)?.clone())
    }

    /// Snapshot of every club in load order.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::StoreUnavailable`] when the lock is poisoned.
    pub fn clubs(&self) -> Result<Vec<Club>, BookingError> {
        Ok(self.lock()?.clubs().to_vec())
    }

    /// Snapshot of every competition in load order.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::StoreUnavailable`] when the lock is poisoned.
    pub fn competitions(&self) -> Result<Vec<Competition>, BookingError> {
        Ok(self.lock()?.competitions().to_vec())
    }

    /// Snapshot of the booking history in commit order.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::StoreUnavailable`] when the lock is poisoned.
    pub fn bookings(&self) -> Result<Vec<BookingEvent>, BookingError> {
        Ok(self.lock()?.bookings().to_vec())
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
