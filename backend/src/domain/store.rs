//! In-memory record store for clubs, competitions and booking events.
//!
//! The store owns all three collections for the life of the process. Lookups
//! are linear scans over small collections in insertion order; construction
//! rejects duplicate keys so name and email lookups are unambiguous.

use std::collections::HashSet;

use thiserror::Error;

use super::ports::{BookingLog, BookingLogError};
use super::{BookingEvent, Club, Competition, PlacesRequested};

/// Errors raised by record store lookups, construction and commits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No club has the requested name.
    #[error("club '{name}' not found")]
    ClubNotFound {
        /// Name that was looked up.
        name: String,
    },
    /// No club has the requested email.
    #[error("no club is registered with email '{email}'")]
    ClubEmailNotFound {
        /// Email that was looked up.
        email: String,
    },
    /// No competition has the requested name.
    #[error("competition '{name}' not found")]
    CompetitionNotFound {
        /// Name that was looked up.
        name: String,
    },
    /// Two clubs share a name.
    #[error("duplicate club name '{name}'")]
    DuplicateClubName {
        /// The repeated name.
        name: String,
    },
    /// Two clubs share an email.
    #[error("duplicate club email '{email}'")]
    DuplicateClubEmail {
        /// The repeated email.
        email: String,
    },
    /// Two competitions share a name.
    #[error("duplicate competition name '{name}'")]
    DuplicateCompetitionName {
        /// The repeated name.
        name: String,
    },
    /// The booking log could not be persisted.
    #[error(transparent)]
    Persistence(#[from] BookingLogError),
}

/// Owner of the club, competition and booking collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    clubs: Vec<Club>,
    competitions: Vec<Competition>,
    bookings: Vec<BookingEvent>,
}

impl RecordStore {
    /// Build a store from loaded records.
    ///
    /// # Errors
    ///
    /// Returns a `Duplicate*` variant when two clubs share a name or email, or
    /// two competitions share a name.
    pub fn new(
        clubs: Vec<Club>,
        competitions: Vec<Competition>,
        bookings: Vec<BookingEvent>,
    ) -> Result<Self, StoreError> {
        let mut names = HashSet::new();
        let mut emails = HashSet::new();
        for club in &clubs {
            if !names.insert(club.name()) {
                return Err(StoreError::DuplicateClubName {
                    name: club.name().to_owned(),
                });
            }
            if !emails.insert(club.email()) {
                return Err(StoreError::DuplicateClubEmail {
                    email: club.email().to_owned(),
                });
            }
        }

        let mut competition_names = HashSet::new();
        for competition in &competitions {
            if !competition_names.insert(competition.name()) {
                return Err(StoreError::DuplicateCompetitionName {
                    name: competition.name().to_owned(),
                });
            }
        }

        Ok(Self {
            clubs,
            competitions,
            bookings,
        })
    }

    /// Clubs in load order.
    pub fn clubs(&self) -> &[Club] {
        &self.clubs
    }

    /// Competitions in load order.
    pub fn competitions(&self) -> &[Competition] {
        &self.competitions
    }

    /// Every booking event in commit order.
    pub fn bookings(&self) -> &[BookingEvent] {
        &self.bookings
    }

    /// Find a club by its display name.
    pub fn find_club_by_name(&self, name: &str) -> Result<&Club, StoreError> {
        self.clubs
            .iter()
            .find(|club| club.name() == name)
            .ok_or_else(|| StoreError::ClubNotFound {
                name: name.to_owned(),
            })
    }

    /// Find a club by its login email.
    pub fn find_club_by_email(&self, email: &str) -> Result<&Club, StoreError> {
        self.clubs
            .iter()
            .find(|club| club.email() == email)
            .ok_or_else(|| StoreError::ClubEmailNotFound {
                email: email.to_owned(),
            })
    }

    /// Find a competition by name.
    pub fn find_competition_by_name(&self, name: &str) -> Result<&Competition, StoreError> {
        self.competitions
            .iter()
            .find(|competition| competition.name() == name)
            .ok_or_else(|| StoreError::CompetitionNotFound {
                name: name.to_owned(),
            })
    }

    /// Booking events recorded for one club (by email) on one competition.
    pub fn bookings_for(&self, club_id: &str, competition_id: &str) -> Vec<BookingEvent> {
        self.bookings
            .iter()
            .filter(|event| event.concerns(club_id, competition_id))
            .cloned()
            .collect()
    }

    /// Durably append `event` to the booking log.
    ///
    /// The complete updated log is persisted before the in-memory sequence
    /// changes, so a failed write leaves the store exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns the adapter's [`BookingLogError`] when the write fails.
    pub fn append_booking(
        &mut self,
        event: BookingEvent,
        log: &dyn BookingLog,
    ) -> Result<(), BookingLogError> {
        persist_appended(&mut self.bookings, event, log)
    }

    /// Apply an already-validated booking.
    ///
    /// Both records are resolved before anything is written. The new event is
    /// persisted next; club points and competition places are only reduced
    /// once the log write succeeded.
    ///
    /// # Errors
    ///
    /// Returns a `*NotFound` variant when either record is missing, or
    /// [`StoreError::Persistence`] when the log write fails. No state changes
    /// in either case.
    pub fn commit(
        &mut self,
        places: PlacesRequested,
        club_name: &str,
        competition_name: &str,
        log: &dyn BookingLog,
    ) -> Result<BookingEvent, StoreError> {
        let club = self
            .clubs
            .iter_mut()
            .find(|club| club.name() == club_name)
            .ok_or_else(|| StoreError::ClubNotFound {
                name: club_name.to_owned(),
            })?;
        let competition = self
            .competitions
            .iter_mut()
            .find(|competition| competition.name() == competition_name)
            .ok_or_else(|| StoreError::CompetitionNotFound {
                name: competition_name.to_owned(),
            })?;
        let event = BookingEvent::record(club, competition, places);

        persist_appended(&mut self.bookings, event.clone(), log)?;

        club.spend_points(places.get());
        competition.reserve_places(places.get());
        Ok(event)
    }
}

fn persist_appended(
    bookings: &mut Vec<BookingEvent>,
    event: BookingEvent,
    log: &dyn BookingLog,
) -> Result<(), BookingLogError> {
    let mut updated = Vec::with_capacity(bookings.len() + 1);
    updated.extend_from_slice(bookings);
    updated.push(event);
    log.persist(&updated)?;
    *bookings = updated;
    Ok(())
}
