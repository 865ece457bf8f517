//! Booking events: the immutable record of one committed booking.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Club, Competition, PlacesRequested};

/// Validation errors raised when decoding a booking event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingEventValidationError {
    /// `places` was zero.
    NoPlaces,
    /// `club_id` or `competition_id` was blank.
    EmptyReference,
}

impl fmt::Display for BookingEventValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPlaces => write!(f, "booking event must reserve at least one place"),
            Self::EmptyReference => {
                write!(f, "booking event club_id and competition_id must not be empty")
            }
        }
    }
}

impl std::error::Error for BookingEventValidationError {}

/// One committed booking of `places` places by a club on a competition.
///
/// Events reference their club by email and their competition by name; they
/// never own either record. The serialised form is the booking log entry:
/// `{"id": "...", "club_id": "...", "competition_id": "...", "places": 2}`.
///
/// # Examples
/// ```
/// use club_booking::domain::{BookingEvent, Club, Competition, PlacesRequested};
///
/// let club = Club::new("Simply Lift", "john@simplylift.co", 13).unwrap();
/// let competition = Competition::new("Spring Festival", "2020-03-27 10:00:00", 25).unwrap();
/// let places = PlacesRequested::new(3).unwrap();
/// let event = BookingEvent::record(&club, &competition, places);
/// assert_eq!(event.club_id(), "john@simplylift.co");
/// assert_eq!(event.places(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BookingEventDto")]
pub struct BookingEvent {
    id: Uuid,
    club_id: String,
    competition_id: String,
    places: u32,
}

impl BookingEvent {
    /// Build a fresh event for `places` places with a newly generated id.
    pub fn record(club: &Club, competition: &Competition, places: PlacesRequested) -> Self {
        Self {
            id: Uuid::new_v4(),
            club_id: club.email().to_owned(),
            competition_id: competition.name().to_owned(),
            places: places.get(),
        }
    }

    /// Unique event id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Email of the booking club.
    pub fn club_id(&self) -> &str {
        self.club_id.as_str()
    }

    /// Name of the booked competition.
    pub fn competition_id(&self) -> &str {
        self.competition_id.as_str()
    }

    /// Number of places reserved.
    pub fn places(&self) -> u32 {
        self.places
    }

    /// Whether this event belongs to the given club/competition pair.
    pub fn concerns(&self, club_id: &str, competition_id: &str) -> bool {
        self.club_id == club_id && self.competition_id == competition_id
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BookingEventDto {
    id: Uuid,
    club_id: String,
    competition_id: String,
    places: u32,
}

impl TryFrom<BookingEventDto> for BookingEvent {
    type Error = BookingEventValidationError;

    fn try_from(value: BookingEventDto) -> Result<Self, Self::Error> {
        let BookingEventDto {
            id,
            club_id,
            competition_id,
            places,
        } = value;
        if places == 0 {
            return Err(BookingEventValidationError::NoPlaces);
        }
        if club_id.trim().is_empty() || competition_id.trim().is_empty() {
            return Err(BookingEventValidationError::EmptyReference);
        }
        Ok(Self {
            id,
            club_id,
            competition_id,
            places,
        })
    }
}
