//! Booking validation: the side-effect-free decision whether a booking may
//! proceed.
//!
//! Rules run in a fixed precedence order and the first failure wins, so a
//! request always yields exactly one rejection:
//!
//! 1. shape check of the raw text ([`BookingRejection::InvalidInput`])
//! 2. club points ([`BookingRejection::InsufficientPoints`])
//! 3. competition still open ([`BookingRejection::CompetitionClosed`])
//! 4. remaining capacity ([`BookingRejection::InsufficientCapacity`])
//! 5. per-club cap on the competition
//!    ([`BookingRejection::PerClubCompetitionCapExceeded`])

use std::fmt;

use serde::Serialize;

use super::{BookingEvent, Club, Competition, PlacesRequested};

/// Maximum places one club may hold on one competition across all bookings.
pub const MAX_PLACES_PER_CLUB_PER_COMPETITION: u32 = 12;

/// The single reason a booking request was refused.
///
/// `Display` renders the user-facing message, which is part of the external
/// contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingRejection {
    /// The place count is not a positive base-10 integer.
    InvalidInput,
    /// The club cannot afford the requested places.
    InsufficientPoints,
    /// The competition has no places left.
    CompetitionClosed,
    /// The competition has fewer places left than requested.
    InsufficientCapacity,
    /// The club would exceed the per-competition cap.
    PerClubCompetitionCapExceeded,
}

impl BookingRejection {
    /// User-facing message for this rejection.
    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidInput => "Invalid number of places given.",
            Self::InsufficientPoints => {
                "Sorry, you do not have enough points to book this competition"
            }
            Self::CompetitionClosed => "The competition you chose is not available anymore",
            Self::InsufficientCapacity => "Sorry, not enough places available",
            Self::PerClubCompetitionCapExceeded => {
                "You can not book more than 12 places for this competition"
            }
        }
    }
}

impl fmt::Display for BookingRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Validate a raw booking request against the club, the competition and the
/// booking history.
///
/// Returns the parsed place count when every rule passes.
///
/// # Examples
/// ```
/// use club_booking::domain::{BookingRejection, Club, Competition, validate_booking};
///
/// let club = Club::new("Simply Lift", "john@simplylift.co", 10).unwrap();
/// let competition = Competition::new("Spring Festival", "2020-03-27 10:00:00", 0).unwrap();
///
/// let rejection = validate_booking("6", &club, &competition, &[]).unwrap_err();
/// assert_eq!(rejection, BookingRejection::CompetitionClosed);
/// ```
pub fn validate_booking(
    raw_places: &str,
    club: &Club,
    competition: &Competition,
    history: &[BookingEvent],
) -> Result<PlacesRequested, BookingRejection> {
    let places =
        PlacesRequested::parse(raw_places).map_err(|_| BookingRejection::InvalidInput)?;
    check_booking_rules(places, club, competition, history)?;
    Ok(places)
}

/// Apply the business rules to a place count that already passed the shape
/// check.
pub fn check_booking_rules(
    places: PlacesRequested,
    club: &Club,
    competition: &Competition,
    history: &[BookingEvent],
) -> Result<(), BookingRejection> {
    let requested = places.get();
    if requested > club.points() {
        return Err(BookingRejection::InsufficientPoints);
    }
    if !competition.is_open() {
        return Err(BookingRejection::CompetitionClosed);
    }
    if requested > competition.number_of_places() {
        return Err(BookingRejection::InsufficientCapacity);
    }
    let already_booked = places_already_booked(club, competition, history);
    if already_booked + u64::from(requested) > u64::from(MAX_PLACES_PER_CLUB_PER_COMPETITION) {
        return Err(BookingRejection::PerClubCompetitionCapExceeded);
    }
    Ok(())
}

fn places_already_booked(club: &Club, competition: &Competition, history: &[BookingEvent]) -> u64 {
    history
        .iter()
        .filter(|event| event.concerns(club.email(), competition.name()))
        .map(|event| u64::from(event.places()))
        .sum()
}
