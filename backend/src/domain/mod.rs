//! Domain primitives and the booking core.
//!
//! Purpose: Define the club and competition records, the booking event
//! history and the rules that decide whether a booking may be committed.
//! Nothing in this module performs I/O directly; durable storage is reached
//! through the [`ports::BookingLog`] port.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Club / Competition: mutable counters for points and places.
//! - BookingEvent: one committed booking in the durable history.
//! - validate_booking: pure rule evaluation over a booking request.
//! - RecordStore: authoritative in-memory records plus commit.
//! - BookingService: serialised validate-then-commit over the store.

pub mod booking;
pub mod booking_service;
pub mod club;
pub mod competition;
pub mod error;
pub mod places;
pub mod ports;
pub mod store;
pub mod validation;

pub use self::booking::{BookingEvent, BookingEventValidationError};
pub use self::booking_service::{
    BOOKING_COMPLETE_MESSAGE, BookingContext, BookingError, BookingOutcome, BookingRequest,
    BookingService,
};
pub use self::club::{Club, RecordValidationError};
pub use self::competition::Competition;
pub use self::error::{Error, ErrorCode};
pub use self::places::{InvalidPlaces, PlacesRequested};
pub use self::store::{RecordStore, StoreError};
pub use self::validation::{
    BookingRejection, MAX_PLACES_PER_CLUB_PER_COMPETITION, check_booking_rules, validate_booking,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use club_booking::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
