//! File-backed persistence adapters.
//!
//! The club and competition files are read once at startup. The booking log
//! is the only file written at runtime; it implements the domain
//! [`BookingLog`](crate::domain::ports::BookingLog) port and is replaced
//! atomically on each commit.

mod atomic_io;
mod json_booking_log;
mod json_records;

pub use json_booking_log::{JsonFileBookingLog, decode_booking_document, encode_booking_document};
pub use json_records::{
    RecordLoadError, clubs_from_json, competitions_from_json, load_clubs, load_competitions,
    load_record_store,
};
