//! Domain ports for the hexagonal boundary.

mod booking_log;

#[cfg(test)]
pub use booking_log::MockBookingLog;
pub use booking_log::{BookingLog, BookingLogError, InMemoryBookingLog};
