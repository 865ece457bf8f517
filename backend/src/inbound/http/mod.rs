//! HTTP inbound adapter exposing the booking REST endpoints.

pub mod bookings;
pub mod clubs;
pub mod error;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use crate::domain::ApiResult;
