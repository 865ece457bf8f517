//! Club competition booking service.
//!
//! Clubs spend points to reserve places in competitions. The [`domain`]
//! module holds the records and booking rules, [`outbound`] persists them as
//! JSON files, and [`inbound`] exposes them over HTTP.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
