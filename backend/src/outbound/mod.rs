//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: JSON record files and the atomically rewritten booking
//!   log.
//!
//! Adapters are thin translators between domain types and their on-disk
//! representation. They contain no booking rules.

pub mod persistence;
