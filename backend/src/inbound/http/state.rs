//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data`. The booking
//! core is synchronous, so every call is moved onto Actix's blocking pool.

use std::sync::Arc;

use actix_web::web;
use tracing::error;

use crate::domain::{ApiResult, BookingError, BookingService, Error};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    bookings: Arc<BookingService>,
}

impl HttpState {
    /// Wrap the shared booking service.
    pub fn new(bookings: Arc<BookingService>) -> Self {
        Self { bookings }
    }

    /// Run `operation` against the booking service on the blocking pool and
    /// translate its failure into a domain [`Error`].
    pub async fn run<T, F>(&self, operation: F) -> ApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&BookingService) -> Result<T, BookingError> + Send + 'static,
    {
        let bookings = Arc::clone(&self.bookings);
        web::block(move || operation(&bookings))
            .await
            .map_err(|err| {
                error!(error = %err, "booking worker failed");
                Error::internal("booking worker failed")
            })?
            .map_err(Error::from)
    }
}
