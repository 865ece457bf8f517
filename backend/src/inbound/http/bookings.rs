//! Booking API handlers.
//!
//! ```text
//! GET /api/v1/book/{competition}/{club}
//! POST /api/v1/purchases club=Simply+Lift&competition=Spring+Festival&places=2
//! ```
//!
//! A refused booking is a normal outcome and answers `200 OK` with
//! `"status": "rejected"`; only unresolved records, missing sessions and log
//! failures produce error responses.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    ApiResult, BookingContext, BookingEvent, BookingOutcome, BookingRejection, BookingRequest,
    Club, Competition, Error, ErrorCode,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Form body for `POST /api/v1/purchases`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PurchaseForm {
    /// Name of the booking club.
    pub club: String,
    /// Name of the competition to book.
    pub competition: String,
    /// Requested places exactly as typed.
    pub places: String,
}

impl From<PurchaseForm> for BookingRequest {
    fn from(form: PurchaseForm) -> Self {
        Self {
            club: form.club,
            competition: form.competition,
            places: form.places,
        }
    }
}

/// Response body for `POST /api/v1/purchases`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PurchaseResponse {
    /// Places were booked.
    Booked {
        /// Confirmation message.
        message: &'static str,
        /// Club after spending points.
        club: Club,
        /// Competition after reserving places.
        competition: Competition,
        /// The recorded booking.
        booking: BookingEvent,
    },
    /// The booking was refused and nothing changed.
    Rejected {
        /// Why the booking was refused.
        message: &'static str,
        /// Stable reason code.
        reason: BookingRejection,
        /// Club as it stands.
        club: Club,
        /// Competition as it stands.
        competition: Competition,
    },
}

impl From<BookingOutcome> for PurchaseResponse {
    fn from(outcome: BookingOutcome) -> Self {
        let message = outcome.message();
        match outcome {
            BookingOutcome::Booked { context, event } => Self::Booked {
                message,
                club: context.club,
                competition: context.competition,
                booking: event,
            },
            BookingOutcome::Rejected { context, reason } => Self::Rejected {
                message,
                reason,
                club: context.club,
                competition: context.competition,
            },
        }
    }
}

/// Club and competition to show on a booking form.
#[get("/book/{competition}/{club}")]
pub async fn booking_form(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<BookingContext>> {
    let (competition, club) = path.into_inner();
    let context = state
        .run(move |service| service.booking_context(&club, &competition))
        .await?;
    Ok(web::Json(context))
}

/// Book places for the logged-in club.
#[post("/purchases")]
pub async fn purchase_places(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<PurchaseForm>,
) -> ApiResult<web::Json<PurchaseResponse>> {
    let email = session.require_club_email()?;
    let request = BookingRequest::from(form.into_inner());

    let logged_in = state
        .run(move |service| service.club_by_email(&email))
        .await
        .map_err(|err| {
            if err.code() == ErrorCode::NotFound {
                Error::unauthorized("login required")
            } else {
                err
            }
        })?;
    if logged_in.name() != request.club {
        return Err(Error::forbidden("clubs may only book places for themselves"));
    }

    let outcome = state.run(move |service| service.book(&request)).await?;
    Ok(web::Json(PurchaseResponse::from(outcome)))
}
