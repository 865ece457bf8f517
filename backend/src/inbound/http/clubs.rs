//! Club login and points API handlers.
//!
//! ```text
//! POST /api/v1/login {"email":"john@simplylift.co"}
//! POST /api/v1/logout
//! GET /api/v1/summary
//! GET /api/v1/clubs
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{ApiResult, Club, Competition, Error, ErrorCode};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    /// Contact email of the club logging in.
    pub email: String,
}

/// Logged-in club together with every competition it may book.
#[derive(Debug, Serialize)]
pub struct ClubSummary {
    /// The logged-in club.
    pub club: Club,
    /// All competitions in file order.
    pub competitions: Vec<Competition>,
}

async fn summary_for(state: &HttpState, email: String) -> ApiResult<ClubSummary> {
    let club = state
        .run(move |service| service.club_by_email(&email))
        .await
        .map_err(|err| {
            if err.code() == ErrorCode::NotFound {
                Error::unauthorized("Sorry, that email was not found.")
            } else {
                err
            }
        })?;
    let competitions = state.run(|service| service.competitions()).await?;
    Ok(ClubSummary { club, competitions })
}

/// Log a club in by its contact email and return its summary.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<ClubSummary>> {
    let email = payload.into_inner().email.trim().to_owned();
    if email.is_empty() {
        return Err(Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })));
    }
    let club_summary = summary_for(&state, email).await?;
    session.persist_club(&club_summary.club)?;
    info!(club = club_summary.club.name(), "club logged in");
    Ok(web::Json(club_summary))
}

/// End the current session.
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::Ok().finish()
}

/// Summary for the logged-in club.
#[get("/summary")]
pub async fn summary(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ClubSummary>> {
    let email = session.require_club_email()?;
    let club_summary = summary_for(&state, email).await.inspect_err(|err| {
        if err.code() == ErrorCode::Unauthorized {
            session.clear();
        }
    })?;
    Ok(web::Json(club_summary))
}

/// Public points board listing every club in file order.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use club_booking::inbound::http::clubs::points_board;
///
/// let app = App::new().service(points_board);
/// ```
#[get("/clubs")]
pub async fn points_board(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Club>>> {
    let clubs = state.run(|service| service.clubs()).await?;
    Ok(web::Json(clubs))
}
