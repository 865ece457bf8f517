//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use super::state::HttpState;
use crate::domain::ports::InMemoryBookingLog;
use crate::domain::{BookingService, Club, Competition, RecordStore};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state over the sample clubs and competitions with an empty,
/// volatile booking log.
pub fn fixture_state() -> (HttpState, Arc<InMemoryBookingLog>) {
    let store = RecordStore::new(
        vec![
            Club::new("Simply Lift", "john@simplylift.co", 13).expect("fixture club"),
            Club::new("Iron Temple", "admin@irontemple.com", 4).expect("fixture club"),
            Club::new("She Lifts", "kate@shelifts.co.uk", 12).expect("fixture club"),
        ],
        vec![
            Competition::new("Spring Festival", "2020-03-27 10:00:00", 25)
                .expect("fixture competition"),
            Competition::new("Fall Classic", "2020-10-22 13:30:00", 13)
                .expect("fixture competition"),
            Competition::new("Winter Gala", "2020-12-12 09:00:00", 0)
                .expect("fixture competition"),
        ],
        Vec::new(),
    )
    .expect("fixture store");
    let log = Arc::new(InMemoryBookingLog::default());
    let service = BookingService::new(store, log.clone());
    (HttpState::new(Arc::new(service)), log)
}

/// Extract the session cookie set on `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// `POST /api/v1/login` request for `email`.
pub fn login_request(email: &str) -> actix_web::test::TestRequest {
    actix_web::test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(serde_json::json!({ "email": email }))
}
