//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! A logged-in club is identified by its email, the same key recorded as
//! `club_id` on booking events.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Club, Error};

pub(crate) const CLUB_EMAIL_KEY: &str = "club_email";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Remember `club` as the logged-in club.
    pub fn persist_club(&self, club: &Club) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(CLUB_EMAIL_KEY, club.email())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Email of the logged-in club, if any.
    pub fn club_email(&self) -> Result<Option<String>, Error> {
        let email = self
            .0
            .get::<String>(CLUB_EMAIL_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(email.filter(|email| {
            let usable = !email.trim().is_empty();
            if !usable {
                tracing::warn!("blank club email in session cookie");
            }
            usable
        }))
    }

    /// Require a logged-in club or return `401 Unauthorized`.
    pub fn require_club_email(&self) -> Result<String, Error> {
        self.club_email()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop every value held in the session.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
