//! Service entry-point: loads the records and booking log, then serves the
//! booking REST endpoints.

use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use club_booking::config::BookingSettings;
use club_booking::domain::BookingService;
use club_booking::inbound::http::bookings::{booking_form, purchase_places};
use club_booking::inbound::http::clubs::{login, logout, points_board, summary};
use club_booking::inbound::http::state::HttpState;
use club_booking::outbound::persistence::{JsonFileBookingLog, load_record_store};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = BookingSettings::load()
        .map_err(|e| io::Error::other(format!("failed to load configuration: {e}")))?;
    let key = session_key()?;

    let bookings_path = utf8(settings.bookings_path())?;
    let clubs_path = utf8(settings.clubs_path())?;
    let competitions_path = utf8(settings.competitions_path())?;
    let log = JsonFileBookingLog::open(&bookings_path).map_err(io::Error::other)?;
    let store =
        load_record_store(&clubs_path, &competitions_path, &log).map_err(io::Error::other)?;
    let state = HttpState::new(Arc::new(BookingService::new(store, Arc::new(log))));

    let cookie_secure = settings.cookie_secure();
    let bind_addr = settings.bind_addr().to_owned();
    info!(
        bind_addr = %bind_addr,
        clubs = %clubs_path,
        competitions = %competitions_path,
        bookings = %bookings_path,
        "starting booking service"
    );
    HttpServer::new(move || build_app(state.clone(), key.clone(), cookie_secure))
        .bind(bind_addr)?
        .run()
        .await
}

fn utf8(path: PathBuf) -> io::Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).map_err(|path| {
        io::Error::other(format!("path '{}' is not valid UTF-8", path.display()))
    })
}

fn session_key() -> io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}

fn build_app(
    state: HttpState,
    key: Key,
    cookie_secure: bool,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(login)
        .service(logout)
        .service(summary)
        .service(points_board)
        .service(booking_form)
        .service(purchase_places);

    App::new().app_data(web::Data::new(state)).service(api)
}
