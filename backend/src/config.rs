//! Service configuration loaded via OrthoConfig.
//!
//! Values are layered from CLI flags, `BOOKING_*` environment variables and
//! configuration files. Every path falls back to the crate's `fixtures/`
//! directory so a bare `cargo run` serves the sample records.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

fn fixture_path(file_name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(file_name)
}

/// Configuration for the booking service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOOKING")]
pub struct BookingSettings {
    /// Path of the clubs record file.
    pub clubs_path: Option<PathBuf>,
    /// Path of the competitions record file.
    pub competitions_path: Option<PathBuf>,
    /// Path of the booking log; created on the first commit.
    pub bookings_path: Option<PathBuf>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Mark session cookies `Secure`; defaults to `true` when unset.
    pub cookie_secure: Option<bool>,
}

impl BookingSettings {
    /// Return the clubs file path, falling back to the bundled fixture.
    pub fn clubs_path(&self) -> PathBuf {
        self.clubs_path
            .clone()
            .unwrap_or_else(|| fixture_path("clubs.json"))
    }

    /// Return the competitions file path, falling back to the bundled fixture.
    pub fn competitions_path(&self) -> PathBuf {
        self.competitions_path
            .clone()
            .unwrap_or_else(|| fixture_path("competitions.json"))
    }

    /// Return the booking log path, falling back to the bundled fixture.
    pub fn bookings_path(&self) -> PathBuf {
        self.bookings_path
            .clone()
            .unwrap_or_else(|| fixture_path("bookings.json"))
    }

    /// Return the bind address, falling back to loopback port 8080.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Whether session cookies carry the `Secure` flag.
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for booking configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> BookingSettings {
        BookingSettings::load_from_iter([OsString::from("club-booking")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("BOOKING_CLUBS_PATH", None::<String>),
            ("BOOKING_COMPETITIONS_PATH", None::<String>),
            ("BOOKING_BOOKINGS_PATH", None::<String>),
            ("BOOKING_BIND_ADDR", None::<String>),
            ("BOOKING_COOKIE_SECURE", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.clubs_path(), fixture_path("clubs.json"));
        assert_eq!(settings.competitions_path(), fixture_path("competitions.json"));
        assert_eq!(settings.bookings_path(), fixture_path("bookings.json"));
        assert_eq!(settings.bind_addr(), DEFAULT_BIND_ADDR);
        assert!(settings.cookie_secure());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("BOOKING_CLUBS_PATH", Some("/srv/booking/clubs.json".to_owned())),
            (
                "BOOKING_COMPETITIONS_PATH",
                Some("/srv/booking/competitions.json".to_owned()),
            ),
            (
                "BOOKING_BOOKINGS_PATH",
                Some("/var/lib/booking/bookings.json".to_owned()),
            ),
            ("BOOKING_BIND_ADDR", Some("0.0.0.0:9000".to_owned())),
            ("BOOKING_COOKIE_SECURE", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.clubs_path(), PathBuf::from("/srv/booking/clubs.json"));
        assert_eq!(
            settings.competitions_path(),
            PathBuf::from("/srv/booking/competitions.json")
        );
        assert_eq!(
            settings.bookings_path(),
            PathBuf::from("/var/lib/booking/bookings.json")
        );
        assert_eq!(settings.bind_addr(), "0.0.0.0:9000");
        assert!(!settings.cookie_secure());
    }
}
