//! Loaders for the club and competition record files.
//!
//! Clubs live in `{"clubs": [{"name", "email", "points"}]}` and competitions
//! in `{"competitions": [{"name", "date", "numberOfPlaces"}]}`. Counts are
//! historically stored as digit strings (`"13"`), so both a string of ASCII
//! digits and a JSON integer are accepted.

use std::fs;
use std::path::PathBuf;

use camino::Utf8Path;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{BookingLog, BookingLogError};
use crate::domain::{Club, Competition, RecordStore, RecordValidationError, StoreError};

/// Errors raised while loading the record files into a store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordLoadError {
    /// A record file could not be read.
    #[error("failed to read record file at '{path}': {message}")]
    Io {
        /// Path of the record file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },
    /// A record file is malformed or has unexpected fields.
    #[error("invalid record JSON: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
    },
    /// An entry parsed but breaks a record invariant.
    #[error("invalid record at index {index}: {source}")]
    InvalidRecord {
        /// Position of the entry in its file.
        index: usize,
        /// The violated invariant.
        #[source]
        source: RecordValidationError,
    },
    /// The records collide on a lookup key.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The booking history could not be read.
    #[error(transparent)]
    BookingLog(#[from] BookingLogError),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawClubs {
    clubs: Vec<RawClub>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawClub {
    name: String,
    email: String,
    #[serde(deserialize_with = "count")]
    points: u32,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCompetitions {
    competitions: Vec<RawCompetition>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct RawCompetition {
    name: String,
    date: String,
    #[serde(deserialize_with = "count")]
    number_of_places: u32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Integer(i64),
    Text(String),
}

fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match RawCount::deserialize(deserializer)? {
        RawCount::Integer(value) => u32::try_from(value)
            .map_err(|_| de::Error::custom(format!("count {value} is out of range"))),
        RawCount::Text(text) => {
            if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
                return Err(de::Error::custom(format!(
                    "count '{text}' is not a non-negative integer"
                )));
            }
            text.parse()
                .map_err(|_| de::Error::custom(format!("count '{text}' is out of range")))
        }
    }
}

fn read(path: &Utf8Path) -> Result<String, RecordLoadError> {
    fs::read_to_string(path).map_err(|err| RecordLoadError::Io {
        path: path.as_std_path().to_path_buf(),
        message: err.to_string(),
    })
}

fn parse_error(err: &serde_json::Error) -> RecordLoadError {
    RecordLoadError::Parse {
        message: err.to_string(),
    }
}

/// Parse a clubs document.
///
/// # Examples
/// ```
/// use club_booking::outbound::persistence::clubs_from_json;
///
/// let clubs = clubs_from_json(
///     r#"{"clubs": [{"name": "Simply Lift", "email": "john@simplylift.co", "points": "13"}]}"#,
/// )
/// .expect("valid clubs");
/// assert_eq!(clubs[0].points(), 13);
/// ```
///
/// # Errors
///
/// Returns [`RecordLoadError::Parse`] for malformed JSON or counts, and
/// [`RecordLoadError::InvalidRecord`] when a club fails validation.
pub fn clubs_from_json(json: &str) -> Result<Vec<Club>, RecordLoadError> {
    let raw: RawClubs = serde_json::from_str(json).map_err(|err| parse_error(&err))?;
    raw.clubs
        .into_iter()
        .enumerate()
        .map(|(index, club)| {
            Club::new(club.name, club.email, club.points)
                .map_err(|source| RecordLoadError::InvalidRecord { index, source })
        })
        .collect()
}

/// Parse a competitions document.
///
/// # Errors
///
/// Returns [`RecordLoadError::Parse`] for malformed JSON or counts, and
/// [`RecordLoadError::InvalidRecord`] when a competition fails validation.
pub fn competitions_from_json(json: &str) -> Result<Vec<Competition>, RecordLoadError> {
    let raw: RawCompetitions = serde_json::from_str(json).map_err(|err| parse_error(&err))?;
    raw.competitions
        .into_iter()
        .enumerate()
        .map(|(index, competition)| {
            Competition::new(competition.name, competition.date, competition.number_of_places)
                .map_err(|source| RecordLoadError::InvalidRecord { index, source })
        })
        .collect()
}

/// Read and parse the clubs file.
///
/// # Errors
///
/// Returns [`RecordLoadError::Io`] when the file cannot be read, otherwise
/// the errors of [`clubs_from_json`].
pub fn load_clubs(path: &Utf8Path) -> Result<Vec<Club>, RecordLoadError> {
    clubs_from_json(&read(path)?)
}

/// Read and parse the competitions file.
///
/// # Errors
///
/// Returns [`RecordLoadError::Io`] when the file cannot be read, otherwise
/// the errors of [`competitions_from_json`].
pub fn load_competitions(path: &Utf8Path) -> Result<Vec<Competition>, RecordLoadError> {
    competitions_from_json(&read(path)?)
}

/// Build the record store from both record files and the booking history.
///
/// Points and places are taken from the record files as-is; the history only
/// feeds the per-club cap.
///
/// # Errors
///
/// Returns the first loading, history or key-collision failure.
pub fn load_record_store(
    clubs_path: &Utf8Path,
    competitions_path: &Utf8Path,
    log: &dyn BookingLog,
) -> Result<RecordStore, RecordLoadError> {
    let clubs = load_clubs(clubs_path)?;
    let competitions = load_competitions(competitions_path)?;
    let bookings = log.load()?;
    info!(
        clubs = clubs.len(),
        competitions = competitions.len(),
        bookings = bookings.len(),
        "records loaded"
    );
    Ok(RecordStore::new(clubs, competitions, bookings)?)
}
