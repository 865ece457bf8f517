//! File-backed booking log.
//!
//! The log is a single JSON document, `{"booking_places": [...]}`, written
//! with two-space indentation and replaced atomically on every commit.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::atomic_io::write_atomic;
use crate::domain::BookingEvent;
use crate::domain::ports::{BookingLog, BookingLogError};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BookingDocument {
    booking_places: Vec<BookingEvent>,
}

#[derive(Serialize)]
struct BookingDocumentRef<'a> {
    booking_places: &'a [BookingEvent],
}

/// Render events as the on-disk log document.
///
/// # Errors
///
/// Returns [`BookingLogError::Encode`] when serialisation fails.
pub fn encode_booking_document(events: &[BookingEvent]) -> Result<String, BookingLogError> {
    serde_json::to_string_pretty(&BookingDocumentRef {
        booking_places: events,
    })
    .map_err(|err| BookingLogError::encode(err.to_string()))
}

/// Parse the on-disk log document.
///
/// # Errors
///
/// Returns [`BookingLogError::Decode`] when the document is malformed or an
/// entry breaks the event invariants.
pub fn decode_booking_document(json: &str) -> Result<Vec<BookingEvent>, BookingLogError> {
    serde_json::from_str::<BookingDocument>(json)
        .map(|document| document.booking_places)
        .map_err(|err| BookingLogError::decode(err.to_string()))
}

/// [`BookingLog`] adapter storing the event sequence in one JSON file.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use club_booking::domain::ports::BookingLog;
/// use club_booking::outbound::persistence::JsonFileBookingLog;
///
/// let log = JsonFileBookingLog::open(Utf8Path::new("fixtures/bookings.json"))
///     .expect("open booking log");
/// let events = log.load().expect("load booking log");
/// println!("{} bookings on record", events.len());
/// ```
#[derive(Debug)]
pub struct JsonFileBookingLog {
    dir: Dir,
    file_name: String,
    path: Utf8PathBuf,
}

impl JsonFileBookingLog {
    /// Open the log at `path`. The parent directory must exist; the file
    /// itself is created on the first commit.
    ///
    /// # Errors
    ///
    /// Returns [`BookingLogError::Io`] when `path` has no file name or the
    /// parent directory cannot be opened.
    pub fn open(path: &Utf8Path) -> Result<Self, BookingLogError> {
        let file_name = path
            .file_name()
            .ok_or_else(|| {
                BookingLogError::io(path.as_std_path(), "booking log path must name a file")
            })?
            .to_owned();
        let parent = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|err| BookingLogError::io(parent.as_std_path(), err.to_string()))?;
        Ok(Self {
            dir,
            file_name,
            path: path.to_path_buf(),
        })
    }

    /// Location of the log file.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn io_error(&self, err: &io::Error) -> BookingLogError {
        BookingLogError::io(self.path.as_std_path(), err.to_string())
    }
}

impl BookingLog for JsonFileBookingLog {
    fn load(&self) -> Result<Vec<BookingEvent>, BookingLogError> {
        match self.dir.read_to_string(&self.file_name) {
            Ok(contents) => decode_booking_document(&contents),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path, "booking log absent; starting empty");
                Ok(Vec::new())
            }
            Err(err) => Err(self.io_error(&err)),
        }
    }

    fn persist(&self, events: &[BookingEvent]) -> Result<(), BookingLogError> {
        let document = encode_booking_document(events)?;
        write_atomic(&self.dir, &self.file_name, document.as_bytes())
            .map_err(|err| self.io_error(&err))?;
        debug!(path = %self.path, events = events.len(), "booking log written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::{fixture, rstest};
    use serde_json::Value;

    use super::*;
    use crate::domain::{Club, Competition, PlacesRequested};

    fn event(places: u32) -> BookingEvent {
        let club = Club::new("Simply Lift", "john@simplylift.co", 13).expect("club");
        let competition =
            Competition::new("Spring Festival", "2020-03-27 10:00:00", 25).expect("competition");
        let places = PlacesRequested::new(places).expect("non-zero places");
        BookingEvent::record(&club, &competition, places)
    }

    struct LogFixture {
        _root: tempfile::TempDir,
        path: Utf8PathBuf,
        log: JsonFileBookingLog,
    }

    #[fixture]
    fn log_fixture() -> LogFixture {
        let root = tempfile::tempdir().expect("create temp dir");
        let path = Utf8PathBuf::from_path_buf(root.path().join("bookings.json"))
            .expect("utf-8 temp path");
        let log = JsonFileBookingLog::open(&path).expect("open log");
        LogFixture {
            _root: root,
            path,
            log,
        }
    }

    #[rstest]
    fn missing_file_loads_as_empty(log_fixture: LogFixture) {
        assert!(log_fixture.log.load().expect("load").is_empty());
    }

    #[rstest]
    fn persist_writes_wrapped_pretty_document(log_fixture: LogFixture) {
        let events = vec![event(2)];

        log_fixture.log.persist(&events).expect("persist");

        let written = std::fs::read_to_string(&log_fixture.path).expect("read log");
        assert!(written.starts_with("{\n  \"booking_places\": [\n    {\n      \"id\": "));
        let value: Value = serde_json::from_str(&written).expect("valid json");
        let entry = value
            .get("booking_places")
            .and_then(Value::as_array)
            .and_then(|entries| entries.first())
            .expect("one entry");
        assert_eq!(entry.get("club_id").and_then(Value::as_str), Some("john@simplylift.co"));
        assert_eq!(entry.get("competition_id").and_then(Value::as_str), Some("Spring Festival"));
        assert_eq!(entry.get("places").and_then(Value::as_u64), Some(2));
    }

    #[rstest]
    fn persist_then_load_preserves_order(log_fixture: LogFixture) {
        let events = vec![event(1), event(5), event(3)];

        log_fixture.log.persist(&events).expect("persist");

        assert_eq!(log_fixture.log.load().expect("load"), events);
    }

    #[rstest]
    fn empty_history_is_written_as_empty_list(log_fixture: LogFixture) {
        log_fixture.log.persist(&[]).expect("persist");

        let written = std::fs::read_to_string(&log_fixture.path).expect("read log");
        assert_eq!(written, "{\n  \"booking_places\": []\n}");
    }

    #[rstest]
    #[case::not_json("not json")]
    #[case::wrong_wrapper(r#"{"bookings": []}"#)]
    #[case::zero_places(
        r#"{"booking_places": [{"id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "club_id": "a@b.c", "competition_id": "Fall", "places": 0}]}"#
    )]
    fn malformed_document_is_a_decode_error(log_fixture: LogFixture, #[case] contents: &str) {
        std::fs::write(&log_fixture.path, contents).expect("seed log");

        let err = log_fixture.log.load().expect_err("malformed log");

        assert!(matches!(err, BookingLogError::Decode { .. }));
    }

    #[rstest]
    fn unwritable_directory_is_an_io_error(log_fixture: LogFixture) {
        std::fs::create_dir(&log_fixture.path).expect("block log path with a directory");
        std::fs::write(log_fixture.path.join("keep"), "x").expect("populate directory");

        let err = log_fixture.log.persist(&[event(1)]).expect_err("rename blocked");

        assert!(matches!(err, BookingLogError::Io { .. }));
    }

    #[rstest]
    fn path_without_file_name_is_rejected() {
        let err = JsonFileBookingLog::open(Utf8Path::new("/")).expect_err("no file name");
        assert!(matches!(err, BookingLogError::Io { .. }));
    }
}
