//! The bundled fixture files load into a consistent store.

// `expect` is idiomatic in test code for failing fast on precondition violations.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use camino::Utf8PathBuf;
use club_booking::outbound::persistence::{JsonFileBookingLog, load_record_store};
use rstest::{fixture, rstest};

#[fixture]
fn fixtures_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

#[rstest]
fn bundled_records_load(fixtures_dir: Utf8PathBuf) {
    let log = JsonFileBookingLog::open(&fixtures_dir.join("bookings.json")).expect("open log");

    let store = load_record_store(
        &fixtures_dir.join("clubs.json"),
        &fixtures_dir.join("competitions.json"),
        &log,
    )
    .expect("fixtures load");

    let clubs: Vec<(&str, u32)> = store
        .clubs()
        .iter()
        .map(|club| (club.name(), club.points()))
        .collect();
    assert_eq!(
        clubs,
        vec![("Simply Lift", 13), ("Iron Temple", 4), ("She Lifts", 12)]
    );
    let places: Vec<u32> = store
        .competitions()
        .iter()
        .map(|competition| competition.number_of_places())
        .collect();
    assert_eq!(places, vec![25, 13]);
    assert!(store.bookings().is_empty());
}
