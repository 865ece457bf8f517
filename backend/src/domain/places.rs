//! Shape check for the raw "places requested" form value.

use std::fmt;
use std::num::NonZeroU32;

/// Raw place counts that failed the shape check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPlaces {
    raw: String,
}

impl InvalidPlaces {
    /// The text that was rejected.
    pub fn raw(&self) -> &str {
        self.raw.as_str()
    }
}

impl fmt::Display for InvalidPlaces {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a positive whole number of places", self.raw)
    }
}

impl std::error::Error for InvalidPlaces {}

/// A place count that passed the shape check: a base-10 integer of at least 1.
///
/// Only ASCII digits are accepted. Signs, whitespace, decimal points and
/// exponents are rejected rather than truncated, so `"2.0"` never becomes 2.
///
/// # Examples
/// ```
/// use club_booking::domain::PlacesRequested;
///
/// assert_eq!(PlacesRequested::parse("12").unwrap().get(), 12);
/// assert!(PlacesRequested::parse("0").is_err());
/// assert!(PlacesRequested::parse("0.0").is_err());
/// assert!(PlacesRequested::parse("-1").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlacesRequested(NonZeroU32);

impl PlacesRequested {
    /// Run the shape check over raw form text.
    pub fn parse(raw: &str) -> Result<Self, InvalidPlaces> {
        let invalid = || InvalidPlaces {
            raw: raw.to_owned(),
        };
        if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(invalid());
        }
        raw.parse::<u32>()
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or_else(invalid)
    }

    /// Wrap an already-numeric count, rejecting zero.
    pub fn new(places: u32) -> Option<Self> {
        NonZeroU32::new(places).map(Self)
    }

    /// Number of places as a plain integer.
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for PlacesRequested {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", 1)]
    #[case("2", 2)]
    #[case("12", 12)]
    #[case("007", 7)]
    #[case("4294967295", u32::MAX)]
    fn accepts_positive_integers(#[case] raw: &str, #[case] expected: u32) {
        let places = PlacesRequested::parse(raw).expect("valid place count");
        assert_eq!(places.get(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("0")]
    #[case("000")]
    #[case("-1")]
    #[case("+1")]
    #[case("0.0")]
    #[case("2.0")]
    #[case("1e2")]
    #[case("abc")]
    #[case(" 2")]
    #[case("2 ")]
    #[case("4294967296")]
    #[case("١٢")]
    fn rejects_malformed_or_non_positive_text(#[case] raw: &str) {
        let err = PlacesRequested::parse(raw).expect_err("shape check must fail");
        assert_eq!(err.raw(), raw);
    }

    #[test]
    fn new_rejects_zero() {
        assert!(PlacesRequested::new(0).is_none());
        assert_eq!(PlacesRequested::new(3).map(PlacesRequested::get), Some(3));
    }
}
