//! Club records: the bookers holding a points balance.

use std::fmt;

use serde::Serialize;

/// Validation errors raised by record constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// A club or competition name was blank once trimmed.
    EmptyName,
    /// A club email was blank or lacked an `@`.
    InvalidEmail {
        /// The rejected address.
        email: String,
    },
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "record name must not be empty"),
            Self::InvalidEmail { email } => {
                write!(f, "club email '{email}' is not a valid address")
            }
        }
    }
}

impl std::error::Error for RecordValidationError {}

/// A club able to spend points on competition places.
///
/// ## Invariants
/// - `name` is trimmed and non-empty; it is the booking lookup key.
/// - `email` is trimmed, non-empty and contains `@`; it is the login key and
///   the `club_id` recorded on booking events.
/// - `points` never goes below zero: it is unsigned and only reduced by
///   [`Club::spend_points`] after validation.
///
/// # Examples
/// ```
/// use club_booking::domain::Club;
///
/// let club = Club::new("Simply Lift", "john@simplylift.co", 13).unwrap();
/// assert_eq!(club.points(), 13);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Club {
    name: String,
    email: String,
    points: u32,
}

impl Club {
    /// Validate and construct a club record.
    pub fn new(
        name: impl AsRef<str>,
        email: impl AsRef<str>,
        points: u32,
    ) -> Result<Self, RecordValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(RecordValidationError::EmptyName);
        }
        let email = email.as_ref().trim();
        if email.is_empty() || !email.contains('@') {
            return Err(RecordValidationError::InvalidEmail {
                email: email.to_owned(),
            });
        }
        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
            points,
        })
    }

    /// Display name and booking lookup key.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Login identifier and booking `club_id`.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Remaining points balance.
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Deduct points for a committed booking.
    ///
    /// Callers validate first; the subtraction saturates so an unvalidated
    /// call can never wrap the balance.
    pub(crate) fn spend_points(&mut self, places: u32) {
        self.points = self.points.saturating_sub(places);
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "a@b.co", RecordValidationError::EmptyName)]
    #[case("   ", "a@b.co", RecordValidationError::EmptyName)]
    #[case("Club", "", RecordValidationError::InvalidEmail { email: String::new() })]
    #[case("Club", "nobody", RecordValidationError::InvalidEmail { email: "nobody".to_owned() })]
    fn rejects_invalid_fields(
        #[case] name: &str,
        #[case] email: &str,
        #[case] expected: RecordValidationError,
    ) {
        let err = Club::new(name, email, 1).expect_err("invalid club must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn trims_name_and_email() {
        let club = Club::new("  Iron Temple ", " admin@irontemple.com ", 4).expect("valid club");
        assert_eq!(club.name(), "Iron Temple");
        assert_eq!(club.email(), "admin@irontemple.com");
    }

    #[rstest]
    fn spend_points_never_underflows() {
        let mut club = Club::new("She Lifts", "kate@shelifts.co.uk", 3).expect("valid club");
        club.spend_points(2);
        assert_eq!(club.points(), 1);
        club.spend_points(5);
        assert_eq!(club.points(), 0);
    }
}
