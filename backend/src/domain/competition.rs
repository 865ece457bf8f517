//! Competition records with a finite number of bookable places.

use serde::Serialize;

use super::RecordValidationError;

/// A competition clubs may book places in.
///
/// `date` is carried for display only and never interpreted.
///
/// # Examples
/// ```
/// use club_booking::domain::Competition;
///
/// let competition = Competition::new("Spring Festival", "2020-03-27 10:00:00", 25).unwrap();
/// assert_eq!(competition.number_of_places(), 25);
/// assert!(competition.is_open());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    name: String,
    date: String,
    number_of_places: u32,
}

impl Competition {
    /// Validate and construct a competition record.
    pub fn new(
        name: impl AsRef<str>,
        date: impl Into<String>,
        number_of_places: u32,
    ) -> Result<Self, RecordValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(RecordValidationError::EmptyName);
        }
        Ok(Self {
            name: name.to_owned(),
            date: date.into(),
            number_of_places,
        })
    }

    /// Display name, booking lookup key and booking `competition_id`.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Opaque display date.
    pub fn date(&self) -> &str {
        self.date.as_str()
    }

    /// Remaining bookable places.
    pub fn number_of_places(&self) -> u32 {
        self.number_of_places
    }

    /// Whether at least one place remains.
    pub fn is_open(&self) -> bool {
        self.number_of_places >= 1
    }

    pub(crate) fn reserve_places(&mut self, places: u32) {
        self.number_of_places = self.number_of_places.saturating_sub(places);
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn rejects_blank_name() {
        let err = Competition::new(" ", "2020-10-22 13:30:00", 13).expect_err("blank name");
        assert_eq!(err, RecordValidationError::EmptyName);
    }

    #[test]
    fn serialises_places_in_camel_case() {
        let competition =
            Competition::new("Fall Classic", "2020-10-22 13:30:00", 13).expect("valid");
        let value = serde_json::to_value(&competition).expect("serialise");
        assert_eq!(value["numberOfPlaces"], 13);
        assert_eq!(value["date"], "2020-10-22 13:30:00");
    }

    #[test]
    fn full_competition_is_closed() {
        let mut competition =
            Competition::new("Fall Classic", "2020-10-22 13:30:00", 2).expect("valid");
        competition.reserve_places(2);
        assert!(!competition.is_open());
        competition.reserve_places(1);
        assert_eq!(competition.number_of_places(), 0);
    }
}
