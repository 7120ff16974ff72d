//! Persisted records the engine reads: locations, lead entries, reservations.
//!
//! All three are read-only inputs. The engine never writes them; the caller
//! persists a new reservation through its own write path after a successful
//! selection.

use chrono::NaiveDate;
use geo::Coord;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named point a user has formally registered, matchable to an [`Area`].
///
/// Matching uses exact name equality or a sub-kilometre planar proximity
/// test; see [`crate::filter`].
///
/// [`Area`]: crate::Area
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    /// Store-assigned identifier, referenced by [`LeadEntry::location_id`].
    pub id: u64,
    /// Registered name.
    pub name: String,
    /// Geospatial position, `x = longitude`, `y = latitude`.
    pub position: Coord<f64>,
    /// Free-form type tag, e.g. `"city"`.
    pub kind: String,
}

/// Errors returned by [`Location::new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationError {
    /// A coordinate was NaN or infinite.
    #[error("location {id} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Identifier of the rejected location.
        id: u64,
    },
}

impl Location {
    /// Validates and constructs a [`Location`].
    ///
    /// # Errors
    /// Returns [`LocationError::NonFiniteCoordinate`] when either coordinate
    /// is NaN or infinite.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        position: Coord<f64>,
        kind: impl Into<String>,
    ) -> Result<Self, LocationError> {
        if !position.x.is_finite() || !position.y.is_finite() {
            return Err(LocationError::NonFiniteCoordinate { id });
        }
        Ok(Self {
            id,
            name: name.into(),
            position,
            kind: kind.into(),
        })
    }
}

/// One day's recorded canvassing outcome for a location.
///
/// Counts are unsigned, so negative values are unrepresentable. Rejections
/// exceeding leads are tolerated (the store never enforced the expectation),
/// which makes a negative success rate possible and deliberate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LeadEntry {
    /// Location this entry belongs to.
    pub location_id: u64,
    /// Calendar day of the visit.
    pub date: NaiveDate,
    /// Leads collected that day.
    pub leads: u32,
    /// Rejections collected that day.
    pub rejections: u32,
    /// Sticky disqualification flag: one flagged entry bars the location
    /// from selection permanently, regardless of date.
    pub no_prospects: bool,
}

impl LeadEntry {
    /// Constructs a [`LeadEntry`].
    #[must_use]
    pub const fn new(
        location_id: u64,
        date: NaiveDate,
        leads: u32,
        rejections: u32,
        no_prospects: bool,
    ) -> Self {
        Self {
            location_id,
            date,
            leads,
            rejections,
            no_prospects,
        }
    }
}

/// A claim on an area for a specific calendar date.
///
/// Blocks re-selection of the same-named area on that date; the name match
/// is case-insensitive.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reservation {
    /// Name of the reserved area.
    pub area_name: String,
    /// Position of the reserved area, `x = longitude`, `y = latitude`.
    pub position: Coord<f64>,
    /// Day the reservation applies to.
    pub date: NaiveDate,
}

impl Reservation {
    /// Constructs a [`Reservation`].
    #[must_use]
    pub fn new(area_name: impl Into<String>, position: Coord<f64>, date: NaiveDate) -> Self {
        Self {
            area_name: area_name.into(),
            position,
            date,
        }
    }

    /// Whether this reservation blocks `area_name` on `date`.
    ///
    /// Area names are Polish place names, so the case fold must be Unicode
    /// aware rather than ASCII only.
    #[must_use]
    pub fn blocks(&self, area_name: &str, date: NaiveDate) -> bool {
        self.date == date && self.area_name.to_lowercase() == area_name.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[rstest]
    fn location_rejects_nan() {
        let result = Location::new(1, "Fordon", Coord { x: 18.0, y: f64::NAN }, "city");
        assert_eq!(result, Err(LocationError::NonFiniteCoordinate { id: 1 }));
    }

    #[rstest]
    #[case("Fordon", "2024-07-01", true)]
    #[case("FORDON", "2024-07-01", true)]
    #[case("fordon", "2024-07-01", true)]
    #[case("Fordon", "2024-07-02", false)]
    #[case("Osowa Góra", "2024-07-01", false)]
    fn reservation_blocks_same_day_case_insensitively(
        #[case] name: &str,
        #[case] date: &str,
        #[case] expected: bool,
    ) {
        let reservation =
            Reservation::new("Fordon", Coord { x: 18.17, y: 53.15 }, day("2024-07-01"));
        assert_eq!(reservation.blocks(name, day(date)), expected);
    }
}
