//! Selection criteria shared by the eligibility filter and the scorer.

use chrono::{Months, NaiveDate};
use geo::Coord;
use thiserror::Error;

/// Parameters for one selection request.
///
/// `today` is an explicit input rather than a live clock read so that
/// recency and reservation checks are deterministic and reproducible.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use geo::Coord;
/// use canvass_core::SelectionCriteria;
///
/// # fn main() -> Result<(), canvass_core::CriteriaError> {
/// let criteria = SelectionCriteria::new(
///     Coord { x: 18.0084, y: 53.1235 },
///     0.0,
///     30.0,
///     6,
///     NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
/// )?;
/// assert_eq!(criteria.max_radius_km, 30.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionCriteria {
    /// Fixed reference point distances are measured from.
    pub home: Coord<f64>,
    /// Inner edge of the distance band, in kilometres.
    pub min_radius_km: f64,
    /// Outer edge of the distance band, in kilometres.
    pub max_radius_km: f64,
    /// An area is eligible only if untouched for this many calendar months.
    pub months_threshold: u32,
    /// The day eligibility is evaluated against.
    pub today: NaiveDate,
}

/// Errors returned by [`SelectionCriteria::new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CriteriaError {
    /// `min_radius_km` was not strictly below `max_radius_km`.
    ///
    /// Rejected eagerly rather than returning an empty candidate set, so a
    /// caller bug is not mistaken for "no areas match".
    #[error("minimum radius must be strictly below maximum radius")]
    EmptyRadiusBand,
    /// A radius was negative.
    #[error("radii must be non-negative")]
    NegativeRadius,
    /// A radius or home coordinate was NaN or infinite.
    #[error("criteria contain a non-finite value")]
    NonFiniteValue,
    /// Subtracting `months_threshold` months from `today` left the calendar.
    #[error("months threshold {months} underflows the calendar from {today}")]
    ThresholdOutOfRange {
        /// Requested threshold in months.
        months: u32,
        /// Evaluation day the subtraction started from.
        today: NaiveDate,
    },
}

impl SelectionCriteria {
    /// Validates and constructs [`SelectionCriteria`].
    ///
    /// # Errors
    /// Returns [`CriteriaError`] for an empty radius band, negative or
    /// non-finite numeric inputs, or a months threshold that cannot be
    /// subtracted from `today`.
    pub fn new(
        home: Coord<f64>,
        min_radius_km: f64,
        max_radius_km: f64,
        months_threshold: u32,
        today: NaiveDate,
    ) -> Result<Self, CriteriaError> {
        if !home.x.is_finite()
            || !home.y.is_finite()
            || !min_radius_km.is_finite()
            || !max_radius_km.is_finite()
        {
            return Err(CriteriaError::NonFiniteValue);
        }
        if min_radius_km < 0.0 || max_radius_km < 0.0 {
            return Err(CriteriaError::NegativeRadius);
        }
        if min_radius_km >= max_radius_km {
            return Err(CriteriaError::EmptyRadiusBand);
        }
        let criteria = Self {
            home,
            min_radius_km,
            max_radius_km,
            months_threshold,
            today,
        };
        // Fail at construction rather than mid-filter.
        criteria.threshold_date()?;
        Ok(criteria)
    }

    /// The recency cutoff: `today` minus the threshold in calendar months.
    ///
    /// A location's last entry must be strictly before this day for the
    /// area to be eligible. Calendar-month arithmetic matches the recency
    /// *filter* of the original tracker; the 30-day month approximation is
    /// confined to the recency *bonus* in [`crate::score`].
    ///
    /// # Errors
    /// Returns [`CriteriaError::ThresholdOutOfRange`] when the subtraction
    /// leaves the representable calendar.
    pub fn threshold_date(&self) -> Result<NaiveDate, CriteriaError> {
        self.today
            .checked_sub_months(Months::new(self.months_threshold))
            .ok_or(CriteriaError::ThresholdOutOfRange {
                months: self.months_threshold,
                today: self.today,
            })
    }

    /// Whether `distance_km` falls inside the `[min, max]` band.
    #[must_use]
    pub fn within_band(&self, distance_km: f64) -> bool {
        distance_km >= self.min_radius_km && distance_km <= self.max_radius_km
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const HOME: Coord<f64> = Coord {
        x: 18.0084,
        y: 53.1235,
    };

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn criteria(min: f64, max: f64) -> Result<SelectionCriteria, CriteriaError> {
        SelectionCriteria::new(HOME, min, max, 6, day("2024-07-01"))
    }

    #[rstest]
    fn rejects_inverted_band() {
        assert_eq!(criteria(30.0, 10.0), Err(CriteriaError::EmptyRadiusBand));
    }

    #[rstest]
    fn rejects_degenerate_band() {
        assert_eq!(criteria(10.0, 10.0), Err(CriteriaError::EmptyRadiusBand));
    }

    #[rstest]
    fn rejects_negative_radius() {
        assert_eq!(criteria(-1.0, 10.0), Err(CriteriaError::NegativeRadius));
    }

    #[rstest]
    #[case(f64::NAN, 10.0)]
    #[case(0.0, f64::INFINITY)]
    fn rejects_non_finite_radii(#[case] min: f64, #[case] max: f64) {
        assert_eq!(criteria(min, max), Err(CriteriaError::NonFiniteValue));
    }

    #[rstest]
    fn threshold_uses_calendar_months() {
        let c = criteria(0.0, 30.0).unwrap();
        assert_eq!(c.threshold_date().unwrap(), day("2024-01-01"));
    }

    #[rstest]
    #[case(0.0, false)]
    #[case(5.0, true)]
    #[case(30.0, true)]
    #[case(30.001, false)]
    fn band_is_inclusive_at_both_edges(#[case] distance: f64, #[case] expected: bool) {
        let c = SelectionCriteria::new(HOME, 1.0, 30.0, 6, day("2024-07-01")).unwrap();
        assert_eq!(c.within_band(distance), expected);
    }
}
