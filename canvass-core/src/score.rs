//! Desirability scoring for eligible areas.
//!
//! The score blends four signals: historical conversion (exploitation), a
//! flat bonus for never-tried areas (exploration), geographic proximity
//! (operational cost), and time since the last visit (rotation fairness).
//! The point ranges are tuned constants; changing any of them changes which
//! territories get worked, so treat them as behaviour, not style.

use crate::{SelectionCriteria, VisitHistory};

/// Flat base ensuring every eligible area keeps non-zero sampling mass.
pub const BASE_SCORE: f64 = 100.0;
/// Maximum points awarded for a perfect historical success rate.
pub const SUCCESS_WEIGHT: f64 = 50.0;
/// Flat bonus for areas with no recorded leads at all.
pub const EXPLORATION_BONUS: f64 = 25.0;
/// Maximum points awarded for sitting on top of the home base.
pub const PROXIMITY_WEIGHT: f64 = 30.0;
/// Maximum points awarded for the longest cool-down.
pub const RECENCY_WEIGHT: f64 = 20.0;
/// Months of cool-down needed to earn the full recency bonus.
pub const RECENCY_RAMP_MONTHS: f64 = 12.0;
/// Fixed 30-day month used when converting elapsed days to months.
///
/// Deliberately not calendar accurate: the original tracker scored with a
/// 30-day month and calendar arithmetic would shift every score.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Computes the sampling weight for one eligible area.
///
/// `distance_km` must already lie inside the criteria's radius band, which
/// keeps the proximity term in `0..=PROXIMITY_WEIGHT`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use geo::Coord;
/// use canvass_core::{score_candidate, SelectionCriteria, VisitHistory};
///
/// # fn main() -> Result<(), canvass_core::CriteriaError> {
/// let criteria = SelectionCriteria::new(
///     Coord { x: 18.0084, y: 53.1235 },
///     0.0,
///     60.0,
///     6,
///     NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
/// )?;
/// // Never visited, 5 km out: 100 + 25 + 30 * (1 - 5/60) + 20 = 172.5
/// let score = score_candidate(&VisitHistory::default(), 5.0, &criteria);
/// assert!((score - 172.5).abs() < 1e-9);
/// # Ok(())
/// # }
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "scoring is a weighted sum of float signals; day counts are small"
)]
pub fn score_candidate(
    history: &VisitHistory,
    distance_km: f64,
    criteria: &SelectionCriteria,
) -> f64 {
    let mut score = BASE_SCORE;

    score += history
        .success_rate()
        .map_or(EXPLORATION_BONUS, |rate| rate * SUCCESS_WEIGHT);

    score += (1.0 - distance_km / criteria.max_radius_km) * PROXIMITY_WEIGHT;

    score += match history.last_entry {
        Some(last) => {
            let days_since = (criteria.today - last).num_days() as f64;
            let months_since = days_since / DAYS_PER_MONTH;
            (months_since / RECENCY_RAMP_MONTHS).min(1.0) * RECENCY_WEIGHT
        }
        None => RECENCY_WEIGHT,
    };

    score
}
