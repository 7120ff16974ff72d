//! Score-weighted random selection of one eligible candidate.

use rand::Rng;
use thiserror::Error;

use crate::ScoredCandidate;

/// Errors returned by [`select_weighted`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    /// The candidate list was empty.
    ///
    /// An empty filter result is a valid outcome the caller must handle
    /// before drawing; reaching the selector with nothing to draw from is a
    /// caller error, surfaced as an error rather than a panic.
    #[error("no candidates to select from")]
    NoCandidates,
}

/// Draws one candidate with probability proportional to its score.
///
/// Candidates are walked in the order the filter produced them; keeping
/// that order stable is what makes a seeded draw reproducible.
///
/// # Errors
/// Returns [`SelectError::NoCandidates`] for an empty slice.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let candidates: Vec<canvass_core::ScoredCandidate> = Vec::new();
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// assert!(canvass_core::select_weighted(&candidates, &mut rng).is_err());
/// ```
pub fn select_weighted<'a, R: Rng + ?Sized>(
    candidates: &'a [ScoredCandidate],
    rng: &mut R,
) -> Result<&'a ScoredCandidate, SelectError> {
    let total = total_score(candidates);
    if candidates.is_empty() || total <= 0.0 {
        return Err(SelectError::NoCandidates);
    }
    let draw = rng.gen_range(0.0..total);
    select_at(candidates, draw).ok_or(SelectError::NoCandidates)
}

/// Sum of all candidate scores, the total sampling mass.
///
/// Typically positive for a non-empty slice, but heavily rejected
/// candidates can carry negative scores; [`select_weighted`] treats a
/// non-positive total like an empty pool.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "sampling mass is a float sum")]
pub fn total_score(candidates: &[ScoredCandidate]) -> f64 {
    candidates.iter().map(|candidate| candidate.score).sum()
}

/// Deterministic inner step of the weighted draw.
///
/// Walks the candidates subtracting scores from `draw`; the first
/// candidate driving the remainder to zero or below is selected. When
/// floating-point accumulation lets `draw` survive the whole walk (a draw
/// at or near the total mass), the last candidate is returned, so a
/// non-empty slice always yields a result.
#[expect(
    clippy::float_arithmetic,
    reason = "the draw is consumed by score subtraction"
)]
fn select_at(candidates: &[ScoredCandidate], draw: f64) -> Option<&ScoredCandidate> {
    let mut remainder = draw;
    for candidate in candidates {
        remainder -= candidate.score;
        if remainder <= 0.0 {
            return Some(candidate);
        }
    }
    candidates.last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Area;
    use geo::Coord;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    fn candidate(id: u64, score: f64) -> ScoredCandidate {
        ScoredCandidate {
            area: Area::new(id, format!("area-{id}"), Coord { x: 18.0, y: 53.0 }).unwrap(),
            location: None,
            distance_km: 5.0,
            last_entry: None,
            total_leads: 0,
            total_rejections: 0,
            success_rate: None,
            score,
        }
    }

    #[rstest]
    fn empty_input_is_an_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(select_weighted(&[], &mut rng), Err(SelectError::NoCandidates));
    }

    #[rstest]
    fn single_candidate_is_always_chosen() {
        let candidates = vec![candidate(1, 150.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let chosen = select_weighted(&candidates, &mut rng).unwrap();
        assert_eq!(chosen.area.id, 1);
    }

    #[rstest]
    #[case(0.0, 1)]
    #[case(99.9, 1)]
    #[case(100.0, 1)]
    #[case(100.1, 2)]
    #[case(250.0, 2)]
    fn draw_maps_onto_cumulative_ranges(#[case] draw: f64, #[case] expected_id: u64) {
        let candidates = vec![candidate(1, 100.0), candidate(2, 150.0)];
        let chosen = select_at(&candidates, draw).unwrap();
        assert_eq!(chosen.area.id, expected_id);
    }

    #[rstest]
    fn fallback_returns_last_candidate_at_full_mass() {
        let candidates = vec![candidate(1, 100.0), candidate(2, 150.0)];
        // A draw of exactly the total mass survives every subtraction only
        // under adverse rounding; force the tail path directly.
        let chosen = select_at(&candidates, 250.0 + 1e-9).unwrap();
        assert_eq!(chosen.area.id, 2);
    }

    #[rstest]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "statistical test compares observed and expected frequencies"
    )]
    fn selection_frequency_converges_to_score_share() {
        let candidates = vec![candidate(1, 177.5), candidate(2, 192.5)];
        let total = total_score(&candidates);
        let trials = 100_000_u32;
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut first = 0_u32;
        for _ in 0..trials {
            if select_weighted(&candidates, &mut rng).unwrap().area.id == 1 {
                first += 1;
            }
        }
        let observed = f64::from(first) / f64::from(trials);
        let expected = 177.5 / total;
        assert!(
            (observed - expected).abs() < 0.01,
            "observed {observed}, expected {expected}"
        );
    }
}
