//! Eligibility filtering: reduce the candidate pool to legal picks.
//!
//! Rules are applied per area, in a fixed order: distance band, same-day
//! reservation, location matching and history aggregation, the sticky
//! `no_prospects` flag, then the recency threshold. Survivors are scored
//! and keep everything a caller needs to render a summary and write a
//! reservation.

use chrono::NaiveDate;
use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Area, AreaPool, CriteriaError, LeadEntry, Location, Reservation, SelectionCriteria,
    VisitHistory, distance::haversine_km, distance::planar_degree_distance, score::score_candidate,
};

/// Planar degree distance below which an area and a location are treated as
/// the same place (~1 km at mid European latitudes).
pub const MATCH_EPSILON_DEGREES: f64 = 0.01;

/// An area that passed every eligibility rule, with its sampling weight.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoredCandidate {
    /// The eligible area.
    pub area: Area,
    /// The registered location matched to the area, when one exists.
    pub location: Option<Location>,
    /// Great-circle distance from the home base, in kilometres.
    pub distance_km: f64,
    /// Most recent lead entry for the matched location.
    pub last_entry: Option<NaiveDate>,
    /// Total leads recorded for the matched location.
    pub total_leads: u32,
    /// Total rejections recorded for the matched location.
    pub total_rejections: u32,
    /// `(leads − rejections) / leads`, absent without recorded leads.
    pub success_rate: Option<f64>,
    /// Sampling weight for the weighted selector.
    pub score: f64,
}

/// Match an area to at most one registered location.
///
/// A location matches on exact name equality or on planar proximity below
/// [`MATCH_EPSILON_DEGREES`]. Several near-coincident locations are not
/// disambiguated by the data model, so "first match" is made deterministic
/// by scanning in ascending location id order.
///
/// Sorts a fresh view of `locations` on every call. [`eligible_candidates`]
/// sorts once up front and runs the same scan over the shared view, so the
/// two paths always agree on the matched location.
#[must_use]
pub fn match_location<'a>(area: &Area, locations: &'a [Location]) -> Option<&'a Location> {
    let mut ordered: Vec<&Location> = locations.iter().collect();
    ordered.sort_by_key(|location| location.id);
    find_match(area, &ordered)
}

fn find_match<'a>(area: &Area, ordered: &[&'a Location]) -> Option<&'a Location> {
    ordered
        .iter()
        .find(|location| {
            location.name == area.name
                || planar_degree_distance(area.location, location.position) < MATCH_EPSILON_DEGREES
        })
        .copied()
}

/// Applies every eligibility rule and scores the survivors.
///
/// Returns candidates in pool insertion order; the weighted selector
/// depends on that order being stable. An empty result is a valid outcome
/// meaning "no area matches the current criteria", not a failure.
///
/// # Errors
/// Returns [`CriteriaError`] when the criteria's recency cutoff cannot be
/// computed. Band validation happens earlier, in
/// [`SelectionCriteria::new`].
pub fn eligible_candidates(
    pool: &AreaPool,
    locations: &[Location],
    entries: &[LeadEntry],
    reservations: &[Reservation],
    criteria: &SelectionCriteria,
) -> Result<Vec<ScoredCandidate>, CriteriaError> {
    let threshold = criteria.threshold_date()?;
    let mut ordered_locations: Vec<&Location> = locations.iter().collect();
    ordered_locations.sort_by_key(|location| location.id);
    let mut candidates = Vec::new();

    for area in pool.iter() {
        let distance_km = haversine_km(criteria.home, area.location);
        if !criteria.within_band(distance_km) {
            continue;
        }

        if reservations
            .iter()
            .any(|reservation| reservation.blocks(&area.name, criteria.today))
        {
            debug!("skipping {}: reserved for today", area.name);
            continue;
        }

        let location = find_match(area, &ordered_locations);
        let history = location.map_or_else(VisitHistory::default, |matched| {
            VisitHistory::gather(entries, matched.id)
        });

        if history.no_prospects {
            debug!("skipping {}: flagged as no prospects", area.name);
            continue;
        }

        if let Some(last) = history.last_entry {
            if last >= threshold {
                debug!("skipping {}: visited {last}, within cool-down", area.name);
                continue;
            }
        }

        let score = score_candidate(&history, distance_km, criteria);
        candidates.push(ScoredCandidate {
            area: area.clone(),
            location: location.cloned(),
            distance_km,
            last_entry: history.last_entry,
            total_leads: history.total_leads,
            total_rejections: history.total_rejections,
            success_rate: history.success_rate(),
            score,
        });
    }

    debug!("{} of {} areas eligible", candidates.len(), pool.len());
    Ok(candidates)
}
