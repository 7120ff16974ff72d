//! The `pick` operation: one filter-and-draw over snapshot files.

use canvass_core::{ScoredCandidate, SelectionCriteria, eligible_candidates, select_weighted};
use chrono::NaiveDate;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::error::CliError;
use crate::snapshot;
use crate::PickConfig;

/// JSON-serialisable result of a successful pick.
#[derive(Debug, Serialize)]
pub struct PickOutput {
    /// The chosen area.
    pub area: AreaOutput,
    /// Distance from the home base in kilometres.
    pub distance_km: f64,
    /// Most recent lead entry for the matched location, if any.
    pub last_entry: Option<NaiveDate>,
    /// Aggregate leads for the matched location.
    pub total_leads: u32,
    /// Aggregate rejections for the matched location.
    pub total_rejections: u32,
    /// Historical conversion rate, absent without recorded leads.
    pub success_rate: Option<f64>,
    /// Sampling weight the area was drawn with.
    pub score: f64,
    /// How many areas survived the eligibility filter.
    pub eligible_count: usize,
    /// One-line human summary of the pick.
    pub summary: String,
    /// Ready-to-post reservation payload, when a reservation date was
    /// requested. The CLI never writes it; persisting the claim is the
    /// caller's write path.
    pub reservation: Option<ReservationPayload>,
}

/// Identity and position of the chosen area.
#[derive(Debug, Serialize)]
pub struct AreaOutput {
    /// Source-provided identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
}

/// Reservation payload in the backend's wire shape.
#[derive(Debug, Serialize)]
pub struct ReservationPayload {
    /// Name of the area to reserve.
    pub area_name: String,
    /// Latitude of the area.
    pub area_lat: f64,
    /// Longitude of the area.
    pub area_lng: f64,
    /// Day the reservation applies to.
    pub reservation_date: NaiveDate,
}

/// Load the snapshots, filter, draw, and assemble the output.
pub fn run_pick(config: &PickConfig) -> Result<PickOutput, CliError> {
    let pool = snapshot::load_areas(&config.areas)?;
    let locations = snapshot::load_locations(&config.locations)?;
    let entries = snapshot::load_lead_entries(&config.lead_data)?;
    let reservations = snapshot::load_reservations(&config.reservations)?;

    let criteria = SelectionCriteria::new(
        config.home,
        config.min_radius_km,
        config.max_radius_km,
        config.months_threshold,
        config.today,
    )?;

    let candidates = eligible_candidates(&pool, &locations, &entries, &reservations, &criteria)?;
    log::info!("{} of {} areas eligible", candidates.len(), pool.len());
    if candidates.is_empty() {
        return Err(CliError::NoEligibleAreas);
    }

    let mut rng = config
        .seed
        .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
    let chosen = select_weighted(&candidates, &mut rng)?;

    Ok(assemble(chosen, candidates.len(), config.reserve_for))
}

fn assemble(
    chosen: &ScoredCandidate,
    eligible_count: usize,
    reserve_for: Option<NaiveDate>,
) -> PickOutput {
    let reservation = reserve_for.map(|date| ReservationPayload {
        area_name: chosen.area.name.clone(),
        area_lat: chosen.area.location.y,
        area_lng: chosen.area.location.x,
        reservation_date: date,
    });
    PickOutput {
        area: AreaOutput {
            id: chosen.area.id,
            name: chosen.area.name.clone(),
            lat: chosen.area.location.y,
            lon: chosen.area.location.x,
        },
        distance_km: chosen.distance_km,
        last_entry: chosen.last_entry,
        total_leads: chosen.total_leads,
        total_rejections: chosen.total_rejections,
        success_rate: chosen.success_rate,
        score: chosen.score,
        eligible_count,
        summary: summarise(chosen),
        reservation,
    }
}

/// One-line summary in the shape the tracker surfaces after a draw:
/// distance to one decimal, last-entry date or "never visited", and the
/// success percentage when leads exist.
fn summarise(chosen: &ScoredCandidate) -> String {
    let mut parts = vec![format!("distance {:.1} km", chosen.distance_km)];
    match chosen.last_entry {
        Some(date) => parts.push(format!("last entry {date}")),
        None => parts.push("never visited".into()),
    }
    if let Some(rate) = chosen.success_rate {
        parts.push(format!("success rate {:.0}%", rate * 100.0));
    }
    parts.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvass_core::Area;
    use geo::Coord;
    use rstest::rstest;

    fn candidate(last_entry: Option<NaiveDate>, success_rate: Option<f64>) -> ScoredCandidate {
        ScoredCandidate {
            area: Area::new(5, "Fordon", Coord { x: 18.17, y: 53.15 }).unwrap(),
            location: None,
            distance_km: 5.06,
            last_entry,
            total_leads: 10,
            total_rejections: 1,
            success_rate,
            score: 192.5,
        }
    }

    #[rstest]
    fn summary_for_a_proven_area() {
        let chosen = candidate(Some("2023-06-01".parse().unwrap()), Some(0.9));
        assert_eq!(
            summarise(&chosen),
            "distance 5.1 km | last entry 2023-06-01 | success rate 90%"
        );
    }

    #[rstest]
    fn summary_for_a_never_visited_area() {
        let chosen = candidate(None, None);
        assert_eq!(summarise(&chosen), "distance 5.1 km | never visited");
    }

    #[rstest]
    fn reservation_payload_uses_the_wire_field_order() {
        let output = assemble(
            &candidate(None, None),
            3,
            Some("2024-07-01".parse().unwrap()),
        );
        let payload = output.reservation.unwrap();
        assert_eq!(payload.area_name, "Fordon");
        assert_eq!(payload.area_lat, 53.15);
        assert_eq!(payload.area_lng, 18.17);
    }
}
