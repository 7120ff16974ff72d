//! JSON snapshot loading.
//!
//! Snapshots are plain exports of the tracker's four backing collections,
//! in the backend's wire shape: areas carry `lat`/`lon`, locations
//! `lat`/`lng`, lead entries integer flags. Records are converted into the
//! core's validated types at the boundary, so nothing non-finite reaches
//! the engine.

use std::fs;
use std::path::Path;

use canvass_core::{Area, AreaPool, LeadEntry, Location, Reservation};
use chrono::NaiveDate;
use geo::Coord;
use serde::Deserialize;

use crate::error::CliError;

#[derive(Debug, Deserialize)]
struct AreaRecord {
    id: u64,
    name: String,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct LocationRecord {
    id: u64,
    name: String,
    lat: f64,
    lng: f64,
    #[serde(rename = "type", default = "default_kind")]
    kind: String,
}

fn default_kind() -> String {
    "city".into()
}

#[derive(Debug, Deserialize)]
struct LeadRecord {
    location_id: u64,
    date: NaiveDate,
    #[serde(default)]
    leads_count: u32,
    #[serde(default)]
    rejections_count: u32,
    /// Stored as `0`/`1` in the backend.
    #[serde(default)]
    no_prospects: u8,
}

#[derive(Debug, Deserialize)]
struct ReservationRecord {
    area_name: String,
    area_lat: f64,
    area_lng: f64,
    reservation_date: NaiveDate,
}

fn read_records<T: serde::de::DeserializeOwned>(
    path: &Path,
    kind: &'static str,
) -> Result<Vec<T>, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::ReadSnapshot {
        kind,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::ParseSnapshot {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

/// Load and de-duplicate the candidate area pool.
///
/// Discovery snapshots accumulate overlapping fetches, so duplicate ids
/// are expected; the pool keeps the first occurrence.
pub fn load_areas(path: &Path) -> Result<AreaPool, CliError> {
    let records: Vec<AreaRecord> = read_records(path, "areas")?;
    let mut pool = AreaPool::new();
    for record in records {
        let area = Area::new(
            record.id,
            record.name,
            Coord {
                x: record.lon,
                y: record.lat,
            },
        )?;
        if !pool.insert(area) {
            log::debug!("dropping duplicate area id in snapshot");
        }
    }
    Ok(pool)
}

/// Load registered locations.
pub fn load_locations(path: &Path) -> Result<Vec<Location>, CliError> {
    let records: Vec<LocationRecord> = read_records(path, "locations")?;
    records
        .into_iter()
        .map(|record| {
            Location::new(
                record.id,
                record.name,
                Coord {
                    x: record.lng,
                    y: record.lat,
                },
                record.kind,
            )
            .map_err(CliError::from)
        })
        .collect()
}

/// Load lead entries.
pub fn load_lead_entries(path: &Path) -> Result<Vec<LeadEntry>, CliError> {
    let records: Vec<LeadRecord> = read_records(path, "lead-data")?;
    Ok(records
        .into_iter()
        .map(|record| {
            LeadEntry::new(
                record.location_id,
                record.date,
                record.leads_count,
                record.rejections_count,
                record.no_prospects != 0,
            )
        })
        .collect())
}

/// Load reservations.
pub fn load_reservations(path: &Path) -> Result<Vec<Reservation>, CliError> {
    let records: Vec<ReservationRecord> = read_records(path, "reservations")?;
    Ok(records
        .into_iter()
        .map(|record| {
            Reservation::new(
                record.area_name,
                Coord {
                    x: record.area_lng,
                    y: record.area_lat,
                },
                record.reservation_date,
            )
        })
        .collect())
}
