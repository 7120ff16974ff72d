//! Command-line interface for the Canvass territory-selection engine.
//!
//! The single `pick` subcommand runs one selection over JSON snapshots of
//! the tracker's backing collections and prints the chosen area, plus a
//! ready-to-post reservation payload, as JSON on stdout.

#![forbid(unsafe_code)]

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

mod error;
mod pick;
mod snapshot;

pub use error::CliError;
pub use pick::{AreaOutput, PickOutput, ReservationPayload, run_pick};

const ARG_AREAS: &str = "areas";
const ARG_LOCATIONS: &str = "locations";
const ARG_LEAD_DATA: &str = "lead-data";
const ARG_RESERVATIONS: &str = "reservations";
const ARG_MAX_RADIUS: &str = "max-radius-km";
const ENV_AREAS: &str = "CANVASS_CMDS_PICK_AREAS";
const ENV_LOCATIONS: &str = "CANVASS_CMDS_PICK_LOCATIONS";
const ENV_LEAD_DATA: &str = "CANVASS_CMDS_PICK_LEAD_DATA";
const ENV_RESERVATIONS: &str = "CANVASS_CMDS_PICK_RESERVATIONS";
const ENV_MAX_RADIUS: &str = "CANVASS_CMDS_PICK_MAX_RADIUS_KM";

/// Home base the original tracker measures every distance from, the
/// Bydgoszcz city centre. Overridable per invocation.
const DEFAULT_HOME_LAT: f64 = 53.1235;
const DEFAULT_HOME_LON: f64 = 18.0084;
/// Cool-down the tracker's selection dialog defaults to.
const DEFAULT_MONTHS_THRESHOLD: u32 = 6;

/// Run the Canvass CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Pick(args) => {
            let config = args.into_config()?;
            let output = run_pick(&config)?;
            let rendered =
                serde_json::to_string_pretty(&output).map_err(CliError::SerializeOutput)?;
            println!("{rendered}");
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(
    name = "canvass",
    about = "Weighted-random territory selection for field canvassing",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Pick one eligible area from snapshot files.
    Pick(PickArgs),
}

/// CLI arguments for the `pick` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Run one weighted-random selection over JSON snapshots of \
                 the area pool, registered locations, lead entries, and \
                 reservations. Values can come from CLI flags, \
                 configuration files, or environment variables.",
    about = "Pick one eligible area from snapshot files"
)]
#[ortho_config(prefix = "CANVASS")]
struct PickArgs {
    /// Path to the candidate area snapshot (JSON array).
    #[arg(long = ARG_AREAS, value_name = "path")]
    #[serde(default)]
    areas: Option<PathBuf>,
    /// Path to the registered location snapshot.
    #[arg(long = ARG_LOCATIONS, value_name = "path")]
    #[serde(default)]
    locations: Option<PathBuf>,
    /// Path to the lead entry snapshot.
    #[arg(long = ARG_LEAD_DATA, value_name = "path")]
    #[serde(default)]
    lead_data: Option<PathBuf>,
    /// Path to the reservation snapshot.
    #[arg(long = ARG_RESERVATIONS, value_name = "path")]
    #[serde(default)]
    reservations: Option<PathBuf>,
    /// Latitude of the home base (defaults to the Bydgoszcz city centre).
    #[arg(long, value_name = "degrees")]
    #[serde(default)]
    home_lat: Option<f64>,
    /// Longitude of the home base.
    #[arg(long, value_name = "degrees")]
    #[serde(default)]
    home_lon: Option<f64>,
    /// Inner edge of the distance band in kilometres (default 0).
    #[arg(long, value_name = "km")]
    #[serde(default)]
    min_radius_km: Option<f64>,
    /// Outer edge of the distance band in kilometres.
    #[arg(long = ARG_MAX_RADIUS, value_name = "km")]
    #[serde(default)]
    max_radius_km: Option<f64>,
    /// Calendar months an area must have rested to be eligible (default 6).
    #[arg(long, value_name = "months")]
    #[serde(default)]
    months_threshold: Option<u32>,
    /// Day to evaluate eligibility against (default: the system date).
    #[arg(long, value_name = "yyyy-mm-dd")]
    #[serde(default)]
    today: Option<NaiveDate>,
    /// Seed for a reproducible draw (default: OS entropy).
    #[arg(long, value_name = "u64")]
    #[serde(default)]
    seed: Option<u64>,
    /// Include a reservation payload for this date in the output.
    #[arg(long, value_name = "yyyy-mm-dd")]
    #[serde(default)]
    reserve_for: Option<NaiveDate>,
}

impl PickArgs {
    fn into_config(self) -> Result<PickConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PickConfig::try_from(merged)
    }
}

/// Fully-resolved inputs for one pick.
#[derive(Debug, Clone, PartialEq)]
pub struct PickConfig {
    /// Candidate area snapshot path.
    pub areas: PathBuf,
    /// Registered location snapshot path.
    pub locations: PathBuf,
    /// Lead entry snapshot path.
    pub lead_data: PathBuf,
    /// Reservation snapshot path.
    pub reservations: PathBuf,
    /// Home base, `x = longitude`, `y = latitude`.
    pub home: Coord<f64>,
    /// Inner edge of the distance band.
    pub min_radius_km: f64,
    /// Outer edge of the distance band.
    pub max_radius_km: f64,
    /// Required cool-down in calendar months.
    pub months_threshold: u32,
    /// Day eligibility is evaluated against.
    pub today: NaiveDate,
    /// Seed for a reproducible draw.
    pub seed: Option<u64>,
    /// Date to emit a reservation payload for.
    pub reserve_for: Option<NaiveDate>,
}

impl TryFrom<PickArgs> for PickConfig {
    type Error = CliError;

    fn try_from(args: PickArgs) -> Result<Self, Self::Error> {
        let areas = args.areas.ok_or(CliError::MissingArgument {
            field: ARG_AREAS,
            env: ENV_AREAS,
        })?;
        let locations = args.locations.ok_or(CliError::MissingArgument {
            field: ARG_LOCATIONS,
            env: ENV_LOCATIONS,
        })?;
        let lead_data = args.lead_data.ok_or(CliError::MissingArgument {
            field: ARG_LEAD_DATA,
            env: ENV_LEAD_DATA,
        })?;
        let reservations = args.reservations.ok_or(CliError::MissingArgument {
            field: ARG_RESERVATIONS,
            env: ENV_RESERVATIONS,
        })?;
        let max_radius_km = args.max_radius_km.ok_or(CliError::MissingArgument {
            field: ARG_MAX_RADIUS,
            env: ENV_MAX_RADIUS,
        })?;
        Ok(Self {
            areas,
            locations,
            lead_data,
            reservations,
            home: Coord {
                x: args.home_lon.unwrap_or(DEFAULT_HOME_LON),
                y: args.home_lat.unwrap_or(DEFAULT_HOME_LAT),
            },
            min_radius_km: args.min_radius_km.unwrap_or(0.0),
            max_radius_km,
            months_threshold: args.months_threshold.unwrap_or(DEFAULT_MONTHS_THRESHOLD),
            today: args.today.unwrap_or_else(|| chrono::Local::now().date_naive()),
            seed: args.seed,
            reserve_for: args.reserve_for,
        })
    }
}
