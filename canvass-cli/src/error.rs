//! Error types emitted by the Canvass CLI.
//!
//! Keep this enum reasonably small; most CLI helpers return
//! `Result<_, CliError>`.

use std::path::PathBuf;
use std::sync::Arc;

use canvass_core::{AreaError, CriteriaError, LocationError, SelectError};
use thiserror::Error;

/// Errors emitted by the Canvass CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Long flag name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it instead.
        env: &'static str,
    },
    /// Reading a snapshot file failed.
    #[error("failed to read {kind} snapshot at {path:?}: {source}")]
    ReadSnapshot {
        /// Which of the four snapshots was being read.
        kind: &'static str,
        /// Path given for the snapshot.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Snapshot JSON could not be decoded.
    #[error("failed to parse {kind} snapshot at {path:?}: {source}")]
    ParseSnapshot {
        /// Which of the four snapshots was being parsed.
        kind: &'static str,
        /// Path given for the snapshot.
        path: PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// A snapshot area failed domain validation.
    #[error(transparent)]
    InvalidArea(#[from] AreaError),
    /// A snapshot location failed domain validation.
    #[error(transparent)]
    InvalidLocation(#[from] LocationError),
    /// The selection criteria were rejected.
    #[error(transparent)]
    InvalidCriteria(#[from] CriteriaError),
    /// The filter produced zero candidates. A valid outcome, not a fault;
    /// surfaced with its own exit code so scripts can tell it from failures.
    #[error("no areas match the current criteria; widen the radius band or lower the cool-down")]
    NoEligibleAreas,
    /// The selector rejected its input.
    #[error(transparent)]
    Select(#[from] SelectError),
    /// Serializing the result to JSON failed.
    #[error("failed to serialize selection output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// `2` marks the empty-result outcome; every real failure maps to `1`.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NoEligibleAreas => 2,
            _ => 1,
        }
    }
}
