//! Area eligibility and weighted-random selection for territory canvassing.
//!
//! Given a pool of candidate areas, registered locations with their lead
//! history, and same-day reservations, the engine decides which areas are
//! legal picks today and draws one with probability proportional to a
//! desirability score. The flow is one-way:
//!
//! pool + history + reservations → [`eligible_candidates`] →
//! [`select_weighted`] → one [`ScoredCandidate`].
//!
//! The engine is pure and synchronous: no I/O, no shared state, no clock
//! reads. "Today" and the random source are explicit inputs, which keeps
//! every invocation deterministic under test and safe to run concurrently
//! on independent snapshots.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod area;
mod criteria;
pub mod distance;
mod filter;
mod history;
mod records;
pub mod score;
mod select;

pub use area::{Area, AreaError, AreaPool};
pub use criteria::{CriteriaError, SelectionCriteria};
pub use distance::{haversine_km, planar_degree_distance};
pub use filter::{MATCH_EPSILON_DEGREES, ScoredCandidate, eligible_candidates, match_location};
pub use history::VisitHistory;
pub use records::{LeadEntry, Location, LocationError, Reservation};
pub use score::score_candidate;
pub use select::{SelectError, select_weighted, total_score};
