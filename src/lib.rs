//! Facade crate for the Canvass territory-selection engine.
//!
//! Re-exports the core domain types and the two engine operations so
//! consumers can depend on a single crate.

#![forbid(unsafe_code)]

pub use canvass_core::{
    Area, AreaError, AreaPool, CriteriaError, LeadEntry, Location, LocationError,
    MATCH_EPSILON_DEGREES, Reservation, ScoredCandidate, SelectError, SelectionCriteria,
    VisitHistory, eligible_candidates, haversine_km, match_location, score_candidate,
    select_weighted, total_score,
};
