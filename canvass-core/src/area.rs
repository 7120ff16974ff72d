//! Candidate areas and the de-duplicating pool that holds them.

use geo::Coord;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A discovered geographic point that is a candidate for assignment.
///
/// Areas come from an external discovery service and are immutable once
/// built. Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use canvass_core::Area;
///
/// # fn main() -> Result<(), canvass_core::AreaError> {
/// let area = Area::new(7, "Fordon", Coord { x: 18.17, y: 53.15 })?;
/// assert_eq!(area.name, "Fordon");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Area {
    /// Source-provided identifier, stable across overlapping fetches.
    pub id: u64,
    /// Display and reservation-matching name.
    pub name: String,
    /// Geospatial position.
    pub location: Coord<f64>,
}

/// Errors returned by [`Area::new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AreaError {
    /// A coordinate was NaN or infinite.
    #[error("area {id} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Identifier of the rejected area.
        id: u64,
    },
    /// The display name was empty.
    #[error("area {id} has an empty name")]
    EmptyName {
        /// Identifier of the rejected area.
        id: u64,
    },
}

impl Area {
    /// Validates and constructs an [`Area`].
    ///
    /// # Errors
    /// Returns [`AreaError`] when a coordinate is non-finite or the name is
    /// empty. Validating here keeps NaN out of the scoring pipeline.
    pub fn new(id: u64, name: impl Into<String>, location: Coord<f64>) -> Result<Self, AreaError> {
        if !location.x.is_finite() || !location.y.is_finite() {
            return Err(AreaError::NonFiniteCoordinate { id });
        }
        let name = name.into();
        if name.is_empty() {
            return Err(AreaError::EmptyName { id });
        }
        Ok(Self { id, name, location })
    }
}

/// Caller-owned candidate pool, de-duplicated by area id.
///
/// Discovery fetches overlap, so the same area arrives repeatedly with the
/// same id. The pool keeps the first occurrence and preserves insertion
/// order, which fixes the iteration order the selector later relies on.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use canvass_core::{Area, AreaPool};
///
/// # fn main() -> Result<(), canvass_core::AreaError> {
/// let mut pool = AreaPool::new();
/// pool.insert(Area::new(1, "Fordon", Coord { x: 18.17, y: 53.15 })?);
/// pool.insert(Area::new(1, "Fordon", Coord { x: 18.17, y: 53.15 })?);
/// assert_eq!(pool.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaPool {
    areas: Vec<Area>,
}

impl AreaPool {
    /// Creates an empty pool.
    #[must_use]
    pub const fn new() -> Self {
        Self { areas: Vec::new() }
    }

    /// Inserts an area, ignoring it when the id is already present.
    ///
    /// Returns `true` when the area was added.
    pub fn insert(&mut self, area: Area) -> bool {
        if self.areas.iter().any(|existing| existing.id == area.id) {
            return false;
        }
        self.areas.push(area);
        true
    }

    /// Number of distinct areas held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// Whether the pool holds no areas.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Iterate areas in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Area> {
        self.areas.iter()
    }
}

impl FromIterator<Area> for AreaPool {
    fn from_iter<I: IntoIterator<Item = Area>>(iter: I) -> Self {
        let mut pool = Self::new();
        for area in iter {
            pool.insert(area);
        }
        pool
    }
}
