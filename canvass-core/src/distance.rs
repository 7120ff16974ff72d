//! Great-circle and planar distance helpers.
//!
//! Coordinates are WGS84 [`Coord`] values with `x = longitude` and
//! `y = latitude`, both in decimal degrees. The haversine distance uses a
//! fixed Earth radius of 6371 km; selection scores depend on the exact
//! figure, so it must not be swapped for a more precise ellipsoidal model
//! without accepting the resulting score drift.

use geo::Coord;

/// Mean Earth radius in kilometres used by [`haversine_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points, in kilometres.
///
/// Pure and deterministic. Non-finite inputs propagate to a non-finite
/// result; callers are responsible for validating coordinates first.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use canvass_core::haversine_km;
///
/// let bydgoszcz = Coord { x: 18.0084, y: 53.1235 };
/// let torun = Coord { x: 18.5984, y: 53.0138 };
/// let d = haversine_km(bydgoszcz, torun);
/// assert!((d - 41.0).abs() < 1.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "haversine is inherently floating-point trigonometry"
)]
pub fn haversine_km(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();
    let d_lat = (b.y - a.y).to_radians();
    let d_lon = (b.x - a.x).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Planar distance between two points in decimal degrees.
///
/// Used only for the sub-kilometre area-to-location matching epsilon, where
/// a flat-earth approximation is deliberate and adequate.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "planar matching epsilon is a floating-point norm"
)]
pub fn planar_degree_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}
