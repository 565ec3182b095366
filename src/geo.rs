//! Great-circle distance on a spherical Earth.

use geo_types::Point;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two latitude/longitude pairs (degrees).
///
/// Inputs outside ±90/±180 are not rejected.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // rounding can push `a` a hair past 1 for antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Same as [`distance_km`] for points in `(x = longitude, y = latitude)` order.
pub fn haversine_km(a: Point<f64>, b: Point<f64>) -> f64 {
    distance_km(a.y(), a.x(), b.y(), b.x())
}
