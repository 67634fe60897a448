//! Great-circle distance between two coordinates.

use crate::common::{round2, GeoPoint};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers, rounded to two decimals.
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.lat().to_radians();
    let lat2 = to.lat().to_radians();
    let dlat = (to.lat() - from.lat()).to_radians();
    let dlon = (to.lon() - from.lon()).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    round2(EARTH_RADIUS_KM * c)
}
