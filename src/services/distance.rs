// src/services/distance.rs
// DOCUMENTATION: Great-circle distance and proximity ordering
// PURPOSE: Rank catalog places by distance from the device position

use crate::models::{GeoPosition, Place};
use geo_types::Point;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate distance between two points in kilometers
/// Uses Haversine formula. Points are (x = longitude, y = latitude).
pub fn haversine_km(from: Point<f64>, to: Point<f64>) -> f64 {
    let (lat1, lon1) = (from.y(), from.x());
    let (lat2, lon2) = (to.y(), to.x());

    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + (lat1.to_radians().cos()) * (lat2.to_radians().cos()) * (d_lon / 2.0).sin().powi(2);

    // rounding near antipodes can push `a` just above 1
    let c = 2.0 * a.min(1.0).sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Order places by ascending distance from `origin`
/// Stable: places at equal distance keep their catalog order.
pub fn sort_by_distance(places: Vec<Place>, origin: GeoPosition) -> Vec<Place> {
    let origin: Point<f64> = origin.into();

    let mut ranked: Vec<(f64, Place)> = places
        .into_iter()
        .map(|place| (haversine_km(origin, place.point()), place))
        .collect();

    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

    ranked.into_iter().map(|(_, place)| place).collect()
}
