//! Great-circle arithmetic on WGS-84 latitude/longitude pairs.
//!
//! Inputs are degrees and are not validated: out-of-range coordinates give
//! a number, just not a meaningful one.

use crate::session::{Lap, Point};

/// Earth's quadratic mean radius for WGS-84.
pub const EARTH_RADIUS_METERS: f64 = 6_372_797.560_856;

/// Central angle in radians between two positions (haversine formula).
pub fn arc_radians(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let latitude_arc = (lat1 - lat2).to_radians();
    let longitude_arc = (lon1 - lon2).to_radians();

    let latitude_h = (latitude_arc * 0.5).sin().powi(2);
    let longitude_h = (longitude_arc * 0.5).sin().powi(2);
    let tmp = lat1.to_radians().cos() * lat2.to_radians().cos();

    2.0 * (latitude_h + tmp * longitude_h).sqrt().asin()
}

/// Distance in meters between two positions.
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    arc_radians(lat1, lon1, lat2, lon2) * EARTH_RADIUS_METERS
}

pub fn point_distance_meters(a: &Point, b: &Point) -> f64 {
    distance_meters(a.latitude, a.longitude, b.latitude, b.longitude)
}

/// Sum of the distances between consecutive points of the lap.
pub fn lap_distance_meters(lap: &Lap) -> f64 {
    lap.points
        .windows(2)
        .map(|pair| point_distance_meters(&pair[0], &pair[1]))
        .sum()
}
