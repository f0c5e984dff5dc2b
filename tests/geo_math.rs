//! Tests for geo_math module

use trackpipe::geo_math::*;

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

#[test]
fn test_identical_points_are_zero_apart() {
    for (lat, lon) in [(0.0, 0.0), (51.5074, -0.1278), (-33.86, 151.21), (90.0, 180.0)] {
        assert_eq!(distance_meters(lat, lon, lat, lon), 0.0);
    }
}

#[test]
fn test_distance_is_symmetric() {
    let pairs = [
        ((51.5074, -0.1278), (48.8566, 2.3522)),
        ((-33.86, 151.21), (35.68, 139.69)),
        ((10.0, 179.5), (10.0, -179.5)),
    ];
    for ((lat1, lon1), (lat2, lon2)) in pairs {
        assert_eq!(
            distance_meters(lat1, lon1, lat2, lon2),
            distance_meters(lat2, lon2, lat1, lon1)
        );
    }
}

#[test]
fn test_one_degree_of_longitude_at_equator() {
    let dist = distance_meters(0.0, 0.0, 0.0, 1.0);
    assert!(approx_eq(dist, 111_226.3, 1.0));
    assert!(((dist - 111_319.49) / 111_319.49).abs() < 1e-3);
}

#[test]
fn test_london_to_paris() {
    let dist = distance_meters(51.5074, -0.1278, 48.8566, 2.3522);
    assert!(approx_eq(dist, 343_560.0, 5000.0));
}

#[test]
fn test_antipodes_are_half_a_turn_apart() {
    let arc = arc_radians(0.0, 0.0, 0.0, 180.0);
    assert!(approx_eq(arc, std::f64::consts::PI, 1e-12));
    assert!(approx_eq(
        distance_meters(90.0, 0.0, -90.0, 0.0),
        std::f64::consts::PI * EARTH_RADIUS_METERS,
        1e-6
    ));
}

#[test]
fn test_crossing_the_antimeridian_is_short() {
    let dist = distance_meters(0.0, 179.9, 0.0, -179.9);
    assert!(dist < 25_000.0);
}
