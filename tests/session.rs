//! Tests for the session model

mod common;

use common::{lap, mixed_session};

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

#[test]
fn test_lap_metrics() {
    let lap = lap(0, 48.85, 5);
    assert_eq!(lap.duration_seconds(), 40.0);
    assert!(approx_eq(lap.distance_meters(), 4.0 * 11.1226, 0.01));
    assert!(approx_eq(lap.average_speed(), lap.distance_meters() / 40.0, 1e-9));
    assert_eq!(lap.average_heart_rate(), Some(140.0));
    assert_eq!(lap.max_speed(), None);
}

#[test]
fn test_empty_lap_falls_back_to_recorded_time() {
    let mut lap = common::empty_lap(0);
    lap.total_time_seconds = 12.5;
    assert!(lap.is_empty());
    assert_eq!(lap.duration_seconds(), 12.5);
    assert_eq!(lap.distance_meters(), 0.0);
    assert_eq!(lap.average_heart_rate(), None);
}

#[test]
fn test_session_totals() {
    let session = mixed_session();
    assert_eq!(session.point_count(), 12);
    assert_eq!(session.points().count(), 12);
    assert_eq!(session.total_duration_seconds(), 40.0 + 20.0 + 30.0);

    let rect = session.bounding_rect().unwrap();
    assert!(approx_eq(rect.min().y, 48.85, 1e-9));
    assert!(approx_eq(rect.max().y, 48.8703, 1e-9));
    assert!(approx_eq(rect.min().x, 2.35, 1e-9));
}

#[test]
fn test_session_serializes() {
    let session = mixed_session();
    let json = serde_json::to_string(&session).unwrap();
    let back: trackpipe::Session = serde_json::from_str(&json).unwrap();
    assert_eq!(back, session);
}
