//! Session fixtures shared by the integration tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use trackpipe::{Lap, Point, Session};

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 7, 0, 0).unwrap()
}

/// A lap of `count` points heading north from `latitude`, one every 10 s,
/// roughly 11 m apart.
pub fn lap(start_offset_s: i64, latitude: f64, count: usize) -> Lap {
    let start = t0() + Duration::seconds(start_offset_s);
    let points = (0..count)
        .map(|i| {
            let mut p = Point::new(
                start + Duration::seconds(10 * i as i64),
                latitude + 0.0001 * i as f64,
                2.35,
            );
            p.heart_rate = Some(140);
            p
        })
        .collect();
    Lap::with_points(start, points)
}

pub fn empty_lap(start_offset_s: i64) -> Lap {
    Lap::new(t0() + Duration::seconds(start_offset_s))
}

/// Laps: full, empty, full, empty, full.
pub fn mixed_session() -> Session {
    let mut session = Session::new("Morning <Run>", t0());
    session.sport = "running".to_string();
    session.laps = vec![
        lap(0, 48.85, 5),
        empty_lap(50),
        lap(60, 48.86, 3),
        empty_lap(100),
        lap(120, 48.87, 4),
    ];
    session
}
