//! In-memory model of one recorded activity.
//!
//! A [`Session`] is owned by the pipeline for a whole run: filters get it
//! by `&mut`, outputs by `&`.

use chrono::{DateTime, Utc};
use geo::{BoundingRect, Coord, LineString, Rect};
use serde::{Deserialize, Serialize};

use crate::geo_math;

/// One GPS fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub time: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    /// Meters above sea level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    /// Instantaneous speed in m/s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<u8>,
}

impl Point {
    pub fn new(time: DateTime<Utc>, latitude: f64, longitude: f64) -> Self {
        Self {
            time,
            latitude,
            longitude,
            altitude: None,
            speed: None,
            heart_rate: None,
        }
    }

    /// `geo` convention: x is longitude, y is latitude.
    pub fn geo_point(&self) -> geo::Point {
        geo::Point::new(self.longitude, self.latitude)
    }
}

/// Contiguous segment of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lap {
    pub start_time: DateTime<Utc>,
    /// Duration recorded by the device, used when points can't tell.
    pub total_time_seconds: f64,
    pub points: Vec<Point>,
}

impl Lap {
    pub fn new(start_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            total_time_seconds: 0.0,
            points: Vec::new(),
        }
    }

    pub fn with_points(start_time: DateTime<Utc>, points: Vec<Point>) -> Self {
        let mut lap = Self::new(start_time);
        lap.points = points;
        lap.total_time_seconds = lap.span_seconds().unwrap_or(0.0);
        lap
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn span_seconds(&self) -> Option<f64> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if self.points.len() > 1 => {
                Some((last.time - first.time).num_milliseconds() as f64 / 1000.0)
            }
            _ => None,
        }
    }

    pub fn duration_seconds(&self) -> f64 {
        self.span_seconds().unwrap_or(self.total_time_seconds)
    }

    pub fn distance_meters(&self) -> f64 {
        geo_math::lap_distance_meters(self)
    }

    /// Average speed in m/s, zero for a lap without duration.
    pub fn average_speed(&self) -> f64 {
        let duration = self.duration_seconds();
        if duration > 0.0 {
            self.distance_meters() / duration
        } else {
            0.0
        }
    }

    pub fn max_speed(&self) -> Option<f64> {
        self.points
            .iter()
            .filter_map(|p| p.speed)
            .fold(None, |max, s| Some(max.map_or(s, |m: f64| m.max(s))))
    }

    pub fn average_heart_rate(&self) -> Option<f64> {
        let rates: Vec<f64> = self
            .points
            .iter()
            .filter_map(|p| p.heart_rate.map(f64::from))
            .collect();
        if rates.is_empty() {
            None
        } else {
            Some(rates.iter().sum::<f64>() / rates.len() as f64)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub name: String,
    pub sport: String,
    pub start_time: DateTime<Utc>,
    pub laps: Vec<Lap>,
}

impl Session {
    pub fn new(name: impl Into<String>, start_time: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            sport: String::from("unknown"),
            start_time,
            laps: Vec::new(),
        }
    }

    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.laps.iter().flat_map(|lap| lap.points.iter())
    }

    pub fn point_count(&self) -> usize {
        self.laps.iter().map(|lap| lap.points.len()).sum()
    }

    pub fn total_distance_meters(&self) -> f64 {
        self.laps.iter().map(Lap::distance_meters).sum()
    }

    pub fn total_duration_seconds(&self) -> f64 {
        self.laps.iter().map(Lap::duration_seconds).sum()
    }

    /// Smallest rectangle holding every point, `None` without points.
    pub fn bounding_rect(&self) -> Option<Rect> {
        let line: LineString = self
            .points()
            .map(|p| Coord {
                x: p.longitude,
                y: p.latitude,
            })
            .collect();
        line.bounding_rect()
    }
}
