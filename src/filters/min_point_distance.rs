use super::Filter;
use crate::config::{Config, get_parsed};
use crate::error::{PipelineError, Result};
use crate::geo_math::point_distance_meters;
use crate::session::{Point, Session};

pub const DEFAULT_DISTANCE_METERS: f64 = 5.0;

/// Thins out points closer than `distance` meters to the last kept one.
///
/// The first and last point of every lap survive so lap extents and
/// durations don't change.
#[derive(Debug, Default)]
pub struct MinPointDistance;

impl Filter for MinPointDistance {
    fn apply(&self, session: &mut Session, config: &Config) -> Result<()> {
        let distance = get_parsed::<f64>(config, self.name(), "distance")?
            .unwrap_or(DEFAULT_DISTANCE_METERS);
        if !distance.is_finite() || distance < 0.0 {
            return Err(PipelineError::invalid_value(
                self.name(),
                "distance",
                &distance.to_string(),
                "must be a non-negative number of meters",
            ));
        }

        let before = session.point_count();
        for lap in &mut session.laps {
            lap.points = thin(std::mem::take(&mut lap.points), distance);
        }
        tracing::debug!(
            "kept {} of {} points (min distance {}m)",
            session.point_count(),
            before,
            distance
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "MinPointDistance"
    }
}

fn thin(points: Vec<Point>, distance: f64) -> Vec<Point> {
    if points.len() <= 2 {
        return points;
    }

    let last_index = points.len() - 1;
    let mut kept: Vec<Point> = Vec::with_capacity(points.len());
    for (index, point) in points.into_iter().enumerate() {
        let far_enough = kept
            .last()
            .is_none_or(|previous| point_distance_meters(previous, &point) >= distance);
        if far_enough || index == last_index {
            kept.push(point);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn point(seconds: i64, latitude: f64) -> Point {
        Point::new(
            Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap(),
            latitude,
            0.0,
        )
    }

    #[test]
    fn keeps_endpoints_even_when_close() {
        // ~1.1 m apart
        let points = vec![point(0, 0.0), point(1, 0.00001), point(2, 0.00002)];
        let thinned = thin(points, 100.0);
        assert_eq!(thinned.len(), 2);
        assert_eq!(thinned[1].latitude, 0.00002);
    }

    #[test]
    fn zero_distance_keeps_everything() {
        let points = vec![point(0, 0.0), point(1, 0.0), point(2, 0.0), point(3, 0.0)];
        assert_eq!(thin(points, 0.0).len(), 4);
    }
}
