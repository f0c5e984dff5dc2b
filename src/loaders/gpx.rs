use chrono::{DateTime, Utc};
use gpx::{Gpx, Waypoint};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::{Loader, load_error};
use crate::error::Result;
use crate::session::{Lap, Point, Session};

/// Reads `.gpx` files. Every track segment becomes one lap.
pub struct GpxLoader;

impl Loader for GpxLoader {
    fn load(&self, path: &Path) -> Result<Session> {
        let file = File::open(path).map_err(|e| load_error(path, e))?;
        let stem = path
            .file_stem()
            .and_then(|name| name.to_str())
            .unwrap_or("gpx");
        read_session(BufReader::new(file), stem).map_err(|reason| load_error(path, reason))
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gpx"))
    }

    fn name(&self) -> &'static str {
        "GPX Loader"
    }
}

/// Builds a session from GPX content, `fallback_name` naming it when the
/// first track has no name.
pub fn read_session<R: Read>(
    reader: R,
    fallback_name: &str,
) -> std::result::Result<Session, String> {
    let gpx: Gpx = gpx::read(reader).map_err(|e| e.to_string())?;

    let mut segments: Vec<Vec<Point>> = Vec::new();
    for track in &gpx.tracks {
        for segment in &track.segments {
            let mut points = Vec::with_capacity(segment.points.len());
            for waypoint in &segment.points {
                // untimed points can't be placed in a lap
                if let Some(point) = convert_waypoint(waypoint)? {
                    points.push(point);
                }
            }
            segments.push(points);
        }
    }

    let first_track = gpx.tracks.first();
    let name = first_track
        .and_then(|track| track.name.clone())
        .unwrap_or_else(|| fallback_name.to_string());
    let start_time = segments
        .iter()
        .flatten()
        .map(|p| p.time)
        .next()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

    let mut session = Session::new(name, start_time);
    if let Some(sport) = first_track.and_then(|track| track.type_.clone()) {
        session.sport = sport;
    }

    let mut lap_start = start_time;
    for points in segments {
        if let Some(first) = points.first() {
            lap_start = first.time;
        }
        session.laps.push(Lap::with_points(lap_start, points));
    }
    Ok(session)
}

fn convert_waypoint(waypoint: &Waypoint) -> std::result::Result<Option<Point>, String> {
    let Some(time) = &waypoint.time else {
        return Ok(None);
    };
    let iso = time.format().map_err(|e| e.to_string())?;
    let time = DateTime::parse_from_rfc3339(&iso)
        .map_err(|e| e.to_string())?
        .with_timezone(&Utc);

    let position = waypoint.point();
    let mut point = Point::new(time, position.y(), position.x());
    point.altitude = waypoint.elevation;
    point.speed = waypoint.speed;
    Ok(Some(point))
}
