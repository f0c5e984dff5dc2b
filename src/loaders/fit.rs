use chrono::{DateTime, Utc};
use fitparser::profile::MesgNum;
use fitparser::{FitDataRecord, Value};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{Loader, load_error};
use crate::error::Result;
use crate::session::{Lap, Point, Session};

const SEMICIRCLES_TO_DEGREES: f64 = 180.0 / 2_147_483_648.0;

/// Reads `.fit` and gzipped `.fit.gz` activity files.
///
/// Every `lap` message closes the records seen since the previous one;
/// records after the last lap message form a final lap.
pub struct FitLoader;

impl Loader for FitLoader {
    fn load(&self, path: &Path) -> Result<Session> {
        let mut data = Vec::new();
        let file = File::open(path).map_err(|e| load_error(path, e))?;
        let read = if is_gzipped(path) {
            GzDecoder::new(file).read_to_end(&mut data)
        } else {
            let mut file = file;
            file.read_to_end(&mut data)
        };
        read.map_err(|e| load_error(path, e))?;

        let records = fitparser::from_bytes(&data).map_err(|e| load_error(path, e))?;
        let name = file_name(path)
            .trim_end_matches(".gz")
            .trim_end_matches(".fit")
            .trim_end_matches(".FIT")
            .to_string();
        Ok(build_session(name, &records))
    }

    fn accepts(&self, path: &Path) -> bool {
        let lower = file_name(path).to_ascii_lowercase();
        lower.ends_with(".fit") || lower.ends_with(".fit.gz")
    }

    fn name(&self) -> &'static str {
        "FIT Loader"
    }
}

fn file_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("")
}

fn is_gzipped(path: &Path) -> bool {
    file_name(path).to_ascii_lowercase().ends_with(".gz")
}

fn build_session(name: String, records: &[FitDataRecord]) -> Session {
    let mut laps: Vec<Lap> = Vec::new();
    let mut pending: Vec<Point> = Vec::new();
    let mut sport = None;
    let mut session_start = None;
    // time of the newest point seen, where a point-less lap starts
    let mut last_time: Option<DateTime<Utc>> = None;

    for record in records {
        match record.kind() {
            MesgNum::Record => {
                if let Some(point) = extract_point(record) {
                    last_time = Some(point.time);
                    pending.push(point);
                }
            }
            MesgNum::Lap => {
                let points = std::mem::take(&mut pending);
                let start_time = timestamp_field(record, "start_time")
                    .or_else(|| points.first().map(|p| p.time))
                    .or(last_time);
                let Some(start_time) = start_time else {
                    tracing::debug!("skipping lap message without start time or records");
                    continue;
                };
                let mut lap = Lap::with_points(start_time, points);
                if let Some(total) = number_field(record, "total_elapsed_time") {
                    lap.total_time_seconds = total;
                }
                laps.push(lap);
            }
            MesgNum::Session => {
                session_start = session_start.or_else(|| timestamp_field(record, "start_time"));
                sport = sport.or_else(|| string_field(record, "sport"));
            }
            MesgNum::Sport => {
                sport = sport.or_else(|| string_field(record, "sport"));
            }
            _ => {}
        }
    }

    if let Some(first) = pending.first() {
        let start_time = first.time;
        laps.push(Lap::with_points(start_time, pending));
    }

    let start_time = session_start
        .or_else(|| laps.first().map(|lap| lap.start_time))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
    let mut session = Session::new(name, start_time);
    if let Some(sport) = sport {
        session.sport = sport;
    }
    session.laps = laps;
    session
}

fn extract_point(record: &FitDataRecord) -> Option<Point> {
    let mut time = None;
    let mut latitude = None;
    let mut longitude = None;
    let mut altitude = None;
    let mut speed = None;
    let mut heart_rate = None;

    for field in record.fields() {
        match field.name() {
            "timestamp" => time = as_timestamp(field.value()),
            "position_lat" => latitude = as_f64(field.value()),
            "position_long" => longitude = as_f64(field.value()),
            // enhanced values win over the legacy 16 bit ones
            "enhanced_altitude" => altitude = as_f64(field.value()),
            "altitude" => altitude = altitude.or_else(|| as_f64(field.value())),
            "enhanced_speed" => speed = as_f64(field.value()),
            "speed" => speed = speed.or_else(|| as_f64(field.value())),
            "heart_rate" => heart_rate = as_f64(field.value()).map(|hr| hr as u8),
            _ => {} // ignore other fields
        }
    }

    // indoor records carry no position
    let (time, lat, lon) = (time?, latitude?, longitude?);
    let mut point = Point::new(
        time,
        lat * SEMICIRCLES_TO_DEGREES,
        lon * SEMICIRCLES_TO_DEGREES,
    );
    point.altitude = altitude;
    point.speed = speed;
    point.heart_rate = heart_rate;
    Some(point)
}

fn timestamp_field(record: &FitDataRecord, name: &str) -> Option<DateTime<Utc>> {
    record
        .fields()
        .iter()
        .find(|field| field.name() == name)
        .and_then(|field| as_timestamp(field.value()))
}

fn number_field(record: &FitDataRecord, name: &str) -> Option<f64> {
    record
        .fields()
        .iter()
        .find(|field| field.name() == name)
        .and_then(|field| as_f64(field.value()))
}

fn string_field(record: &FitDataRecord, name: &str) -> Option<String> {
    record
        .fields()
        .iter()
        .find(|field| field.name() == name)
        .and_then(|field| match field.value() {
            Value::String(s) => Some(s.clone()),
            _ => None,
        })
}

fn as_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Timestamp(ts) => Some(ts.with_timezone(&Utc)),
        _ => None,
    }
}

// numeric FIT values of any width, arrays yield their first number
fn as_f64(value: &Value) -> Option<f64> {
    Some(match value {
        Value::Float64(v) => *v,
        Value::Float32(v) => f64::from(*v),
        Value::SInt8(v) => f64::from(*v),
        Value::SInt16(v) => f64::from(*v),
        Value::SInt32(v) => f64::from(*v),
        Value::SInt64(v) => *v as f64,
        Value::Byte(v) | Value::UInt8(v) | Value::UInt8z(v) => f64::from(*v),
        Value::UInt16(v) | Value::UInt16z(v) => f64::from(*v),
        Value::UInt32(v) | Value::UInt32z(v) => f64::from(*v),
        Value::UInt64(v) | Value::UInt64z(v) => *v as f64,
        Value::Array(values) => return values.iter().find_map(as_f64),
        _ => return None,
    })
}
