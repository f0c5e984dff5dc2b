use serde_json::{Value, json};
use std::io::Write;

use super::Output;
use crate::config::{Config, get_bool};
use crate::error::{PipelineError, Result};
use crate::session::Session;

/// GeoJSON `FeatureCollection`, one `LineString` per non-empty lap.
#[derive(Debug, Default)]
pub struct GeoJson;

impl GeoJson {
    fn collection(session: &Session) -> Value {
        let features: Vec<Value> = session
            .laps
            .iter()
            .enumerate()
            .filter(|(_, lap)| !lap.is_empty())
            .map(|(index, lap)| {
                // GeoJSON positions are [lon, lat]
                let coordinates: Vec<[f64; 2]> = lap
                    .points
                    .iter()
                    .map(|p| [p.longitude, p.latitude])
                    .collect();
                json!({
                    "type": "Feature",
                    "geometry": { "type": "LineString", "coordinates": coordinates },
                    "properties": {
                        "lap": index + 1,
                        "start_time": lap.start_time.to_rfc3339(),
                        "distance_m": lap.distance_meters(),
                        "duration_s": lap.duration_seconds(),
                    }
                })
            })
            .collect();

        json!({
            "type": "FeatureCollection",
            "properties": { "name": session.name, "sport": session.sport },
            "features": features,
        })
    }
}

impl Output for GeoJson {
    fn render(&self, sink: &mut dyn Write, session: &Session, config: &Config) -> Result<()> {
        let pretty = get_bool(config, self.name(), "pretty")?.unwrap_or(false);
        let collection = Self::collection(session);

        let written = if pretty {
            serde_json::to_writer_pretty(&mut *sink, &collection)
        } else {
            serde_json::to_writer(&mut *sink, &collection)
        };
        written.map_err(|e| PipelineError::sink(self.name(), e.into()))?;
        sink.write_all(b"\n")
            .map_err(|e| PipelineError::sink(self.name(), e))
    }

    fn name(&self) -> &'static str {
        "GeoJson"
    }

    fn extension(&self) -> &'static str {
        "geojson"
    }
}
