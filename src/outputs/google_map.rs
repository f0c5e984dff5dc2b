use std::io::Write;

use super::{Output, escape_html};
use crate::config::{Config, get_str};
use crate::error::{PipelineError, Result};
use crate::session::Session;
use crate::text_format::format_duration;

const LAP_COLORS: [&str; 6] = [
    "#FF0000", "#0000FF", "#00AA00", "#FF8800", "#AA00AA", "#008888",
];

/// HTML page drawing every lap as a polyline on a Google map, with a
/// per-lap table below it.
///
/// Options: `api_key`, `width`, `height`.
#[derive(Debug, Default)]
pub struct GoogleMap;

impl Output for GoogleMap {
    fn render(&self, sink: &mut dyn Write, session: &Session, config: &Config) -> Result<()> {
        let page = self.page(session, config)?;
        sink.write_all(page.as_bytes())
            .map_err(|e| PipelineError::sink(self.name(), e))
    }

    fn name(&self) -> &'static str {
        "GoogleMap"
    }

    fn extension(&self) -> &'static str {
        "html"
    }
}

impl GoogleMap {
    fn page(&self, session: &Session, config: &Config) -> Result<String> {
        let api_key = get_str(config, "api_key").unwrap_or("");
        let width = css_length(self.name(), config, "width", "100%")?;
        let height = css_length(self.name(), config, "height", "600px")?;

        let laps: Vec<Vec<[f64; 2]>> = session
            .laps
            .iter()
            .map(|lap| lap.points.iter().map(|p| [p.latitude, p.longitude]).collect())
            .collect();
        let laps_json = serde_json::to_string(&laps)
            .map_err(|e| PipelineError::sink(self.name(), e.into()))?;
        let colors_json = serde_json::to_string(&LAP_COLORS)
            .map_err(|e| PipelineError::sink(self.name(), e.into()))?;
        // south, west, north, east
        let bounds = session
            .bounding_rect()
            .map(|r| [r.min().y, r.min().x, r.max().y, r.max().x])
            .unwrap_or([0.0; 4]);

        let title = escape_html(&session.name);
        let mut html = format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
#map {{ width: {width}; height: {height}; }}
table {{ border-collapse: collapse; margin-top: 1em; }}
td, th {{ border: 1px solid #999; padding: 0.2em 0.6em; text-align: right; }}
</style>
<script src="https://maps.googleapis.com/maps/api/js?key={key}"></script>
<script>
function initialize() {{
  var map = new google.maps.Map(document.getElementById("map"), {{
    mapTypeId: google.maps.MapTypeId.TERRAIN
  }});
  var b = [{s:.6}, {w:.6}, {n:.6}, {e:.6}];
  map.fitBounds(new google.maps.LatLngBounds(
    new google.maps.LatLng(b[0], b[1]),
    new google.maps.LatLng(b[2], b[3])));
  var laps = {laps_json};
  var colors = {colors_json};
  laps.forEach(function(lap, i) {{
    new google.maps.Polyline({{
      path: lap.map(function(p) {{ return new google.maps.LatLng(p[0], p[1]); }}),
      strokeColor: colors[i % colors.length],
      strokeOpacity: 0.8,
      strokeWeight: 3,
      map: map
    }});
  }});
}}
google.maps.event.addDomListener(window, "load", initialize);
</script>
</head>
<body>
<h1>{title}</h1>
<div id="map"></div>
"#,
            key = escape_html(api_key),
            s = bounds[0],
            w = bounds[1],
            n = bounds[2],
            e = bounds[3],
        );
        write_lap_table(&mut html, session);
        html.push_str("</body>\n</html>\n");
        Ok(html)
    }
}

fn write_lap_table(html: &mut String, session: &Session) {
    html.push_str("<table>\n");
    html.push_str("<tr><th>Lap</th><th>Distance</th><th>Duration</th><th>Avg speed</th></tr>\n");
    for (index, lap) in session.laps.iter().enumerate() {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{:.2} km</td><td>{}</td><td>{:.2} km/h</td></tr>\n",
            index + 1,
            lap.distance_meters() / 1000.0,
            format_duration(lap.duration_seconds(), false),
            lap.average_speed() * 3.6,
        ));
    }
    html.push_str(&format!(
        "<tr><th>Total</th><th>{:.2} km</th><th>{}</th><th></th></tr>\n</table>\n",
        session.total_distance_meters() / 1000.0,
        format_duration(session.total_duration_seconds(), false),
    ));
}

// keep option values from breaking out of the style block
fn css_length<'a>(
    stage: &str,
    config: &'a Config,
    option: &str,
    default: &'a str,
) -> Result<&'a str> {
    let value = get_str(config, option).unwrap_or(default);
    let allowed = |c: char| c.is_ascii_alphanumeric() || c == '%' || c == '.';
    if value.is_empty() || !value.chars().all(allowed) {
        return Err(PipelineError::invalid_value(
            stage,
            option,
            value,
            "expected a CSS length such as 600px or 100%",
        ));
    }
    Ok(value)
}
