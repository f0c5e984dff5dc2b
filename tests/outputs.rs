//! Tests for the output registry and built-in outputs

mod common;

use common::mixed_session;
use std::io::{self, Write};
use trackpipe::config::Config;
use trackpipe::outputs::{self, GeoJson, GoogleMap, Output, Summary};
use trackpipe::{Pipeline, PipelineError, Session, Stage};

fn render(output: &dyn Output, session: &Session, config: &Config) -> String {
    let mut sink = Vec::new();
    output.render(&mut sink, session, config).unwrap();
    String::from_utf8(sink).unwrap()
}

struct BrokenSink;

impl Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_registry_lists_builtins() {
    assert_eq!(
        outputs::registry().names(),
        vec!["GeoJson", "GoogleMap", "Summary"]
    );
}

#[test]
fn test_extensions() {
    assert_eq!(outputs::create("GoogleMap").unwrap().extension(), "html");
    assert_eq!(outputs::create("Summary").unwrap().extension(), "txt");
    assert_eq!(outputs::create("GeoJson").unwrap().extension(), "geojson");
}

#[test]
fn test_unknown_output_name() {
    let err = outputs::create("Kml").err().unwrap();
    assert!(matches!(err, PipelineError::UnknownOutputName { .. }));
}

#[test]
fn test_google_map_page() {
    let session = mixed_session();
    let html = render(&GoogleMap, &session, &Config::new());

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Morning &lt;Run&gt;</title>"));
    assert!(html.contains("google.maps.Polyline"));
    assert!(html.contains("[48.85,2.35]"));
    // one row per lap plus the header and total rows
    assert_eq!(html.matches("<tr>").count(), session.laps.len() + 2);
    assert!(html.contains("<td>40s</td>"));
    assert!(html.trim_end().ends_with("</html>"));
}

#[test]
fn test_google_map_options() {
    let session = mixed_session();
    let mut config = Config::new();
    config.insert("api_key".into(), "KEY123".into());
    config.insert("height".into(), "400px".into());
    let html = render(&GoogleMap, &session, &config);
    assert!(html.contains("js?key=KEY123"));
    assert!(html.contains("height: 400px;"));

    config.insert("width".into(), "1px; } body { x".into());
    let mut sink = Vec::new();
    let err = GoogleMap.render(&mut sink, &session, &config).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidConfigurationValue { .. }));
    assert!(sink.is_empty());
}

#[test]
fn test_render_does_not_mutate_session() {
    let session = mixed_session();
    for name in outputs::registry().names() {
        let output = outputs::create(name).unwrap();
        render(output.as_ref(), &session, &Config::new());
    }
    assert_eq!(session, mixed_session());
}

#[test]
fn test_sink_failure() {
    let session = mixed_session();
    let err = Summary
        .render(&mut BrokenSink, &session, &Config::new())
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::SinkWriteFailure { ref output, .. } if output == "Summary"
    ));
}

#[test]
fn test_summary_report() {
    let session = mixed_session();
    let text = render(&Summary, &session, &Config::new());
    assert!(text.contains("Name:     Morning <Run>"));
    assert!(text.contains("Sport:    running"));
    assert!(text.contains("Laps:     5"));
    assert!(text.contains("140 bpm"));

    let mut config = Config::new();
    config.insert("hundredths".into(), "yes".into());
    let text = render(&Summary, &session, &config);
    assert!(text.contains("40s00"));

    config.insert("hundredths".into(), "maybe".into());
    let mut sink = Vec::new();
    assert!(Summary.render(&mut sink, &session, &config).is_err());
}

#[test]
fn test_geojson_features() {
    let session = mixed_session();
    let text = render(&GeoJson, &session, &Config::new());
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(value["type"], "FeatureCollection");
    let features = value["features"].as_array().unwrap();
    // empty laps have no geometry
    assert_eq!(features.len(), 3);
    assert_eq!(features[1]["properties"]["lap"], 3);
    assert_eq!(features[0]["geometry"]["coordinates"][0][0], 2.35);
    assert_eq!(features[0]["geometry"]["coordinates"][0][1], 48.85);
}

#[test]
fn test_render_outputs_to_files() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new()
        .output(Stage::new("GoogleMap"))
        .output(Stage::new("Summary"))
        .output(Stage::new("GeoJson").with_option("pretty", "true"));
    let session = mixed_session();

    for parallel in [false, true] {
        let reports = pipeline.render_outputs(&session, dir.path(), "run", parallel);
        let names: Vec<&str> = reports.iter().map(|r| r.output.as_str()).collect();
        assert_eq!(names, vec!["GoogleMap", "Summary", "GeoJson"]);
        for report in &reports {
            let path = report.path.as_ref().unwrap();
            assert!(path.exists());
        }
    }
    assert!(dir.path().join("run.html").exists());
    assert!(dir.path().join("run.txt").exists());
    assert!(dir.path().join("run.geojson").exists());
}

#[test]
fn test_failing_output_does_not_affect_siblings() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new()
        .output(Stage::new("Summary").with_option("hundredths", "maybe"))
        .output(Stage::new("GeoJson"));
    let session = mixed_session();

    let reports = pipeline.render_outputs(&session, dir.path(), "run", false);

    assert!(matches!(
        reports[0].path,
        Err(PipelineError::InvalidConfigurationValue { .. })
    ));
    assert!(reports[1].path.is_ok());
    assert!(!dir.path().join("run.txt").exists());
    assert_eq!(session, mixed_session());
}

#[test]
fn test_unwritable_destination_names_the_output() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does/not/exist");
    let err = outputs::render_to_file(&GeoJson, &mixed_session(), &Config::new(), &missing, "run")
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::SinkWriteFailure { ref output, .. } if output == "GeoJson"
    ));
}

#[test]
fn test_lap_table_rows_end_lines() {
    let html = render(&GoogleMap, &mixed_session(), &Config::new());
    assert!(html.contains("km/h</td></tr>\n<tr>"));
    assert!(html.contains("</table>\n</body>"));
}
