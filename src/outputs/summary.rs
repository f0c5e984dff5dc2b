use std::io::Write;

use super::Output;
use crate::config::{Config, get_bool};
use crate::error::{PipelineError, Result};
use crate::session::Session;
use crate::text_format::format_duration;

/// Plain text report, one line per lap.
///
/// Option `hundredths` adds hundredths of a second to durations.
#[derive(Debug, Default)]
pub struct Summary;

impl Output for Summary {
    fn render(&self, sink: &mut dyn Write, session: &Session, config: &Config) -> Result<()> {
        let hundredths = get_bool(config, self.name(), "hundredths")?.unwrap_or(false);

        let mut report = format!(
            concat!(
                "Name:     {}\n",
                "Sport:    {}\n",
                "Start:    {}\n",
                "Distance: {:.2} km\n",
                "Duration: {}\n",
                "Laps:     {}\n"
            ),
            session.name,
            session.sport,
            session.start_time.to_rfc3339(),
            session.total_distance_meters() / 1000.0,
            format_duration(session.total_duration_seconds(), hundredths),
            session.laps.len(),
        );

        for (index, lap) in session.laps.iter().enumerate() {
            report.push_str(&format!(
                "  #{:<3} {:>8.2} km  {:>12}  {:>6.2} km/h",
                index + 1,
                lap.distance_meters() / 1000.0,
                format_duration(lap.duration_seconds(), hundredths),
                lap.average_speed() * 3.6,
            ));
            if let Some(heart_rate) = lap.average_heart_rate() {
                report.push_str(&format!("  {heart_rate:.0} bpm"));
            }
            report.push('\n');
        }

        sink.write_all(report.as_bytes())
            .map_err(|e| PipelineError::sink(self.name(), e))
    }

    fn name(&self) -> &'static str {
        "Summary"
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}
