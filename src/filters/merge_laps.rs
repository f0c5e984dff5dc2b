use super::Filter;
use crate::config::Config;
use crate::error::Result;
use crate::session::{Lap, Session};

/// Joins all laps of a session into a single one.
#[derive(Debug, Default)]
pub struct MergeLaps;

impl Filter for MergeLaps {
    fn apply(&self, session: &mut Session, _config: &Config) -> Result<()> {
        if session.laps.len() <= 1 {
            return Ok(());
        }

        let laps = std::mem::take(&mut session.laps);
        let count = laps.len();
        let mut merged = Lap::new(laps[0].start_time);
        for lap in laps {
            merged.total_time_seconds += lap.total_time_seconds;
            merged.points.extend(lap.points);
        }
        session.laps.push(merged);

        tracing::debug!("merged {} laps", count);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "MergeLaps"
    }
}
