use super::Filter;
use crate::config::Config;
use crate::error::Result;
use crate::session::Session;

/// Drops every lap that has no point.
#[derive(Debug, Default)]
pub struct EmptyLaps;

impl Filter for EmptyLaps {
    fn apply(&self, session: &mut Session, _config: &Config) -> Result<()> {
        let before = session.laps.len();
        session.laps.retain(|lap| !lap.is_empty());
        tracing::debug!("removed {} empty laps", before - session.laps.len());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "EmptyLaps"
    }
}
