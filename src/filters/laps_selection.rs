use std::collections::BTreeSet;

use super::Filter;
use crate::config::{Config, get_list};
use crate::error::{PipelineError, Result};
use crate::session::Session;

/// Keeps only the laps listed in `laps` (1-based, comma separated).
///
/// `laps=none` keeps no lap at all, a missing option keeps every lap.
#[derive(Debug, Default)]
pub struct LapsSelection;

impl LapsSelection {
    fn selected(&self, tokens: &[String], lap_count: usize) -> Result<BTreeSet<usize>> {
        tokens
            .iter()
            .map(|token| {
                let index: usize = token.trim().parse().map_err(|_| {
                    PipelineError::invalid_value(self.name(), "laps", token, "not a lap number")
                })?;
                if index == 0 || index > lap_count {
                    return Err(PipelineError::invalid_value(
                        self.name(),
                        "laps",
                        token,
                        format!("session has {lap_count} laps"),
                    ));
                }
                Ok(index - 1)
            })
            .collect()
    }
}

impl Filter for LapsSelection {
    fn apply(&self, session: &mut Session, config: &Config) -> Result<()> {
        let Some(tokens) = get_list(config, "laps")? else {
            return Ok(());
        };
        let keep = self.selected(&tokens, session.laps.len())?;

        let laps = std::mem::take(&mut session.laps);
        session.laps = laps
            .into_iter()
            .enumerate()
            .filter(|(index, _)| keep.contains(index))
            .map(|(_, lap)| lap)
            .collect();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "LapsSelection"
    }
}
