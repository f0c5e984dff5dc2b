//! Runs configured filters, then configured outputs, over one Session.
//!
//! Filters run one after another in configured order since each may depend
//! on what the previous ones did. Outputs only read the session and are
//! independent of each other, so they may run on the rayon pool.

use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::config::{Config, PipelineFile, Stage};
use crate::error::{PipelineError, Result};
use crate::filters;
use crate::outputs;
use crate::session::Session;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    pub filters: Vec<Stage>,
    pub outputs: Vec<Stage>,
}

/// Result of one output for one session.
#[derive(Debug)]
pub struct OutputReport {
    pub output: String,
    pub path: Result<PathBuf>,
}

impl From<PipelineFile> for Pipeline {
    fn from(file: PipelineFile) -> Self {
        Self {
            filters: file.filters,
            outputs: file.outputs,
        }
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, stage: Stage) -> Self {
        self.filters.push(stage);
        self
    }

    pub fn output(mut self, stage: Stage) -> Self {
        self.outputs.push(stage);
        self
    }

    /// Fills in `global` options every stage leaves unset.
    pub fn merge_options(&mut self, global: &Config) {
        for stage in self.filters.iter_mut().chain(self.outputs.iter_mut()) {
            stage.merge_defaults(global);
        }
    }

    /// Checks every stage name against the registries.
    pub fn validate(&self) -> Result<()> {
        if let Some(stage) = self
            .filters
            .iter()
            .find(|stage| !filters::registry().contains(&stage.name))
        {
            return Err(PipelineError::UnknownFilterName {
                name: stage.name.clone(),
            });
        }
        if let Some(stage) = self
            .outputs
            .iter()
            .find(|stage| !outputs::registry().contains(&stage.name))
        {
            return Err(PipelineError::UnknownOutputName {
                name: stage.name.clone(),
            });
        }
        Ok(())
    }

    /// Applies every filter in order. The first failure aborts the run.
    ///
    /// Unknown names are reported before the session is touched.
    pub fn apply_filters(&self, session: &mut Session) -> Result<()> {
        let resolved = self
            .filters
            .iter()
            .map(|stage| filters::create(&stage.name).map(|filter| (filter, &stage.options)))
            .collect::<Result<Vec<_>>>()?;

        for (filter, options) in resolved {
            let (laps, points) = (session.laps.len(), session.point_count());
            filter.apply(session, options)?;
            tracing::info!(
                "{}: {} laps / {} points -> {} laps / {} points",
                filter.name(),
                laps,
                points,
                session.laps.len(),
                session.point_count()
            );
        }
        Ok(())
    }

    /// Renders every output into `dir/<stem>.<extension>`.
    ///
    /// Each output gets its own report; one failing leaves the others alone.
    pub fn render_outputs(
        &self,
        session: &Session,
        dir: &Path,
        stem: &str,
        parallel: bool,
    ) -> Vec<OutputReport> {
        let render = |stage: &Stage| OutputReport {
            output: stage.name.clone(),
            path: render_stage(stage, session, dir, stem),
        };

        if parallel {
            self.outputs.par_iter().map(render).collect()
        } else {
            self.outputs.iter().map(render).collect()
        }
    }
}

fn render_stage(stage: &Stage, session: &Session, dir: &Path, stem: &str) -> Result<PathBuf> {
    let output = outputs::create(&stage.name)?;
    let path = outputs::render_to_file(output.as_ref(), session, &stage.options, dir, stem)?;
    tracing::info!("{} wrote {}", output.name(), path.display());
    Ok(path)
}
