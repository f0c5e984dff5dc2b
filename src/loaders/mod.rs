pub mod fit;
pub mod gpx;

use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{PipelineError, Result};
use crate::session::Session;

pub use self::fit::FitLoader;
pub use self::gpx::GpxLoader;

// build a Session from one recorded file
pub trait Loader: Sync {
    fn load(&self, path: &Path) -> Result<Session>;

    fn accepts(&self, path: &Path) -> bool;

    fn name(&self) -> &'static str;
}

static LOADERS: [&dyn Loader; 2] = [&GpxLoader, &FitLoader];

pub fn loader_for(path: &Path) -> Option<&'static dyn Loader> {
    LOADERS.iter().copied().find(|loader| loader.accepts(path))
}

pub(crate) fn load_error(path: &Path, reason: impl ToString) -> PipelineError {
    PipelineError::Load {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Expands directories into the files some loader accepts, sorted.
/// Files given explicitly are kept as they are. A file reached twice is
/// listed once.
pub fn collect_inputs(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut inputs: Vec<PathBuf> = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|entry| {
                    entry.file_type().is_file() && loader_for(entry.path()).is_some()
                })
                .map(|entry| entry.into_path())
                .collect();
            found.sort();
            tracing::info!("found {} track files in {}", found.len(), path.display());
            inputs.append(&mut found);
        } else {
            inputs.push(path.clone());
        }
    }

    let mut seen = HashSet::new();
    inputs.retain(|path| seen.insert(path.clone()));
    inputs
}

pub fn load(path: &Path) -> Result<Session> {
    let loader = loader_for(path).ok_or_else(|| load_error(path, "unsupported file type"))?;
    tracing::debug!("{} reading {}", loader.name(), path.display());
    loader.load(path)
}

/// Loads every file in parallel. Files that fail are logged and skipped;
/// the rest keep their input order.
pub fn load_all(paths: &[PathBuf]) -> Vec<(PathBuf, Session)> {
    let sessions: Vec<(PathBuf, Session)> = paths
        .par_iter()
        .progress_count(paths.len() as u64)
        .filter_map(|path| match load(path) {
            Ok(session) => Some((path.clone(), session)),
            Err(e) => {
                tracing::warn!("✗ {}", e);
                None
            }
        })
        .collect();

    tracing::info!("✓ loaded {} of {} files", sessions.len(), paths.len());
    sessions
}

/// File stem for each input's rendered artifacts, unique within `paths`.
///
/// `ride.fit.gz` gives `ride`. Inputs sharing a stem get `-2`, `-3`, ...
/// appended in order, so no input overwrites another one's files.
pub fn artifact_stems(paths: &[PathBuf]) -> Vec<String> {
    let mut taken = HashSet::new();
    paths
        .iter()
        .map(|path| {
            let base = base_stem(path);
            let mut stem = base.clone();
            let mut counter = 1;
            while !taken.insert(stem.clone()) {
                counter += 1;
                stem = format!("{base}-{counter}");
            }
            stem
        })
        .collect()
}

fn base_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");
    let lower = name.to_ascii_lowercase();
    let trimmed = if lower.ends_with(".fit.gz") {
        &name[..name.len() - ".fit.gz".len()]
    } else {
        name.rsplit_once('.').map_or(name, |(stem, _)| stem)
    };
    if trimmed.is_empty() {
        String::from("session")
    } else {
        trimmed.to_string()
    }
}
