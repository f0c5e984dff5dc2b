pub mod empty_laps;
pub mod laps_selection;
pub mod merge_laps;
pub mod min_point_distance;

use std::sync::OnceLock;

use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::registry::Registry;
use crate::session::Session;

pub use empty_laps::EmptyLaps;
pub use laps_selection::LapsSelection;
pub use merge_laps::MergeLaps;
pub use min_point_distance::MinPointDistance;

// mutate a Session in place
pub trait Filter {
    fn apply(&self, session: &mut Session, config: &Config) -> Result<()>;

    /// Registry key, unique among filters.
    fn name(&self) -> &'static str;
}

fn boxed<F: Filter + Default + 'static>() -> Box<dyn Filter> {
    Box::new(F::default())
}

pub fn register<F: Filter + Default + 'static>(registry: &mut Registry<dyn Filter>) -> Result<()> {
    registry.register(F::default().name(), boxed::<F>)
}

/// Every filter shipped with the crate. New filters add one line here.
pub fn builtin_registry() -> Result<Registry<dyn Filter>> {
    let mut registry = Registry::new("filter");
    register::<EmptyLaps>(&mut registry)?;
    register::<MergeLaps>(&mut registry)?;
    register::<MinPointDistance>(&mut registry)?;
    register::<LapsSelection>(&mut registry)?;
    tracing::debug!("{} filters available", registry.len());
    Ok(registry)
}

/// Process-wide filter registry, built on first use.
pub fn registry() -> &'static Registry<dyn Filter> {
    static REGISTRY: OnceLock<Registry<dyn Filter>> = OnceLock::new();
    REGISTRY.get_or_init(|| builtin_registry().expect("builtin filter names to be unique"))
}

pub fn create(name: &str) -> Result<Box<dyn Filter>> {
    registry()
        .create(name)
        .ok_or_else(|| PipelineError::UnknownFilterName {
            name: name.to_string(),
        })
}
