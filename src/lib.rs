//! # trackpipe
//!
//! Runs recorded GPS sessions through named filters and outputs.
//!
//! Filters (`EmptyLaps`, `MergeLaps`, ...) mutate a [`Session`] in place, in
//! the order they are configured. Outputs (`GoogleMap`, `Summary`,
//! `GeoJson`) render the filtered session to files. Both are looked up by
//! name in process-wide registries, see [`filters::registry`] and
//! [`outputs::registry`].

pub mod config;
pub mod error;
pub mod filters;
pub mod geo_math;
pub mod loaders;
pub mod outputs;
pub mod pipeline;
pub mod registry;
pub mod session;
pub mod text_format;

pub use config::{Config, PipelineFile, Stage};
pub use error::{PipelineError, Result};
pub use filters::Filter;
pub use outputs::Output;
pub use pipeline::{OutputReport, Pipeline};
pub use registry::Registry;
pub use session::{Lap, Point, Session};
