pub mod geojson;
pub mod google_map;
pub mod summary;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::registry::Registry;
use crate::session::Session;

pub use geojson::GeoJson;
pub use google_map::GoogleMap;
pub use summary::Summary;

// render a read-only Session into a stream
pub trait Output {
    /// Writes one complete artifact to `sink`.
    fn render(&self, sink: &mut dyn Write, session: &Session, config: &Config) -> Result<()>;

    /// Registry key, unique among outputs.
    fn name(&self) -> &'static str;

    /// File extension of the artifact, without the dot.
    fn extension(&self) -> &'static str;
}

fn boxed<O: Output + Default + 'static>() -> Box<dyn Output> {
    Box::new(O::default())
}

pub fn register<O: Output + Default + 'static>(registry: &mut Registry<dyn Output>) -> Result<()> {
    registry.register(O::default().name(), boxed::<O>)
}

/// Every output shipped with the crate. New outputs add one line here.
pub fn builtin_registry() -> Result<Registry<dyn Output>> {
    let mut registry = Registry::new("output");
    register::<GoogleMap>(&mut registry)?;
    register::<Summary>(&mut registry)?;
    register::<GeoJson>(&mut registry)?;
    tracing::debug!("{} outputs available", registry.len());
    Ok(registry)
}

/// Process-wide output registry, built on first use.
pub fn registry() -> &'static Registry<dyn Output> {
    static REGISTRY: OnceLock<Registry<dyn Output>> = OnceLock::new();
    REGISTRY.get_or_init(|| builtin_registry().expect("builtin output names to be unique"))
}

pub fn create(name: &str) -> Result<Box<dyn Output>> {
    registry()
        .create(name)
        .ok_or_else(|| PipelineError::UnknownOutputName {
            name: name.to_string(),
        })
}

/// Renders `session` into `dir/stem.<extension>` and returns that path.
pub fn render_to_file(
    output: &dyn Output,
    session: &Session,
    config: &Config,
    dir: &Path,
    stem: &str,
) -> Result<PathBuf> {
    let path = dir.join(format!("{}.{}", stem, output.extension()));
    let file = File::create(&path).map_err(|e| PipelineError::sink(output.name(), e))?;
    let mut writer = BufWriter::new(file);
    let rendered = output.render(&mut writer, session, config).and_then(|()| {
        writer
            .flush()
            .map_err(|e| PipelineError::sink(output.name(), e))
    });
    if let Err(e) = rendered {
        // no half written artifacts
        drop(writer);
        let _ = std::fs::remove_file(&path);
        return Err(e);
    }
    Ok(path)
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
