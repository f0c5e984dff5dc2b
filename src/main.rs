use anyhow::{Context, Result, bail};
use clap::Parser;
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use trackpipe::config::{Config, PipelineFile, Stage, parse_option};
use trackpipe::{Pipeline, filters, loaders, outputs};

#[derive(Parser, Debug)]
#[command(name = "trackpipe")]
#[command(about = "Filter recorded GPS sessions and render them", long_about = None)]
struct Cli {
    /// GPX/FIT files or directories holding them
    #[arg(required_unless_present = "list")]
    inputs: Vec<PathBuf>,

    /// Filter to apply, in order (repeatable)
    #[arg(short, long = "filter")]
    filters: Vec<String>,

    /// Output to render (repeatable)
    #[arg(short, long = "output")]
    outputs: Vec<String>,

    /// KEY=VALUE option handed to every stage (repeatable)
    #[arg(short = 's', long = "option")]
    options: Vec<String>,

    /// JSON pipeline file, its stages run before command line ones
    #[arg(short, long)]
    pipeline: Option<PathBuf>,

    /// Directory receiving rendered files
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Render outputs of a session concurrently
    #[arg(long)]
    parallel: bool,

    /// List registered filters and outputs, then exit
    #[arg(long)]
    list: bool,

    /// Enable debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    if cli.list {
        println!("Filters: {}", filters::registry().names().join(", "));
        println!("Outputs: {}", outputs::registry().names().join(", "));
        return Ok(());
    }

    let pipeline = build_pipeline(&cli)?;
    if pipeline.outputs.is_empty() {
        tracing::warn!("no output configured, sessions will only be filtered");
    }

    let inputs = loaders::collect_inputs(&cli.inputs);
    if inputs.is_empty() {
        bail!("no GPX or FIT files found");
    }

    std::fs::create_dir_all(&cli.dir)
        .with_context(|| format!("creating {}", cli.dir.display()))?;

    let stems: HashMap<PathBuf, String> = inputs
        .iter()
        .cloned()
        .zip(loaders::artifact_stems(&inputs))
        .collect();

    let mut failures = 0;
    for (path, mut session) in loaders::load_all(&inputs) {
        pipeline
            .apply_filters(&mut session)
            .with_context(|| format!("filtering {}", path.display()))?;

        let stem = &stems[&path];
        for report in pipeline.render_outputs(&session, &cli.dir, stem, cli.parallel) {
            match report.path {
                Ok(written) => println!("✓ {} -> {}", report.output, written.display()),
                Err(e) => {
                    failures += 1;
                    println!("✗ {} failed for {}: {}", report.output, path.display(), e);
                }
            }
        }
    }

    if failures > 0 {
        bail!("{failures} outputs failed");
    }
    Ok(())
}

fn build_pipeline(cli: &Cli) -> Result<Pipeline> {
    let mut pipeline = match &cli.pipeline {
        Some(path) => Pipeline::from(
            PipelineFile::load(path).with_context(|| format!("reading {}", path.display()))?,
        ),
        None => Pipeline::new(),
    };
    pipeline.filters.extend(cli.filters.iter().map(Stage::new));
    pipeline.outputs.extend(cli.outputs.iter().map(Stage::new));

    let mut global = Config::new();
    for pair in &cli.options {
        let (key, value) = parse_option(pair)?;
        global.insert(key, value);
    }
    pipeline.merge_options(&global);

    pipeline.validate()?;
    Ok(pipeline)
}
