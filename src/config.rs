//! Stage options and pipeline description files.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use crate::error::{PipelineError, Result};
use crate::text_format::split_string;

/// Option name to raw option value, handed to every filter and output.
pub type Config = HashMap<String, String>;

pub const LIST_SEPARATOR: &str = ",";

pub fn get_str<'a>(config: &'a Config, option: &str) -> Option<&'a str> {
    config.get(option).map(String::as_str)
}

/// Parses an option with `FromStr`, `None` when the option is absent.
pub fn get_parsed<T>(config: &Config, stage: &str, option: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match config.get(option) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| PipelineError::invalid_value(stage, option, raw, e.to_string())),
    }
}

/// Comma separated list option; `"none"` yields an empty list.
pub fn get_list(config: &Config, option: &str) -> Result<Option<Vec<String>>> {
    config
        .get(option)
        .map(|raw| split_string(raw, LIST_SEPARATOR))
        .transpose()
}

pub fn get_bool(config: &Config, stage: &str, option: &str) -> Result<Option<bool>> {
    let Some(raw) = config.get(option) else {
        return Ok(None);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(Some(true)),
        "false" | "no" | "0" => Ok(Some(false)),
        _ => Err(PipelineError::invalid_value(
            stage,
            option,
            raw,
            "expected true or false",
        )),
    }
}

/// Parses a `key=value` pair given on the command line.
pub fn parse_option(pair: &str) -> Result<(String, String)> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(PipelineError::invalid_value(
            "command line",
            "option",
            pair,
            "expected key=value",
        )),
    }
}

/// One named stage with its own options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    #[serde(default)]
    pub options: Config,
}

impl Stage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Config::new(),
        }
    }

    pub fn with_option(mut self, key: &str, value: &str) -> Self {
        self.options.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds `global` options this stage does not set itself.
    pub fn merge_defaults(&mut self, global: &Config) {
        for (key, value) in global {
            self.options
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }
}

/// JSON description of an ordered pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineFile {
    #[serde(default)]
    pub filters: Vec<Stage>,
    #[serde(default)]
    pub outputs: Vec<Stage>,
}

impl PipelineFile {
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        serde_json::from_reader(reader).map_err(|e| {
            let shown = path.display().to_string();
            PipelineError::invalid_value("pipeline file", "path", &shown, e.to_string())
        })
    }
}
