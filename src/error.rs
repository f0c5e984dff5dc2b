use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Everything that can abort a filter, an output, or a whole run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("unknown filter '{name}'")]
    UnknownFilterName { name: String },

    #[error("unknown output '{name}'")]
    UnknownOutputName { name: String },

    /// A stage could not make sense of one of its options.
    #[error("{stage}: invalid value '{value}' for option '{option}': {reason}")]
    InvalidConfigurationValue {
        stage: String,
        option: String,
        value: String,
        reason: String,
    },

    #[error("output '{output}' failed to write: {source}")]
    SinkWriteFailure {
        output: String,
        #[source]
        source: io::Error,
    },

    #[error("{kind} '{name}' is already registered")]
    DuplicateRegistration { kind: &'static str, name: String },

    #[error("failed to load {path}: {reason}")]
    Load { path: String, reason: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl PipelineError {
    pub fn invalid_value(
        stage: &str,
        option: &str,
        value: &str,
        reason: impl Into<String>,
    ) -> Self {
        PipelineError::InvalidConfigurationValue {
            stage: stage.to_string(),
            option: option.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn sink(output: &str, source: io::Error) -> Self {
        PipelineError::SinkWriteFailure {
            output: output.to_string(),
            source,
        }
    }
}
