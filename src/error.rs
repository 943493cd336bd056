//! Error taxonomy for the upload pipeline.
//! Configuration errors are fatal at startup; pipeline errors are scoped to
//! one file and never abort the batch.

use std::path::PathBuf;

use thiserror::Error;

/// Startup-time configuration failure. Malformed target entries are
/// collected so one error names every bad segment.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("malformed upload targets: {}", .0.join("; "))]
    Targets(Vec<String>),
}

/// Failure of one file's pipeline, labeled with the stage it died in.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("log stream {stream} not created: {reason}")]
    StreamCreation { stream: String, reason: String },

    #[error("put events failed for stream {stream}: {reason}")]
    Upload { stream: String, reason: String },

    #[error("failed to move {path} to {dest}: {source}")]
    Archive {
        path: PathBuf,
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Stage label used in failure log events.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Read { .. } => "read",
            Self::Parse { .. } => "parse",
            Self::StreamCreation { .. } => "create_stream",
            Self::Upload { .. } => "put_events",
            Self::Archive { .. } => "archive",
        }
    }
}
