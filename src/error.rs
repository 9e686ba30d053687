//! Error types for tierlog

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by loggers, sinks and the registry
#[derive(Error, Debug)]
pub enum LogError {
    /// A severity name that is not part of the scale
    #[error("Unknown severity level: {0}")]
    UnknownSeverity(String),

    /// A file sink could not be opened or written
    #[error("Log file {} unavailable: {source}", .path.display())]
    SinkIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Host introspection failed while gathering system information
    #[error("Host query failed: {0}")]
    HostQuery(String),

    /// No logger registered under this name
    #[error("No logger named '{0}'")]
    UnknownLogger(String),

    /// Logger names double as file names, so they must stay inside the log directory
    #[error("Invalid logger name '{0}'")]
    InvalidName(String),
}

impl LogError {
    pub(crate) fn sink_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LogError::SinkIo {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, LogError>;
