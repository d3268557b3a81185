//! Error types for the mood journal.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for mood journal operations.
pub type MoodResult<T> = Result<T, MoodError>;

/// Errors that can occur while using the mood journal.
#[derive(Debug, Error)]
pub enum MoodError {
    /// The history file could not be read or written.
    #[error("cannot access {path}: {source}")]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for a mood config.
    #[error("invalid config file {path}: {source}")]
    ConfigParse {
        /// Config file path.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// The configuration parsed but breaks a rule.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// No mood was given.
    #[error("mood must not be empty")]
    EmptyMood,

    /// The mood contains a line break and cannot be stored on one line.
    #[error("mood must fit on one line")]
    MultilineMood,
}
