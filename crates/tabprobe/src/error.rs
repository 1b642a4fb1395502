//! Error types for the tabprobe library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tabprobe operations.
#[derive(Debug, Error)]
pub enum TabprobeError {
    /// Error reading, writing or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Input rejected before any computation (e.g. a non-CSV upload).
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Columns of a table disagree on the row count.
    #[error("Inconsistent table shape: {0}")]
    Shape(String),

    /// Empty file or no header to build a table from.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Invalid quality configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TabprobeError {
    /// Returns true if the error was caused by invalid caller input rather
    /// than by a failure while loading or computing.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TabprobeError::UnsupportedFormat(_) | TabprobeError::Config(_)
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TabprobeError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for tabprobe operations.
pub type Result<T> = std::result::Result<T, TabprobeError>;
