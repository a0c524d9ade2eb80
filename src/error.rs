//! Error type for the fallible edges of the crate (configuration, export,
//! grid construction and render backends).
//!
//! The selection core itself never fails: normalization, window extraction
//! and slicing repair their input instead of rejecting it.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by VolSlice.
#[derive(Error, Debug)]
pub enum VolSliceError {
    /// A grid could not be built from the supplied axes and values.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// Reading or writing a file failed.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The YAML configuration could not be parsed or serialized.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON export failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A rendering backend rejected a draw call.
    #[error("render backend failed: {0}")]
    Render(String),
}

impl VolSliceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, VolSliceError>;
