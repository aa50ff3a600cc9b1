//! Error types for renderizer-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while assembling the global context.
///
/// Only settings loading can fail; typing, path building, and merging
/// always succeed.
#[derive(Debug, Error)]
pub enum ContextError {
    /// A settings file could not be read (permission denied, missing explicit file, etc.).
    #[error("failed to read settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load, with serde_yaml line context.
    #[error("failed to parse settings at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The settings document decoded to a scalar or sequence instead of a mapping.
    #[error("settings at {path} must be a YAML mapping at the top level")]
    NotAMapping { path: PathBuf },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ContextError {
    ContextError::Io {
        path: path.into(),
        source,
    }
}
