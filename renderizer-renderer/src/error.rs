//! Error types for renderizer-renderer.

use thiserror::Error;

use crate::driver::FailureCode;

/// Errors from the two engine stages of a single template.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template source is not valid syntax.
    #[error("failed to parse template {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// Template parsed but failed while rendering (e.g. an undefined key under the `error` policy).
    #[error("failed to execute template {name}: {source}")]
    Execute {
        name: String,
        #[source]
        source: minijinja::Error,
    },
}

impl RenderError {
    /// Exit-status contribution of this error.
    pub fn failure_code(&self) -> FailureCode {
        match self {
            RenderError::Parse { .. } => FailureCode::Parse,
            RenderError::Execute { .. } => FailureCode::Execute,
        }
    }
}
