//! Export engine error types.

use crate::service::ServiceError;
use crate::templates::TemplateError;
use thiserror::Error;

/// Errors that abort an export run.
#[derive(Debug, Error)]
pub enum ExportError {
    /// `start` or `plan` was called before `init`.
    #[error("Export engine has not been initialized")]
    NotInitialized,

    /// The destination listing could not be read completely.
    #[error("Failed to build progress index: {0}")]
    Index(#[source] ServiceError),

    /// Creating an issue or one of its comments failed.
    #[error("Failed to export issue '{title}': {source}")]
    Issue {
        title: String,
        #[source]
        source: ServiceError,
    },

    /// An issue or comment body could not be rendered.
    #[error("Failed to render body for issue '{title}': {source}")]
    Render {
        title: String,
        #[source]
        source: TemplateError,
    },
}
