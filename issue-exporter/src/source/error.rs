//! Source loading error types.

use thiserror::Error;

/// Errors that can occur while loading the source export.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to read the export file.
    #[error("Failed to read issue file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The export is not valid JSON.
    #[error("Failed to parse issue file '{path}': {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The requested project is not part of the export.
    #[error("Project '{name}' not found in issue file '{path}'")]
    ProjectNotFound { path: String, name: String },

    /// The export does not have the expected shape.
    #[error("Issue file '{path}' has no issue list: {message}")]
    MissingIssues { path: String, message: String },
}
