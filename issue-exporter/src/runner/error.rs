//! Runner error types.

/// Errors that can occur while running the exporter.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Source export loading errors.
    #[error(transparent)]
    Source(#[from] crate::source::SourceError),

    /// Custom template errors.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),

    /// Errors that aborted the export.
    #[error(transparent)]
    Export(#[from] crate::engine::ExportError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),
}
