//! Runner configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for running an export.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Path to the source export file.
    issue_file: PathBuf,
    /// Project to select from a multi-project export.
    project_name: Option<String>,
    /// Destination repository owner.
    owner: String,
    /// Destination repository name.
    repo: String,
    /// GitHub token used for API calls.
    token: String,
    /// Whether to preview the export without creating anything.
    dry_run: bool,
    /// Path to the exporter configuration file.
    config_path: Option<PathBuf>,
    /// Overrides the configured delay between mutation requests.
    comment_delay: Option<Duration>,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(
        issue_file: PathBuf,
        owner: String,
        repo: String,
        token: String,
        dry_run: bool,
    ) -> Self {
        Self {
            issue_file,
            project_name: None,
            owner,
            repo,
            token,
            dry_run,
            config_path: None,
            comment_delay: None,
        }
    }

    /// Selects a project from a multi-project export.
    pub fn with_project_name(mut self, project_name: String) -> Self {
        self.project_name = Some(project_name);
        self
    }

    /// Sets the exporter configuration file.
    pub fn with_config_path(mut self, config_path: PathBuf) -> Self {
        self.config_path = Some(config_path);
        self
    }

    /// Overrides the delay between mutation requests.
    pub fn with_comment_delay(mut self, comment_delay: Duration) -> Self {
        self.comment_delay = Some(comment_delay);
        self
    }

    /// Returns the source export path.
    pub fn issue_file(&self) -> &Path {
        &self.issue_file
    }

    /// Returns the selected project name.
    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    /// Returns the destination repository owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the destination repository name.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the exporter configuration file path.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Returns the delay override.
    pub fn comment_delay(&self) -> Option<Duration> {
        self.comment_delay
    }
}
