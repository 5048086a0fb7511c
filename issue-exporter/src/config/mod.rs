//! Exporter configuration.
//!
//! The configuration file is optional TOML holding the identity map, the
//! label map, request pacing and retry settings, and optional custom body
//! templates:
//!
//! ```toml
//! comment-delay-ms = 1000
//! fallback-user = "migration-bot"
//!
//! [retry]
//! max-retries = 3
//!
//! [users]
//! "someone@example.com" = "someone-on-github"
//!
//! [labels]
//! "Priority-High" = "priority: high"
//! ```

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{ExporterConfig, RetrySettings};

use std::path::Path;
use tracing::{debug, info};
use url::Url;

/// Custom body templates referenced by the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomTemplates {
    /// Issue body template contents.
    pub issue: Option<String>,

    /// Comment body template contents.
    pub comment: Option<String>,
}

/// Loads and validates a configuration file.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file is missing, cannot be parsed, or
/// fails validation.
pub fn load_config(path: &Path) -> Result<ExporterConfig, ConfigError> {
    debug!(path = %path.display(), "Loading configuration");

    if !path.exists() {
        return Err(ConfigError::MissingFile {
            path: path.display().to_string(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: ExporterConfig = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
        path: path.display().to_string(),
        source: e,
    })?;

    validate_config(&config, path)?;

    info!(
        users = config.users.len(),
        labels = config.labels.len(),
        comment_delay_ms = config.comment_delay_ms,
        "Loaded configuration"
    );
    Ok(config)
}

/// Reads the custom templates referenced by a configuration.
///
/// Template paths are resolved relative to `base_dir`, normally the directory
/// holding the configuration file.
///
/// # Errors
///
/// Returns [`ConfigError`] if a referenced template cannot be read or is empty.
pub fn load_templates(
    config: &ExporterConfig,
    base_dir: &Path,
) -> Result<CustomTemplates, ConfigError> {
    let read = |relative: &Option<std::path::PathBuf>| -> Result<Option<String>, ConfigError> {
        let Some(relative) = relative else {
            return Ok(None);
        };
        let path = base_dir.join(relative);
        let template = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
        if template.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                message: "template is empty".to_string(),
            });
        }
        Ok(Some(template))
    };

    Ok(CustomTemplates {
        issue: read(&config.issue_template)?,
        comment: read(&config.comment_template)?,
    })
}

fn validate_config(config: &ExporterConfig, path: &Path) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        path: path.display().to_string(),
        message,
    };

    if let Some(fallback) = &config.fallback_user {
        if fallback.trim().is_empty() {
            return Err(invalid("fallback-user is empty".to_string()));
        }
    }

    if let Some(api_url) = &config.api_url {
        Url::parse(api_url).map_err(|e| invalid(format!("api-url '{api_url}' is invalid: {e}")))?;
    }

    if config.retry.max_delay_ms < config.retry.initial_delay_ms {
        return Err(invalid(
            "retry.max-delay-ms must not be lower than retry.initial-delay-ms".to_string(),
        ));
    }

    if let Some((author, _)) = config.users.iter().find(|(_, user)| user.trim().is_empty()) {
        return Err(invalid(format!("users: empty username for '{author}'")));
    }

    Ok(())
}
