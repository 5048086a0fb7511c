//! Configuration file deserialization.

use crate::channel::{RetryPolicy, DEFAULT_MIN_INTERVAL};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Retry settings from the `[retry]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RetrySettings {
    /// Retries after the initial attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry, in milliseconds.
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Upper bound for a single retry delay, in milliseconds.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl RetrySettings {
    /// Converts the settings into a retry policy.
    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
            ..RetryPolicy::default()
        }
    }
}

/// Parsed contents of the exporter configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ExporterConfig {
    /// Minimum delay between mutation requests, in milliseconds.
    #[serde(default = "default_comment_delay_ms")]
    pub comment_delay_ms: u64,

    /// Destination username used for authors without a mapping.
    #[serde(default)]
    pub fallback_user: Option<String>,

    /// GitHub API base URL, for GitHub Enterprise.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Path to a custom issue body template, relative to the config file.
    #[serde(default)]
    pub issue_template: Option<PathBuf>,

    /// Path to a custom comment body template, relative to the config file.
    #[serde(default)]
    pub comment_template: Option<PathBuf>,

    /// Retry behaviour for transient failures.
    #[serde(default)]
    pub retry: RetrySettings,

    /// Source author to destination username.
    #[serde(default)]
    pub users: HashMap<String, String>,

    /// Source label to destination label.
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            comment_delay_ms: default_comment_delay_ms(),
            fallback_user: None,
            api_url: None,
            issue_template: None,
            comment_template: None,
            retry: RetrySettings::default(),
            users: HashMap::new(),
            labels: HashMap::new(),
        }
    }
}

impl ExporterConfig {
    /// Minimum delay between mutation requests.
    #[must_use]
    pub fn comment_delay(&self) -> Duration {
        Duration::from_millis(self.comment_delay_ms)
    }
}

fn default_comment_delay_ms() -> u64 {
    DEFAULT_MIN_INTERVAL.as_millis() as u64
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    1_000
}

fn default_max_delay_ms() -> u64 {
    60_000
}
