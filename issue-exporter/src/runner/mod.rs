//! Wires configuration, source loading and the GitHub transport into an
//! export run.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::channel::RateLimitedChannel;
use crate::config::{load_config, load_templates, ExporterConfig};
use crate::engine::{ExportEngine, PlannedIssue};
use crate::github::GitHubIssueService;
use crate::identity::IdentityResolver;
use crate::labels::LabelMapper;
use crate::source::load_issues;
use crate::summary::RunSummary;
use crate::templates::{TemplateRenderer, DEFAULT_COMMENT_TEMPLATE, DEFAULT_ISSUE_TEMPLATE};
use octocrab::Octocrab;
use std::path::Path;
use tracing::{error, info, warn};

/// Runs a full export from a source file into a GitHub repository.
pub struct Runner {
    config: RunnerConfig,
    exporter: ExporterConfig,
    octocrab: Octocrab,
}

impl Runner {
    /// Builds a runner from the provided configuration.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let exporter = match config.config_path() {
            Some(path) => load_config(path)?,
            None => ExporterConfig::default(),
        };

        let mut builder = Octocrab::builder().personal_token(config.token().to_string());
        if let Some(api_url) = &exporter.api_url {
            builder = builder.base_uri(api_url.as_str())?;
        }
        let octocrab = builder.build()?;

        Ok(Self {
            config,
            exporter,
            octocrab,
        })
    }

    /// Executes the export.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let loaded = load_issues(self.config.issue_file(), self.config.project_name())?;
        if loaded.issues.is_empty() {
            warn!("No issues found in the source export");
            return Ok(RunSummary {
                malformed_records: loaded.malformed,
                dry_run: self.config.dry_run(),
                ..RunSummary::default()
            });
        }

        let renderer = self.renderer()?;
        let resolver = IdentityResolver::new(
            self.exporter.users.clone(),
            self.exporter
                .fallback_user
                .clone()
                .unwrap_or_else(|| self.config.owner().to_string()),
        );

        let comment_delay = self
            .config
            .comment_delay()
            .unwrap_or_else(|| self.exporter.comment_delay());
        let service = RateLimitedChannel::new(
            GitHubIssueService::new(
                self.octocrab.clone(),
                self.config.owner(),
                self.config.repo(),
            ),
            comment_delay,
            self.exporter.retry.policy(),
        );

        info!(
            repo = %service.inner().full_name(),
            issues = loaded.issues.len(),
            comment_delay_ms = service.min_interval().as_millis() as u64,
            fallback_user = resolver.fallback(),
            "Preparing export"
        );

        let mut engine = ExportEngine::new(service, resolver, renderer, loaded.issues);
        engine.init().await?;

        if self.config.dry_run() {
            let planned = engine.plan()?;
            print_dry_run_preview(&planned);
            return Ok(RunSummary::from_plan(planned, loaded.malformed));
        }

        match engine.start().await {
            Ok(counters) => Ok(RunSummary::from_counters(&counters, loaded.malformed)),
            Err(e) => {
                let counters = engine.counters();
                error!(
                    processed = counters.issues_processed,
                    total = counters.issues_total,
                    created = counters.issues_created,
                    comments = counters.comments_created,
                    "Export aborted, re-run to resume"
                );
                Err(e.into())
            }
        }
    }

    fn renderer(&self) -> Result<TemplateRenderer, RunnerError> {
        let base_dir = self
            .config
            .config_path()
            .and_then(Path::parent)
            .unwrap_or_else(|| Path::new("."));
        let templates = load_templates(&self.exporter, base_dir)?;

        Ok(TemplateRenderer::with_templates(
            LabelMapper::new(self.exporter.labels.clone()),
            templates.issue.as_deref().unwrap_or(DEFAULT_ISSUE_TEMPLATE),
            templates.comment.as_deref().unwrap_or(DEFAULT_COMMENT_TEMPLATE),
        )?)
    }
}

fn print_dry_run_preview(planned: &[PlannedIssue]) {
    println!("\n[DRY RUN] {} issues:\n", planned.len());

    for (i, issue) in planned.iter().enumerate() {
        println!(
            "  [{}/{}] {} ({}, {} comments)",
            i + 1,
            planned.len(),
            issue.title,
            issue.action.as_str(),
            issue.comments_to_create
        );
    }

    println!();
}
