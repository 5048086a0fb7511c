#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod channel;
pub mod config;
pub mod engine;
pub mod filter;
pub mod github;
pub mod identity;
pub mod labels;
pub mod progress;
pub mod rate_limit;
pub mod runner;
pub mod service;
pub mod source;
pub mod summary;
pub mod templates;

pub use channel::{RateLimitedChannel, RetryPolicy};
pub use config::{load_config, load_templates, ConfigError, CustomTemplates, ExporterConfig};
pub use engine::{ExportCounters, ExportEngine, ExportError, IssueAction, PlannedIssue};
pub use filter::{visible_comments, visible_count};
pub use github::GitHubIssueService;
pub use identity::{IdentityResolver, ResolvedAuthor};
pub use labels::LabelMapper;
pub use progress::{DestinationIssue, ProgressIndex};
pub use rate_limit::{
    check_core_rate_limit, ensure_core_rate_limit, wait_for_retry_after, wait_if_needed,
    RateLimitInfo,
};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use service::{
    ExistingIssue, FailureKind, IssuePage, IssueService, NewComment, NewIssue, Operation,
    ServiceError,
};
pub use source::{
    load_issues, parse_records, IssueState, LoadedIssues, SourceComment, SourceError, SourceIssue,
};
pub use summary::RunSummary;
pub use templates::{TemplateError, TemplateRenderer};
