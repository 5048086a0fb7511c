//! CLI for the issue exporter.
//!
//! Migrates a Google Code issue export into a GitHub repository. Runs can be
//! repeated: issues that already exist are skipped or completed.

use clap::Parser;
use issue_exporter::{RunSummary, Runner, RunnerConfig, RunnerError};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Issue Exporter - Migrate Google Code issues into GitHub Issues.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the issue export JSON file.
    #[arg(long)]
    issue_file: PathBuf,

    /// Project to export from a multi-project export.
    #[arg(long)]
    project_name: Option<String>,

    /// Owner of the destination repository; also the default author identity.
    #[arg(long)]
    owner: String,

    /// Name of the destination repository.
    #[arg(long)]
    repo: String,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN")]
    token: String,

    /// Path to the exporter configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Delay between creation requests in milliseconds (overrides the config file).
    #[arg(long)]
    comment_delay_ms: Option<u64>,

    /// Preview the export without creating issues or comments.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);
            if summary.has_malformed_records() {
                ExitCode::from(1)
            } else {
                ExitCode::from(0)
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with `RUST_LOG` filtering, defaulting to "info".
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let mut config = RunnerConfig::new(
        args.issue_file,
        args.owner,
        args.repo,
        args.token,
        args.dry_run,
    );
    if let Some(project_name) = args.project_name {
        config = config.with_project_name(project_name);
    }
    if let Some(path) = args.config {
        config = config.with_config_path(path);
    }
    if let Some(delay) = args.comment_delay_ms {
        config = config.with_comment_delay(Duration::from_millis(delay));
    }
    let runner = Runner::new(config)?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Issues in export: {}", summary.issues_total);
    if summary.has_malformed_records() {
        println!("  Malformed records skipped: {}", summary.malformed_records);
    }

    let (created, comments) = if summary.dry_run {
        ("Issues to create", "Comments to create")
    } else {
        ("Issues created", "Comments created")
    };
    println!("  {created}: {}", summary.issues_created);
    println!("  Issues already present: {}", summary.issues_skipped);
    println!("  Issues repaired: {}", summary.issues_repaired);
    println!("  {comments}: {}", summary.comments_created);
}
