//! Run summary types.

use crate::engine::{ExportCounters, IssueAction, PlannedIssue};

/// Summary of a complete run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of valid source issues.
    pub issues_total: usize,

    /// Number of issues created.
    pub issues_created: usize,

    /// Number of issues that already existed (including repaired ones).
    pub issues_skipped: usize,

    /// Number of existing issues that had missing comments re-added.
    pub issues_repaired: usize,

    /// Number of comments created.
    pub comments_created: usize,

    /// Number of source records rejected by the loader.
    pub malformed_records: usize,

    /// Planned actions, filled in dry-run mode.
    pub planned: Vec<PlannedIssue>,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a summary from the counters of a completed export.
    #[must_use]
    pub fn from_counters(counters: &ExportCounters, malformed_records: usize) -> Self {
        Self {
            issues_total: counters.issues_total,
            issues_created: counters.issues_created,
            issues_skipped: counters.issues_skipped,
            issues_repaired: counters.issues_repaired,
            comments_created: counters.comments_created,
            malformed_records,
            planned: Vec::new(),
            dry_run: false,
        }
    }

    /// Creates a summary from a dry-run plan.
    #[must_use]
    pub fn from_plan(planned: Vec<PlannedIssue>, malformed_records: usize) -> Self {
        let mut summary = Self {
            issues_total: planned.len(),
            malformed_records,
            dry_run: true,
            ..Default::default()
        };

        for issue in &planned {
            match issue.action {
                IssueAction::Create => summary.issues_created += 1,
                IssueAction::Repair { .. } => {
                    summary.issues_skipped += 1;
                    summary.issues_repaired += 1;
                }
                IssueAction::Skip { .. } => summary.issues_skipped += 1,
            }
            summary.comments_created += issue.comments_to_create;
        }

        summary.planned = planned;
        summary
    }

    /// Returns true if some source records could not be migrated.
    #[must_use]
    pub fn has_malformed_records(&self) -> bool {
        self.malformed_records > 0
    }
}
