//! Run counters.

use serde::Serialize;

/// Progress counters for one export run.
///
/// `comment_total` and `comment_number` describe the issue currently (or last)
/// processed and are reset at the start of every issue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExportCounters {
    /// Source issues in the batch.
    pub issues_total: usize,

    /// Issues whose processing has started.
    pub issues_processed: usize,

    /// Issues created during this run.
    pub issues_created: usize,

    /// Issues that already existed on the destination.
    pub issues_skipped: usize,

    /// Existing issues that were missing comments and got them re-added.
    pub issues_repaired: usize,

    /// Comments to create for the current issue.
    pub comment_total: usize,

    /// Comments created so far for the current issue.
    pub comment_number: usize,

    /// Comments created over the whole run.
    pub comments_created: usize,
}

impl ExportCounters {
    /// Creates counters for a batch of `issues_total` issues.
    #[must_use]
    pub fn new(issues_total: usize) -> Self {
        Self {
            issues_total,
            ..Self::default()
        }
    }

    /// Marks the start of a new issue.
    pub fn begin_issue(&mut self) {
        self.issues_processed += 1;
        self.comment_total = 0;
        self.comment_number = 0;
    }

    /// Marks the start of a comment batch for the current issue.
    pub fn begin_comments(&mut self, total: usize) {
        self.comment_total = total;
        self.comment_number = 0;
    }

    /// Records one created comment.
    pub fn record_comment(&mut self) {
        self.comment_number += 1;
        self.comments_created += 1;
    }
}
