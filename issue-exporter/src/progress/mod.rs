//! Snapshot of what already exists on the destination.
//!
//! The index is built once per run by walking every page of the destination's
//! issue listing. It is keyed by issue title, which is the only link between a
//! source issue and the destination issue created from it: two source issues
//! sharing a title cannot be told apart.

use crate::service::{IssueService, ServiceError};
use std::collections::HashMap;
use tracing::{debug, info, info_span, warn, Instrument};

/// What the exporter knows about an issue that exists on the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationIssue {
    /// Destination issue id.
    pub id: u64,

    /// Issue title.
    pub title: String,

    /// Migrated comments present, counting the description as the first.
    pub comment_count: usize,
}

/// Title-keyed index of destination issues.
#[derive(Debug, Clone, Default)]
pub struct ProgressIndex {
    issues: HashMap<String, DestinationIssue>,
}

impl ProgressIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index from every page of the destination's issue listing.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] if any page request fails. A partial index is
    /// never returned, since resuming from incomplete knowledge would
    /// duplicate issues.
    pub async fn build<S>(service: &S) -> Result<Self, ServiceError>
    where
        S: IssueService + ?Sized,
    {
        let span = info_span!("build_progress_index");

        async {
            let mut index = Self::new();
            let mut page_token: Option<String> = None;
            let mut pages = 0usize;

            loop {
                let page = service.list_existing_issues(page_token.as_deref()).await?;
                pages += 1;
                debug!(page = pages, count = page.items.len(), "Fetched issue page");

                for existing in page.items {
                    index.insert(DestinationIssue {
                        id: existing.id,
                        title: existing.title,
                        comment_count: existing.comment_count,
                    });
                }

                match page.next_page {
                    Some(token) => page_token = Some(token),
                    None => break,
                }
            }

            info!(issues = index.len(), pages, "Progress index built");
            Ok::<_, ServiceError>(index)
        }
        .instrument(span)
        .await
    }

    /// Inserts an issue discovered on the destination. The first issue seen
    /// for a title wins.
    pub fn insert(&mut self, issue: DestinationIssue) {
        if let Some(existing) = self.issues.get(&issue.title) {
            warn!(
                title = %issue.title,
                kept = existing.id,
                ignored = issue.id,
                "Several destination issues share a title, keeping the first"
            );
            return;
        }
        self.issues.insert(issue.title.clone(), issue);
    }

    /// Looks up a destination issue by title.
    pub fn lookup(&self, title: &str) -> Option<&DestinationIssue> {
        self.issues.get(title)
    }

    /// Records an issue created during this run. Its description counts as
    /// the first comment.
    pub fn record_created(&mut self, title: &str, id: u64) {
        self.issues.insert(
            title.to_string(),
            DestinationIssue {
                id,
                title: title.to_string(),
                comment_count: 1,
            },
        );
    }

    /// Records that a comment was added to the issue with the given title.
    pub fn record_comment(&mut self, title: &str) {
        if let Some(issue) = self.issues.get_mut(title) {
            issue.comment_count += 1;
        }
    }

    /// Number of indexed issues.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Returns true if no issues are indexed.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}
