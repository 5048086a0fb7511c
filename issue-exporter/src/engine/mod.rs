//! Export and resume engine.
//!
//! The engine walks the source issues in order and, for each one, decides
//! between creating it, re-adding its missing trailing comments, or skipping
//! it, based on a [`ProgressIndex`] of the destination built by [`ExportEngine::init`].
//!
//! Every destination call is awaited before the next one is issued. Comment
//! order on the destination is the migrated history, so nothing is sent
//! concurrently. The first failure that survives the request channel's
//! retries aborts the run; no cleanup is attempted, because the next run's
//! index scan sees exactly what was created.

mod counters;
mod error;
mod plan;

pub use counters::ExportCounters;
pub use error::ExportError;
pub use plan::{IssueAction, PlannedIssue};

use crate::filter::visible_comments;
use crate::identity::{IdentityResolver, ResolvedAuthor};
use crate::progress::ProgressIndex;
use crate::service::{IssueService, NewComment, NewIssue};
use crate::source::{SourceComment, SourceIssue};
use crate::templates::TemplateRenderer;
use tracing::{debug, info, info_span, Instrument};

/// Author name used when an issue has neither a description nor an owner.
const UNKNOWN_AUTHOR: &str = "unknown";

/// Migrates a batch of source issues to a destination service.
pub struct ExportEngine<S> {
    service: S,
    resolver: IdentityResolver,
    renderer: TemplateRenderer,
    issues: Vec<SourceIssue>,
    index: Option<ProgressIndex>,
    counters: ExportCounters,
}

impl<S: IssueService> ExportEngine<S> {
    /// Creates an engine for the given source issues.
    pub fn new(
        service: S,
        resolver: IdentityResolver,
        renderer: TemplateRenderer,
        issues: Vec<SourceIssue>,
    ) -> Self {
        let counters = ExportCounters::new(issues.len());
        Self {
            service,
            resolver,
            renderer,
            issues,
            index: None,
            counters,
        }
    }

    /// Builds the progress index from the destination. Must be called before
    /// [`start`](Self::start) or [`plan`](Self::plan).
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Index`] if any listing page fails.
    pub async fn init(&mut self) -> Result<(), ExportError> {
        let index = ProgressIndex::build(&self.service)
            .await
            .map_err(ExportError::Index)?;
        self.index = Some(index);
        Ok(())
    }

    /// Runs the migration and returns the final counters.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NotInitialized`] if [`init`](Self::init) was
    /// not called, or the first unrecoverable issue or comment failure. The
    /// counters of the aborted run remain available through
    /// [`counters`](Self::counters).
    pub async fn start(&mut self) -> Result<ExportCounters, ExportError> {
        let mut index = self.index.take().ok_or(ExportError::NotInitialized)?;
        let mut counters = ExportCounters::new(self.issues.len());

        info!(issues = counters.issues_total, "Starting export");
        let result = self.export_all(&mut index, &mut counters).await;

        self.index = Some(index);
        self.counters = counters;
        result?;

        info!(
            created = counters.issues_created,
            skipped = counters.issues_skipped,
            repaired = counters.issues_repaired,
            comments = counters.comments_created,
            "Export complete"
        );
        Ok(counters)
    }

    /// Returns the action a real run would take for every issue, without
    /// calling the destination.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NotInitialized`] if [`init`](Self::init) was
    /// not called.
    pub fn plan(&self) -> Result<Vec<PlannedIssue>, ExportError> {
        let mut index = self.index.clone().ok_or(ExportError::NotInitialized)?;

        Ok(self
            .issues
            .iter()
            .map(|issue| {
                let visible = visible_comments(issue.comments()).count();
                let action = IssueAction::decide(index.lookup(&issue.title), visible);
                if action == IssueAction::Create {
                    // Later issues with the same title will see this one
                    index.record_created(&issue.title, 0);
                    for _ in 1..visible {
                        index.record_comment(&issue.title);
                    }
                }
                PlannedIssue {
                    title: issue.title.clone(),
                    action,
                    comments_to_create: action.comments_to_create(visible),
                }
            })
            .collect())
    }

    /// Counters of the last run (or of the aborted part of it).
    pub fn counters(&self) -> ExportCounters {
        self.counters
    }

    /// Progress index, once built.
    pub fn index(&self) -> Option<&ProgressIndex> {
        self.index.as_ref()
    }

    async fn export_all(
        &self,
        index: &mut ProgressIndex,
        counters: &mut ExportCounters,
    ) -> Result<(), ExportError> {
        for issue in &self.issues {
            counters.begin_issue();
            let span = info_span!(
                "export_issue",
                title = %issue.title,
                position = counters.issues_processed,
                total = counters.issues_total
            );
            self.export_issue(issue, index, counters)
                .instrument(span)
                .await?;
        }
        Ok(())
    }

    async fn export_issue(
        &self,
        issue: &SourceIssue,
        index: &mut ProgressIndex,
        counters: &mut ExportCounters,
    ) -> Result<(), ExportError> {
        let visible: Vec<&SourceComment> = visible_comments(issue.comments()).collect();

        match IssueAction::decide(index.lookup(&issue.title), visible.len()) {
            IssueAction::Create => {
                let id = self.create_issue(issue, visible.first().copied()).await?;
                index.record_created(&issue.title, id);
                counters.issues_created += 1;
                info!(issue_id = id, "Issue created");

                self.create_comments(issue, id, &visible, 1, index, counters)
                    .await?;
            }
            IssueAction::Repair { id, from } => {
                info!(
                    issue_id = id,
                    present = from,
                    visible = visible.len(),
                    "Issue exists with missing comments, re-adding them"
                );
                self.create_comments(issue, id, &visible, from, index, counters)
                    .await?;
                counters.issues_skipped += 1;
                counters.issues_repaired += 1;
            }
            IssueAction::Skip { id } => {
                debug!(issue_id = id, "Issue already exported, skipping");
                counters.issues_skipped += 1;
            }
        }

        Ok(())
    }

    async fn create_issue(
        &self,
        issue: &SourceIssue,
        description: Option<&SourceComment>,
    ) -> Result<u64, ExportError> {
        let owner = issue.owner.as_ref().map(|owner| self.resolver.resolve(&owner.name));
        let reporter = match (description, &owner) {
            (Some(comment), _) => self.resolver.resolve(&comment.author.name),
            (None, Some(owner)) => owner.clone(),
            (None, None) => self.resolver.resolve(UNKNOWN_AUTHOR),
        };

        let body = self
            .renderer
            .render_issue_body(issue, description, &reporter)
            .map_err(|source| ExportError::Render {
                title: issue.title.clone(),
                source,
            })?;

        let new_issue = NewIssue {
            title: issue.title.clone(),
            body,
            state: issue.state,
            labels: self
                .renderer
                .labels()
                .map_all(issue.labels.iter().map(String::as_str)),
            assignee: owner.map(|owner| owner.username),
        };

        self.service
            .create_issue(&new_issue)
            .await
            .map_err(|source| ExportError::Issue {
                title: issue.title.clone(),
                source,
            })
    }

    /// Creates the visible comments from offset `from` onwards, in order.
    async fn create_comments(
        &self,
        issue: &SourceIssue,
        issue_id: u64,
        visible: &[&SourceComment],
        from: usize,
        index: &mut ProgressIndex,
        counters: &mut ExportCounters,
    ) -> Result<(), ExportError> {
        let pending = visible.get(from..).unwrap_or_default();
        counters.begin_comments(pending.len());

        for (offset, comment) in pending.iter().enumerate() {
            let author = self.resolver.resolve(&comment.author.name);
            let new_comment = self.render_comment(issue, comment, from + offset, &author)?;

            self.service
                .create_comment(issue_id, &new_comment)
                .await
                .map_err(|source| ExportError::Issue {
                    title: issue.title.clone(),
                    source,
                })?;

            index.record_comment(&issue.title);
            counters.record_comment();
            debug!(
                issue_id,
                comment = counters.comment_number,
                of = counters.comment_total,
                "Comment created"
            );
        }

        Ok(())
    }

    fn render_comment(
        &self,
        issue: &SourceIssue,
        comment: &SourceComment,
        number: usize,
        author: &ResolvedAuthor,
    ) -> Result<NewComment, ExportError> {
        let body = self
            .renderer
            .render_comment_body(comment, number, author)
            .map_err(|source| ExportError::Render {
                title: issue.title.clone(),
                source,
            })?;

        Ok(NewComment {
            body,
            author: author.username.clone(),
        })
    }
}
