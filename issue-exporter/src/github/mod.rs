//! GitHub implementation of the destination interface.
//!
//! Issues are created through the REST API with `octocrab`. GitHub cannot
//! create an issue in the closed state, so closed source issues are closed by
//! a follow-up update; a failure of that update is logged and tolerated,
//! since the issue itself exists and a re-run would skip it anyway.
//!
//! Rate-limited failures carry the time left until the core window resets,
//! so the request channel waits at least that long before retrying.

mod classify;
mod listing;

use crate::rate_limit::{check_core_rate_limit, ensure_core_rate_limit, unix_now};
use crate::service::{
    IssuePage, IssueService, IssueState, NewComment, NewIssue, Operation, ServiceError,
};
use async_trait::async_trait;
use classify::{is_rate_limited, service_error};
use listing::{existing_issue, next_page_token, page_number};
use octocrab::models::IssueState as GitHubIssueState;
use octocrab::params;
use octocrab::Octocrab;
use tracing::{debug, info, warn};

/// Results per page for the issue listing.
const ISSUES_PER_PAGE: u8 = 100;

/// Issue service backed by a GitHub repository.
#[derive(Debug, Clone)]
pub struct GitHubIssueService {
    octocrab: Octocrab,
    owner: String,
    repo: String,
}

impl GitHubIssueService {
    /// Creates a service for `owner/repo` using an authenticated client.
    pub fn new(octocrab: Octocrab, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            octocrab,
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Returns the repository in "owner/name" format.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    async fn close_issue(&self, number: u64) -> Result<(), octocrab::Error> {
        self.octocrab
            .issues(&self.owner, &self.repo)
            .update(number)
            .state(GitHubIssueState::Closed)
            .send()
            .await?;
        Ok(())
    }

    /// Converts a failed call, attaching the core reset delay when GitHub
    /// refused it for rate limiting.
    async fn call_error(&self, operation: Operation, error: octocrab::Error) -> ServiceError {
        let rate_limited = is_rate_limited(&error);
        let failure = service_error(operation, error);
        if !rate_limited {
            return failure;
        }

        match check_core_rate_limit(&self.octocrab).await {
            Ok(info) => match info.retry_after(unix_now()) {
                Some(retry_after) => failure.with_retry_after(retry_after),
                None => failure,
            },
            Err(e) => {
                debug!(error = %e, "Could not read rate limit after a rate-limited call");
                failure
            }
        }
    }
}

#[async_trait]
impl IssueService for GitHubIssueService {
    async fn list_existing_issues(
        &self,
        page_token: Option<&str>,
    ) -> Result<IssuePage, ServiceError> {
        let page_number = page_number(page_token)?;
        debug!(repo = %self.full_name(), page = page_number, "Listing existing issues");

        let page = match self
            .octocrab
            .issues(&self.owner, &self.repo)
            .list()
            .state(params::State::All)
            .per_page(ISSUES_PER_PAGE)
            .page(page_number)
            .send()
            .await
        {
            Ok(page) => page,
            Err(e) => return Err(self.call_error(Operation::ListIssues, e).await),
        };

        let has_next = page.next.is_some();
        // The issues endpoint also returns pull requests
        let items = page.items.into_iter().filter_map(existing_issue).collect();

        Ok(IssuePage {
            items,
            next_page: next_page_token(page_number, has_next),
        })
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<u64, ServiceError> {
        ensure_core_rate_limit(&self.octocrab)
            .await
            .map_err(|e| service_error(Operation::CreateIssue, e))?;

        let created = match self
            .octocrab
            .issues(&self.owner, &self.repo)
            .create(&issue.title)
            .body(&issue.body)
            .labels(issue.labels.clone())
            .assignees(issue.assignee.clone().map(|assignee| vec![assignee]))
            .send()
            .await
        {
            Ok(created) => created,
            Err(e) => return Err(self.call_error(Operation::CreateIssue, e).await),
        };
        info!(
            issue_number = created.number,
            title = %issue.title,
            state = issue.state.as_str(),
            "Issue created"
        );

        if issue.state == IssueState::Closed {
            if let Err(e) = self.close_issue(created.number).await {
                warn!(
                    issue_number = created.number,
                    error = %e,
                    "Failed to close issue, leaving it open"
                );
            }
        }

        Ok(created.number)
    }

    async fn create_comment(
        &self,
        issue_id: u64,
        comment: &NewComment,
    ) -> Result<(), ServiceError> {
        ensure_core_rate_limit(&self.octocrab)
            .await
            .map_err(|e| service_error(Operation::CreateComment, e))?;

        if let Err(e) = self
            .octocrab
            .issues(&self.owner, &self.repo)
            .create_comment(issue_id, &comment.body)
            .await
        {
            return Err(self.call_error(Operation::CreateComment, e).await);
        }
        debug!(issue_number = issue_id, author = %comment.author, "Comment created");
        Ok(())
    }
}
