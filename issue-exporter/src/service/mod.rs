//! Destination issue-tracker interface.
//!
//! The export engine only talks to the destination through [`IssueService`],
//! which keeps the engine independent of the HTTP client and lets tests run
//! against an in-memory tracker.

mod error;

pub use error::{FailureKind, Operation, ServiceError};

pub use crate::source::IssueState;
use async_trait::async_trait;

/// An issue that already exists on the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingIssue {
    /// Destination issue id (the issue number on GitHub).
    pub id: u64,

    /// Issue title.
    pub title: String,

    /// Number of migrated comments present, counting the issue description
    /// as the first one.
    pub comment_count: usize,
}

/// One page of the destination's issue listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssuePage {
    /// Issues on this page.
    pub items: Vec<ExistingIssue>,

    /// Token for the following page, absent on the last page.
    pub next_page: Option<String>,
}

/// Issue to create on the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    /// Issue title.
    pub title: String,

    /// Rendered issue body.
    pub body: String,

    /// Desired state after creation.
    pub state: IssueState,

    /// Destination labels.
    pub labels: Vec<String>,

    /// Username to assign, if any.
    pub assignee: Option<String>,
}

/// Comment to create on a destination issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    /// Rendered comment body.
    pub body: String,

    /// Resolved author of the original comment.
    pub author: String,
}

/// Operations the export engine needs from the destination tracker.
///
/// Every call completes before the next one is issued; implementations do not
/// need to support concurrent use beyond being `Send + Sync`.
#[async_trait]
pub trait IssueService: Send + Sync {
    /// Lists one page of existing issues. `None` requests the first page.
    async fn list_existing_issues(&self, page_token: Option<&str>)
        -> Result<IssuePage, ServiceError>;

    /// Creates an issue and returns its destination id.
    async fn create_issue(&self, issue: &NewIssue) -> Result<u64, ServiceError>;

    /// Adds a comment to an existing issue.
    async fn create_comment(&self, issue_id: u64, comment: &NewComment)
        -> Result<(), ServiceError>;
}
