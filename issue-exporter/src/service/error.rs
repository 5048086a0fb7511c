//! Destination service error types.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Destination operation that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Listing existing issues.
    ListIssues,
    /// Creating an issue.
    CreateIssue,
    /// Creating a comment.
    CreateComment,
}

impl Operation {
    /// Returns the operation as a string for logging.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListIssues => "list issues",
            Self::CreateIssue => "create issue",
            Self::CreateComment => "create comment",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a failed call may succeed if repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Rate limiting, server errors and transport failures.
    Transient,
    /// Client errors such as validation failures or missing permissions.
    Permanent,
}

/// A destination-service call failed.
#[derive(Debug, Error)]
#[error("{operation} failed: {message}")]
pub struct ServiceError {
    /// Operation that failed.
    pub operation: Operation,

    /// Transient or permanent.
    pub kind: FailureKind,

    /// Human-readable failure description.
    pub message: String,

    /// Delay requested by the service before retrying, if any.
    pub retry_after: Option<Duration>,
}

impl ServiceError {
    /// Creates a transient error.
    pub fn transient(operation: Operation, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind: FailureKind::Transient,
            message: message.into(),
            retry_after: None,
        }
    }

    /// Creates a permanent error.
    pub fn permanent(operation: Operation, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind: FailureKind::Permanent,
            message: message.into(),
            retry_after: None,
        }
    }

    /// Sets the delay requested by the service.
    #[must_use]
    pub fn with_retry_after(mut self, retry_after: Duration) -> Self {
        self.retry_after = Some(retry_after);
        self
    }

    /// Returns true if the call may succeed when repeated.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        self.kind == FailureKind::Transient
    }
}
