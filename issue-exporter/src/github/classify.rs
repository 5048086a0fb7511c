//! Classification of GitHub API failures.

use crate::service::{FailureKind, Operation, ServiceError};

/// Classifies a response status and message as transient or permanent.
///
/// Rate limiting (429, or 403 with a rate-limit message) and server errors
/// are transient. All other statuses are permanent.
pub(crate) fn classify_status(status: u16, message: &str) -> FailureKind {
    match status {
        _ if is_rate_limit_status(status, message) => FailureKind::Transient,
        500..=599 => FailureKind::Transient,
        _ => FailureKind::Permanent,
    }
}

/// Returns true for 429, or 403 with a rate-limit message.
pub(crate) fn is_rate_limit_status(status: u16, message: &str) -> bool {
    match status {
        429 => true,
        403 => message.to_lowercase().contains("rate limit"),
        _ => false,
    }
}

/// Returns true if the error is GitHub refusing the call for rate limiting.
pub(crate) fn is_rate_limited(error: &octocrab::Error) -> bool {
    match error {
        octocrab::Error::GitHub { source, .. } => {
            is_rate_limit_status(source.status_code.as_u16(), &source.message)
        }
        _ => false,
    }
}

/// Converts an octocrab error into a [`ServiceError`].
pub(crate) fn service_error(operation: Operation, error: octocrab::Error) -> ServiceError {
    let kind = match &error {
        octocrab::Error::GitHub { source, .. } => {
            classify_status(source.status_code.as_u16(), &source.message)
        }
        // Connection failures and timeouts from the HTTP stack
        octocrab::Error::Service { .. } => FailureKind::Transient,
        _ => FailureKind::Permanent,
    };

    ServiceError {
        operation,
        kind,
        message: error.to_string(),
        retry_after: None,
    }
}
