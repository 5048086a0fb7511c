//! Rate-limited request channel.
//!
//! [`RateLimitedChannel`] wraps any [`IssueService`] and enforces a minimum
//! interval between mutation calls. Transient failures are retried with
//! exponential backoff, waiting at least as long as the service asked for;
//! permanent failures and exhausted retries are returned to the caller
//! unchanged.

mod retry;

pub use retry::RetryPolicy;

use crate::rate_limit::wait_for_retry_after;
use crate::service::{IssuePage, IssueService, NewComment, NewIssue, Operation, ServiceError};
use async_trait::async_trait;
use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default minimum interval between mutation calls.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Paces and retries calls to a destination service.
pub struct RateLimitedChannel<S> {
    inner: S,
    min_interval: Duration,
    retry: RetryPolicy,
    last_mutation: Mutex<Option<Instant>>,
}

impl<S: IssueService> RateLimitedChannel<S> {
    /// Wraps a service.
    pub fn new(inner: S, min_interval: Duration, retry: RetryPolicy) -> Self {
        Self {
            inner,
            min_interval,
            retry,
            last_mutation: Mutex::new(None),
        }
    }

    /// Returns the wrapped service.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Returns the minimum interval between mutation calls.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits until the minimum interval since the last mutation has passed.
    async fn pace(&self) {
        let wait = {
            let last = self
                .last_mutation
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            last.map(|at| self.min_interval.saturating_sub(at.elapsed()))
        };

        if let Some(wait) = wait.filter(|w| !w.is_zero()) {
            debug!(wait_ms = wait.as_millis() as u64, "Pacing destination request");
            tokio::time::sleep(wait).await;
        }
    }

    fn mark_mutation(&self) {
        *self
            .last_mutation
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(Instant::now());
    }

    /// Runs a call, retrying transient failures according to the policy.
    async fn with_retry<T, F, Fut>(
        &self,
        operation: Operation,
        mutation: bool,
        mut call: F,
    ) -> Result<T, ServiceError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ServiceError>>,
    {
        let mut attempt = 0;
        loop {
            if mutation {
                self.pace().await;
            }
            let result = call().await;
            if mutation {
                self.mark_mutation();
            }

            match result {
                Ok(value) => return Ok(value),
                Err(error) if error.is_transient() && attempt < self.retry.max_retries => {
                    attempt += 1;
                    warn!(
                        operation = %operation,
                        attempt,
                        max_retries = self.retry.max_retries,
                        error = %error,
                        "Transient destination failure, retrying"
                    );
                    let delay = self.retry.delay_with_retry_after(attempt, error.retry_after);
                    match error.retry_after {
                        Some(_) => wait_for_retry_after(delay).await,
                        None => tokio::time::sleep(delay).await,
                    }
                }
                Err(error) => return Err(error),
            }
        }
    }
}

#[async_trait]
impl<S: IssueService> IssueService for RateLimitedChannel<S> {
    async fn list_existing_issues(
        &self,
        page_token: Option<&str>,
    ) -> Result<IssuePage, ServiceError> {
        self.with_retry(Operation::ListIssues, false, || {
            self.inner.list_existing_issues(page_token)
        })
        .await
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<u64, ServiceError> {
        self.with_retry(Operation::CreateIssue, true, || self.inner.create_issue(issue))
            .await
    }

    async fn create_comment(
        &self,
        issue_id: u64,
        comment: &NewComment,
    ) -> Result<(), ServiceError> {
        self.with_retry(Operation::CreateComment, true, || {
            self.inner.create_comment(issue_id, comment)
        })
        .await
    }
}
