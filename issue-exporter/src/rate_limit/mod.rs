//! Rate limiting utilities for the GitHub API.
//!
//! Issue and comment creation draw from GitHub's core rate limit. Before each
//! mutation the remaining budget is checked, and when it runs low the call
//! waits for the window to reset rather than failing halfway through an issue.

mod info;

pub use info::RateLimitInfo;

use octocrab::Octocrab;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

/// Maximum time to wait for rate limit reset (1 hour).
const MAX_WAIT_SECS: u64 = 3600;

/// Minimum remaining requests before proactively waiting.
const MIN_REMAINING_THRESHOLD: u32 = 5;

/// Checks the current rate limit status for the core API (issues, comments).
///
/// # Errors
///
/// Returns an error if the rate limit API call fails.
pub async fn check_core_rate_limit(octocrab: &Octocrab) -> Result<RateLimitInfo, octocrab::Error> {
    let rate_limit = octocrab.ratelimit().get().await?;
    let core = &rate_limit.resources.core;

    Ok(RateLimitInfo {
        remaining: core.remaining as u32,
        reset: core.reset,
        limit: core.limit as u32,
    })
}

/// Waits if the rate limit is low, returning true if we waited.
///
/// Waits when remaining requests fall below `MIN_REMAINING_THRESHOLD`,
/// capping the wait at `MAX_WAIT_SECS`.
pub async fn wait_if_needed(info: &RateLimitInfo) -> bool {
    if info.remaining >= MIN_REMAINING_THRESHOLD {
        return false;
    }

    let Some(wait_secs) = info.seconds_until_reset(unix_now()) else {
        return false;
    };

    if wait_secs > MAX_WAIT_SECS {
        warn!(
            wait_secs,
            max_wait = MAX_WAIT_SECS,
            "Rate limit reset too far in future, capping wait time"
        );
    }

    let actual_wait = wait_secs.min(MAX_WAIT_SECS);
    info!(
        remaining = info.remaining,
        wait_secs = actual_wait,
        "Rate limit low, waiting for reset"
    );

    tokio::time::sleep(Duration::from_secs(actual_wait)).await;
    true
}

/// Current Unix time in seconds.
pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Waits for the delay requested by a Retry-After response, capped at one hour.
pub async fn wait_for_retry_after(retry_after: Duration) {
    let actual_wait = retry_after.min(Duration::from_secs(MAX_WAIT_SECS));
    info!(
        retry_after_secs = retry_after.as_secs(),
        wait_secs = actual_wait.as_secs(),
        "Service requested a retry delay, waiting"
    );
    tokio::time::sleep(actual_wait).await;
}

/// Ensures sufficient rate limit before making core API calls.
///
/// # Errors
///
/// Returns an error if the rate limit check fails.
pub async fn ensure_core_rate_limit(octocrab: &Octocrab) -> Result<(), octocrab::Error> {
    let info = check_core_rate_limit(octocrab).await?;
    wait_if_needed(&info).await;
    Ok(())
}
