//! Rate limit information.

use std::time::Duration;

/// Core API rate limit window as reported by GitHub.
#[derive(Debug, Clone)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,

    /// Unix timestamp when the rate limit resets.
    pub reset: u64,

    /// Total requests allowed per window.
    pub limit: u32,
}

impl RateLimitInfo {
    /// Seconds until the window resets, or `None` if it already has.
    #[must_use]
    pub fn seconds_until_reset(&self, now: u64) -> Option<u64> {
        self.reset.checked_sub(now).filter(|secs| *secs > 0)
    }

    /// Delay to request before retrying a rate-limited call, or `None` when
    /// the window already reset.
    #[must_use]
    pub fn retry_after(&self, now: u64) -> Option<Duration> {
        self.seconds_until_reset(now).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_time_until_reset() {
        let info = RateLimitInfo {
            remaining: 0,
            reset: 1_000,
            limit: 5_000,
        };

        assert_eq!(info.seconds_until_reset(940), Some(60));
        assert_eq!(info.seconds_until_reset(1_000), None);
        assert_eq!(info.seconds_until_reset(2_000), None);
    }

    #[test]
    fn retry_after_points_at_reset() {
        let info = RateLimitInfo {
            remaining: 0,
            reset: 1_000,
            limit: 5_000,
        };

        assert_eq!(info.retry_after(970), Some(Duration::from_secs(30)));
        assert_eq!(info.retry_after(1_000), None);
    }
}
