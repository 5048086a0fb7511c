//! Retry policy for transient destination failures.

use std::time::Duration;

/// Exponential backoff settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts (not including the initial attempt).
    pub max_retries: u32,

    /// Delay before the first retry.
    pub initial_delay: Duration,

    /// Upper bound for any single delay.
    pub max_delay: Duration,

    /// Multiplier applied to the delay after each retry.
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
        }
    }

    /// Calculates the delay before the given retry attempt (1-based).
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
        let delay = self.initial_delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        Duration::from_secs_f64(delay.min(self.max_delay.as_secs_f64()))
    }

    /// Delay before the given retry attempt when the service may have asked
    /// for one. The longer of the two wins.
    #[must_use]
    pub fn delay_with_retry_after(
        &self,
        attempt: u32,
        retry_after: Option<Duration>,
    ) -> Duration {
        let backoff = self.delay_for_attempt(attempt);
        retry_after.map_or(backoff, |requested| requested.max(backoff))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_grow_exponentially_and_cap() {
        let policy = RetryPolicy {
            max_retries: 5,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        };

        assert_eq!(policy.delay_for_attempt(0), Duration::ZERO);
        assert_eq!(policy.delay_for_attempt(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_secs(4));
        assert_eq!(policy.delay_for_attempt(4), Duration::from_secs(5));
    }

    #[test]
    fn retry_after_never_shortens_backoff() {
        let policy = RetryPolicy {
            max_retries: 3,
            initial_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(60),
            backoff_multiplier: 2.0,
        };

        assert_eq!(
            policy.delay_with_retry_after(1, Some(Duration::ZERO)),
            Duration::from_secs(2)
        );
        assert_eq!(
            policy.delay_with_retry_after(2, Some(Duration::from_secs(30))),
            Duration::from_secs(30)
        );
        assert_eq!(policy.delay_with_retry_after(2, None), Duration::from_secs(4));
    }

    #[test]
    fn no_retry_has_no_delay() {
        let policy = RetryPolicy::no_retry();

        assert_eq!(policy.max_retries, 0);
        assert_eq!(policy.delay_for_attempt(1), Duration::ZERO);
    }
}
