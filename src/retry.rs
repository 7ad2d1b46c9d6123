//! Bounded linear-backoff retry policy.
//!
//! Every outbound call made by the client runs under a [`RetryPolicy`]. The
//! policy is purely declarative: the client owns the loop, the policy only
//! answers "how many attempts" and "how long to wait before attempt n".

use std::time::Duration;

/// Default number of attempts per logical request, including the first.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default base delay for linear backoff.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Retry policy with bounded attempts and linear backoff.
///
/// Before retry attempt `n` (1-based, so the first retry is attempt 2), the
/// client waits `(n - 1) × base_delay`. With the defaults this produces
/// waits of 1000 ms and 2000 ms between the three attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per logical request, including the first.
    pub max_attempts: u32,
    /// Base delay multiplied by the attempt number for each wait.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy with explicit bounds.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Creates a policy that never retries.
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Returns the wait before the given attempt, or `None` when the attempt
    /// exceeds the bound.
    ///
    /// `attempt` is 1-based; attempt 1 never waits.
    pub fn backoff_delay(&self, attempt: u32) -> Option<Duration> {
        if attempt <= 1 {
            return Some(Duration::ZERO);
        }
        if attempt > self.max_attempts {
            return None;
        }
        Some(self.base_delay * (attempt - 1))
    }

    /// Returns true if another attempt is permitted after `attempt` failed.
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_BASE_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_is_linear() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.backoff_delay(1), Some(Duration::ZERO));
        assert_eq!(policy.backoff_delay(2), Some(Duration::from_millis(1000)));
        assert_eq!(policy.backoff_delay(3), Some(Duration::from_millis(2000)));
        assert_eq!(policy.backoff_delay(4), None);
    }

    #[test]
    fn should_retry_respects_bound() {
        let policy = RetryPolicy::default();
        assert!(policy.should_retry(1));
        assert!(policy.should_retry(2));
        assert!(!policy.should_retry(3));
    }

    #[test]
    fn none_policy_never_retries() {
        let policy = RetryPolicy::none();
        assert!(!policy.should_retry(1));
        assert_eq!(policy.backoff_delay(2), None);
    }

    #[test]
    fn max_attempts_floor_is_one() {
        let policy = RetryPolicy::new(0, Duration::from_millis(10));
        assert_eq!(policy.max_attempts, 1);
    }
}
