// crates/qa-dashboard-authority/src/retry.rs
// ============================================================================
// Module: Retry Policy
// Description: Capped retry with linear backoff for authority calls.
// Purpose: Ride out transient transport and 5xx failures.
// Dependencies: qa-dashboard-config, tokio
// ============================================================================

//! Retry policy for outbound authority calls.
//!
//! Attempt `n` that fails with a retryable error waits `base_delay * n`
//! before attempt `n + 1`. Non-retryable errors and the final attempt's
//! error are returned unchanged.

use std::future::Future;
use std::time::Duration;

use qa_dashboard_config::MAX_RETRY_ATTEMPTS;
use qa_dashboard_config::MIN_RETRY_ATTEMPTS;
use qa_dashboard_config::RetryConfig;

use crate::error::AccessError;

/// Retry policy.
///
/// # Invariants
/// - `max_attempts` is within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first.
    max_attempts: u32,
    /// Base backoff delay.
    base_delay: Duration,
}

impl RetryPolicy {
    /// Builds a policy, clamping attempts into the supported range.
    #[must_use]
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.clamp(MIN_RETRY_ATTEMPTS, MAX_RETRY_ATTEMPTS),
            base_delay,
        }
    }

    /// Builds a policy from validated config.
    #[must_use]
    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(config.max_attempts, Duration::from_millis(config.base_delay_ms))
    }

    /// Returns the configured attempt cap.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the delay after failed attempt `attempt` (1-based).
    #[must_use]
    pub const fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }

    /// Runs `operation` until it succeeds, fails permanently, or attempts run out.
    ///
    /// # Errors
    ///
    /// Returns the last [`AccessError`] observed.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, AccessError>
    where
        F: FnMut(u32) -> Fut + Send,
        Fut: Future<Output = Result<T, AccessError>> + Send,
    {
        let mut attempt = 1;
        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.max_attempts => {
                    tokio::time::sleep(self.delay_for(attempt)).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only assertions.")]

    use std::sync::Arc;
    use std::sync::atomic::AtomicU32;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use super::RetryPolicy;
    use crate::error::AccessError;

    #[test]
    fn attempts_are_clamped() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts(), 1);
        assert_eq!(RetryPolicy::new(9, Duration::ZERO).max_attempts(), 5);
        assert_eq!(RetryPolicy::default().max_attempts(), 3);
    }

    #[test]
    fn backoff_is_linear() {
        let policy = RetryPolicy::new(3, Duration::from_millis(100));
        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
    }

    #[tokio::test]
    async fn retries_transient_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        let counter = Arc::clone(&calls);
        let result = policy
            .run(move |attempt| {
                counter.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt < 3 {
                        Err(AccessError::Network("reset".to_string()))
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await;
        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn stops_on_client_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::new(5, Duration::from_millis(1));
        let counter = Arc::clone(&calls);
        let result: Result<(), AccessError> = policy
            .run(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(AccessError::Upstream {
                        status: 404,
                        endpoint: "role detail".to_string(),
                    })
                }
            })
            .await;
        assert!(matches!(result, Err(AccessError::Upstream { status: 404, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn gives_up_after_cap() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::new(2, Duration::from_millis(1));
        let counter = Arc::clone(&calls);
        let result: Result<(), AccessError> = policy
            .run(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(AccessError::Upstream {
                        status: 502,
                        endpoint: "project roles".to_string(),
                    })
                }
            })
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
