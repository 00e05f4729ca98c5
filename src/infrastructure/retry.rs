//! Retry policy applied at the dispatcher's call boundary.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::domain::DispatchError;

/// Exponential backoff parameters.
///
/// There is no attempt cap: rate-limit and timeout failures are retried until
/// they stop, with the delay capped at `max_delay_ms`.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Delay before the first retry
    pub initial_delay_ms: u64,
    /// Ceiling for the backoff delay
    pub max_delay_ms: u64,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 500,
            max_delay_ms: 30_000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Calculate delay for a given attempt number (0-indexed)
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::from_millis(self.initial_delay_ms);
        }

        let delay = self.initial_delay_ms as f64 * self.backoff_multiplier.powi(attempt as i32);
        let delay_ms = delay.min(self.max_delay_ms as f64) as u64;

        Duration::from_millis(delay_ms)
    }
}

/// Retry policy wrapping the dispatcher entry points.
///
/// Retries exactly the transient error kinds (`is_retryable`); everything
/// else propagates on first occurrence. The disabled policy invokes once and
/// propagates any error, preserving the call signature.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: Option<RetryConfig>,
}

impl RetryPolicy {
    pub fn exponential(config: RetryConfig) -> Self {
        Self {
            config: Some(config),
        }
    }

    /// Invoke-once passthrough, for environments without backoff behavior.
    pub fn disabled() -> Self {
        Self { config: None }
    }

    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, DispatchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, DispatchError>>,
    {
        let Some(config) = &self.config else {
            return operation().await;
        };

        let mut attempt: u32 = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) if error.is_retryable() => {
                    let delay = config.delay_for_attempt(attempt);
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        %error,
                        "Transient failure, backing off before retry"
                    );
                    tokio::time::sleep(delay).await;
                    attempt = attempt.saturating_add(1);
                }
                Err(error) => return Err(error),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::exponential(RetryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_delay_grows_exponentially() {
        let config = RetryConfig {
            initial_delay_ms: 100,
            max_delay_ms: 5_000,
            backoff_multiplier: 2.0,
        };

        assert_eq!(config.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(400));
    }

    #[test]
    fn test_delay_is_capped() {
        let config = RetryConfig {
            initial_delay_ms: 100,
            max_delay_ms: 300,
            backoff_multiplier: 2.0,
        };

        assert_eq!(config.delay_for_attempt(5), Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_retries_transient_errors_until_success() {
        let policy = RetryPolicy::exponential(RetryConfig {
            initial_delay_ms: 1,
            max_delay_ms: 2,
            backoff_multiplier: 2.0,
        });

        let attempts = AtomicU32::new(0);
        let result = policy
            .run(|| async {
                if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(DispatchError::rate_limited("mock", "HTTP 429"))
                } else {
                    Ok("done")
                }
            })
            .await
            .unwrap();

        assert_eq!(result, "done");
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_error_propagates_immediately() {
        let policy = RetryPolicy::default();

        let attempts = AtomicU32::new(0);
        let result: Result<(), _> = policy
            .run(|| async {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(DispatchError::provider("openai", "malformed response"))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_disabled_policy_is_passthrough() {
        let policy = RetryPolicy::disabled();

        let attempts = AtomicU32::new(0);
        let result: Result<(), _> = policy
            .run(|| async {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(DispatchError::rate_limited("mock", "HTTP 429"))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
