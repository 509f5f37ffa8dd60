//! Exponential backoff retry for network-class failures.

use std::time::Duration;

use crate::error::Result;

/// Configuration for retry behavior.
///
/// The delay between attempts grows exponentially and is capped at
/// `max_delay`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use bfs_gateway::reliability::RetryPolicy;
///
/// // Default policy: 3 attempts, 100ms initial delay, 5s max delay
/// let policy = RetryPolicy::default();
///
/// let aggressive = RetryPolicy {
///     max_attempts: 5,
///     initial_delay: Duration::from_millis(50),
///     max_delay: Duration::from_secs(10),
///     backoff_multiplier: 2.0,
/// };
/// # let _ = (policy, aggressive);
/// ```
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (default: 3).
    pub max_attempts: u32,
    /// Delay before the second attempt (default: 100ms).
    pub initial_delay: Duration,
    /// Upper bound on any single delay (default: 5s).
    pub max_delay: Duration,
    /// Multiplier applied per attempt (default: 2.0).
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a policy with a custom attempt count.
    #[must_use]
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self { max_attempts, ..Self::default() }
    }

    /// Delay before the attempt following `attempt` (zero-based).
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "delay arithmetic stays far below the lossy ranges"
        )]
        let delay_ms = self.initial_delay.as_millis() as f64
            * self.backoff_multiplier.powi(i32::try_from(attempt).unwrap_or(i32::MAX));
        Duration::from_millis(delay_ms as u64).min(self.max_delay)
    }
}

/// Runs `operation` until it succeeds, fails non-retryably, or the attempt
/// budget is spent.
///
/// Retry eligibility is [`crate::Error::is_retryable`]: only network-class
/// failures are repeated. Validation, configuration, and business errors
/// return immediately without sleeping.
///
/// # Examples
///
/// ```no_run
/// use bfs_gateway::{
///     AuthorizationParams, BfsClient, GatewayConfig,
///     reliability::{RetryPolicy, retry_with_backoff},
/// };
/// use rust_decimal::Decimal;
///
/// # async fn example() -> bfs_gateway::Result<()> {
/// let client = BfsClient::new(GatewayConfig::from_env())?;
/// let policy = RetryPolicy::default();
///
/// let auth = retry_with_backoff(&policy, || {
///     client.authorize(AuthorizationParams {
///         order_no: "ORDER-001".to_owned(),
///         amount: Decimal::new(10000, 2),
///         email: "payer@example.com".to_owned(),
///     })
/// })
/// .await?;
/// # let _ = auth;
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns the first non-retryable error unchanged, or the last
/// network-class error once all attempts are exhausted.
pub async fn retry_with_backoff<F, Fut, T>(policy: &RetryPolicy, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last_error = None;

    for attempt in 0..policy.max_attempts {
        match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    tracing::info!(attempt = attempt + 1, "operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(error) if !error.is_retryable() => return Err(error),
            Err(error) => {
                tracing::warn!(
                    attempt = attempt + 1,
                    max_attempts = policy.max_attempts,
                    error = %error,
                    "network failure, will retry"
                );
                last_error = Some(error);

                // No sleep after the final attempt.
                if attempt + 1 < policy.max_attempts {
                    tokio::time::sleep(policy.delay_for_attempt(attempt)).await;
                }
            }
        }
    }

    Err(last_error.expect("at least one attempt is always made"))
}
