//! Bounded retry with fixed backoff.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use super::error::EmbeddingError;
use crate::constants::{DEFAULT_BACKOFF_MS, DEFAULT_MAX_RETRIES, DEFAULT_REQUEST_TIMEOUT_SECS};

/// Retry policy injected into the embedding client.
///
/// Attempts total `1 + max_retries`; a fixed `backoff` separates attempts,
/// with none after the last. `request_timeout` bounds each individual
/// attempt, and a timed-out attempt counts as a failed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: usize,
    pub backoff: Duration,
    pub request_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            backoff: Duration::from_millis(DEFAULT_BACKOFF_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl RetryPolicy {
    /// Policy with no backoff between attempts (useful in tests).
    pub fn without_backoff(max_retries: usize) -> Self {
        Self {
            max_retries,
            backoff: Duration::ZERO,
            ..Default::default()
        }
    }
}

/// Runs `op` under `policy`, surfacing the last error once attempts are
/// exhausted.
pub async fn with_retries<T, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut op: F,
) -> Result<T, EmbeddingError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, EmbeddingError>>,
{
    let mut attempt = 0usize;
    loop {
        attempt += 1;

        let err = match op().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if attempt > policy.max_retries {
            return Err(err);
        }

        warn!(
            attempt,
            max_attempts = policy.max_retries + 1,
            error = %err,
            "{label} attempt failed, backing off"
        );
        tokio::time::sleep(policy.backoff).await;
    }
}
