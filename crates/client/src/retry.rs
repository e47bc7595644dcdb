//! Exponential-backoff retry for any no-argument async operation.
//!
//! Every failure is retried the same way: no jitter, no delay cap, no notion of
//! retryable vs. fatal errors. Total attempts are `retries + 1`.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// How many times to retry and how long to wait before the first retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            initial_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(retries: u32, initial_delay: Duration) -> Self {
        Self {
            retries,
            initial_delay,
        }
    }

    /// Waits between consecutive attempts, in order.
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        let initial = self.initial_delay;
        (0..self.retries).map(move |i| initial.saturating_mul(2u32.saturating_pow(i)))
    }

    /// Sum of all waits if every attempt fails.
    pub fn total_delay(&self) -> Duration {
        self.delays().fold(Duration::ZERO, Duration::saturating_add)
    }
}

#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// Every attempt failed; this is the error from the last one, unchanged.
    #[error("{0}")]
    Exhausted(E),

    /// The token fired before the retries ran out.
    #[error("retry cancelled after {attempts} attempt(s)")]
    Cancelled { attempts: u32, last_error: Option<E> },
}

impl<E> RetryError<E> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RetryError::Cancelled { .. })
    }

    pub fn into_last_error(self) -> Option<E> {
        match self {
            RetryError::Exhausted(e) => Some(e),
            RetryError::Cancelled { last_error, .. } => last_error,
        }
    }
}

/// Run `op`, retrying up to `retries` times with doubling waits starting at
/// `initial_delay`. Returns the last error once attempts are exhausted.
pub async fn with_retry<F, Fut, T, E>(mut op: F, retries: u32, initial_delay: Duration) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut delay = initial_delay;
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        match op().await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!("operation succeeded after {} retries", attempt - 1);
                }
                return Ok(value);
            }
            Err(e) if attempt > retries => {
                tracing::error!(attempts = attempt, error = %e, "operation failed; retries exhausted");
                return Err(e);
            }
            Err(e) => {
                tracing::warn!(
                    "attempt {} failed: {}; retrying in {:?}",
                    attempt,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                delay = delay.saturating_mul(2);
            }
        }
    }
}

/// [`with_retry`] that stops as soon as `cancel` fires.
///
/// Cancellation is checked before each attempt and interrupts a pending
/// backoff wait; an attempt already in flight runs to completion.
pub async fn with_retry_cancellable<F, Fut, T, E>(
    mut op: F,
    policy: RetryPolicy,
    cancel: &CancellationToken,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut delay = policy.initial_delay;
    let mut attempt: u32 = 0;
    let mut last_error = None;

    loop {
        if cancel.is_cancelled() {
            tracing::info!(attempts = attempt, "retry cancelled");
            return Err(RetryError::Cancelled {
                attempts: attempt,
                last_error,
            });
        }

        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt > policy.retries => {
                tracing::error!(attempts = attempt, error = %e, "operation failed; retries exhausted");
                return Err(RetryError::Exhausted(e));
            }
            Err(e) => {
                tracing::warn!(
                    "attempt {} failed: {}; retrying in {:?}",
                    attempt,
                    e,
                    delay
                );
                last_error = Some(e);
                tokio::select! {
                    _ = cancel.cancelled() => {
                        tracing::info!(attempts = attempt, "retry cancelled during backoff");
                        return Err(RetryError::Cancelled {
                            attempts: attempt,
                            last_error,
                        });
                    }
                    _ = tokio::time::sleep(delay) => {}
                }
                delay = delay.saturating_mul(2);
            }
        }
    }
}
