//! Bounded exponential-backoff retry for AI calls.
//!
//! Only retryable failures (quota and transient server/transport errors)
//! are repeated; everything else surfaces immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::AiError;

/// Attempts after the first failure.
pub const DEFAULT_RETRIES: u32 = 3;
/// Delay before the first retry; doubles on each subsequent one.
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(2);

/// Runs `op` with the default retry budget.
pub async fn retry_with_backoff<T, F, Fut>(op: F) -> Result<T, AiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AiError>>,
{
    retry_with_backoff_config(op, DEFAULT_RETRIES, DEFAULT_INITIAL_DELAY).await
}

/// Runs `op`, retrying retryable errors up to `retries` times with a
/// doubling delay. A server-supplied `retry_after` longer than the current
/// backoff wins.
pub async fn retry_with_backoff_config<T, F, Fut>(
    mut op: F,
    retries: u32,
    initial_delay: Duration,
) -> Result<T, AiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AiError>>,
{
    let mut remaining = retries;
    let mut delay = initial_delay;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && remaining > 0 => {
                let wait = err.retry_after().filter(|ra| *ra > delay).unwrap_or(delay);
                tracing::warn!(
                    %err,
                    remaining,
                    wait_ms = wait.as_millis() as u64,
                    "retryable Gemini failure, backing off"
                );
                tokio::time::sleep(wait).await;
                remaining -= 1;
                delay *= 2;
            }
            Err(err) => return Err(err),
        }
    }
}
