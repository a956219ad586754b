//! Retry with exponential back-off and jitter for upstream requests.
//!
//! Every request the client sends is idempotent (login, paged reads, and a
//! PUT of an absolute price), so transient failures are safe to repeat.

use std::future::Future;
use std::time::Duration;

use crate::error::UpstreamError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:** timeouts, connection failures, HTTP 429, and HTTP 5xx.
///
/// **Not retriable:** rejected credentials, other 4xx statuses, and any
/// malformed response body.
pub(crate) fn is_retriable(err: &UpstreamError) -> bool {
    match err {
        UpstreamError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        UpstreamError::RateLimited { .. } => true,
        UpstreamError::UnexpectedStatus { status, .. } => *status >= 500,
        UpstreamError::Unauthorized { .. }
        | UpstreamError::Deserialize { .. }
        | UpstreamError::MissingField { .. }
        | UpstreamError::InvalidBaseUrl { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// The wait before the n-th retry is `backoff_base_ms * 2^(n-1)` with ±25 %
/// jitter, capped at 10 s. A 429 with a larger `Retry-After` is still capped.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, UpstreamError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, UpstreamError>>,
{
    const MAX_DELAY_MS: u64 = 10_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = match &err {
                    UpstreamError::RateLimited { retry_after_secs } => {
                        retry_after_secs.saturating_mul(1_000)
                    }
                    _ => backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10)),
                };
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "upstream transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
