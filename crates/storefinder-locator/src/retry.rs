//! Retry with exponential back-off and jitter for geocoder lookups.
//!
//! Retries stay inside a single `resolve` call, so a search still has at most
//! one lookup outstanding. Only transient failures are retried.

use std::future::Future;
use std::time::Duration;

use crate::error::GeocodeError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:** timeouts, connection failures, HTTP 429 and 5xx.
///
/// **Not retriable:** [`GeocodeError::NoMatch`] (the answer will not change),
/// [`GeocodeError::Deserialize`], [`GeocodeError::InvalidBaseUrl`], and any
/// other 4xx status.
pub(crate) fn is_retriable(err: &GeocodeError) -> bool {
    match err {
        GeocodeError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        GeocodeError::UnexpectedStatus { status } => *status == 429 || *status >= 500,
        GeocodeError::NoMatch { .. }
        | GeocodeError::Deserialize { .. }
        | GeocodeError::InvalidBaseUrl { .. } => false,
    }
}

/// Re-issues a geocoder lookup until it succeeds, fails for good, or the
/// retry budget from `STOREFINDER_GEOCODER_MAX_RETRIES` runs out.
///
/// With the default 250 ms base the waits run 250 ms, 500 ms, 1 s and so on,
/// each scaled by a random factor in 0.75..1.25 and never above 10 s. A zero
/// budget means exactly one request.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, GeocodeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GeocodeError>>,
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
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
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
                    "geocoder lookup failed, backing off before next request"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
