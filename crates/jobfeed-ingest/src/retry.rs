//! Retry with exponential back-off and jitter for batch submission.
//!
//! [`retry_with_backoff`] wraps one batch POST and retries on connection
//! failures, 429 and 5xx. Everything else is returned immediately. With
//! `max_retries = 0`, the default, the operation runs once.

use std::future::Future;
use std::time::Duration;

use crate::error::IngestError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Connection failures: the request never reached the endpoint.
/// - HTTP 429 and 5xx from the ingestion endpoint.
///
/// **Not retriable:**
/// - Timeouts; the endpoint may still be importing the batch.
/// - Other 4xx statuses; the same payload would be rejected again.
/// - [`IngestError::Deserialize`]; the batch may already have been processed.
pub(crate) fn is_retriable(err: &IngestError) -> bool {
    match err {
        IngestError::Http(e) => e.is_connect(),
        IngestError::UnexpectedStatus { status, .. } => *status == 429 || *status >= 500,
        IngestError::Deserialize { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// Back-off schedule with `backoff_base_ms = 1_000`:
///
/// | Attempt | Sleep before next attempt        |
/// |---------|----------------------------------|
/// | 1       | 1 000 ms × 2⁰ ± 25 % jitter     |
/// | 2       | 1 000 ms × 2¹ ± 25 % jitter     |
/// | 3       | 1 000 ms × 2² ± 25 % jitter     |
///
/// Delay is capped at 60 s.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, IngestError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, IngestError>>,
{
    const MAX_DELAY_MS: u64 = 60_000;
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
                    "transient ingestion error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn status_err(status: u16) -> IngestError {
        IngestError::UnexpectedStatus {
            status,
            body: String::new(),
        }
    }

    #[test]
    fn server_errors_and_rate_limits_are_retriable() {
        assert!(is_retriable(&status_err(500)));
        assert!(is_retriable(&status_err(503)));
        assert!(is_retriable(&status_err(429)));
    }

    #[test]
    fn client_errors_are_not_retriable() {
        assert!(!is_retriable(&status_err(400)));
        assert!(!is_retriable(&status_err(404)));
        assert!(!is_retriable(&status_err(413)));
    }

    #[test]
    fn deserialize_error_is_not_retriable() {
        let source = serde_json::from_str::<()>("invalid").unwrap_err();
        assert!(!is_retriable(&IngestError::Deserialize {
            context: "test".to_owned(),
            source,
        }));
    }

    #[tokio::test]
    async fn zero_retries_runs_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(0, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(status_err(502))
            }
        })
        .await;
        assert!(matches!(
            result,
            Err(IngestError::UnexpectedStatus { status: 502, .. })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_server_errors_up_to_limit() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(2, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(status_err(500))
            }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(
            calls.load(Ordering::SeqCst),
            3,
            "1 initial attempt + 2 retries"
        );
    }

    #[tokio::test]
    async fn never_retries_client_errors() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let _ = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(status_err(422))
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1, "4xx must not be retried");
    }

    #[tokio::test]
    async fn retries_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                let attempt = c.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt < 3 {
                    Err(status_err(503))
                } else {
                    Ok(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
