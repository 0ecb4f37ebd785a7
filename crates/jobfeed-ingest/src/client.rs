//! HTTP client for the ingestion endpoint.
//!
//! One [`IngestClient::submit`] call is one `POST {"jobs": [...]}` with an
//! explicit timeout. The outcome is always a [`BatchOutcome`]; submission
//! problems are classified, never raised.

use std::time::Duration;

use jobfeed_core::{excerpt, AppConfig, BatchResult, IngestRequest, JobRecord};
use reqwest::{Client, StatusCode, Url};

use crate::error::IngestError;
use crate::retry::retry_with_backoff;

/// Characters of a rejected response body kept for diagnostics.
pub const ERROR_BODY_CHARS: usize = 500;

/// Classified result of submitting one batch.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    /// HTTP 200 with a parseable body. Item failures may still be present.
    Accepted(BatchResult),
    /// Non-200 status; the whole batch counts as failed.
    Rejected { status: u16, body: String },
    /// Network error, timeout, or an unparseable 200 body; the whole batch
    /// counts as failed.
    Errored { error: String },
}

impl BatchOutcome {
    #[must_use]
    pub fn processed(&self) -> u64 {
        match self {
            BatchOutcome::Accepted(result) => result.processed,
            BatchOutcome::Rejected { .. } | BatchOutcome::Errored { .. } => 0,
        }
    }

    /// Failed count contributed by a batch of `batch_size` records.
    #[must_use]
    pub fn failed(&self, batch_size: usize) -> u64 {
        match self {
            BatchOutcome::Accepted(result) => result.failed,
            BatchOutcome::Rejected { .. } | BatchOutcome::Errored { .. } => batch_size as u64,
        }
    }

    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, BatchOutcome::Accepted(_))
    }

    /// Human-readable reason for a whole-batch failure.
    #[must_use]
    pub fn rejection_reason(&self) -> Option<String> {
        match self {
            BatchOutcome::Accepted(_) => None,
            BatchOutcome::Rejected { status, body } => Some(format!("HTTP {status}: {body}")),
            BatchOutcome::Errored { error } => Some(error.clone()),
        }
    }

    fn from_result(result: Result<BatchResult, IngestError>) -> Self {
        match result {
            Ok(result) => BatchOutcome::Accepted(result),
            Err(IngestError::UnexpectedStatus { status, body }) => {
                BatchOutcome::Rejected { status, body }
            }
            Err(err) => BatchOutcome::Errored {
                error: err.to_string(),
            },
        }
    }
}

/// Client for the ingestion endpoint.
pub struct IngestClient {
    client: Client,
    endpoint: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl IngestClient {
    /// Creates a client that posts to `endpoint`. No overall timeout is set
    /// here; each submission passes its own.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(endpoint: Url, user_agent: &str) -> Result<Self, IngestError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            endpoint,
            max_retries: 0,
            backoff_base_ms: 1_000,
        })
    }

    /// Builds a client from the endpoint, user agent and retry settings of
    /// `config`.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, IngestError> {
        Ok(
            Self::new(config.ingest_endpoint.clone(), &config.user_agent)?
                .with_retry(config.max_retries, config.retry_backoff_base_ms),
        )
    }

    /// Enables bounded retry of transient failures for every submission.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Posts one batch and parses the 200 response.
    ///
    /// # Errors
    ///
    /// - [`IngestError::Http`] on network failure or timeout.
    /// - [`IngestError::UnexpectedStatus`] on any status other than 200, with
    ///   the body truncated to [`ERROR_BODY_CHARS`].
    /// - [`IngestError::Deserialize`] if a 200 body is not a batch result.
    pub async fn post_batch(
        &self,
        batch: &[JobRecord],
        timeout: Duration,
    ) -> Result<BatchResult, IngestError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .timeout(timeout)
            .json(&IngestRequest { jobs: batch })
            .send()
            .await?;
        let status = response.status();

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(IngestError::UnexpectedStatus {
                status: status.as_u16(),
                body: excerpt(&body, ERROR_BODY_CHARS),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| IngestError::Deserialize {
            context: format!("batch result from {}", self.endpoint),
            source: e,
        })
    }

    /// Submits one batch, retrying transient failures when enabled, and
    /// classifies the result.
    pub async fn submit(&self, batch: &[JobRecord], timeout: Duration) -> BatchOutcome {
        let result = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.post_batch(batch, timeout)
        })
        .await;
        BatchOutcome::from_result(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_outcome_reports_server_counts() {
        let outcome = BatchOutcome::Accepted(BatchResult {
            processed: 8,
            failed: 2,
            ..BatchResult::default()
        });
        assert_eq!(outcome.processed(), 8);
        assert_eq!(outcome.failed(10), 2);
        assert!(outcome.rejection_reason().is_none());
    }

    #[test]
    fn rejected_outcome_fails_whole_batch() {
        let outcome = BatchOutcome::Rejected {
            status: 502,
            body: "Bad Gateway".to_string(),
        };
        assert_eq!(outcome.processed(), 0);
        assert_eq!(outcome.failed(10), 10);
        assert_eq!(
            outcome.rejection_reason().as_deref(),
            Some("HTTP 502: Bad Gateway")
        );
    }

    #[test]
    fn status_error_classifies_as_rejected() {
        let outcome = BatchOutcome::from_result(Err(IngestError::UnexpectedStatus {
            status: 500,
            body: "boom".to_string(),
        }));
        assert!(matches!(outcome, BatchOutcome::Rejected { status: 500, .. }));
    }

    #[test]
    fn parse_error_classifies_as_errored() {
        let source = serde_json::from_str::<BatchResult>("<html>").unwrap_err();
        let outcome = BatchOutcome::from_result(Err(IngestError::Deserialize {
            context: "batch".to_string(),
            source,
        }));
        assert!(matches!(outcome, BatchOutcome::Errored { .. }));
        assert_eq!(outcome.failed(3), 3);
    }
}
