//! HTTP client for the Adzuna job search API.
//!
//! Fetches pages `1..=pages` of `GET /v1/api/jobs/{country}/search/{page}` in
//! order and stops early on the first empty page. Any non-2xx status or
//! malformed page aborts acquisition; partial results are not returned.

use std::time::Duration;

use jobfeed_core::{excerpt, AdzunaCredentials, AdzunaSettings};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use crate::error::SourceError;
use crate::source::JobSource;
use crate::types::AdzunaSearchResponse;

const DEFAULT_BASE_URL: &str = "https://api.adzuna.com/";

/// Characters of an error body kept in [`SourceError::UnexpectedStatus`].
const ERROR_BODY_CHARS: usize = 500;

/// Client for the Adzuna search API.
///
/// Use [`AdzunaClient::new`] for production or
/// [`AdzunaClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug)]
pub struct AdzunaClient {
    client: Client,
    credentials: AdzunaCredentials,
    country: String,
    query: String,
    pages: u32,
    results_per_page: u32,
    base_url: Url,
}

impl AdzunaClient {
    /// Creates a client pointed at the production Adzuna API.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        credentials: AdzunaCredentials,
        settings: &AdzunaSettings,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, SourceError> {
        Self::with_base_url(
            credentials,
            settings,
            timeout_secs,
            user_agent,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SourceError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        credentials: AdzunaCredentials,
        settings: &AdzunaSettings,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `join` appends the API path instead
        // of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SourceError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            credentials,
            country: settings.country.clone(),
            query: settings.query.clone(),
            pages: settings.pages,
            results_per_page: settings.results_per_page,
            base_url,
        })
    }

    /// Fetches one search page and returns its raw results.
    ///
    /// # Errors
    ///
    /// - [`SourceError::RateLimited`] on HTTP 429.
    /// - [`SourceError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`SourceError::Http`] on network failure or timeout.
    /// - [`SourceError::Deserialize`] if the body is not a search response.
    pub async fn fetch_page(&self, page: u32) -> Result<Vec<Value>, SourceError> {
        let url = self.build_url(page)?;
        // The query string carries the credentials; keep it out of errors.
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(SourceError::RateLimited {
                source_name: "adzuna".to_string(),
                retry_after_secs,
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::UnexpectedStatus {
                status: status.as_u16(),
                url: Self::redacted(&url),
                body: excerpt(&body, ERROR_BODY_CHARS),
            });
        }

        let body = response.text().await?;
        let parsed: AdzunaSearchResponse =
            serde_json::from_str(&body).map_err(|e| SourceError::Deserialize {
                context: format!("adzuna search page {page}"),
                source: e,
            })?;

        Ok(parsed.results)
    }

    /// Fetches pages in order until the configured page count is reached or a
    /// page comes back empty.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`AdzunaClient::fetch_page`].
    pub async fn fetch_all(&self) -> Result<Vec<Value>, SourceError> {
        let mut all = Vec::new();
        for page in 1..=self.pages {
            tracing::info!(page, pages = self.pages, "fetching adzuna page");
            let results = self.fetch_page(page).await?;
            if results.is_empty() {
                tracing::info!(page, "adzuna page empty, stopping");
                break;
            }
            tracing::debug!(page, count = results.len(), "adzuna page fetched");
            all.extend(results);
        }
        Ok(all)
    }

    /// Builds the search URL for `page` with percent-encoded query parameters.
    fn build_url(&self, page: u32) -> Result<Url, SourceError> {
        let path = format!("v1/api/jobs/{}/search/{page}", self.country);
        let mut url = self
            .base_url
            .join(&path)
            .map_err(|e| SourceError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("app_id", &self.credentials.app_id)
            .append_pair("app_key", &self.credentials.api_key)
            .append_pair("what", &self.query)
            .append_pair("results_per_page", &self.results_per_page.to_string())
            .append_pair("sort_by", "date");
        Ok(url)
    }

    /// URL without its query string, safe to put in errors and logs.
    fn redacted(url: &Url) -> String {
        let mut clean = url.clone();
        clean.set_query(None);
        clean.to_string()
    }
}

impl JobSource for AdzunaClient {
    fn name(&self) -> &str {
        "adzuna"
    }

    fn default_site(&self) -> &str {
        "adzuna"
    }

    async fn acquire(&self) -> Result<Vec<Value>, SourceError> {
        self.fetch_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> AdzunaClient {
        let settings = AdzunaSettings {
            app_id: None,
            api_key: None,
            country: "de".to_string(),
            query: "werkstudent".to_string(),
            pages: 5,
            results_per_page: 20,
        };
        let credentials = AdzunaCredentials {
            app_id: "test-id".to_string(),
            api_key: "test-key".to_string(),
        };
        AdzunaClient::with_base_url(credentials, &settings, 30, "jobfeed-test/0.1", base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_constructs_search_path_and_query() {
        let client = test_client("https://api.adzuna.com");
        let url = client.build_url(3).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.adzuna.com/v1/api/jobs/de/search/3?app_id=test-id&app_key=test-key&what=werkstudent&results_per_page=20&sort_by=date"
        );
    }

    #[test]
    fn build_url_keeps_base_path_prefix() {
        let client = test_client("http://127.0.0.1:9000/proxy/");
        let url = client.build_url(1).unwrap();
        assert!(
            url.as_str()
                .starts_with("http://127.0.0.1:9000/proxy/v1/api/jobs/de/search/1?"),
            "got {url}"
        );
    }

    #[test]
    fn redacted_url_drops_credentials() {
        let client = test_client("https://api.adzuna.com");
        let url = client.build_url(1).unwrap();
        let redacted = AdzunaClient::redacted(&url);
        assert!(!redacted.contains("test-key"));
        assert_eq!(redacted, "https://api.adzuna.com/v1/api/jobs/de/search/1");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let settings = AdzunaSettings {
            app_id: None,
            api_key: None,
            country: "de".to_string(),
            query: "werkstudent".to_string(),
            pages: 1,
            results_per_page: 20,
        };
        let credentials = AdzunaCredentials {
            app_id: "id".to_string(),
            api_key: "key".to_string(),
        };
        let result =
            AdzunaClient::with_base_url(credentials, &settings, 30, "jobfeed-test/0.1", "not a url");
        assert!(matches!(result, Err(SourceError::InvalidBaseUrl { .. })));
    }
}
