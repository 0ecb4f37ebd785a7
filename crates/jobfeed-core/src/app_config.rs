use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::config::is_placeholder;
use crate::ConfigError;

/// How acquired records are handed to the ingestion endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    /// Every record in one request, with the long single-shot timeout.
    SingleShot,
    /// Fixed-size batches submitted one after another.
    Batched { size: NonZeroUsize },
}

impl std::fmt::Display for SubmitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitMode::SingleShot => write!(f, "single-shot"),
            SubmitMode::Batched { size } => write!(f, "batched({size})"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub ingest_endpoint: Url,
    pub submit_mode: SubmitMode,
    pub batch_pause_ms: u64,
    pub batch_timeout_secs: u64,
    pub single_shot_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub backup_dir: PathBuf,
    pub backup_prefix: String,
    pub source_timeout_secs: u64,
    pub adzuna: AdzunaSettings,
}

impl AppConfig {
    /// Request timeout for one submission under the configured mode.
    #[must_use]
    pub fn submit_timeout(&self) -> Duration {
        match self.submit_mode {
            SubmitMode::SingleShot => Duration::from_secs(self.single_shot_timeout_secs),
            SubmitMode::Batched { .. } => Duration::from_secs(self.batch_timeout_secs),
        }
    }

    #[must_use]
    pub fn batch_pause(&self) -> Duration {
        Duration::from_millis(self.batch_pause_ms)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("ingest_endpoint", &self.ingest_endpoint.as_str())
            .field("submit_mode", &self.submit_mode)
            .field("batch_pause_ms", &self.batch_pause_ms)
            .field("batch_timeout_secs", &self.batch_timeout_secs)
            .field("single_shot_timeout_secs", &self.single_shot_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("backup_dir", &self.backup_dir)
            .field("backup_prefix", &self.backup_prefix)
            .field("source_timeout_secs", &self.source_timeout_secs)
            .field("adzuna", &self.adzuna)
            .finish()
    }
}

/// Adzuna search parameters. Credentials stay optional here and are only
/// checked when the Adzuna source is selected.
#[derive(Clone)]
pub struct AdzunaSettings {
    pub app_id: Option<String>,
    pub api_key: Option<String>,
    pub country: String,
    pub query: String,
    pub pages: u32,
    pub results_per_page: u32,
}

impl AdzunaSettings {
    /// Returns the credentials, rejecting unset and placeholder values.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingEnvVar`] if `ADZUNA_APP_ID` or `ADZUNA_API_KEY`
    ///   is unset.
    /// - [`ConfigError::PlaceholderCredential`] if either still holds a
    ///   template value such as `YOUR_APP_ID_HERE`.
    pub fn credentials(&self) -> Result<AdzunaCredentials, ConfigError> {
        let check = |var: &str, value: Option<&String>| -> Result<String, ConfigError> {
            let value = value.ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))?;
            if is_placeholder(value) {
                return Err(ConfigError::PlaceholderCredential {
                    var: var.to_string(),
                });
            }
            Ok(value.trim().to_string())
        };

        Ok(AdzunaCredentials {
            app_id: check("ADZUNA_APP_ID", self.app_id.as_ref())?,
            api_key: check("ADZUNA_API_KEY", self.api_key.as_ref())?,
        })
    }
}

impl std::fmt::Debug for AdzunaSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdzunaSettings")
            .field("app_id", &self.app_id.as_ref().map(|_| "[redacted]"))
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("country", &self.country)
            .field("query", &self.query)
            .field("pages", &self.pages)
            .field("results_per_page", &self.results_per_page)
            .finish()
    }
}

#[derive(Clone)]
pub struct AdzunaCredentials {
    pub app_id: String,
    pub api_key: String,
}

impl std::fmt::Debug for AdzunaCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdzunaCredentials")
            .field("app_id", &"[redacted]")
            .field("api_key", &"[redacted]")
            .finish()
    }
}
