use std::num::NonZeroUsize;
use std::path::PathBuf;

use reqwest::Url;

use crate::app_config::{AdzunaSettings, AppConfig, SubmitMode};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Returns `true` for credential values that were never filled in: blank
/// strings, `YOUR_..._HERE` templates, and `changeme`.
#[must_use]
pub fn is_placeholder(value: &str) -> bool {
    let v = value.trim();
    if v.is_empty() {
        return true;
    }
    let upper = v.to_ascii_uppercase();
    (upper.starts_with("YOUR_") && upper.ends_with("_HERE"))
        || upper == "CHANGEME"
        || upper == "CHANGE_ME"
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the process environment so tests
/// can drive them with a `HashMap` and the CLI can layer flags over env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let log_level = or_default("JOBFEED_LOG_LEVEL", "info");

    let raw_endpoint = require("JOBFEED_INGEST_ENDPOINT")?;
    let ingest_endpoint = parse_endpoint(&raw_endpoint)
        .map_err(|reason| invalid("JOBFEED_INGEST_ENDPOINT", reason))?;

    let batch_size = or_default("JOBFEED_BATCH_SIZE", "10")
        .parse::<NonZeroUsize>()
        .map_err(|e| invalid("JOBFEED_BATCH_SIZE", e.to_string()))?;
    let submit_mode = parse_submit_mode(&or_default("JOBFEED_SUBMIT_MODE", "batched"), batch_size)?;

    let batch_pause_ms = parse_u64("JOBFEED_BATCH_PAUSE_MS", "2000")?;
    let batch_timeout_secs = parse_u64("JOBFEED_BATCH_TIMEOUT_SECS", "300")?;
    let single_shot_timeout_secs = parse_u64("JOBFEED_SINGLE_SHOT_TIMEOUT_SECS", "600")?;
    let user_agent = or_default("JOBFEED_USER_AGENT", "jobfeed/0.1 (job-ingestion)");
    let max_retries = parse_u32("JOBFEED_MAX_RETRIES", "0")?;
    let retry_backoff_base_ms = parse_u64("JOBFEED_RETRY_BACKOFF_BASE_MS", "1000")?;
    let backup_dir = PathBuf::from(or_default("JOBFEED_BACKUP_DIR", "."));
    let backup_prefix = or_default("JOBFEED_BACKUP_PREFIX", "werkstudent_jobs");
    if backup_prefix.trim().is_empty() || backup_prefix.contains(['/', '\\']) {
        return Err(invalid(
            "JOBFEED_BACKUP_PREFIX",
            format!("\"{backup_prefix}\" is not a usable file name prefix"),
        ));
    }
    let source_timeout_secs = parse_u64("JOBFEED_SOURCE_TIMEOUT_SECS", "30")?;

    let adzuna = AdzunaSettings {
        app_id: lookup("ADZUNA_APP_ID").ok(),
        api_key: lookup("ADZUNA_API_KEY").ok(),
        country: or_default("ADZUNA_COUNTRY", "de").to_lowercase(),
        query: or_default("ADZUNA_QUERY", "werkstudent"),
        pages: parse_u32("ADZUNA_PAGES", "5")?,
        results_per_page: parse_u32("ADZUNA_RESULTS_PER_PAGE", "20")?,
    };

    Ok(AppConfig {
        log_level,
        ingest_endpoint,
        submit_mode,
        batch_pause_ms,
        batch_timeout_secs,
        single_shot_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        backup_dir,
        backup_prefix,
        source_timeout_secs,
        adzuna,
    })
}

/// Parses the ingestion endpoint, accepting only `http` and `https` URLs.
pub(crate) fn parse_endpoint(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| format!("\"{raw}\": {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme \"{other}\"")),
    }
}

fn parse_submit_mode(s: &str, batch_size: NonZeroUsize) -> Result<SubmitMode, ConfigError> {
    match s.trim().to_lowercase().as_str() {
        "batched" => Ok(SubmitMode::Batched { size: batch_size }),
        "single" | "single-shot" => Ok(SubmitMode::SingleShot),
        other => Err(ConfigError::InvalidEnvVar {
            var: "JOBFEED_SUBMIT_MODE".to_string(),
            reason: format!("expected 'batched' or 'single', got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
