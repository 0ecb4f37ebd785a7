//! Shared types and configuration for the jobfeed ingestion pipeline.
//!
//! Holds the canonical [`JobRecord`] every source is normalized into, the
//! [`BatchResult`] contract returned by the ingestion endpoint, the batcher,
//! and the environment-driven [`AppConfig`].

pub mod app_config;
pub mod batch;
pub mod batcher;
pub mod config;
pub mod record;
pub mod text;

use thiserror::Error;

pub use app_config::{AdzunaCredentials, AdzunaSettings, AppConfig, SubmitMode};
pub use batch::{BatchResult, IngestRequest, ItemFailure};
pub use batcher::{batch_count, batches};
pub use config::{build_app_config, is_placeholder, load_app_config, load_app_config_from_env};
pub use record::JobRecord;
pub use text::excerpt;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("{var} still holds a placeholder value; set a real credential before running")]
    PlaceholderCredential { var: String },
}
