use std::path::PathBuf;

use jobfeed_sources::SourceError;
use thiserror::Error;

/// Errors from one submission to the ingestion endpoint.
///
/// These never abort a run; the runner folds them into a rejected batch.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Network failure, TLS failure, or request timeout.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Any status other than 200. `body` is already truncated.
    #[error("ingestion endpoint returned HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// HTTP 200 whose body is not a batch result.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that stop a pipeline run before or instead of submission.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to acquire records from {source_name}: {source}")]
    Acquisition {
        source_name: String,
        #[source]
        source: SourceError,
    },

    #[error("no job records acquired from {0}; nothing to submit")]
    NoRecords(String),

    #[error("failed to write snapshot {}: {source}", path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build ingestion client: {0}")]
    Client(#[from] IngestError),
}
