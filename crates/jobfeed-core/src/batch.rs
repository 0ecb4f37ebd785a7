//! Request and response shapes for the ingestion endpoint.
//!
//! The endpoint accepts `{"jobs": [...]}` and answers HTTP 200 with
//!
//! ```json
//! {"processed": 9, "failed": 1, "timestamp": "2025-10-16T09:12:44Z",
//!  "failures": [{"title": "Werkstudent Marketing", "error": "Missing skills/tools"}]}
//! ```
//!
//! The live endpoint also returns `success`, `message`, `totalFetched` and a
//! `jobs` echo; those are ignored. Counts default to zero when absent.

use serde::{Deserialize, Serialize};

use crate::record::JobRecord;

/// Body of one `POST` to the ingestion endpoint.
#[derive(Debug, Serialize)]
pub struct IngestRequest<'a> {
    pub jobs: &'a [JobRecord],
}

/// Parsed HTTP 200 response for one batch.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BatchResult {
    #[serde(default)]
    pub processed: u64,
    #[serde(default)]
    pub failed: u64,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub failures: Vec<ItemFailure>,
}

/// A single record the endpoint accepted but could not process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemFailure {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_wraps_records_in_jobs_key() {
        let records = vec![JobRecord {
            title: "Werkstudent Backend".into(),
            ..JobRecord::default()
        }];
        let body = serde_json::to_value(IngestRequest { jobs: &records }).unwrap();
        assert_eq!(body["jobs"].as_array().unwrap().len(), 1);
        assert_eq!(body["jobs"][0]["title"], "Werkstudent Backend");
    }

    #[test]
    fn batch_result_parses_full_response() {
        let body = serde_json::json!({
            "success": true,
            "processed": 9,
            "failed": 1,
            "timestamp": "2025-10-16T09:12:44Z",
            "failures": [{"title": "Werkstudent Marketing", "error": "Missing skills/tools"}],
            "jobs": []
        });
        let result: BatchResult = serde_json::from_value(body).unwrap();
        assert_eq!(result.processed, 9);
        assert_eq!(result.failed, 1);
        assert_eq!(result.timestamp.as_deref(), Some("2025-10-16T09:12:44Z"));
        assert_eq!(result.failures[0].error, "Missing skills/tools");
    }

    #[test]
    fn batch_result_defaults_missing_counts_to_zero() {
        let result: BatchResult = serde_json::from_str("{}").unwrap();
        assert_eq!(result, BatchResult::default());
    }
}
