//! Adzuna search API response types.
//!
//! `GET /v1/api/jobs/{country}/search/{page}` returns
//!
//! ```json
//! {"count": 1432, "mean": 23120.4, "results": [ { ... }, ... ]}
//! ```
//!
//! Each result is kept as a raw `serde_json::Value`: `company` and `location`
//! are nested objects whose keys vary between countries, salary fields are
//! sometimes absent and sometimes `null`, and the normalizer already handles
//! all of that defensively. Only the envelope is typed.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct AdzunaSearchResponse {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub results: Vec<Value>,
}
