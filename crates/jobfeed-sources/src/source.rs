use std::future::Future;

use serde_json::Value;

use crate::error::SourceError;

/// A producer of raw job records for one pipeline run.
pub trait JobSource {
    /// Short label for logs and the run summary, e.g. `"adzuna"`.
    fn name(&self) -> &str;

    /// Value used for `site` when a record does not carry its own. Empty
    /// unless the source stamps every record, as the Adzuna client does.
    fn default_site(&self) -> &str {
        ""
    }

    /// Fetches every record for this run. Any error aborts the run.
    fn acquire(&self) -> impl Future<Output = Result<Vec<Value>, SourceError>> + Send;
}
