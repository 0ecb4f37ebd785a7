//! Normalization from raw source records to [`JobRecord`].
//!
//! Field lookup is delegated to [`crate::fields`]; this module only assembles
//! the record. Normalization cannot fail.

use jobfeed_core::JobRecord;
use serde_json::Value;

use crate::fields;

/// Normalizes one raw record. `default_site` labels records that carry no
/// `site` of their own (e.g. `"adzuna"`).
#[must_use]
pub fn normalize_record(raw: &Value, default_site: &str) -> JobRecord {
    let salary_min = fields::salary_min(raw);
    let salary_max = fields::salary_max(raw);
    let has_salary = salary_min.is_some() || salary_max.is_some();

    JobRecord {
        title: fields::title(raw),
        company: fields::company(raw),
        location: fields::location(raw),
        description: fields::description(raw),
        date_posted: fields::date_posted(raw),
        job_url: fields::job_url(raw),
        job_type: fields::job_type(raw),
        salary_min,
        salary_max,
        salary_interval: fields::salary_interval(raw, has_salary),
        site: fields::site(raw, default_site),
        company_url: fields::company_url(raw),
        company_logo: fields::company_logo(raw),
    }
}

/// Normalizes a batch of raw records, preserving order.
#[must_use]
pub fn normalize_records(raw: &[Value], default_site: &str) -> Vec<JobRecord> {
    raw.iter()
        .map(|r| normalize_record(r, default_site))
        .collect()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
