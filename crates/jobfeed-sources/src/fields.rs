//! Typed accessors for raw source records.
//!
//! Each canonical field has one accessor that knows every key the supported
//! sources use for it, tried in order. Accessors are total: a missing key, a
//! `null`, a value of the wrong shape, or a pandas missing marker all resolve
//! to `None` (or `""` for the text helpers) and the next key is tried.
//!
//! Key aliases by source:
//!
//! | field        | scraper export (CSV)              | Adzuna                     |
//! |--------------|-----------------------------------|----------------------------|
//! | company      | `company`                         | `company.display_name`     |
//! | location     | `location`                        | `location.display_name`    |
//! | date_posted  | `date_posted`                     | `created`                  |
//! | job_url      | `job_url`, `job_url_direct`       | `redirect_url`             |
//! | job_type     | `job_type`                        | `contract_type`            |
//! | salary_min   | `min_amount`                      | `salary_min`               |
//! | salary_max   | `max_amount`                      | `salary_max`               |
//! | interval     | `interval`                        | (none, implied yearly)     |
//! | company_url  | `company_url`, `company_url_direct` | (none)                   |

use jobfeed_core::record::DEFAULT_SALARY_INTERVAL;
use serde_json::Value;

/// Cell contents pandas writes (or that survive a `str()` round trip) for
/// missing values.
const MISSING_MARKERS: &[&str] = &["nan", "none", "null", "nat", "<na>"];

/// Renders a scalar as trimmed text; `None` for blanks, missing markers,
/// arrays, objects and `null`.
#[must_use]
pub fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() || is_missing_marker(trimmed) {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Like [`text_value`], but also reaches into `{"display_name": ..}` or
/// `{"name": ..}` sub-objects.
#[must_use]
pub fn named_value(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => ["display_name", "name"]
            .iter()
            .find_map(|key| map.get(*key).and_then(text_value)),
        other => text_value(other),
    }
}

/// Reads a finite number from a JSON number or a numeric string.
#[must_use]
pub fn number_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|v| v.is_finite())
}

fn is_missing_marker(s: &str) -> bool {
    MISSING_MARKERS.iter().any(|m| s.eq_ignore_ascii_case(m))
}

fn first_text(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| raw.get(*key).and_then(text_value))
}

fn first_named(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| raw.get(*key).and_then(named_value))
}

fn first_number(raw: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| raw.get(*key).and_then(number_value))
}

#[must_use]
pub fn title(raw: &Value) -> String {
    first_text(raw, &["title"]).unwrap_or_default()
}

#[must_use]
pub fn company(raw: &Value) -> String {
    first_named(raw, &["company"]).unwrap_or_default()
}

#[must_use]
pub fn location(raw: &Value) -> String {
    first_named(raw, &["location"]).unwrap_or_default()
}

#[must_use]
pub fn description(raw: &Value) -> String {
    first_text(raw, &["description"]).unwrap_or_default()
}

#[must_use]
pub fn date_posted(raw: &Value) -> String {
    first_text(raw, &["date_posted", "created"]).unwrap_or_default()
}

#[must_use]
pub fn job_url(raw: &Value) -> String {
    first_text(raw, &["job_url", "redirect_url", "job_url_direct"]).unwrap_or_default()
}

#[must_use]
pub fn job_type(raw: &Value) -> String {
    first_text(raw, &["job_type", "contract_type"]).unwrap_or_default()
}

#[must_use]
pub fn salary_min(raw: &Value) -> Option<f64> {
    first_number(raw, &["salary_min", "min_amount"])
}

#[must_use]
pub fn salary_max(raw: &Value) -> Option<f64> {
    first_number(raw, &["salary_max", "max_amount"])
}

/// Salary period label. Empty unless `has_salary`; falls back to
/// [`DEFAULT_SALARY_INTERVAL`] when a bound exists but no period was given.
#[must_use]
pub fn salary_interval(raw: &Value, has_salary: bool) -> String {
    if !has_salary {
        return String::new();
    }
    first_text(raw, &["salary_interval", "interval"]).map_or_else(
        || DEFAULT_SALARY_INTERVAL.to_string(),
        |s| s.to_lowercase(),
    )
}

/// Source identifier from the record, or `default_site` when it has none.
#[must_use]
pub fn site(raw: &Value, default_site: &str) -> String {
    first_text(raw, &["site"]).unwrap_or_else(|| default_site.to_string())
}

#[must_use]
pub fn company_url(raw: &Value) -> String {
    first_text(raw, &["company_url", "company_url_direct"]).unwrap_or_default()
}

#[must_use]
pub fn company_logo(raw: &Value) -> String {
    first_text(raw, &["company_logo"]).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_value_trims_and_drops_blanks() {
        assert_eq!(text_value(&json!("  Berlin ")), Some("Berlin".to_string()));
        assert_eq!(text_value(&json!("   ")), None);
        assert_eq!(text_value(&json!(null)), None);
        assert_eq!(text_value(&json!(["a"])), None);
    }

    #[test]
    fn text_value_drops_pandas_missing_markers() {
        for marker in ["nan", "NaN", "None", "null", "NaT", "<NA>"] {
            assert_eq!(text_value(&json!(marker)), None, "{marker}");
        }
    }

    #[test]
    fn text_value_renders_numbers_and_bools() {
        assert_eq!(text_value(&json!(42)), Some("42".to_string()));
        assert_eq!(text_value(&json!(true)), Some("true".to_string()));
    }

    #[test]
    fn named_value_reaches_into_objects() {
        assert_eq!(
            named_value(&json!({"display_name": "Acme GmbH", "__CLASS__": "x"})),
            Some("Acme GmbH".to_string())
        );
        assert_eq!(
            named_value(&json!({"name": "Acme"})),
            Some("Acme".to_string())
        );
        assert_eq!(named_value(&json!({"area": ["DE"]})), None);
        assert_eq!(named_value(&json!("Acme")), Some("Acme".to_string()));
    }

    #[test]
    fn number_value_accepts_numeric_strings() {
        assert_eq!(number_value(&json!(15)), Some(15.0));
        assert_eq!(number_value(&json!("18.5")), Some(18.5));
        assert_eq!(number_value(&json!(" 20 ")), Some(20.0));
        assert_eq!(number_value(&json!("nan")), None);
        assert_eq!(number_value(&json!("inf")), None);
        assert_eq!(number_value(&json!("twenty")), None);
        assert_eq!(number_value(&json!(null)), None);
    }

    #[test]
    fn job_url_falls_back_through_aliases() {
        let raw = json!({"job_url": "", "job_url_direct": "https://example.com/direct"});
        assert_eq!(job_url(&raw), "https://example.com/direct");

        let raw = json!({"redirect_url": "https://adzuna.example/land/1"});
        assert_eq!(job_url(&raw), "https://adzuna.example/land/1");
    }

    #[test]
    fn salary_interval_requires_a_bound() {
        let raw = json!({"interval": "hourly"});
        assert_eq!(salary_interval(&raw, false), "");
        assert_eq!(salary_interval(&raw, true), "hourly");
    }

    #[test]
    fn salary_interval_defaults_to_yearly() {
        assert_eq!(salary_interval(&json!({}), true), "yearly");
        assert_eq!(salary_interval(&json!({"interval": "nan"}), true), "yearly");
    }

    #[test]
    fn salary_interval_is_lowercased() {
        assert_eq!(salary_interval(&json!({"interval": "HOURLY"}), true), "hourly");
    }

    #[test]
    fn accessors_on_non_object_return_defaults() {
        let raw = json!("just a string");
        assert_eq!(title(&raw), "");
        assert_eq!(company(&raw), "");
        assert_eq!(salary_min(&raw), None);
        assert_eq!(site(&raw, ""), "");
        assert_eq!(site(&raw, "adzuna"), "adzuna");
    }
}
