use serde::{Deserialize, Serialize};

/// Interval label used when a source reports a salary without saying what
/// period it covers.
pub const DEFAULT_SALARY_INTERVAL: &str = "yearly";

/// Canonical job listing submitted to the ingestion endpoint.
///
/// Every text field is `""` when the source omits it and both salary bounds
/// are `None`; the serialized form keeps those as `""` and `null` so the
/// endpoint always sees the full field set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    /// Free text, often long and not necessarily English.
    pub description: String,
    /// Loosely formatted date as the source reported it, or `""`.
    pub date_posted: String,
    pub job_url: String,
    pub job_type: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    /// `"hourly"`, `"yearly"`, another source label, or `""`. Only set when at
    /// least one salary bound is present.
    pub salary_interval: String,
    /// Source identifier, e.g. `"indeed"` or `"adzuna"`.
    pub site: String,
    pub company_url: String,
    pub company_logo: String,
}

impl JobRecord {
    /// Returns `true` if either salary bound is known.
    #[must_use]
    pub fn has_salary(&self) -> bool {
        self.salary_min.is_some() || self.salary_max.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_serializes_every_field() {
        let value = serde_json::to_value(JobRecord::default()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 13);
        assert_eq!(obj["title"], "");
        assert!(obj["salary_min"].is_null());
        assert!(obj["salary_max"].is_null());
        assert_eq!(obj["salary_interval"], "");
    }

    #[test]
    fn deserialize_fills_missing_fields_with_defaults() {
        let record: JobRecord =
            serde_json::from_str(r#"{"title": "Werkstudent Data", "salary_min": 18}"#).unwrap();
        assert_eq!(record.title, "Werkstudent Data");
        assert_eq!(record.company, "");
        assert_eq!(record.salary_min, Some(18.0));
        assert!(record.salary_max.is_none());
    }

    #[test]
    fn has_salary_checks_either_bound() {
        let mut record = JobRecord::default();
        assert!(!record.has_salary());
        record.salary_max = Some(22.0);
        assert!(record.has_salary());
    }
}
