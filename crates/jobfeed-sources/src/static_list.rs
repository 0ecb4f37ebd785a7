//! In-memory source for smoke tests and replays.
//!
//! [`StaticSource::sample`] carries three realistic werkstudent listings for
//! exercising the ingestion endpoint without touching a scraper or an API.
//! [`StaticSource::from_file`] replays a JSON file, such as an earlier run's
//! snapshot.

use std::path::Path;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::SourceError;
use crate::source::JobSource;

/// Accepted layouts of a replay file.
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordFile {
    List(Vec<Value>),
    Wrapped { jobs: Vec<Value> },
}

#[derive(Debug, Clone)]
pub struct StaticSource {
    records: Vec<Value>,
}

impl StaticSource {
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    /// The built-in sample set.
    #[must_use]
    pub fn sample() -> Self {
        Self::new(sample_jobs())
    }

    /// Loads records from a JSON file holding an array or `{"jobs": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Io`] if the file cannot be read, or
    /// [`SourceError::Deserialize`] if it has neither layout.
    pub fn from_file(path: &Path) -> Result<Self, SourceError> {
        let raw = std::fs::read_to_string(path).map_err(|e| SourceError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let parsed: RecordFile =
            serde_json::from_str(&raw).map_err(|e| SourceError::Deserialize {
                context: format!("record file {}", path.display()),
                source: e,
            })?;
        let records = match parsed {
            RecordFile::List(records) | RecordFile::Wrapped { jobs: records } => records,
        };
        Ok(Self::new(records))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl JobSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn acquire(&self) -> Result<Vec<Value>, SourceError> {
        Ok(self.records.clone())
    }
}

fn sample_jobs() -> Vec<Value> {
    vec![
        json!({
            "title": "Werkstudent (m/w/d) Software Development - Python/React",
            "company": "Tech Startup GmbH",
            "location": "Berlin, Germany",
            "description": "Wir suchen einen motivierten Werkstudenten für die Mitarbeit in unserem Entwicklungsteam.\n\nDeine Aufgaben:\n- Entwicklung von Features in Python und React\n- Code Reviews und Testing\n- Zusammenarbeit im agilen Team\n\nWir bieten:\n- 16-20h/Woche, flexible Zeiten\n- €18/Stunde\n- Remote-Möglichkeit",
            "date_posted": "2025-10-16",
            "job_url": "https://example.com/job-software-dev",
            "job_type": "Part-time",
            "salary_min": 18,
            "salary_max": 20,
            "salary_interval": "hourly",
            "site": "test",
            "company_url": "https://techstartup.de",
            "company_logo": ""
        }),
        json!({
            "title": "Werkstudent Marketing & Social Media (m/w/d)",
            "company": "E-Commerce Solutions AG",
            "location": "München, Germany",
            "description": "Zur Verstärkung unseres Marketing-Teams suchen wir einen kreativen Werkstudenten.\n\nAufgaben:\n- Content Creation für Social Media\n- Community Management\n- Performance Marketing Analyse\n\nBenefits:\n- €15-17/Stunde\n- 15-20h/Woche",
            "date_posted": "2025-10-15",
            "job_url": "https://example.com/job-marketing",
            "job_type": "Part-time",
            "salary_min": 15,
            "salary_max": 17,
            "salary_interval": "hourly",
            "site": "test",
            "company_url": "https://ecommerce-solutions.de",
            "company_logo": ""
        }),
        json!({
            "title": "Werkstudent Data Science & Analytics (m/w/d)",
            "company": "FinTech Innovations GmbH",
            "location": "Frankfurt am Main, Germany",
            "description": "Unser Data Team sucht Unterstützung bei der Analyse großer Datenmengen.\n\nWas dich erwartet:\n- Datenanalyse mit Python und SQL\n- Erstellung von Dashboards\n- Machine Learning Projekte\n\nWas wir bieten:\n- €19-22/Stunde\n- Hybrid Work Model",
            "date_posted": "2025-10-16",
            "job_url": "https://example.com/job-data-science",
            "job_type": "Part-time",
            "salary_min": 19,
            "salary_max": 22,
            "salary_interval": "hourly",
            "site": "test",
            "company_url": "https://fintech-innovations.de",
            "company_logo": ""
        }),
    ]
}
