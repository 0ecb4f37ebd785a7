use super::*;
use serde_json::json;

// -----------------------------------------------------------------------
// Adzuna-shaped records
// -----------------------------------------------------------------------

#[test]
fn nested_company_with_min_salary_only() {
    let raw = json!({"company": {"display_name": "Acme"}, "salary_min": 15});
    let record = normalize_record(&raw, "adzuna");
    assert_eq!(record.company, "Acme");
    assert_eq!(record.salary_min, Some(15.0));
    assert_eq!(record.salary_max, None);
    assert_eq!(record.salary_interval, "yearly");
    assert_eq!(record.site, "adzuna");
}

#[test]
fn full_adzuna_result() {
    let raw = json!({
        "title": "Werkstudent Data Engineering (m/w/d)",
        "company": {"display_name": "FinTech Innovations GmbH", "__CLASS__": "Adzuna::API::Response::Company"},
        "location": {"display_name": "Frankfurt am Main, Hessen", "area": ["Deutschland", "Hessen"]},
        "description": "Unser Data Team sucht Unterstützung...",
        "created": "2025-10-16T09:12:44Z",
        "redirect_url": "https://www.adzuna.de/land/ad/4711",
        "contract_type": "part_time",
        "salary_min": 19.0,
        "salary_max": 22.0
    });
    let record = normalize_record(&raw, "adzuna");
    assert_eq!(record.title, "Werkstudent Data Engineering (m/w/d)");
    assert_eq!(record.company, "FinTech Innovations GmbH");
    assert_eq!(record.location, "Frankfurt am Main, Hessen");
    assert_eq!(record.date_posted, "2025-10-16T09:12:44Z");
    assert_eq!(record.job_url, "https://www.adzuna.de/land/ad/4711");
    assert_eq!(record.job_type, "part_time");
    assert_eq!(record.salary_max, Some(22.0));
    assert_eq!(record.salary_interval, "yearly");
    assert_eq!(record.company_url, "");
    assert_eq!(record.company_logo, "");
}

// -----------------------------------------------------------------------
// Scraper export rows (all values arrive as strings)
// -----------------------------------------------------------------------

#[test]
fn scraper_row_with_string_numbers() {
    let raw = json!({
        "site": "indeed",
        "title": "Werkstudent Marketing & Social Media (m/w/d)",
        "company": "E-Commerce Solutions AG",
        "location": "München, BY, DE",
        "date_posted": "2025-10-15",
        "job_url": "https://de.indeed.com/viewjob?jk=abc123",
        "job_type": "parttime",
        "min_amount": "15.0",
        "max_amount": "17.0",
        "interval": "hourly",
        "company_url": "https://de.indeed.com/cmp/E-Commerce-Solutions",
        "company_logo": "https://d2q79iu7y748jz.cloudfront.net/s/_squarelogo/abc.png"
    });
    let record = normalize_record(&raw, "scraper");
    assert_eq!(record.site, "indeed");
    assert_eq!(record.salary_min, Some(15.0));
    assert_eq!(record.salary_max, Some(17.0));
    assert_eq!(record.salary_interval, "hourly");
    assert_eq!(record.job_type, "parttime");
}

#[test]
fn scraper_row_with_missing_cells() {
    let raw = json!({
        "site": "indeed",
        "title": "Werkstudent IT Support",
        "company": "nan",
        "location": null,
        "min_amount": null,
        "max_amount": "",
        "interval": "yearly",
        "company_url": null,
        "company_url_direct": "https://support.example.de"
    });
    let record = normalize_record(&raw, "scraper");
    assert_eq!(record.company, "");
    assert_eq!(record.location, "");
    assert_eq!(record.salary_min, None);
    assert_eq!(record.salary_max, None);
    assert_eq!(
        record.salary_interval, "",
        "interval must stay empty without a salary bound"
    );
    assert_eq!(record.company_url, "https://support.example.de");
}

// -----------------------------------------------------------------------
// Defaults and robustness
// -----------------------------------------------------------------------

#[test]
fn empty_object_yields_all_defaults() {
    let record = normalize_record(&json!({}), "");
    assert_eq!(record, JobRecord::default());
}

#[test]
fn default_site_fills_only_missing_site() {
    let record = normalize_record(&json!({"title": "Werkstudent Ops"}), "adzuna");
    assert_eq!(record.site, "adzuna");
    let record = normalize_record(&json!({"site": "indeed"}), "adzuna");
    assert_eq!(record.site, "indeed");
}

#[test]
fn wrong_shapes_degrade_to_defaults() {
    let raw = json!({
        "title": ["not", "a", "string"],
        "company": {"unexpected": true},
        "salary_min": {"amount": 10},
        "salary_max": "lots",
        "description": null
    });
    let record = normalize_record(&raw, "");
    assert_eq!(record.title, "");
    assert_eq!(record.company, "");
    assert_eq!(record.salary_min, None);
    assert_eq!(record.salary_max, None);
    assert_eq!(record.salary_interval, "");
    assert_eq!(record.description, "");
}

#[test]
fn non_object_records_never_panic() {
    for raw in [json!(null), json!(7), json!("row"), json!([1, 2, 3])] {
        let record = normalize_record(&raw, "");
        assert_eq!(record, JobRecord::default());
    }
}

#[test]
fn pre_shaped_record_passes_through() {
    let raw = json!({
        "title": "Werkstudent Software Development - Python/React",
        "company": "Tech Startup GmbH",
        "location": "Berlin, Germany",
        "description": "Wir suchen einen motivierten Werkstudenten.",
        "date_posted": "2025-10-16",
        "job_url": "https://example.com/job-software-dev",
        "job_type": "Part-time",
        "salary_min": 18,
        "salary_max": 20,
        "salary_interval": "hourly",
        "site": "test",
        "company_url": "https://techstartup.de",
        "company_logo": ""
    });
    let record = normalize_record(&raw, "static");
    let back = serde_json::to_value(&record).unwrap();
    assert_eq!(back["salary_min"], json!(18.0));
    assert_eq!(back["salary_interval"], "hourly");
    assert_eq!(back["site"], "test");
    assert_eq!(back["company_url"], "https://techstartup.de");
}

#[test]
fn normalize_records_preserves_order() {
    let raw = vec![json!({"title": "a"}), json!({"title": "b"}), json!({"title": "c"})];
    let titles: Vec<String> = normalize_records(&raw, "")
        .into_iter()
        .map(|r| r.title)
        .collect();
    assert_eq!(titles, vec!["a", "b", "c"]);
}
