//! Job-listing sources and the normalizer that maps their records into
//! [`jobfeed_core::JobRecord`].
//!
//! Every source yields raw `serde_json::Value` records; [`normalize_record`]
//! turns each one into the canonical shape through the per-field accessors
//! in [`fields`].

pub mod adzuna;
pub mod error;
pub mod fields;
pub mod normalize;
pub mod scrape_export;
pub mod source;
pub mod static_list;
pub mod types;

pub use adzuna::AdzunaClient;
pub use error::SourceError;
pub use normalize::{normalize_record, normalize_records};
pub use scrape_export::{ScrapeExportSource, ScraperCommand};
pub use source::JobSource;
pub use static_list::StaticSource;
