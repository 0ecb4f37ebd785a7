//! Batched submission of normalized job records to the ingestion endpoint.
//!
//! [`PipelineRunner`] drives one run end to end; [`IngestClient`] sends a
//! single batch and classifies the response into a [`BatchOutcome`].

pub mod client;
pub mod error;
pub mod events;
pub(crate) mod retry;
pub mod runner;
pub mod snapshot;
pub mod summary;

pub use client::{BatchOutcome, IngestClient};
pub use error::{IngestError, RunError};
pub use events::{NoopObserver, PipelineEvent, PipelineObserver, TracingObserver};
pub use runner::PipelineRunner;
pub use snapshot::write_snapshot;
pub use summary::{RejectedBatch, RunSummary, MAX_SAMPLE_FAILURES};
