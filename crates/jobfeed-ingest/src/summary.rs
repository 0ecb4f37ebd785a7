use std::path::PathBuf;

use chrono::{DateTime, Utc};
use jobfeed_core::ItemFailure;
use serde::Serialize;
use uuid::Uuid;

/// Item failures kept in a summary; the rest are only counted.
pub const MAX_SAMPLE_FAILURES: usize = 5;

/// A batch that failed as a whole.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedBatch {
    /// 1-based position in submission order.
    pub batch: usize,
    pub size: usize,
    pub reason: String,
}

/// Totals and diagnostics for one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub source: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub dry_run: bool,
    pub acquired: usize,
    pub processed: u64,
    pub failed: u64,
    pub batches_planned: usize,
    pub batches_submitted: usize,
    pub rejected_batches: Vec<RejectedBatch>,
    pub snapshot_path: PathBuf,
    pub sample_failures: Vec<ItemFailure>,
}

impl RunSummary {
    /// `processed / acquired × 100`, or 0 when nothing was acquired.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        if self.acquired == 0 {
            return 0.0;
        }
        self.processed as f64 / self.acquired as f64 * 100.0
    }

    /// Keeps the first [`MAX_SAMPLE_FAILURES`] item failures seen.
    pub(crate) fn record_failures(&mut self, failures: &[ItemFailure]) {
        let room = MAX_SAMPLE_FAILURES.saturating_sub(self.sample_failures.len());
        self.sample_failures
            .extend(failures.iter().take(room).cloned());
    }
}
