//! Progress events emitted by the pipeline runner.
//!
//! Observers are called synchronously, in order, from the runner's task.
//! [`TracingObserver`] turns each event into a structured log line;
//! [`NoopObserver`] drops them.

use std::path::Path;
use std::time::Duration;

use crate::client::BatchOutcome;
use crate::summary::RunSummary;

#[derive(Debug)]
pub enum PipelineEvent<'a> {
    Acquired {
        source: &'a str,
        count: usize,
    },
    SnapshotWritten {
        path: &'a Path,
        records: usize,
    },
    BatchStarted {
        /// 1-based.
        batch: usize,
        total: usize,
        size: usize,
    },
    BatchCompleted {
        batch: usize,
        total: usize,
        size: usize,
        outcome: &'a BatchOutcome,
    },
    Pausing {
        delay: Duration,
    },
    Finished {
        summary: &'a RunSummary,
    },
}

pub trait PipelineObserver {
    fn on_event(&self, event: &PipelineEvent<'_>);
}

/// Logs every event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_event(&self, event: &PipelineEvent<'_>) {
        match event {
            PipelineEvent::Acquired { source, count } => {
                tracing::info!(source, count, "records acquired");
            }
            PipelineEvent::SnapshotWritten { path, records } => {
                tracing::info!(path = %path.display(), records, "snapshot written");
            }
            PipelineEvent::BatchStarted { batch, total, size } => {
                tracing::info!(batch, total, size, "submitting batch");
            }
            PipelineEvent::BatchCompleted {
                batch,
                total,
                size,
                outcome,
            } => match outcome {
                BatchOutcome::Accepted(result) => tracing::info!(
                    batch,
                    total,
                    processed = result.processed,
                    failed = result.failed,
                    "batch accepted"
                ),
                BatchOutcome::Rejected { status, body } => tracing::warn!(
                    batch,
                    total,
                    size,
                    status,
                    body = %body,
                    "batch rejected"
                ),
                BatchOutcome::Errored { error } => tracing::warn!(
                    batch,
                    total,
                    size,
                    error = %error,
                    "batch failed"
                ),
            },
            PipelineEvent::Pausing { delay } => {
                tracing::debug!(delay = ?delay, "pausing between batches");
            }
            PipelineEvent::Finished { summary } => {
                tracing::info!(
                    run_id = %summary.run_id,
                    source = %summary.source,
                    acquired = summary.acquired,
                    processed = summary.processed,
                    failed = summary.failed,
                    batches = summary.batches_submitted,
                    rejected = summary.rejected_batches.len(),
                    dry_run = summary.dry_run,
                    "run finished"
                );
            }
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {
    fn on_event(&self, _event: &PipelineEvent<'_>) {}
}

impl<O: PipelineObserver + ?Sized> PipelineObserver for &O {
    fn on_event(&self, event: &PipelineEvent<'_>) {
        (**self).on_event(event);
    }
}
