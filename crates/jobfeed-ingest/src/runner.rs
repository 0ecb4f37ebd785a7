//! Pipeline orchestration: acquire, normalize, snapshot, batch, submit, report.
//!
//! Batches are submitted one at a time with a fixed pause between them. A
//! failed batch is counted and logged but never stops the run; only errors
//! that leave nothing useful to submit (acquisition, no records, snapshot)
//! end it early.

use std::path::PathBuf;

use chrono::{Local, Utc};
use jobfeed_core::{batches, AppConfig, JobRecord, SubmitMode};
use jobfeed_sources::{normalize_records, JobSource};
use uuid::Uuid;

use crate::client::{BatchOutcome, IngestClient};
use crate::error::RunError;
use crate::events::{PipelineEvent, PipelineObserver, TracingObserver};
use crate::snapshot::{snapshot_path, write_snapshot};
use crate::summary::{RejectedBatch, RunSummary};

pub struct PipelineRunner<O = TracingObserver> {
    config: AppConfig,
    client: IngestClient,
    observer: O,
    dry_run: bool,
}

impl PipelineRunner<TracingObserver> {
    /// Creates a runner that logs progress through `tracing`.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Client`] if the HTTP client cannot be built.
    pub fn new(config: AppConfig) -> Result<Self, RunError> {
        let client = IngestClient::from_config(&config)?;
        Ok(Self {
            config,
            client,
            observer: TracingObserver,
            dry_run: false,
        })
    }
}

impl<O: PipelineObserver> PipelineRunner<O> {
    #[must_use]
    pub fn with_observer<P: PipelineObserver>(self, observer: P) -> PipelineRunner<P> {
        PipelineRunner {
            config: self.config,
            client: self.client,
            observer,
            dry_run: self.dry_run,
        }
    }

    /// With `dry_run`, records are acquired, normalized and snapshotted, and
    /// the batch plan is reported, but nothing is submitted.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Splits `records` according to the configured submit mode.
    #[must_use]
    pub fn plan<'r>(&self, records: &'r [JobRecord]) -> Vec<&'r [JobRecord]> {
        match self.config.submit_mode {
            SubmitMode::SingleShot if records.is_empty() => Vec::new(),
            SubmitMode::SingleShot => vec![records],
            SubmitMode::Batched { size } => batches(records, size).collect(),
        }
    }

    /// Writes the run snapshot on the blocking pool and hands the records back.
    async fn snapshot(
        &self,
        records: Vec<JobRecord>,
    ) -> Result<(Vec<JobRecord>, PathBuf), RunError> {
        let dir = self.config.backup_dir.clone();
        let prefix = self.config.backup_prefix.clone();
        let timestamp = Local::now().naive_local();
        let task = tokio::task::spawn_blocking(move || {
            let path = write_snapshot(&dir, &prefix, &records, timestamp)?;
            Ok::<_, RunError>((records, path))
        });
        task.await.map_err(|e| RunError::Snapshot {
            path: snapshot_path(&self.config.backup_dir, &self.config.backup_prefix, timestamp),
            source: std::io::Error::other(e),
        })?
    }

    /// Runs the pipeline once against `source`.
    ///
    /// # Errors
    ///
    /// - [`RunError::Acquisition`] if the source fails.
    /// - [`RunError::NoRecords`] if the source returns nothing; no snapshot
    ///   is written and nothing is submitted.
    /// - [`RunError::Snapshot`] if the snapshot cannot be written; nothing is
    ///   submitted.
    ///
    /// Batch failures are not errors; they are reported in the summary.
    pub async fn run<S: JobSource>(&self, source: &S) -> Result<RunSummary, RunError> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let source_name = source.name().to_string();

        let raw = source
            .acquire()
            .await
            .map_err(|e| RunError::Acquisition {
                source_name: source_name.clone(),
                source: e,
            })?;
        self.observer.on_event(&PipelineEvent::Acquired {
            source: &source_name,
            count: raw.len(),
        });
        if raw.is_empty() {
            return Err(RunError::NoRecords(source_name));
        }

        let records = normalize_records(&raw, source.default_site());
        let (records, snapshot_path) = self.snapshot(records).await?;
        self.observer.on_event(&PipelineEvent::SnapshotWritten {
            path: &snapshot_path,
            records: records.len(),
        });

        let plan = self.plan(&records);
        let total = plan.len();
        let mut summary = RunSummary {
            run_id,
            source: source_name,
            started_at,
            finished_at: started_at,
            dry_run: self.dry_run,
            acquired: records.len(),
            processed: 0,
            failed: 0,
            batches_planned: total,
            batches_submitted: 0,
            rejected_batches: Vec::new(),
            snapshot_path,
            sample_failures: Vec::new(),
        };

        if self.dry_run {
            tracing::info!(
                %run_id,
                batches = total,
                mode = %self.config.submit_mode,
                "dry run, skipping submission"
            );
        } else {
            let timeout = self.config.submit_timeout();
            let pause = self.config.batch_pause();

            for (index, batch) in plan.iter().enumerate() {
                let number = index + 1;
                self.observer.on_event(&PipelineEvent::BatchStarted {
                    batch: number,
                    total,
                    size: batch.len(),
                });

                let outcome = self.client.submit(batch, timeout).await;
                summary.batches_submitted += 1;
                summary.processed += outcome.processed();
                summary.failed += outcome.failed(batch.len());
                if let BatchOutcome::Accepted(result) = &outcome {
                    summary.record_failures(&result.failures);
                }
                if let Some(reason) = outcome.rejection_reason() {
                    summary.rejected_batches.push(RejectedBatch {
                        batch: number,
                        size: batch.len(),
                        reason,
                    });
                }

                self.observer.on_event(&PipelineEvent::BatchCompleted {
                    batch: number,
                    total,
                    size: batch.len(),
                    outcome: &outcome,
                });

                if number < total && !pause.is_zero() {
                    self.observer.on_event(&PipelineEvent::Pausing { delay: pause });
                    tokio::time::sleep(pause).await;
                }
            }
        }

        summary.finished_at = Utc::now();
        self.observer.on_event(&PipelineEvent::Finished { summary: &summary });
        Ok(summary)
    }
}
