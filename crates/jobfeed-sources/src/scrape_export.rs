//! Reads the tabular export written by the job scraper.
//!
//! The scraper itself is an external tool; it writes one CSV row per listing
//! with columns such as `site`, `title`, `company`, `min_amount`, `interval`
//! and `job_url_direct`. Each row becomes a JSON object keyed by header, with
//! empty cells as `null`, and is left to the normalizer from there.
//!
//! When a [`ScraperCommand`] is configured it is run first through `sh -c`
//! and must exit successfully within its timeout.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use jobfeed_core::excerpt;
use serde_json::{Map, Value};

use crate::error::SourceError;
use crate::source::JobSource;

const STDERR_EXCERPT_CHARS: usize = 500;

/// Shell command that produces the CSV export.
#[derive(Debug, Clone)]
pub struct ScraperCommand {
    pub command_line: String,
    pub timeout: Duration,
    pub working_dir: Option<PathBuf>,
}

/// Source backed by a scraper CSV export on disk.
#[derive(Debug, Clone)]
pub struct ScrapeExportSource {
    csv_path: PathBuf,
    command: Option<ScraperCommand>,
}

impl ScrapeExportSource {
    pub fn new(csv_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
            command: None,
        }
    }

    /// Runs `command` before reading the export.
    #[must_use]
    pub fn with_command(mut self, command: ScraperCommand) -> Self {
        self.command = Some(command);
        self
    }

    #[must_use]
    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    /// Runs the scraper command and waits for it, killing it on timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Command`] if the command cannot be spawned,
    /// exceeds its timeout, or exits unsuccessfully.
    pub async fn run_command(command: &ScraperCommand) -> Result<(), SourceError> {
        let fail = |reason: String| SourceError::Command {
            command: command.command_line.clone(),
            reason,
        };

        let mut cmd = tokio::process::Command::new("sh");
        cmd.arg("-c")
            .arg(&command.command_line)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &command.working_dir {
            cmd.current_dir(dir);
        }

        tracing::info!(command = %command.command_line, "running scraper command");
        let child = cmd.spawn().map_err(|e| fail(format!("spawn failed: {e}")))?;

        let output = tokio::time::timeout(command.timeout, child.wait_with_output())
            .await
            .map_err(|_| fail(format!("timed out after {}s", command.timeout.as_secs())))?
            .map_err(|e| fail(format!("wait failed: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(fail(format!(
                "exited with {}: {}",
                output.status,
                excerpt(stderr.trim(), STDERR_EXCERPT_CHARS)
            )));
        }

        tracing::debug!(
            stdout_bytes = output.stdout.len(),
            "scraper command finished"
        );
        Ok(())
    }

    /// Reads every row of a CSV export into a JSON object keyed by header.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Csv`] if the file cannot be opened or a row
    /// cannot be decoded.
    pub fn read_rows(path: &Path) -> Result<Vec<Value>, SourceError> {
        let csv_err = |source: csv::Error| SourceError::Csv {
            path: path.display().to_string(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(csv_err)?;
        let headers: Vec<String> = reader
            .headers()
            .map_err(csv_err)?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_err)?;
            let mut row = Map::with_capacity(headers.len());
            for (header, cell) in headers.iter().zip(record.iter()) {
                if header.is_empty() {
                    // pandas writes the index column with an empty header.
                    continue;
                }
                let value = if cell.trim().is_empty() {
                    Value::Null
                } else {
                    Value::String(cell.to_string())
                };
                row.insert(header.clone(), value);
            }
            rows.push(Value::Object(row));
        }
        Ok(rows)
    }
}

impl JobSource for ScrapeExportSource {
    fn name(&self) -> &str {
        "scraper"
    }

    async fn acquire(&self) -> Result<Vec<Value>, SourceError> {
        if let Some(command) = &self.command {
            Self::run_command(command).await?;
        }

        let path = self.csv_path.clone();
        let rows = tokio::task::spawn_blocking(move || Self::read_rows(&path))
            .await
            .map_err(|e| SourceError::Io {
                path: self.csv_path.display().to_string(),
                source: std::io::Error::other(e),
            })??;

        tracing::info!(
            path = %self.csv_path.display(),
            rows = rows.len(),
            "read scraper export"
        );
        Ok(rows)
    }
}
