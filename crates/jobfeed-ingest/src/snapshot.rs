//! Local JSON snapshot written once per run, before anything is submitted.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use jobfeed_core::JobRecord;

use crate::error::RunError;

/// Timestamp layout in snapshot file names.
pub const SNAPSHOT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// `<dir>/<prefix>_<YYYYMMDD_HHMMSS>.json`
#[must_use]
pub fn snapshot_path(dir: &Path, prefix: &str, timestamp: NaiveDateTime) -> PathBuf {
    dir.join(format!(
        "{prefix}_{}.json",
        timestamp.format(SNAPSHOT_TIMESTAMP_FORMAT)
    ))
}

/// Writes `records` as a pretty-printed JSON array and returns the path.
/// Creates `dir` if needed; an existing file with the same name is replaced.
///
/// # Errors
///
/// Returns [`RunError::Snapshot`] if the directory or file cannot be written.
pub fn write_snapshot(
    dir: &Path,
    prefix: &str,
    records: &[JobRecord],
    timestamp: NaiveDateTime,
) -> Result<PathBuf, RunError> {
    let path = snapshot_path(dir, prefix, timestamp);
    let fail = |source: std::io::Error| RunError::Snapshot {
        path: path.clone(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(fail)?;
    let file = File::create(&path).map_err(fail)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records).map_err(|e| fail(e.into()))?;
    writer.write_all(b"\n").map_err(fail)?;
    writer.flush().map_err(fail)?;

    Ok(path)
}
