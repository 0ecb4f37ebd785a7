//! Source construction for each subcommand.

use std::path::{Path, PathBuf};
use std::time::Duration;

use jobfeed_core::AppConfig;
use jobfeed_sources::{AdzunaClient, ScrapeExportSource, ScraperCommand, StaticSource};

/// Builds the Adzuna client, rejecting unset or placeholder credentials
/// before any request.
pub(crate) fn adzuna_source(config: &AppConfig) -> anyhow::Result<AdzunaClient> {
    let credentials = config.adzuna.credentials()?;
    let client = AdzunaClient::new(
        credentials,
        &config.adzuna,
        config.source_timeout_secs,
        &config.user_agent,
    )?;
    Ok(client)
}

pub(crate) fn scrape_source(
    csv: PathBuf,
    command: Option<String>,
    command_timeout_secs: u64,
) -> ScrapeExportSource {
    let source = ScrapeExportSource::new(csv);
    match command {
        Some(command_line) => source.with_command(ScraperCommand {
            command_line,
            timeout: Duration::from_secs(command_timeout_secs),
            working_dir: None,
        }),
        None => source,
    }
}

/// The built-in sample set, or the records in `file`.
pub(crate) fn static_source(file: Option<&Path>) -> anyhow::Result<StaticSource> {
    match file {
        Some(path) => Ok(StaticSource::from_file(path)?),
        None => Ok(StaticSource::sample()),
    }
}
