mod report;
mod sources;

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use jobfeed_core::{AppConfig, ConfigError};
use jobfeed_ingest::{PipelineRunner, RunError};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "jobfeed")]
#[command(version)]
#[command(about = "Fetch job listings and submit them to the ingestion endpoint in batches")]
struct Cli {
    #[command(flatten)]
    run: RunArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every source; each one overrides its environment variable.
#[derive(Debug, Args)]
struct RunArgs {
    /// Ingestion endpoint URL (overrides `JOBFEED_INGEST_ENDPOINT`)
    #[arg(long, global = true)]
    endpoint: Option<String>,
    /// Records per request (overrides `JOBFEED_BATCH_SIZE`)
    #[arg(long, global = true, conflicts_with = "single_shot")]
    batch_size: Option<usize>,
    /// Send every record in one request with the long timeout
    #[arg(long, global = true)]
    single_shot: bool,
    /// Acquire, normalize and snapshot, but do not submit
    #[arg(long, global = true)]
    dry_run: bool,
    /// Print the run summary as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch listings from the Adzuna search API
    Adzuna {
        /// Search term (overrides `ADZUNA_QUERY`)
        #[arg(long)]
        query: Option<String>,
        /// Pages to fetch (overrides `ADZUNA_PAGES`)
        #[arg(long)]
        pages: Option<u32>,
    },
    /// Read a job scraper CSV export
    Scrape {
        /// Path of the CSV export
        #[arg(long)]
        csv: PathBuf,
        /// Shell command that writes the export, run before reading it
        #[arg(long = "command")]
        scraper_command: Option<String>,
        /// Seconds the scraper command may run
        #[arg(long, default_value = "900")]
        command_timeout_secs: u64,
    },
    /// Submit the built-in sample jobs, or records from a JSON file
    Sample {
        /// JSON array of records, or an object with a `jobs` array
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

impl Cli {
    /// Environment variables implied by the command-line flags.
    fn env_overrides(&self) -> HashMap<&'static str, String> {
        let mut overrides = HashMap::new();
        if let Some(endpoint) = &self.run.endpoint {
            overrides.insert("JOBFEED_INGEST_ENDPOINT", endpoint.clone());
        }
        if let Some(size) = self.run.batch_size {
            overrides.insert("JOBFEED_SUBMIT_MODE", "batched".to_string());
            overrides.insert("JOBFEED_BATCH_SIZE", size.to_string());
        }
        if self.run.single_shot {
            overrides.insert("JOBFEED_SUBMIT_MODE", "single".to_string());
        }
        if let Commands::Adzuna { query, pages } = &self.command {
            if let Some(query) = query {
                overrides.insert("ADZUNA_QUERY", query.clone());
            }
            if let Some(pages) = pages {
                overrides.insert("ADZUNA_PAGES", pages.to_string());
            }
        }
        overrides
    }
}

/// Loads `.env`, then builds the config with flag overrides layered on top
/// of the process environment.
fn load_config(cli: &Cli) -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    let overrides = cli.env_overrides();
    jobfeed_core::build_app_config(|key| match overrides.get(key) {
        Some(value) => Ok(value.clone()),
        None => std::env::var(key),
    })
}

/// Exit status for a failed run: 2 for configuration problems, 3 when the
/// source returned nothing, 1 otherwise.
fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    if err.downcast_ref::<ConfigError>().is_some() {
        return ExitCode::from(2);
    }
    match err.downcast_ref::<RunError>() {
        Some(RunError::NoRecords(_)) => ExitCode::from(3),
        _ => ExitCode::FAILURE,
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::debug!(?config, "configuration loaded");
    let dry_run = cli.run.dry_run;
    let json = cli.run.json;

    let summary = match cli.command {
        Commands::Adzuna { .. } => {
            // Credentials are checked before any request is made.
            let source = sources::adzuna_source(&config)?;
            let runner = PipelineRunner::new(config)?.dry_run(dry_run);
            runner.run(&source).await?
        }
        Commands::Scrape {
            csv,
            scraper_command,
            command_timeout_secs,
        } => {
            let source = sources::scrape_source(csv, scraper_command, command_timeout_secs);
            let runner = PipelineRunner::new(config)?.dry_run(dry_run);
            runner.run(&source).await?
        }
        Commands::Sample { file } => {
            let source = sources::static_source(file.as_deref())?;
            let runner = PipelineRunner::new(config)?.dry_run(dry_run);
            runner.run(&source).await?
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", report::render_summary(&summary));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            exit_code_for(&err)
        }
    }
}
