#![deny(missing_docs)]
//! PetStats command-line interface.
//!
//! Fetches pet statistics from a running server or computes them offline
//! from a clinic snapshot file.

mod client;

use clap::{Args, Parser, Subcommand, ValueEnum};
use client::StatsClient;
use petstats_core::{
    AggregationMode, PetStatistics, SnapshotStore, StatisticsService, render_json,
    render_markdown, render_text,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

#[derive(Parser)]
#[command(name = "petstats", version, about = "PetStats CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct OutputArgs {
    /// Output format for report data.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write the report to a file instead of stdout.
    #[arg(long = "report-output")]
    report_output: Option<PathBuf>,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum ModeArg {
    Entities,
    Database,
}

impl From<ModeArg> for AggregationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Entities => AggregationMode::Entities,
            ModeArg::Database => AggregationMode::Database,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch statistics from a running PetStats server.
    Fetch {
        /// Base URL of the PetStats server.
        #[arg(long, env = "PETSTATS_API_URL", default_value = DEFAULT_SERVER_URL)]
        server_url: String,
        #[command(flatten)]
        report: OutputArgs,
    },
    /// Compute statistics offline from a clinic snapshot file.
    Compute {
        /// JSON snapshot with `pets` and `visits` arrays.
        #[arg(short, long)]
        input: PathBuf,
        /// Aggregation strategy to run against the snapshot.
        #[arg(long, value_enum, default_value_t = ModeArg::Entities)]
        mode: ModeArg,
        #[command(flatten)]
        report: OutputArgs,
    },
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch { server_url, report } => run_fetch(&server_url, report).await?,
        Commands::Compute {
            input,
            mode,
            report,
        } => run_compute(&input, mode.into(), report).await?,
    }

    Ok(())
}

#[cfg(test)]
fn main() {}

async fn run_fetch(server_url: &str, report: OutputArgs) -> CliResult<()> {
    let client = StatsClient::new(server_url)?;
    let stats = client.fetch_statistics().await?;
    emit_statistics(&stats, &report).await
}

async fn run_compute(input: &Path, mode: AggregationMode, report: OutputArgs) -> CliResult<()> {
    let stats = compute_from_snapshot(input, mode)?;
    emit_statistics(&stats, &report).await
}

fn compute_from_snapshot(input: &Path, mode: AggregationMode) -> CliResult<PetStatistics> {
    let store = Arc::new(SnapshotStore::load(input)?);
    let service = StatisticsService::new(store.clone(), store, mode);
    Ok(service.calculate()?)
}

fn render_statistics(stats: &PetStatistics, format: OutputFormat) -> CliResult<String> {
    let contents = match format {
        OutputFormat::Text => render_text(stats),
        OutputFormat::Markdown => render_markdown(stats),
        OutputFormat::Json => {
            let mut json = render_json(stats)?;
            json.push('\n');
            json
        }
    };
    Ok(contents)
}

async fn emit_statistics(stats: &PetStatistics, output: &OutputArgs) -> CliResult<()> {
    let contents = render_statistics(stats, output.format)?;
    emit_output(output, contents).await
}

async fn emit_output(output: &OutputArgs, contents: String) -> CliResult<()> {
    if let Some(path) = &output.report_output {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, contents).await?;
    } else {
        print!("{contents}");
    }
    Ok(())
}
