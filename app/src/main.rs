#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use clap::{Parser, ValueEnum};
use command::{CommandStrategy, JsonStrategy, RunInput, TableStrategy};
use std::path::PathBuf;
use strawcond_core::PanelLabel;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "fetch-straw-conditions")]
#[command(
    about = "Collate run configuration and hardware database panel conditions into offline status tables",
    long_about = None
)]
struct Cli {
    /// Run number
    #[arg(short = 'r', long)]
    run: u32,

    /// Panels to include, as ids (5) or labels (MN005); all panels when omitted
    #[arg(short = 'p', long, num_args = 1..)]
    panels: Option<Vec<PanelLabel>>,

    /// JSON file mapping panel ids to plane and panel coordinates
    #[arg(short = 'm', long = "mapping")]
    mapping: PathBuf,

    /// JSON run configuration with archive and database settings
    #[arg(short = 'c', long = "config")]
    config: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Log debug detail to stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Offline status table
    Table,
    /// Merged per-panel records
    Json,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "info" }));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let input = RunInput {
        run: cli.run,
        panels: cli.panels,
        mapping: cli.mapping,
        config: cli.config,
    };

    match cli.format {
        OutputFormat::Table => TableStrategy.execute(input).await,
        OutputFormat::Json => JsonStrategy.execute(input).await,
    }
}
