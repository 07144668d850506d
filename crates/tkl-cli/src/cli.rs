use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tkl",
    about = "Ticket Ledger: tamper-evident record of ticket sales",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Ledger configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Append every sale in a JSON file to a fresh ledger, then show and verify it
    Ingest(IngestArgs),
    /// Show a fresh ledger holding only its genesis record
    Genesis,
}

#[derive(Args)]
pub struct IngestArgs {
    /// JSON array of sales: [{"event", "buyer", "seat", "price"}, ...]
    pub path: PathBuf,
    /// Stop at the first rejected sale instead of skipping it
    #[arg(long)]
    pub strict: bool,
}
