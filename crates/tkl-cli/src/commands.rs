use anyhow::{bail, Context};
use serde_json::Value;
use tkl_ledger::{Ledger, LedgerConfig};
use tracing::{info, warn};

use crate::cli::*;
use crate::input::{decode_sale, read_sales};
use crate::render::{render_json, render_text, Rejection};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => LedgerConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => LedgerConfig::default(),
    };

    match cli.command {
        Command::Ingest(args) => cmd_ingest(args, config, &cli.format),
        Command::Genesis => show(&Ledger::with_config(config), &[], &cli.format),
    }
}

fn cmd_ingest(args: IngestArgs, config: LedgerConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let entries = read_sales(&args.path)?;
    let mut ledger = Ledger::with_config(config);
    let rejected = ingest(&mut ledger, entries, args.strict)?;
    info!(
        appended = ledger.len() - 1,
        rejected = rejected.len(),
        "ingest finished"
    );
    show(&ledger, &rejected, format)
}

/// Append each entry in order. Rejected entries are collected and skipped,
/// or abort the run when `strict` is set.
fn ingest(
    ledger: &mut Ledger,
    entries: Vec<Value>,
    strict: bool,
) -> anyhow::Result<Vec<Rejection>> {
    let mut rejected = Vec::new();
    for (i, value) in entries.into_iter().enumerate() {
        let outcome = decode_sale(value)
            .and_then(|sale| ledger.append(sale).map(|_| ()).map_err(anyhow::Error::from));

        if let Err(err) = outcome {
            let entry = i + 1;
            let reason = err.to_string();
            if strict {
                bail!("entry {entry} rejected: {reason}");
            }
            warn!(entry, %reason, "sale skipped");
            rejected.push(Rejection { entry, reason });
        }
    }
    Ok(rejected)
}

fn show(ledger: &Ledger, rejected: &[Rejection], format: &OutputFormat) -> anyhow::Result<()> {
    let report = ledger.audit();
    match format {
        OutputFormat::Text => print!("{}", render_text(ledger, rejected, &report)),
        OutputFormat::Json => println!("{}", render_json(ledger, rejected, &report)?),
    }
    if !report.is_valid() {
        bail!("ledger failed verification");
    }
    Ok(())
}
