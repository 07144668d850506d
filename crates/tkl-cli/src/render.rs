use std::fmt;

use colored::Colorize;
use serde::Serialize;
use tkl_ledger::{DigestAlgorithm, IntegrityError, Ledger, Record, VerificationReport};

/// A sale the ledger refused, by its position in the input file (1-based).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub entry: usize,
    pub reason: String,
}

#[derive(Serialize)]
struct JsonView<'a> {
    digest: DigestAlgorithm,
    records: &'a [Record],
    rejected: &'a [Rejection],
    valid: bool,
    violations: &'a [IntegrityError],
}

pub fn render_json(
    ledger: &Ledger,
    rejected: &[Rejection],
    report: &VerificationReport,
) -> anyhow::Result<String> {
    let view = JsonView {
        digest: ledger.config().digest,
        records: ledger.records(),
        rejected,
        valid: report.is_valid(),
        violations: &report.violations,
    };
    Ok(serde_json::to_string_pretty(&view)?)
}

pub fn render_text(ledger: &Ledger, rejected: &[Rejection], report: &VerificationReport) -> String {
    TextView {
        ledger,
        rejected,
        report,
    }
    .to_string()
}

struct TextView<'a> {
    ledger: &'a Ledger,
    rejected: &'a [Rejection],
    report: &'a VerificationReport,
}

impl fmt::Display for TextView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in self.rejected {
            writeln!(f, "{} entry {}: {}", "✗".red().bold(), r.entry, r.reason)?;
        }
        if !self.rejected.is_empty() {
            writeln!(f)?;
        }

        for (index, record) in self.ledger.iter().enumerate() {
            write_record(f, index, record)?;
        }

        if self.report.is_valid() {
            writeln!(
                f,
                "{} Ledger is valid ({} records, {})",
                "✓".green().bold(),
                self.report.record_count,
                self.ledger.config().digest
            )
        } else {
            writeln!(f, "{} Ledger has been tampered!", "✗".red().bold())?;
            for violation in &self.report.violations {
                writeln!(f, "  {violation}")?;
            }
            Ok(())
        }
    }
}

fn write_record(f: &mut fmt::Formatter<'_>, index: usize, record: &Record) -> fmt::Result {
    let sale = record.payload();
    writeln!(f, "{}", format!("Block {index}").yellow().bold())?;
    writeln!(f, "  Event:     {}", sale.event)?;
    writeln!(f, "  Buyer:     {}", sale.buyer)?;
    writeln!(f, "  Seat:      {}", sale.seat)?;
    writeln!(f, "  Price:     {}", sale.price)?;
    writeln!(f, "  Timestamp: {}", record.timestamp())?;
    writeln!(f, "  Previous:  {}", record.previous_hash().dimmed())?;
    writeln!(f, "  Hash:      {}", record.hash().cyan())?;
    writeln!(f)
}
