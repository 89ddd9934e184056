pub mod json;
pub mod pretty;
pub mod tsv;

use std::io::Write;

use crate::cli::OutputFormat;
use crate::error::SieveError;
use crate::replay::ReplayOutcome;

/// Write per-frame verdicts and per-action totals in the specified format.
pub fn write_report(
    outcome: &ReplayOutcome,
    format: OutputFormat,
    writer: &mut impl Write,
) -> Result<(), SieveError> {
    match format {
        OutputFormat::Tsv => tsv::write_tsv(outcome, writer),
        OutputFormat::Json => json::write_json(outcome, writer),
        OutputFormat::Pretty => pretty::write_pretty(outcome, writer),
    }
}
