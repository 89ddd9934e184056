use std::io::Write;

use crate::error::SieveError;
use crate::replay::{FrameReport, ReplayOutcome};

/// Write replay results in a human-readable table format.
///
/// The NOTE column shows the rewrite, or the error that decided the action.
pub fn write_pretty(outcome: &ReplayOutcome, writer: &mut impl Write) -> Result<(), SieveError> {
    write_pretty_inner(outcome, writer).map_err(SieveError::Serialization)
}

fn write_pretty_inner(outcome: &ReplayOutcome, w: &mut impl Write) -> Result<(), std::io::Error> {
    writeln!(w, "Frame Verdicts ({})", outcome.program)?;
    writeln!(w, "{}", "=".repeat(78))?;
    writeln!(
        w,
        "{:>6} {:<13} {:<10} {:>7} {:>7}  {}",
        "FRAME", "ACTION", "STAGE", "IN", "OUT", "NOTE"
    )?;
    writeln!(w, "{}", "-".repeat(78))?;

    for r in &outcome.reports {
        writeln!(
            w,
            "{:>6} {:<13} {:<10} {:>7} {:>7}  {}",
            r.index,
            r.action.name(),
            r.stage.to_string(),
            r.len_in,
            r.len_out,
            truncate(&note(r), 30),
        )?;
    }

    if outcome.reports.is_empty() {
        writeln!(w, "(no frames in capture)")?;
    }

    writeln!(w, "{}", "-".repeat(78))?;

    for (action, rec) in outcome.stats.iter().filter(|(_, rec)| rec.rx_packets > 0) {
        writeln!(
            w,
            "{:<20} {:>10} pkts {:>12}",
            action.name(),
            rec.rx_packets,
            format_bytes(rec.rx_bytes),
        )?;
    }
    let total = outcome.stats.total();
    writeln!(
        w,
        "{:<20} {:>10} pkts {:>12}",
        "TOTAL",
        total.rx_packets,
        format_bytes(total.rx_bytes),
    )?;

    Ok(())
}

fn note(r: &FrameReport) -> String {
    match (&r.rewrite, &r.error) {
        (Some(rewrite), _) => rewrite.to_string(),
        (None, Some(error)) => error.clone(),
        (None, None) => String::new(),
    }
}

fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_073_741_824 {
        format!("{:.1} GiB", bytes as f64 / 1_073_741_824.0)
    } else if bytes >= 1_048_576 {
        format!("{:.1} MiB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max - 3])
    }
}
