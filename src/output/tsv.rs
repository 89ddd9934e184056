use std::io::Write;

use crate::error::SieveError;
use crate::replay::ReplayOutcome;

/// Write replay results as TSV.
///
/// Output: a frame table (header row + one row per frame in capture order),
/// a blank line, then a totals table with one row per action that saw
/// traffic. Empty optional columns are written as `-`.
pub fn write_tsv(outcome: &ReplayOutcome, writer: &mut impl Write) -> Result<(), SieveError> {
    writeln!(writer, "frame\taction\tstage\tlen_in\tlen_out\trewrite\terror")
        .map_err(SieveError::Serialization)?;

    for r in &outcome.reports {
        let rewrite = r.rewrite.map_or_else(|| "-".to_string(), |rw| rw.to_string());
        let error = r.error.as_deref().map_or_else(|| "-".to_string(), escape_tsv);
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            r.index, r.action, r.stage, r.len_in, r.len_out, rewrite, error,
        )
        .map_err(SieveError::Serialization)?;
    }

    writeln!(writer).map_err(SieveError::Serialization)?;
    writeln!(writer, "action\tpackets\tbytes").map_err(SieveError::Serialization)?;
    for (action, rec) in outcome.stats.iter().filter(|(_, rec)| rec.rx_packets > 0) {
        writeln!(writer, "{}\t{}\t{}", action, rec.rx_packets, rec.rx_bytes)
            .map_err(SieveError::Serialization)?;
    }

    Ok(())
}

/// Escape tabs and newlines in a string for TSV output.
fn escape_tsv(s: &str) -> String {
    s.replace(['\t', '\n', '\r'], " ")
}
