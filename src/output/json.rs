use std::io::Write;

use serde::Serialize;
use xdpsieve_common::StatsRecord;

use crate::action::XdpAction;
use crate::classify::Program;
use crate::config::DissectConfig;
use crate::error::SieveError;
use crate::replay::{FrameReport, ReplayOutcome};

#[derive(Serialize)]
struct JsonReport<'a> {
    program: Program,
    config: &'a DissectConfig,
    frames: &'a [FrameReport],
    totals: Vec<ActionTotal>,
}

#[derive(Serialize)]
struct ActionTotal {
    action: XdpAction,
    #[serde(flatten)]
    record: StatsRecord,
}

/// Write replay results as JSON to the given writer.
///
/// `totals` lists every action, including ones that saw no traffic.
pub fn write_json(outcome: &ReplayOutcome, writer: &mut impl Write) -> Result<(), SieveError> {
    let report = JsonReport {
        program: outcome.program,
        config: &outcome.config,
        frames: &outcome.reports,
        totals: outcome
            .stats
            .iter()
            .map(|(action, record)| ActionTotal { action, record })
            .collect(),
    };
    serde_json::to_writer_pretty(writer, &report)
        .map_err(|e| SieveError::Serialization(std::io::Error::other(e.to_string())))
}
