// Offline driver: run every frame of a capture through one program.

use serde::Serialize;

use crate::action::{Rewrite, Stage, XdpAction};
use crate::classify::{Classifier, Program};
use crate::config::DissectConfig;
use crate::frame::{FrameBuffer, XdpFrame};
use crate::pcap::{Capture, CapturedFrame};
use crate::stats::{ActionStats, StatsSnapshot};

/// What happened to one replayed frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    /// 1-based position in the capture.
    pub index: usize,
    pub action: XdpAction,
    pub stage: Stage,
    pub len_in: usize,
    pub len_out: usize,
    pub rewrite: Option<Rewrite>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    pub program: Program,
    pub config: DissectConfig,
    pub reports: Vec<FrameReport>,
    pub stats: StatsSnapshot,
    /// Frames that were not dropped, as they left the program.
    pub forwarded: Vec<CapturedFrame>,
}

/// Classify each frame of `capture` with `headroom` bytes in front of it.
pub fn replay(
    program: Program,
    capture: &Capture,
    config: DissectConfig,
    headroom: usize,
) -> ReplayOutcome {
    let classifier = Classifier::new(config, ActionStats::new());
    let mut reports = Vec::with_capacity(capture.frames.len());
    let mut forwarded = Vec::new();

    for (i, captured) in capture.frames.iter().enumerate() {
        let mut frame = XdpFrame::with_headroom(&captured.data, headroom);
        let verdict = classifier.classify(program, &mut frame);
        let len_out = frame.len();

        log::debug!(
            "frame {}: {} at {} ({} -> {} bytes)",
            i + 1,
            verdict.action,
            verdict.stage,
            captured.data.len(),
            len_out
        );

        reports.push(FrameReport {
            index: i + 1,
            action: verdict.action,
            stage: verdict.stage,
            len_in: captured.data.len(),
            len_out,
            rewrite: verdict.rewrite,
            error: verdict.error.map(|e| e.to_string()),
        });

        if verdict.action != XdpAction::Drop {
            let orig_len = (captured.orig_len as usize + len_out).saturating_sub(captured.data.len());
            forwarded.push(CapturedFrame {
                ts_sec: captured.ts_sec,
                ts_frac: captured.ts_frac,
                orig_len: orig_len as u32,
                data: frame.into_vec(),
            });
        }
    }

    let stats = classifier.sink().snapshot();
    log::info!(
        "{program}: {} frames, {} forwarded, {} dropped",
        reports.len(),
        forwarded.len(),
        stats.get(XdpAction::Drop).rx_packets
    );

    ReplayOutcome {
        program,
        config,
        reports,
        stats,
        forwarded,
    }
}
