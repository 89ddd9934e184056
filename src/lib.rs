//! Bounded, zero-copy frame dissection and in-place header rewriting with
//! XDP-style pass/drop programs, plus an offline pcap replay driver.

pub mod action;
pub mod classify;
pub mod cli;
pub mod config;
pub mod cursor;
pub mod dissect;
pub mod error;
pub mod frame;
pub mod headers;
pub mod output;
pub mod pcap;
pub mod replay;
pub mod stats;
pub mod vlan;

#[cfg(test)]
mod testutil;

pub use action::{Rewrite, Stage, Verdict, XdpAction};
pub use classify::{Classifier, Program};
pub use config::DissectConfig;
pub use cursor::HeaderCursor;
pub use error::{DissectError, SieveError};
pub use frame::{FrameBuffer, XdpFrame};
pub use stats::{ActionStats, StatsSink, StatsSnapshot};
