use std::fmt;

use serde::Serialize;
use xdpsieve_common::{XDP_ABORTED, XDP_DROP, XDP_PASS, XDP_REDIRECT, XDP_TX};

use crate::error::DissectError;

/// Final disposition of a frame, numbered like `enum xdp_action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum XdpAction {
    Aborted,
    Drop,
    Pass,
    Tx,
    Redirect,
}

impl XdpAction {
    pub const ALL: [XdpAction; 5] = [
        XdpAction::Aborted,
        XdpAction::Drop,
        XdpAction::Pass,
        XdpAction::Tx,
        XdpAction::Redirect,
    ];

    pub fn code(self) -> u32 {
        match self {
            XdpAction::Aborted => XDP_ABORTED,
            XdpAction::Drop => XDP_DROP,
            XdpAction::Pass => XDP_PASS,
            XdpAction::Tx => XDP_TX,
            XdpAction::Redirect => XDP_REDIRECT,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.code() == code)
    }

    pub fn name(self) -> &'static str {
        match self {
            XdpAction::Aborted => "XDP_ABORTED",
            XdpAction::Drop => "XDP_DROP",
            XdpAction::Pass => "XDP_PASS",
            XdpAction::Tx => "XDP_TX",
            XdpAction::Redirect => "XDP_REDIRECT",
        }
    }
}

impl fmt::Display for XdpAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// In-place modification applied to a frame before its action was reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rewrite {
    /// Transport destination port decremented by one (wrapping at zero).
    DstPortDecrement { from: u16, to: u16 },
    VlanPop { tci: u16 },
    VlanPush { tci: u16 },
}

impl fmt::Display for Rewrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rewrite::DstPortDecrement { from, to } => write!(f, "dport {from}->{to}"),
            Rewrite::VlanPop { tci } => write!(f, "vlan pop {tci}"),
            Rewrite::VlanPush { tci } => write!(f, "vlan push {tci}"),
        }
    }
}

/// How far dissection got before the decision was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Start,
    LinkParsed,
    NetworkParsed,
    TransportParsed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Start => "start",
            Stage::LinkParsed => "link",
            Stage::NetworkParsed => "network",
            Stage::TransportParsed => "transport",
        })
    }
}

/// The decided outcome of one classification pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub action: XdpAction,
    pub rewrite: Option<Rewrite>,
    pub stage: Stage,
    /// Error that forced a default action, or a tolerated rewrite failure.
    pub error: Option<DissectError>,
}

impl Verdict {
    pub fn new(action: XdpAction, stage: Stage) -> Self {
        Self {
            action,
            rewrite: None,
            stage,
            error: None,
        }
    }

    pub fn with_rewrite(mut self, rewrite: Rewrite) -> Self {
        self.rewrite = Some(rewrite);
        self
    }

    pub fn with_error(mut self, error: DissectError) -> Self {
        self.error = Some(error);
        self
    }
}
