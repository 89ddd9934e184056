// Per-frame decision logic: the three XDP programs.
//
// Each program walks Start -> LinkParsed -> NetworkParsed -> TransportParsed
// as far as it needs to and turns any dissection error into the program's
// default action. The returned `Verdict` is the decided state.

use std::fmt;

use serde::Serialize;

use crate::action::{Rewrite, Stage, Verdict, XdpAction};
use crate::config::DissectConfig;
use crate::cursor::HeaderCursor;
use crate::dissect::{
    NetworkHeader, parse_ethhdr, parse_icmp6hdr, parse_icmphdr, parse_network, parse_tcphdr,
    parse_udphdr,
};
use crate::error::DissectError;
use crate::frame::FrameBuffer;
use crate::headers::{
    ICMP_ECHO, ICMPV6_ECHO_REQUEST, IPPROTO_ICMP, IPPROTO_ICMPV6, IPPROTO_TCP, IPPROTO_UDP,
    proto_is_vlan,
};
use crate::stats::StatsSink;
use crate::vlan::{vlan_tag_pop, vlan_tag_push};

/// VLAN ID pushed onto untagged frames by the VLAN swapper.
pub const SWAP_PUSH_VLAN_ID: u16 = 1;

/// Which program a frame is run through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Program {
    /// Inspect-and-filter: drop ICMP(v6) echo requests with an even sequence.
    Parser,
    /// Decrement the TCP/UDP destination port; drop what cannot be parsed.
    PortRewrite,
    /// Pop the outer VLAN tag, or push VLAN 1 onto untagged frames.
    VlanSwap,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Program::Parser => "parse",
            Program::PortRewrite => "port-rewrite",
            Program::VlanSwap => "vlan-swap",
        })
    }
}

/// Runs programs over frames and reports each final action to a stats sink.
#[derive(Debug)]
pub struct Classifier<S> {
    config: DissectConfig,
    sink: S,
}

impl<S: StatsSink> Classifier<S> {
    pub fn new(config: DissectConfig, sink: S) -> Self {
        Self { config, sink }
    }

    pub fn config(&self) -> &DissectConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Classify one frame, possibly rewriting it in place, and record the
    /// action exactly once.
    pub fn classify<F: FrameBuffer + ?Sized>(&self, program: Program, frame: &mut F) -> Verdict {
        let verdict = match program {
            Program::Parser => inspect_and_filter(frame, &self.config),
            Program::PortRewrite => port_rewrite(frame, &self.config),
            Program::VlanSwap => vlan_swap(frame, &self.config),
        };
        self.sink.record(verdict.action, frame.len());
        verdict
    }
}

// ---------------------------------------------------------------------------
// Inspect-and-filter
// ---------------------------------------------------------------------------

/// Drop ICMP echo requests (IPv4) and ICMPv6 echo requests (IPv6) whose
/// sequence number is even; pass everything else, including anything that
/// fails to parse.
pub fn inspect_and_filter<F: FrameBuffer + ?Sized>(frame: &mut F, config: &DissectConfig) -> Verdict {
    let mut stage = Stage::Start;
    match try_inspect(frame.data_mut(), config, &mut stage) {
        Ok(action) => Verdict::new(action, stage),
        Err(e) => {
            log::debug!("parser: {e} after {stage} stage, passing");
            Verdict::new(XdpAction::Pass, stage).with_error(e)
        }
    }
}

fn try_inspect(
    data: &mut [u8],
    config: &DissectConfig,
    stage: &mut Stage,
) -> Result<XdpAction, DissectError> {
    let mut cursor = HeaderCursor::new(data);

    let link = parse_ethhdr(&mut cursor, config)?;
    *stage = Stage::LinkParsed;

    let Some(net) = parse_network(&mut cursor, link.next_type, config)? else {
        return Ok(XdpAction::Pass);
    };
    *stage = Stage::NetworkParsed;

    let sequence = match net.header {
        NetworkHeader::V6(_) => {
            if net.protocol != IPPROTO_ICMPV6 {
                return Ok(XdpAction::Pass);
            }
            let (icmp6_type, icmp6h) = parse_icmp6hdr(&mut cursor)?;
            *stage = Stage::TransportParsed;
            if icmp6_type != ICMPV6_ECHO_REQUEST {
                return Ok(XdpAction::Pass);
            }
            icmp6h.echo_sequence()
        }
        NetworkHeader::V4(_) => {
            if net.protocol != IPPROTO_ICMP {
                return Ok(XdpAction::Pass);
            }
            let (icmp_type, icmph) = parse_icmphdr(&mut cursor)?;
            *stage = Stage::TransportParsed;
            if icmp_type != ICMP_ECHO {
                return Ok(XdpAction::Pass);
            }
            icmph.echo_sequence()
        }
    };

    if sequence % 2 == 0 {
        Ok(XdpAction::Drop)
    } else {
        Ok(XdpAction::Pass)
    }
}

// ---------------------------------------------------------------------------
// Port rewrite
// ---------------------------------------------------------------------------

/// Decrement the TCP/UDP destination port by one.
///
/// Frames whose link layer cannot be parsed, non-IP frames and non-TCP/UDP
/// protocols pass untouched. Any parse failure past the link layer drops.
/// Port 0 wraps to 65535.
pub fn port_rewrite<F: FrameBuffer + ?Sized>(frame: &mut F, config: &DissectConfig) -> Verdict {
    let mut stage = Stage::Start;
    match try_port_rewrite(frame.data_mut(), config, &mut stage) {
        Ok(Some(rewrite)) => Verdict::new(XdpAction::Pass, stage).with_rewrite(rewrite),
        Ok(None) => Verdict::new(XdpAction::Pass, stage),
        Err(e) => {
            let action = if stage == Stage::Start {
                XdpAction::Pass
            } else {
                XdpAction::Drop
            };
            log::debug!("port-rewrite: {e} after {stage} stage, {action}");
            Verdict::new(action, stage).with_error(e)
        }
    }
}

fn try_port_rewrite(
    data: &mut [u8],
    config: &DissectConfig,
    stage: &mut Stage,
) -> Result<Option<Rewrite>, DissectError> {
    let mut cursor = HeaderCursor::new(data);

    let link = parse_ethhdr(&mut cursor, config)?;
    *stage = Stage::LinkParsed;

    let Some(net) = parse_network(&mut cursor, link.next_type, config)? else {
        return Ok(None);
    };
    *stage = Stage::NetworkParsed;

    let (from, to) = match net.protocol {
        IPPROTO_UDP => {
            let mut udph = parse_udphdr(&mut cursor)?;
            *stage = Stage::TransportParsed;
            let from = udph.dst_port();
            udph.set_dst_port(from.wrapping_sub(1));
            (from, udph.dst_port())
        }
        IPPROTO_TCP => {
            let mut tcph = parse_tcphdr(&mut cursor)?;
            *stage = Stage::TransportParsed;
            let from = tcph.dst_port();
            tcph.set_dst_port(from.wrapping_sub(1));
            (from, tcph.dst_port())
        }
        _ => return Ok(None),
    };

    log::trace!("port-rewrite: dport {from} -> {to}");
    Ok(Some(Rewrite::DstPortDecrement { from, to }))
}

// ---------------------------------------------------------------------------
// VLAN swap
// ---------------------------------------------------------------------------

/// Pop the outer VLAN tag of tagged frames, push VLAN 1 onto untagged ones.
///
/// Always passes. A failed rewrite is reported in the verdict's `error`.
pub fn vlan_swap<F: FrameBuffer + ?Sized>(frame: &mut F, config: &DissectConfig) -> Verdict {
    let tagged = {
        let mut cursor = HeaderCursor::new(frame.data_mut());
        match parse_ethhdr(&mut cursor, config) {
            Ok(link) => proto_is_vlan(link.eth.ethertype()),
            Err(e) => return Verdict::new(XdpAction::Pass, Stage::Start).with_error(e),
        }
    };

    let result = if tagged {
        vlan_tag_pop(frame).map(|tci| Rewrite::VlanPop { tci })
    } else {
        vlan_tag_push(frame, SWAP_PUSH_VLAN_ID).map(|()| Rewrite::VlanPush {
            tci: SWAP_PUSH_VLAN_ID,
        })
    };

    let verdict = Verdict::new(XdpAction::Pass, Stage::LinkParsed);
    match result {
        Ok(rewrite) => verdict.with_rewrite(rewrite),
        Err(e) => {
            log::debug!("vlan-swap: rewrite failed: {e}");
            verdict.with_error(e)
        }
    }
}
