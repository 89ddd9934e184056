use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::classify::Program;
use crate::config::{
    DissectConfig, IPV6_EXT_CHAIN_LIMIT, IPV6_EXT_MAX_CHAIN, VLAN_DEPTH_LIMIT, VLAN_MAX_DEPTH,
};
use crate::error::SieveError;
use crate::frame::XDP_PACKET_HEADROOM;

#[derive(Parser, Debug)]
#[command(
    name = "xdpsieve",
    version,
    about = "Replay captured Ethernet frames through XDP-style filter and rewrite programs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Drop ICMP/ICMPv6 echo requests with an even sequence number
    Parse(ReplayArgs),
    /// Decrement the TCP/UDP destination port of every frame
    PortRewrite(ReplayArgs),
    /// Pop the outer VLAN tag, or push VLAN 1 onto untagged frames
    VlanSwap(ReplayArgs),
}

/// Arguments shared by all programs.
#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// Input capture (legacy pcap, Ethernet link type)
    pub input: PathBuf,

    /// Write frames that were not dropped to this pcap file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format [default: pretty]
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Maximum stacked VLAN tags to inspect [default: 4]
    #[arg(long, default_value_t = VLAN_MAX_DEPTH, value_parser = validate_vlan_depth)]
    pub vlan_depth: usize,

    /// Maximum IPv6 extension headers to walk [default: 6]
    #[arg(long, default_value_t = IPV6_EXT_MAX_CHAIN, value_parser = validate_ext_chain)]
    pub ext_chain: usize,

    /// Bytes of headroom in front of each frame [default: 256]
    #[arg(long, default_value_t = XDP_PACKET_HEADROOM, value_parser = validate_headroom)]
    pub headroom: usize,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Tsv,
    Json,
    Pretty,
}

fn validate_vlan_depth(s: &str) -> Result<usize, String> {
    let val: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid integer"))?;
    if val > VLAN_DEPTH_LIMIT {
        Err(format!("vlan-depth must be at most {VLAN_DEPTH_LIMIT}"))
    } else {
        Ok(val)
    }
}

fn validate_ext_chain(s: &str) -> Result<usize, String> {
    let val: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid integer"))?;
    if val < 1 {
        Err("ext-chain must be at least 1".to_string())
    } else if val > IPV6_EXT_CHAIN_LIMIT {
        Err(format!("ext-chain must be at most {IPV6_EXT_CHAIN_LIMIT}"))
    } else {
        Ok(val)
    }
}

fn validate_headroom(s: &str) -> Result<usize, String> {
    let val: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid integer"))?;
    if val > 4096 {
        Err("headroom must be at most 4096 bytes".to_string())
    } else {
        Ok(val)
    }
}

impl Cli {
    /// Split the subcommand into the program to run and its arguments.
    pub fn resolve(self) -> (Program, ReplayArgs) {
        match self.command {
            Command::Parse(args) => (Program::Parser, args),
            Command::PortRewrite(args) => (Program::PortRewrite, args),
            Command::VlanSwap(args) => (Program::VlanSwap, args),
        }
    }
}

impl ReplayArgs {
    pub fn dissect_config(&self) -> Result<DissectConfig, SieveError> {
        DissectConfig::new(self.vlan_depth, self.ext_chain)
    }
}
