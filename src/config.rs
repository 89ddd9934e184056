use serde::Serialize;

use crate::error::SieveError;

/// Default number of stacked VLAN tags inspected after the Ethernet header.
pub const VLAN_MAX_DEPTH: usize = 4;
/// Default number of IPv6 extension headers walked before giving up.
pub const IPV6_EXT_MAX_CHAIN: usize = 6;

/// Upper bound accepted for `vlan_max_depth`.
pub const VLAN_DEPTH_LIMIT: usize = 8;
/// Upper bound accepted for `ipv6_ext_max_chain`.
pub const IPV6_EXT_CHAIN_LIMIT: usize = 16;

/// Loop bounds for the variable-length parts of a frame.
///
/// Both walks run a fixed number of iterations at most, so the values must
/// stay small; the constructor rejects anything above the limits above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DissectConfig {
    vlan_max_depth: usize,
    ipv6_ext_max_chain: usize,
}

impl DissectConfig {
    pub fn new(vlan_max_depth: usize, ipv6_ext_max_chain: usize) -> Result<Self, SieveError> {
        if vlan_max_depth > VLAN_DEPTH_LIMIT {
            return Err(SieveError::Config(format!(
                "VLAN depth {vlan_max_depth} exceeds limit {VLAN_DEPTH_LIMIT}"
            )));
        }
        if ipv6_ext_max_chain == 0 || ipv6_ext_max_chain > IPV6_EXT_CHAIN_LIMIT {
            return Err(SieveError::Config(format!(
                "IPv6 extension chain length must be 1..={IPV6_EXT_CHAIN_LIMIT}, got {ipv6_ext_max_chain}"
            )));
        }
        Ok(Self {
            vlan_max_depth,
            ipv6_ext_max_chain,
        })
    }

    pub fn vlan_max_depth(&self) -> usize {
        self.vlan_max_depth
    }

    pub fn ipv6_ext_max_chain(&self) -> usize {
        self.ipv6_ext_max_chain
    }
}

impl Default for DissectConfig {
    fn default() -> Self {
        Self {
            vlan_max_depth: VLAN_MAX_DEPTH,
            ipv6_ext_max_chain: IPV6_EXT_MAX_CHAIN,
        }
    }
}
