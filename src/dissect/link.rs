// Link layer: Ethernet header plus an inline stack of VLAN tags.

use crate::config::{DissectConfig, VLAN_DEPTH_LIMIT};
use crate::cursor::HeaderCursor;
use crate::error::DissectError;
use crate::headers::{EthHdr, VLAN_HLEN, VlanHdr, proto_is_vlan};

/// VLAN IDs seen while walking the tag stack, outermost first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VlanStack {
    ids: [u16; VLAN_DEPTH_LIMIT],
    len: usize,
}

impl VlanStack {
    fn push(&mut self, id: u16) {
        if self.len < self.ids.len() {
            self.ids[self.len] = id;
            self.len += 1;
        }
    }

    pub fn ids(&self) -> &[u16] {
        &self.ids[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Outermost tag's VLAN ID.
    pub fn outer(&self) -> Option<u16> {
        self.ids().first().copied()
    }
}

/// Result of link-layer dissection.
#[derive(Debug)]
pub struct LinkLayer<'a> {
    pub eth: EthHdr<'a>,
    pub vlans: VlanStack,
    /// Ethertype of the payload after the last consumed tag (host order).
    pub next_type: u16,
}

/// Parse the Ethernet header and up to `vlan_max_depth` VLAN tags.
///
/// A tag stack that runs into the end of the frame is not an error: dissection
/// stops at the last complete tag and `next_type` is the VLAN marker that
/// could not be followed.
pub fn parse_ethhdr<'a>(
    cursor: &mut HeaderCursor<'a>,
    config: &DissectConfig,
) -> Result<LinkLayer<'a>, DissectError> {
    let eth: EthHdr<'a> = cursor.advance_header()?;
    let mut next_type = eth.ethertype();
    let mut vlans = VlanStack::default();

    for _ in 0..config.vlan_max_depth() {
        if !proto_is_vlan(next_type) {
            break;
        }
        if cursor.remaining() < VLAN_HLEN {
            log::trace!("partial VLAN tag at offset {}", cursor.position());
            break;
        }
        let vlh: VlanHdr<'a> = cursor.advance_header()?;
        vlans.push(vlh.vlan_id());
        next_type = vlh.encapsulated_proto();
    }

    Ok(LinkLayer {
        eth,
        vlans,
        next_type,
    })
}
