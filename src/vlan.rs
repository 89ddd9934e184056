// VLAN tag pop/push by moving the frame head.
//
// Both operations copy the Ethernet header out, adjust the head by one tag,
// then re-derive the header from a fresh cursor before writing it back. The
// parse step happens before any mutation, so a frame that is too short is
// left untouched. A failure after a successful resize is reported; the
// resize itself is not rolled back.

use crate::cursor::HeaderCursor;
use crate::error::DissectError;
use crate::frame::{FrameBuffer, grow_head, shrink_head};
use crate::headers::{ETH_P_8021Q, EthHdr, VLAN_HLEN, VlanHdr};

/// Pop the outermost VLAN tag and return its TCI.
///
/// The caller decides whether the frame is tagged; this only requires one
/// tag's worth of bytes after the Ethernet header.
pub fn vlan_tag_pop<F: FrameBuffer + ?Sized>(frame: &mut F) -> Result<u16, DissectError> {
    let (eth_cpy, tci, h_proto) = {
        let mut cursor = HeaderCursor::new(frame.data_mut());
        let eth: EthHdr<'_> = cursor.advance_header()?;
        let vlh: VlanHdr<'_> = cursor.advance_header()?;
        (eth.to_array(), vlh.tci(), vlh.encapsulated_proto())
    };

    shrink_head(frame, VLAN_HLEN)?;

    let mut cursor = HeaderCursor::new(frame.data_mut());
    let mut eth: EthHdr<'_> = cursor.advance_header()?;
    eth.copy_from(&eth_cpy);
    eth.set_ethertype(h_proto);

    log::debug!("popped VLAN tag tci={tci:#06x}");
    Ok(tci)
}

/// Push a new 802.1Q tag carrying `tci` right after the Ethernet header.
pub fn vlan_tag_push<F: FrameBuffer + ?Sized>(frame: &mut F, tci: u16) -> Result<(), DissectError> {
    let eth_cpy = {
        let mut cursor = HeaderCursor::new(frame.data_mut());
        let eth: EthHdr<'_> = cursor.advance_header()?;
        eth.to_array()
    };

    grow_head(frame, VLAN_HLEN)?;

    let mut cursor = HeaderCursor::new(frame.data_mut());
    let mut eth: EthHdr<'_> = cursor.advance_header()?;
    eth.copy_from(&eth_cpy);
    let mut vlh: VlanHdr<'_> = cursor.advance_header()?;
    vlh.set_tci(tci);
    vlh.set_encapsulated_proto(eth.ethertype());
    eth.set_ethertype(ETH_P_8021Q);

    log::debug!("pushed VLAN tag tci={tci:#06x}");
    Ok(())
}
