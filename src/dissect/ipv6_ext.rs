// Bounded walk over the IPv6 extension header chain.
//
// The chain is attacker-controlled, so it is followed for at most
// `ipv6_ext_max_chain` links and never recursively.

use crate::cursor::HeaderCursor;
use crate::error::DissectError;
use crate::headers::{
    IPPROTO_AH, IPPROTO_DSTOPTS, IPPROTO_FRAGMENT, IPPROTO_HOPOPTS, IPPROTO_MH, IPPROTO_ROUTING,
    IPV6_EXT_MIN_HLEN, IPV6_FRAG_SKIP, Ipv6ExtHdr,
};

/// Skip extension headers starting at the cursor and return the first
/// protocol that is not one (e.g. ICMPv6, TCP, UDP or "no next header").
///
/// Every step needs the 2-byte `next_hdr`/`hdr_len` prefix to be present,
/// including the step that finds the terminal protocol.
pub fn walk(
    cursor: &mut HeaderCursor<'_>,
    mut next_hdr: u8,
    max_chain: usize,
) -> Result<u8, DissectError> {
    for _ in 0..max_chain {
        let prefix = cursor.peek(IPV6_EXT_MIN_HLEN)?;
        let hdr_len = prefix[1] as usize;

        let len = match next_hdr {
            IPPROTO_HOPOPTS | IPPROTO_DSTOPTS | IPPROTO_ROUTING | IPPROTO_MH => (hdr_len + 1) * 8,
            IPPROTO_AH => (hdr_len + 2) * 4,
            IPPROTO_FRAGMENT => IPV6_FRAG_SKIP,
            _ => return Ok(next_hdr),
        };

        let ext: Ipv6ExtHdr<'_> = cursor.advance_var_header(len)?;
        log::trace!(
            "ipv6 ext hdr {} ({} bytes) -> next {}",
            next_hdr,
            ext.len(),
            ext.next_header()
        );
        next_hdr = ext.next_header();
    }

    Err(DissectError::ChainTooLong { limit: max_chain })
}
