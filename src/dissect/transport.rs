// Transport layer: ICMP, ICMPv6, TCP, UDP.

use crate::cursor::HeaderCursor;
use crate::error::DissectError;
use crate::headers::{IcmpHdr, Icmp6Hdr, TCP_MIN_HLEN, TcpHdr, UDP_HLEN, UdpHdr};

/// Parse an ICMP header and return its type.
pub fn parse_icmphdr<'a>(cursor: &mut HeaderCursor<'a>) -> Result<(u8, IcmpHdr<'a>), DissectError> {
    let icmph: IcmpHdr<'a> = cursor.advance_header()?;
    Ok((icmph.icmp_type(), icmph))
}

/// Parse an ICMPv6 header and return its type.
pub fn parse_icmp6hdr<'a>(
    cursor: &mut HeaderCursor<'a>,
) -> Result<(u8, Icmp6Hdr<'a>), DissectError> {
    let icmp6h: Icmp6Hdr<'a> = cursor.advance_header()?;
    Ok((icmp6h.icmp6_type(), icmp6h))
}

/// Parse a UDP header. Fails `Malformed` if the length field is shorter than
/// the header itself.
pub fn parse_udphdr<'a>(cursor: &mut HeaderCursor<'a>) -> Result<UdpHdr<'a>, DissectError> {
    let offset = cursor.position();
    let h: UdpHdr<'a> = cursor.advance_header()?;
    if (h.length() as usize) < UDP_HLEN {
        return Err(DissectError::Malformed {
            offset,
            reason: "UDP length shorter than header",
        });
    }
    Ok(h)
}

/// Parse a TCP header including options (`doff × 4` bytes).
pub fn parse_tcphdr<'a>(cursor: &mut HeaderCursor<'a>) -> Result<TcpHdr<'a>, DissectError> {
    let base = cursor.peek(TCP_MIN_HLEN)?;
    let len = (base[12] >> 4) as usize * 4;
    if len < TCP_MIN_HLEN {
        return Err(DissectError::Malformed {
            offset: cursor.position(),
            reason: "TCP data offset below 5",
        });
    }
    cursor.advance_var_header(len)
}
