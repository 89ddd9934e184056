// Network layer: IPv4 (variable-length) and IPv6 (fixed header + extension chain).

use crate::config::DissectConfig;
use crate::cursor::HeaderCursor;
use crate::error::DissectError;
use crate::headers::{ETH_P_IP, ETH_P_IPV6, IPV4_MIN_HLEN, IPV6_HLEN, Ipv4Hdr, Ipv6Hdr};

use super::ipv6_ext;

/// The base IP header of a frame.
#[derive(Debug)]
pub enum NetworkHeader<'a> {
    V4(Ipv4Hdr<'a>),
    V6(Ipv6Hdr<'a>),
}

/// Result of network-layer dissection.
#[derive(Debug)]
pub struct NetworkLayer<'a> {
    pub header: NetworkHeader<'a>,
    /// Upper-layer protocol: IPv4 `protocol`, or the terminal IPv6 next header.
    pub protocol: u8,
}

/// Parse an IPv4 header including its options and return the protocol field.
pub fn parse_iphdr<'a>(cursor: &mut HeaderCursor<'a>) -> Result<(u8, Ipv4Hdr<'a>), DissectError> {
    let base = cursor.peek(IPV4_MIN_HLEN)?;
    let hdrsize = (base[0] & 0x0F) as usize * 4;
    if hdrsize < IPV4_MIN_HLEN {
        return Err(DissectError::Malformed {
            offset: cursor.position(),
            reason: "IPv4 IHL below 5",
        });
    }

    // Variable-length header: the option region must be present too.
    let iph: Ipv4Hdr<'a> = cursor.advance_var_header(hdrsize)?;
    Ok((iph.protocol(), iph))
}

/// Parse an IPv6 header and walk its extension chain to the upper-layer protocol.
pub fn parse_ip6hdr<'a>(
    cursor: &mut HeaderCursor<'a>,
    config: &DissectConfig,
) -> Result<(u8, Ipv6Hdr<'a>), DissectError> {
    let base = cursor.peek(IPV6_HLEN)?;
    if base[0] >> 4 != 6 {
        return Err(DissectError::Malformed {
            offset: cursor.position(),
            reason: "IPv6 version field is not 6",
        });
    }

    let ip6h: Ipv6Hdr<'a> = cursor.advance_header()?;
    let proto = ipv6_ext::walk(cursor, ip6h.next_header(), config.ipv6_ext_max_chain())?;
    Ok((proto, ip6h))
}

/// Dispatch on the link-layer `ethertype`. Returns `Ok(None)` for anything
/// that is not IPv4 or IPv6.
pub fn parse_network<'a>(
    cursor: &mut HeaderCursor<'a>,
    ethertype: u16,
    config: &DissectConfig,
) -> Result<Option<NetworkLayer<'a>>, DissectError> {
    let layer = match ethertype {
        ETH_P_IP => {
            let (protocol, iph) = parse_iphdr(cursor)?;
            NetworkLayer {
                header: NetworkHeader::V4(iph),
                protocol,
            }
        }
        ETH_P_IPV6 => {
            let (protocol, ip6h) = parse_ip6hdr(cursor, config)?;
            NetworkLayer {
                header: NetworkHeader::V6(ip6h),
                protocol,
            }
        }
        _ => return Ok(None),
    };
    Ok(Some(layer))
}
