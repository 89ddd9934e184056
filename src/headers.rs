// Typed, zero-copy views over protocol headers inside a frame buffer.
//
// A view wraps the exact byte range a `HeaderCursor` handed out for it and
// reads/writes fields in network byte order, returning host-order values.
// Views borrow the frame mutably, so none can outlive a head adjustment.

use std::net::{Ipv4Addr, Ipv6Addr};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

// Ethernet
pub const ETH_ALEN: usize = 6;
pub const ETH_HLEN: usize = 14;
pub const ETH_P_IP: u16 = 0x0800;
pub const ETH_P_IPV6: u16 = 0x86DD;
pub const ETH_P_8021Q: u16 = 0x8100;
pub const ETH_P_8021AD: u16 = 0x88A8;

// 802.1Q tag
pub const VLAN_HLEN: usize = 4;
pub const VLAN_VID_MASK: u16 = 0x0FFF;

// IPv4
pub const IPV4_MIN_HLEN: usize = 20;

// IPv6
pub const IPV6_HLEN: usize = 40;
/// Next-header + length prefix every extension header starts with.
pub const IPV6_EXT_MIN_HLEN: usize = 2;
/// Distance the extension walker skips for a Fragment header.
pub const IPV6_FRAG_SKIP: usize = 16;

// IP protocol numbers
pub const IPPROTO_HOPOPTS: u8 = 0;
pub const IPPROTO_ICMP: u8 = 1;
pub const IPPROTO_TCP: u8 = 6;
pub const IPPROTO_UDP: u8 = 17;
pub const IPPROTO_ROUTING: u8 = 43;
pub const IPPROTO_FRAGMENT: u8 = 44;
pub const IPPROTO_AH: u8 = 51;
pub const IPPROTO_ICMPV6: u8 = 58;
pub const IPPROTO_NONE: u8 = 59;
pub const IPPROTO_DSTOPTS: u8 = 60;
pub const IPPROTO_MH: u8 = 135;

// Transport
pub const ICMP_HLEN: usize = 8;
pub const ICMP6_HLEN: usize = 8;
pub const TCP_MIN_HLEN: usize = 20;
pub const UDP_HLEN: usize = 8;

// ICMP types
pub const ICMP_ECHOREPLY: u8 = 0;
pub const ICMP_ECHO: u8 = 8;
pub const ICMPV6_ECHO_REQUEST: u8 = 128;
pub const ICMPV6_ECHO_REPLY: u8 = 129;

/// True for the 802.1Q and 802.1ad tag protocol identifiers.
#[inline]
pub fn proto_is_vlan(ethertype: u16) -> bool {
    ethertype == ETH_P_8021Q || ethertype == ETH_P_8021AD
}

#[inline]
fn be16(bytes: &[u8], off: usize) -> u16 {
    u16::from_be_bytes([bytes[off], bytes[off + 1]])
}

#[inline]
fn put_be16(bytes: &mut [u8], off: usize, value: u16) {
    bytes[off..off + 2].copy_from_slice(&value.to_be_bytes());
}

// ---------------------------------------------------------------------------
// HeaderView
// ---------------------------------------------------------------------------

mod sealed {
    pub trait Sealed {}
}

/// A typed overlay on a header inside the frame.
///
/// Only the header types in this module implement it. Views are created by
/// [`HeaderCursor`](crate::cursor::HeaderCursor), which guarantees the wrapped
/// slice is at least `LEN` bytes long.
pub trait HeaderView<'a>: sealed::Sealed + Sized {
    /// Fixed (or minimum, for variable-length headers) size in bytes.
    const LEN: usize;

    #[doc(hidden)]
    fn wrap(bytes: &'a mut [u8]) -> Self;

    fn as_bytes(&self) -> &[u8];
}

macro_rules! header_view {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name<'a> {
            bytes: &'a mut [u8],
        }

        impl sealed::Sealed for $name<'_> {}

        impl<'a> HeaderView<'a> for $name<'a> {
            const LEN: usize = $len;

            fn wrap(bytes: &'a mut [u8]) -> Self {
                debug_assert!(bytes.len() >= Self::LEN);
                Self { bytes }
            }

            fn as_bytes(&self) -> &[u8] {
                self.bytes
            }
        }
    };
}

header_view!(
    /// Ethernet II header.
    EthHdr,
    ETH_HLEN
);
header_view!(
    /// One 802.1Q / 802.1ad tag.
    VlanHdr,
    VLAN_HLEN
);
header_view!(
    /// IPv4 header including options (`IHL × 4` bytes).
    Ipv4Hdr,
    IPV4_MIN_HLEN
);
header_view!(
    /// IPv6 fixed header.
    Ipv6Hdr,
    IPV6_HLEN
);
header_view!(
    /// One IPv6 extension header, spanning its computed length.
    Ipv6ExtHdr,
    IPV6_EXT_MIN_HLEN
);
header_view!(IcmpHdr, ICMP_HLEN);
header_view!(Icmp6Hdr, ICMP6_HLEN);
header_view!(
    /// TCP header including options (`doff × 4` bytes).
    TcpHdr,
    TCP_MIN_HLEN
);
header_view!(UdpHdr, UDP_HLEN);

// ---------------------------------------------------------------------------
// Link layer
// ---------------------------------------------------------------------------

impl EthHdr<'_> {
    pub fn dst_mac(&self) -> [u8; ETH_ALEN] {
        let mut mac = [0u8; ETH_ALEN];
        mac.copy_from_slice(&self.bytes[0..6]);
        mac
    }

    pub fn src_mac(&self) -> [u8; ETH_ALEN] {
        let mut mac = [0u8; ETH_ALEN];
        mac.copy_from_slice(&self.bytes[6..12]);
        mac
    }

    pub fn ethertype(&self) -> u16 {
        be16(self.bytes, 12)
    }

    pub fn set_ethertype(&mut self, ethertype: u16) {
        put_be16(self.bytes, 12, ethertype);
    }

    /// Copy of the header bytes, used to carry it across a head adjustment.
    pub fn to_array(&self) -> [u8; ETH_HLEN] {
        let mut out = [0u8; ETH_HLEN];
        out.copy_from_slice(&self.bytes[..ETH_HLEN]);
        out
    }

    pub fn copy_from(&mut self, saved: &[u8; ETH_HLEN]) {
        self.bytes[..ETH_HLEN].copy_from_slice(saved);
    }
}

impl VlanHdr<'_> {
    /// Full tag control information (PCP, DEI and VLAN ID).
    pub fn tci(&self) -> u16 {
        be16(self.bytes, 0)
    }

    pub fn vlan_id(&self) -> u16 {
        self.tci() & VLAN_VID_MASK
    }

    pub fn encapsulated_proto(&self) -> u16 {
        be16(self.bytes, 2)
    }

    pub fn set_tci(&mut self, tci: u16) {
        put_be16(self.bytes, 0, tci);
    }

    pub fn set_encapsulated_proto(&mut self, proto: u16) {
        put_be16(self.bytes, 2, proto);
    }
}

// ---------------------------------------------------------------------------
// Network layer
// ---------------------------------------------------------------------------

impl Ipv4Hdr<'_> {
    pub fn version(&self) -> u8 {
        self.bytes[0] >> 4
    }

    /// Internet header length in 32-bit words.
    pub fn ihl(&self) -> u8 {
        self.bytes[0] & 0x0F
    }

    pub fn header_len(&self) -> usize {
        self.ihl() as usize * 4
    }

    pub fn total_len(&self) -> u16 {
        be16(self.bytes, 2)
    }

    pub fn ttl(&self) -> u8 {
        self.bytes[8]
    }

    pub fn protocol(&self) -> u8 {
        self.bytes[9]
    }

    pub fn src_addr(&self) -> Ipv4Addr {
        Ipv4Addr::new(self.bytes[12], self.bytes[13], self.bytes[14], self.bytes[15])
    }

    pub fn dst_addr(&self) -> Ipv4Addr {
        Ipv4Addr::new(self.bytes[16], self.bytes[17], self.bytes[18], self.bytes[19])
    }
}

impl Ipv6Hdr<'_> {
    pub fn version(&self) -> u8 {
        self.bytes[0] >> 4
    }

    pub fn payload_len(&self) -> u16 {
        be16(self.bytes, 4)
    }

    pub fn next_header(&self) -> u8 {
        self.bytes[6]
    }

    pub fn hop_limit(&self) -> u8 {
        self.bytes[7]
    }

    pub fn src_addr(&self) -> Ipv6Addr {
        let mut octets = [0u8; 16];
        octets.copy_from_slice(&self.bytes[8..24]);
        Ipv6Addr::from(octets)
    }

    pub fn dst_addr(&self) -> Ipv6Addr {
        let mut octets = [0u8; 16];
        octets.copy_from_slice(&self.bytes[24..40]);
        Ipv6Addr::from(octets)
    }
}

impl Ipv6ExtHdr<'_> {
    pub fn next_header(&self) -> u8 {
        self.bytes[0]
    }

    /// Raw `Hdr Ext Len` field; its unit depends on the header type.
    pub fn hdr_len(&self) -> u8 {
        self.bytes[1]
    }

    /// Bytes this view spans.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Transport layer
// ---------------------------------------------------------------------------

impl IcmpHdr<'_> {
    pub fn icmp_type(&self) -> u8 {
        self.bytes[0]
    }

    pub fn code(&self) -> u8 {
        self.bytes[1]
    }

    pub fn checksum(&self) -> u16 {
        be16(self.bytes, 2)
    }

    pub fn echo_id(&self) -> u16 {
        be16(self.bytes, 4)
    }

    pub fn echo_sequence(&self) -> u16 {
        be16(self.bytes, 6)
    }
}

impl Icmp6Hdr<'_> {
    pub fn icmp6_type(&self) -> u8 {
        self.bytes[0]
    }

    pub fn code(&self) -> u8 {
        self.bytes[1]
    }

    pub fn checksum(&self) -> u16 {
        be16(self.bytes, 2)
    }

    pub fn echo_id(&self) -> u16 {
        be16(self.bytes, 4)
    }

    pub fn echo_sequence(&self) -> u16 {
        be16(self.bytes, 6)
    }
}

impl TcpHdr<'_> {
    pub fn src_port(&self) -> u16 {
        be16(self.bytes, 0)
    }

    pub fn dst_port(&self) -> u16 {
        be16(self.bytes, 2)
    }

    pub fn set_dst_port(&mut self, port: u16) {
        put_be16(self.bytes, 2, port);
    }

    /// Data offset in 32-bit words.
    pub fn data_offset(&self) -> u8 {
        self.bytes[12] >> 4
    }

    pub fn header_len(&self) -> usize {
        self.data_offset() as usize * 4
    }
}

impl UdpHdr<'_> {
    pub fn src_port(&self) -> u16 {
        be16(self.bytes, 0)
    }

    pub fn dst_port(&self) -> u16 {
        be16(self.bytes, 2)
    }

    pub fn set_dst_port(&mut self, port: u16) {
        put_be16(self.bytes, 2, port);
    }

    /// Length field: header plus payload.
    pub fn length(&self) -> u16 {
        be16(self.bytes, 4)
    }
}
