//! Raw frame helpers shared by the integration tests.

#![allow(dead_code)]

pub const SRC_MAC: [u8; 6] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x01];
pub const DST_MAC: [u8; 6] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x02];

/// Ethernet header, optional 802.1Q tags (outermost first), then `payload`.
pub fn ethernet(vlans: &[u16], ethertype: u16, payload: &[u8]) -> Vec<u8> {
    let mut f = Vec::new();
    f.extend_from_slice(&DST_MAC);
    f.extend_from_slice(&SRC_MAC);
    for tci in vlans {
        f.extend_from_slice(&0x8100u16.to_be_bytes());
        f.extend_from_slice(&tci.to_be_bytes());
    }
    f.extend_from_slice(&ethertype.to_be_bytes());
    f.extend_from_slice(payload);
    f
}

pub fn ipv4(protocol: u8, l4: &[u8]) -> Vec<u8> {
    let mut p = vec![0x45, 0x00];
    p.extend_from_slice(&((20 + l4.len()) as u16).to_be_bytes());
    p.extend_from_slice(&[0, 0, 0, 0, 64, protocol, 0, 0]);
    p.extend_from_slice(&[192, 0, 2, 1, 192, 0, 2, 2]);
    p.extend_from_slice(l4);
    p
}

pub fn ipv6(next_header: u8, l4: &[u8]) -> Vec<u8> {
    let mut p = vec![0x60, 0, 0, 0];
    p.extend_from_slice(&(l4.len() as u16).to_be_bytes());
    p.push(next_header);
    p.push(64);
    let mut src = [0u8; 16];
    src[0] = 0x20;
    src[1] = 0x01;
    src[15] = 1;
    let mut dst = src;
    dst[15] = 2;
    p.extend_from_slice(&src);
    p.extend_from_slice(&dst);
    p.extend_from_slice(l4);
    p
}

pub fn icmp_echo(icmp_type: u8, seq: u16) -> Vec<u8> {
    let mut p = vec![icmp_type, 0, 0, 0, 0x12, 0x34];
    p.extend_from_slice(&seq.to_be_bytes());
    p
}

pub fn udp(src: u16, dst: u16) -> Vec<u8> {
    let mut p = Vec::new();
    p.extend_from_slice(&src.to_be_bytes());
    p.extend_from_slice(&dst.to_be_bytes());
    p.extend_from_slice(&8u16.to_be_bytes());
    p.extend_from_slice(&0u16.to_be_bytes());
    p
}

/// IPv4 ICMP echo request.
pub fn ping4(seq: u16) -> Vec<u8> {
    ethernet(&[], 0x0800, &ipv4(1, &icmp_echo(8, seq)))
}

/// IPv6 ICMPv6 echo request.
pub fn ping6(seq: u16) -> Vec<u8> {
    ethernet(&[], 0x86DD, &ipv6(58, &icmp_echo(128, seq)))
}
