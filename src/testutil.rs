// Frame construction helpers shared by the unit tests.

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::headers::*;

/// A builder for raw Ethernet (+ VLAN) / IP / L4 test frames.
pub(crate) struct FrameBuilder {
    src_mac: [u8; 6],
    dst_mac: [u8; 6],
    // Innermost ethertype (after all VLAN tags)
    ethertype: u16,
    // VLAN tags, outermost first: (TPID, TCI)
    vlans: Vec<(u16, u16)>,
    // 4, 6, or 0 for no IP header
    ip_version: u8,
    src_ipv4: Ipv4Addr,
    dst_ipv4: Ipv4Addr,
    src_ipv6: Ipv6Addr,
    dst_ipv6: Ipv6Addr,
    l4_proto: u8,
    src_port: u16,
    dst_port: u16,
    icmp_type: Option<u8>,
    icmp_seq: u16,
    ip_options: Vec<u8>,
    // IPv6 extension headers: (header type, raw bytes incl. next_hdr + len)
    ipv6_ext_headers: Vec<(u8, Vec<u8>)>,
    l4_payload: Vec<u8>,
}

impl FrameBuilder {
    pub(crate) fn new() -> Self {
        Self {
            src_mac: [0x00, 0x11, 0x22, 0x33, 0x44, 0x55],
            dst_mac: [0x66, 0x77, 0x88, 0x99, 0xAA, 0xBB],
            ethertype: ETH_P_IP,
            vlans: Vec::new(),
            ip_version: 4,
            src_ipv4: Ipv4Addr::new(10, 0, 0, 1),
            dst_ipv4: Ipv4Addr::new(10, 0, 0, 2),
            src_ipv6: Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1),
            dst_ipv6: Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 2),
            l4_proto: IPPROTO_TCP,
            src_port: 12345,
            dst_port: 80,
            icmp_type: None,
            icmp_seq: 0,
            ip_options: Vec::new(),
            ipv6_ext_headers: Vec::new(),
            l4_payload: Vec::new(),
        }
    }

    pub(crate) fn ethertype(mut self, et: u16) -> Self {
        self.ethertype = et;
        self
    }

    pub(crate) fn vlan(self, tci: u16) -> Self {
        self.vlan_tpid(ETH_P_8021Q, tci)
    }

    pub(crate) fn vlan_tpid(mut self, tpid: u16, tci: u16) -> Self {
        self.vlans.push((tpid, tci));
        self
    }

    pub(crate) fn ipv4(mut self) -> Self {
        self.ip_version = 4;
        self.ethertype = ETH_P_IP;
        self
    }

    pub(crate) fn ipv6(mut self) -> Self {
        self.ip_version = 6;
        self.ethertype = ETH_P_IPV6;
        self
    }

    pub(crate) fn no_ip(mut self) -> Self {
        self.ip_version = 0;
        self
    }

    pub(crate) fn protocol(mut self, proto: u8) -> Self {
        self.l4_proto = proto;
        self
    }

    pub(crate) fn ports(mut self, src: u16, dst: u16) -> Self {
        self.src_port = src;
        self.dst_port = dst;
        self
    }

    /// ICMP(v6) echo request with the given sequence number.
    pub(crate) fn echo(self, seq: u16) -> Self {
        let proto = if self.ip_version == 6 {
            IPPROTO_ICMPV6
        } else {
            IPPROTO_ICMP
        };
        self.protocol(proto).icmp(None, seq)
    }

    pub(crate) fn icmp(mut self, icmp_type: Option<u8>, seq: u16) -> Self {
        self.icmp_type = icmp_type;
        self.icmp_seq = seq;
        self
    }

    pub(crate) fn ip_options(mut self, opts: Vec<u8>) -> Self {
        self.ip_options = opts;
        self
    }

    /// Add an IPv6 extension header. The next_hdr byte of `raw` is
    /// overwritten to chain to the following header or the L4 protocol.
    pub(crate) fn ipv6_ext_header(mut self, hdr_type: u8, raw: Vec<u8>) -> Self {
        self.ipv6_ext_headers.push((hdr_type, raw));
        self
    }

    pub(crate) fn payload(mut self, payload: Vec<u8>) -> Self {
        self.l4_payload = payload;
        self
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let mut pkt = Vec::new();

        pkt.extend_from_slice(&self.dst_mac);
        pkt.extend_from_slice(&self.src_mac);
        match self.vlans.first() {
            Some((tpid, _)) => pkt.extend_from_slice(&tpid.to_be_bytes()),
            None => pkt.extend_from_slice(&self.ethertype.to_be_bytes()),
        }
        for (i, (_, tci)) in self.vlans.iter().enumerate() {
            let next = match self.vlans.get(i + 1) {
                Some((tpid, _)) => *tpid,
                None => self.ethertype,
            };
            pkt.extend_from_slice(&tci.to_be_bytes());
            pkt.extend_from_slice(&next.to_be_bytes());
        }

        match self.ip_version {
            4 => self.build_ipv4(&mut pkt),
            6 => self.build_ipv6(&mut pkt),
            _ => {}
        }

        pkt
    }

    fn build_ipv4(&self, pkt: &mut Vec<u8>) {
        let ihl = (IPV4_MIN_HLEN + self.ip_options.len()) / 4;
        let l4 = self.build_l4();
        let total_len = (ihl * 4 + l4.len()) as u16;

        pkt.push(0x40 | ihl as u8);
        pkt.push(0x00);
        pkt.extend_from_slice(&total_len.to_be_bytes());
        pkt.extend_from_slice(&0u16.to_be_bytes());
        pkt.extend_from_slice(&0u16.to_be_bytes());
        pkt.push(64);
        pkt.push(self.l4_proto);
        pkt.extend_from_slice(&0u16.to_be_bytes());
        pkt.extend_from_slice(&self.src_ipv4.octets());
        pkt.extend_from_slice(&self.dst_ipv4.octets());
        pkt.extend_from_slice(&self.ip_options);
        pkt.extend_from_slice(&l4);
    }

    fn build_ipv6(&self, pkt: &mut Vec<u8>) {
        let l4 = self.build_l4();

        let mut ext_bytes = Vec::new();
        let mut ext_headers = self.ipv6_ext_headers.clone();
        for i in 0..ext_headers.len() {
            let next = if i + 1 < ext_headers.len() {
                ext_headers[i + 1].0
            } else {
                self.l4_proto
            };
            ext_headers[i].1[0] = next;
            ext_bytes.extend_from_slice(&ext_headers[i].1);
        }

        let first_next_hdr = match ext_headers.first() {
            Some((hdr_type, _)) => *hdr_type,
            None => self.l4_proto,
        };
        let payload_len = (ext_bytes.len() + l4.len()) as u16;

        pkt.extend_from_slice(&[0x60, 0x00, 0x00, 0x00]);
        pkt.extend_from_slice(&payload_len.to_be_bytes());
        pkt.push(first_next_hdr);
        pkt.push(64);
        pkt.extend_from_slice(&self.src_ipv6.octets());
        pkt.extend_from_slice(&self.dst_ipv6.octets());
        pkt.extend_from_slice(&ext_bytes);
        pkt.extend_from_slice(&l4);
    }

    fn build_l4(&self) -> Vec<u8> {
        let mut l4 = Vec::new();
        match self.l4_proto {
            IPPROTO_TCP => {
                l4.extend_from_slice(&self.src_port.to_be_bytes());
                l4.extend_from_slice(&self.dst_port.to_be_bytes());
                l4.extend_from_slice(&0u32.to_be_bytes());
                l4.extend_from_slice(&0u32.to_be_bytes());
                l4.push(0x50);
                l4.push(0x02); // SYN
                l4.extend_from_slice(&65535u16.to_be_bytes());
                l4.extend_from_slice(&0u16.to_be_bytes());
                l4.extend_from_slice(&0u16.to_be_bytes());
            }
            IPPROTO_UDP => {
                l4.extend_from_slice(&self.src_port.to_be_bytes());
                l4.extend_from_slice(&self.dst_port.to_be_bytes());
                let udp_len = (UDP_HLEN + self.l4_payload.len()) as u16;
                l4.extend_from_slice(&udp_len.to_be_bytes());
                l4.extend_from_slice(&0u16.to_be_bytes());
            }
            IPPROTO_ICMP | IPPROTO_ICMPV6 => {
                let default_type = if self.l4_proto == IPPROTO_ICMP {
                    ICMP_ECHO
                } else {
                    ICMPV6_ECHO_REQUEST
                };
                l4.push(self.icmp_type.unwrap_or(default_type));
                l4.push(0);
                l4.extend_from_slice(&0u16.to_be_bytes());
                l4.extend_from_slice(&0x1234u16.to_be_bytes());
                l4.extend_from_slice(&self.icmp_seq.to_be_bytes());
            }
            _ => {}
        }
        l4.extend_from_slice(&self.l4_payload);
        l4
    }
}

/// An 8-byte extension header of the given type (`Hdr Ext Len` = 0).
pub(crate) fn ext_header_8bytes(hdr_type: u8) -> (u8, Vec<u8>) {
    (hdr_type, vec![0u8; 8])
}
