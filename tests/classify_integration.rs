//! End-to-end classification through the public API.

mod common;

use common::*;
use xdpsieve::{ActionStats, Classifier, DissectConfig, FrameBuffer, Program, Rewrite, XdpAction, XdpFrame};

fn classify(program: Program, packet: &[u8]) -> (XdpAction, Option<Rewrite>, Vec<u8>) {
    let classifier = Classifier::new(DissectConfig::default(), ActionStats::new());
    let mut frame = XdpFrame::new(packet);
    let verdict = classifier.classify(program, &mut frame);
    (verdict.action, verdict.rewrite, frame.into_vec())
}

#[test]
fn ping_sequence_parity_ipv4() {
    assert_eq!(classify(Program::Parser, &ping4(4)).0, XdpAction::Drop);
    assert_eq!(classify(Program::Parser, &ping4(5)).0, XdpAction::Pass);
}

#[test]
fn ping_sequence_parity_ipv6() {
    assert_eq!(classify(Program::Parser, &ping6(10)).0, XdpAction::Drop);
    assert_eq!(classify(Program::Parser, &ping6(11)).0, XdpAction::Pass);
}

#[test]
fn double_tagged_ping_is_inspected() {
    let packet = ethernet(&[100, 200], 0x0800, &ipv4(1, &icmp_echo(8, 6)));
    assert_eq!(classify(Program::Parser, &packet).0, XdpAction::Drop);
}

#[test]
fn tags_beyond_depth_limit_pass() {
    // Five tags with the default limit of four: the inner ethertype is never
    // reached, so the frame is treated as non-IP.
    let packet = ethernet(&[1, 2, 3, 4, 5], 0x0800, &ipv4(1, &icmp_echo(8, 6)));
    assert_eq!(classify(Program::Parser, &packet).0, XdpAction::Pass);

    let deep = DissectConfig::new(8, 6).unwrap();
    let classifier = Classifier::new(deep, ActionStats::new());
    let mut frame = XdpFrame::new(&packet);
    assert_eq!(classifier.classify(Program::Parser, &mut frame).action, XdpAction::Drop);
}

#[test]
fn port_rewrite_over_vlan() {
    let packet = ethernet(&[10], 0x0800, &ipv4(17, &udp(40000, 53)));
    let (action, rewrite, out) = classify(Program::PortRewrite, &packet);
    assert_eq!(action, XdpAction::Pass);
    assert_eq!(rewrite, Some(Rewrite::DstPortDecrement { from: 53, to: 52 }));
    assert_eq!(out, ethernet(&[10], 0x0800, &ipv4(17, &udp(40000, 52))));
}

#[test]
fn port_rewrite_drops_truncated_transport() {
    let mut packet = ethernet(&[10], 0x0800, &ipv4(17, &udp(40000, 53)));
    packet.truncate(packet.len() - 3);
    let (action, rewrite, out) = classify(Program::PortRewrite, &packet);
    assert_eq!(action, XdpAction::Drop);
    assert_eq!(rewrite, None);
    assert_eq!(out, packet);
}

#[test]
fn vlan_swap_push_then_pop() {
    let packet = ping6(1);
    let (action, rewrite, tagged) = classify(Program::VlanSwap, &packet);
    assert_eq!(action, XdpAction::Pass);
    assert_eq!(rewrite, Some(Rewrite::VlanPush { tci: 1 }));
    assert_eq!(tagged, ethernet(&[1], 0x86DD, &ipv6(58, &icmp_echo(128, 1))));

    let (_, rewrite, untagged) = classify(Program::VlanSwap, &tagged);
    assert_eq!(rewrite, Some(Rewrite::VlanPop { tci: 1 }));
    assert_eq!(untagged, packet);
}

#[test]
fn runt_frame_passes_every_program_and_is_counted_once() {
    let classifier = Classifier::new(DissectConfig::default(), ActionStats::new());
    for program in [Program::Parser, Program::PortRewrite, Program::VlanSwap] {
        let mut frame = XdpFrame::new(&[0u8; 10]);
        let verdict = classifier.classify(program, &mut frame);
        assert_eq!(verdict.action, XdpAction::Pass);
        assert_eq!(frame.len(), 10);
    }

    let snap = classifier.sink().snapshot();
    assert_eq!(snap.get(XdpAction::Pass).rx_packets, 3);
    assert_eq!(snap.get(XdpAction::Pass).rx_bytes, 30);
    assert_eq!(snap.total().rx_packets, 3);
}

#[test]
fn long_extension_chain_passes_parser() {
    // Seven 8-byte hop-by-hop style headers exceed the default chain of six.
    let mut ext = Vec::new();
    for i in 0..7 {
        let next = if i == 6 { 58 } else { 60 };
        ext.extend_from_slice(&[next, 0, 0, 0, 0, 0, 0, 0]);
    }
    ext.extend_from_slice(&icmp_echo(128, 2));
    let packet = ethernet(&[], 0x86DD, &ipv6(60, &ext));
    assert_eq!(classify(Program::Parser, &packet).0, XdpAction::Pass);
}
