//! Shared data structures between an XDP program and its userspace reader.
//!
//! These types must be `#[repr(C)]` so the per-action stats map has the same
//! byte layout on both sides. The map is an array indexed by XDP action code.

#![no_std]

/// Per-action statistics record (value type of the stats map).
///
/// Counts frames and bytes that ended with a given action. Byte counts use
/// the frame length at the moment the action was recorded, i.e. after any
/// head adjustment the program made.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "user", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsRecord {
    /// Number of frames that ended with this action.
    pub rx_packets: u64,
    /// Sum of frame lengths that ended with this action.
    pub rx_bytes: u64,
}

impl StatsRecord {
    /// Accumulate another record into this one.
    pub fn merge(&mut self, other: &StatsRecord) {
        self.rx_packets = self.rx_packets.wrapping_add(other.rx_packets);
        self.rx_bytes = self.rx_bytes.wrapping_add(other.rx_bytes);
    }
}

/// XDP action codes, matching `enum xdp_action` in `<linux/bpf.h>`.
pub const XDP_ABORTED: u32 = 0;
pub const XDP_DROP: u32 = 1;
pub const XDP_PASS: u32 = 2;
pub const XDP_TX: u32 = 3;
pub const XDP_REDIRECT: u32 = 4;

/// Number of slots in the stats map (one per action code).
pub const XDP_ACTION_MAX: usize = 5;

// Compile-time size assertion to catch layout mismatches early.
const _: () = assert!(core::mem::size_of::<StatsRecord>() == 16);
