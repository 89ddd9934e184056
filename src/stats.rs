// Per-action frame/byte counters.
//
// The classifier reports every frame to a `StatsSink` exactly once. The
// sink is shared across threads, so `record` takes `&self`; `ActionStats`
// implements it with one pair of relaxed atomics per action slot, the
// userspace analogue of a per-CPU array map indexed by action code.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use xdpsieve_common::{StatsRecord, XDP_ACTION_MAX};

use crate::action::XdpAction;

/// Receives the final action of every classified frame.
pub trait StatsSink {
    fn record(&self, action: XdpAction, frame_len: usize);
}

impl<S: StatsSink + ?Sized> StatsSink for &S {
    fn record(&self, action: XdpAction, frame_len: usize) {
        (**self).record(action, frame_len)
    }
}

impl<S: StatsSink + ?Sized> StatsSink for Arc<S> {
    fn record(&self, action: XdpAction, frame_len: usize) {
        (**self).record(action, frame_len)
    }
}

/// Lock-free per-action counters.
#[derive(Debug, Default)]
pub struct ActionStats {
    packets: [AtomicU64; XDP_ACTION_MAX],
    bytes: [AtomicU64; XDP_ACTION_MAX],
}

impl ActionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point-in-time copy of all counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        let mut records = [StatsRecord::default(); XDP_ACTION_MAX];
        for (i, rec) in records.iter_mut().enumerate() {
            rec.rx_packets = self.packets[i].load(Ordering::Relaxed);
            rec.rx_bytes = self.bytes[i].load(Ordering::Relaxed);
        }
        StatsSnapshot { records }
    }
}

impl StatsSink for ActionStats {
    fn record(&self, action: XdpAction, frame_len: usize) {
        let slot = action.code() as usize;
        self.packets[slot].fetch_add(1, Ordering::Relaxed);
        self.bytes[slot].fetch_add(frame_len as u64, Ordering::Relaxed);
    }
}

/// Counters copied out of an [`ActionStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    records: [StatsRecord; XDP_ACTION_MAX],
}

impl StatsSnapshot {
    pub fn get(&self, action: XdpAction) -> StatsRecord {
        self.records[action.code() as usize]
    }

    /// All actions in code order, including ones with zero counts.
    pub fn iter(&self) -> impl Iterator<Item = (XdpAction, StatsRecord)> + '_ {
        XdpAction::ALL.into_iter().map(|a| (a, self.get(a)))
    }

    pub fn total(&self) -> StatsRecord {
        let mut total = StatsRecord::default();
        for rec in &self.records {
            total.merge(rec);
        }
        total
    }
}
