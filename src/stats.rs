//! Per-peer activity statistics.
//!
//! A fixed table of `STAT_COUNT` slots filled in arrival order. A slot whose
//! address is `0` is empty; once a peer occupies a slot it keeps it for the
//! lifetime of the device (no eviction, no compaction). New peers arriving
//! after the table is full are dropped.
//!
//! Because `0` marks an empty slot, mesh address `0x0000` (the unassigned
//! address) can never be tracked.

use crate::config::{PEER_NAME_LEN, STAT_COUNT, TTL_MAX};
use crate::text::truncated;
use heapless::String;

/// Counters for one peer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeerStat {
    /// Mesh unicast address, `0` for an empty slot.
    pub address: u16,
    /// Last name announced by the peer.
    pub name: String<PEER_NAME_LEN>,
    /// Smallest hop count seen in a heartbeat.
    pub min_hops: u8,
    /// Largest hop count seen in a heartbeat.
    pub max_hops: u8,
    /// Hello messages received (saturating).
    pub hello_count: u16,
    /// Heartbeats received (saturating).
    pub heartbeat_count: u16,
}

impl PeerStat {
    const EMPTY: PeerStat = PeerStat {
        address: 0,
        name: String::new(),
        min_hops: TTL_MAX,
        max_hops: 0,
        hello_count: 0,
        heartbeat_count: 0,
    };

    pub fn is_occupied(&self) -> bool {
        self.address != 0
    }

    fn set_name(&mut self, name: &str) {
        self.name = truncated(name.chars());
    }

    fn widen_hops(&mut self, hops: u8) {
        if self.heartbeat_count == 0 {
            self.min_hops = hops;
            self.max_hops = hops;
        } else if hops < self.min_hops {
            self.min_hops = hops;
        } else if hops > self.max_hops {
            self.max_hops = hops;
        }
    }
}

/// Fixed-capacity peer table.
pub struct PeerTable {
    slots: [PeerStat; STAT_COUNT],
    count: usize,
}

impl Default for PeerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PeerTable {
    /// Create an empty table.
    pub const fn new() -> Self {
        Self {
            slots: [PeerStat::EMPTY; STAT_COUNT],
            count: 0,
        }
    }

    /// Record a hello from `address`.
    ///
    /// Returns the slot that changed, or `None` when nothing was counted:
    /// address `0`, table full, or the hello counter already saturated (the
    /// name is still refreshed in that case).
    pub fn record_hello(&mut self, address: u16, name: &str) -> Option<usize> {
        let (index, inserted) = self.slot_for(address)?;
        let stat = &mut self.slots[index];
        stat.set_name(name);

        if inserted {
            stat.hello_count = 1;
            return Some(index);
        }

        match stat.hello_count.checked_add(1) {
            Some(count) => {
                stat.hello_count = count;
                Some(index)
            }
            None => {
                debug!("stats: hello counter saturated for {:#x}", address);
                None
            }
        }
    }

    /// Record a heartbeat from `address` that travelled `hops` hops.
    ///
    /// Widens the peer's hop range by at most one bound and bumps the
    /// heartbeat counter. Returns `None` for address `0`, a full table, or a
    /// saturated counter (the hop range is still widened then).
    pub fn record_heartbeat(&mut self, address: u16, hops: u8) -> Option<usize> {
        let (index, _) = self.slot_for(address)?;
        let stat = &mut self.slots[index];
        stat.widen_hops(hops);

        match stat.heartbeat_count.checked_add(1) {
            Some(count) => {
                stat.heartbeat_count = count;
                Some(index)
            }
            None => {
                debug!("stats: heartbeat counter saturated for {:#x}", address);
                None
            }
        }
    }

    /// Distinct peers seen so far.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == STAT_COUNT
    }

    /// Occupied slot at `index`.
    pub fn get(&self, index: usize) -> Option<&PeerStat> {
        self.slots.get(index).filter(|s| s.is_occupied())
    }

    /// Stats for `address`, if the peer has been seen.
    pub fn find(&self, address: u16) -> Option<&PeerStat> {
        if address == 0 {
            return None;
        }
        self.iter().map(|(_, s)| s).find(|s| s.address == address)
    }

    /// Occupied slots with their index, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &PeerStat)> {
        self.slots[..self.count].iter().enumerate()
    }

    /// Locate the slot for `address`, claiming the first empty one if the
    /// peer is new. The flag is `true` when the slot was just claimed.
    fn slot_for(&mut self, address: u16) -> Option<(usize, bool)> {
        if address == 0 {
            return None;
        }

        if let Some(index) = self.slots[..self.count]
            .iter()
            .position(|s| s.address == address)
        {
            return Some((index, false));
        }

        if self.is_full() {
            warn!("stats: table full, dropping peer {:#x}", address);
            return None;
        }

        let index = self.count;
        self.slots[index] = PeerStat {
            address,
            ..PeerStat::EMPTY
        };
        self.count += 1;
        Some((index, true))
    }
}
