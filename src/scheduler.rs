//! Deferred work for the cooperative loop.
//!
//! Each unit of work has a fixed id and at most one pending deadline.
//! Scheduling an id that is already pending moves its deadline instead of
//! queueing a second run. The table is only touched from the cooperative
//! loop, so a cancel that happens before the deadline always wins.

use crate::config::Millis;

/// Units of work the badge defers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WorkId {
    /// Redraw the current screen.
    Redraw,
    /// The button has been held long enough.
    LongPress,
    /// Advance the LED chase.
    LedTick,
}

impl WorkId {
    pub const COUNT: usize = 3;

    /// All ids in priority order (earlier wins a deadline tie).
    pub const ALL: [WorkId; WorkId::COUNT] = [WorkId::Redraw, WorkId::LongPress, WorkId::LedTick];

    const fn index(self) -> usize {
        match self {
            WorkId::Redraw => 0,
            WorkId::LongPress => 1,
            WorkId::LedTick => 2,
        }
    }
}

/// One optional deadline per work id.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    deadlines: [Option<Millis>; WorkId::COUNT],
}

impl Scheduler {
    pub const fn new() -> Self {
        Self {
            deadlines: [None; WorkId::COUNT],
        }
    }

    /// Run `id` at `now + delay`, replacing any pending deadline.
    ///
    /// Returns `true` if a pending run was replaced.
    pub fn schedule(&mut self, id: WorkId, now: Millis, delay: Millis) -> bool {
        let slot = &mut self.deadlines[id.index()];
        let replaced = slot.is_some();
        *slot = Some(now.saturating_add(delay));
        trace!("sched: {} in {} ms", id, delay);
        replaced
    }

    /// Drop the pending run of `id`. Returns `true` if one was pending.
    pub fn cancel(&mut self, id: WorkId) -> bool {
        self.deadlines[id.index()].take().is_some()
    }

    pub fn is_pending(&self, id: WorkId) -> bool {
        self.deadlines[id.index()].is_some()
    }

    pub fn deadline(&self, id: WorkId) -> Option<Millis> {
        self.deadlines[id.index()]
    }

    /// Earliest pending deadline, if any work is pending.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.deadlines.iter().flatten().min().copied()
    }

    /// Remove and return the most overdue work whose deadline is `<= now`.
    pub fn take_due(&mut self, now: Millis) -> Option<WorkId> {
        let id = WorkId::ALL
            .into_iter()
            .filter_map(|id| self.deadline(id).map(|at| (at, id)))
            .filter(|&(at, _)| at <= now)
            .min_by_key(|&(at, id)| (at, id.index()))
            .map(|(_, id)| id)?;
        self.deadlines[id.index()] = None;
        Some(id)
    }
}
