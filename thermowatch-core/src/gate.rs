//! Non-blocking interval gate
//!
//! Each periodic task owns one gate. Polling is cheap and never blocks, so a
//! single loop can multiplex any number of independent periods.

use crate::clock::{elapsed, Ticks};

/// "Has at least `interval` ticks passed since the last firing?"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntervalGate {
    interval: u32,
    last_fired: Ticks,
}

impl IntervalGate {
    /// Gate whose reference timestamp is tick zero
    pub const fn new(interval: u32) -> Self {
        Self::starting_at(interval, 0)
    }

    /// Gate whose reference timestamp is `now`
    pub const fn starting_at(interval: u32, now: Ticks) -> Self {
        Self {
            interval,
            last_fired: now,
        }
    }

    /// Configured interval in ticks
    pub const fn interval(&self) -> u32 {
        self.interval
    }

    /// Timestamp of the last firing
    pub const fn last_fired(&self) -> Ticks {
        self.last_fired
    }

    /// Check without consuming
    pub fn is_due(&self, now: Ticks) -> bool {
        elapsed(now, self.last_fired) >= self.interval
    }

    /// Fire if due, moving the reference timestamp to `now`
    pub fn poll(&mut self, now: Ticks) -> bool {
        if self.is_due(now) {
            self.last_fired = now;
            true
        } else {
            false
        }
    }

    /// Move the reference timestamp without firing
    pub fn restart(&mut self, now: Ticks) {
        self.last_fired = now;
    }
}
