//! Interrupt-driven millisecond tick clock
//!
//! The counter is incremented by exactly one per periodic interrupt and is
//! free to wrap. Every consumer measures time as a wrapping difference of two
//! snapshots, so a wrap between the snapshots is harmless as long as the real
//! interval is shorter than 2^32 ticks (about 49 days at 1 kHz).

use portable_atomic::{AtomicU32, Ordering};

/// Snapshot of the tick counter
pub type Ticks = u32;

/// Reference tick rate (one tick per millisecond)
pub const DEFAULT_TICK_HZ: u32 = 1_000;

/// Largest value the 24-bit SysTick reload register accepts
pub const MAX_RELOAD: u32 = 0x00FF_FFFF;

/// Tick source configuration failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// A tick rate of zero was requested
    ZeroTickRate,
    /// The core clock cannot be divided down to the tick rate in 24 bits
    ReloadOutOfRange,
}

/// Ticks elapsed from `since` to `now`, correct across counter wraparound
#[inline]
pub const fn elapsed(now: Ticks, since: Ticks) -> u32 {
    now.wrapping_sub(since)
}

/// SysTick reload value producing `tick_hz` interrupts from `core_hz`
///
/// 72 MHz / 1 kHz gives 71 999.
pub const fn reload_value(core_hz: u32, tick_hz: u32) -> Result<u32, ClockError> {
    if tick_hz == 0 {
        return Err(ClockError::ZeroTickRate);
    }
    let divider = core_hz / tick_hz;
    if divider == 0 || divider - 1 > MAX_RELOAD {
        return Err(ClockError::ReloadOutOfRange);
    }
    Ok(divider - 1)
}

/// Monotonic tick counter plus the countdown used by the blocking delay
///
/// Single writer per field: `ticks` is written only by [`TickClock::on_tick`]
/// (interrupt context). `delay_budget` is armed by the main loop while no
/// delay is outstanding and counted down by the interrupt.
pub struct TickClock {
    ticks: AtomicU32,
    delay_budget: AtomicU32,
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickClock {
    /// Create a clock at tick zero with no delay outstanding
    pub const fn new() -> Self {
        Self {
            ticks: AtomicU32::new(0),
            delay_budget: AtomicU32::new(0),
        }
    }

    /// Advance the clock by one tick
    ///
    /// Called from the periodic timer interrupt. Never blocks.
    #[inline]
    pub fn on_tick(&self) {
        self.ticks.fetch_add(1, Ordering::Release);
        let _ = self
            .delay_budget
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |left| left.checked_sub(1));
    }

    /// Current tick value; safe from any context
    #[inline]
    pub fn now(&self) -> Ticks {
        self.ticks.load(Ordering::Acquire)
    }

    /// Ticks elapsed since `since`
    #[inline]
    pub fn elapsed_since(&self, since: Ticks) -> u32 {
        elapsed(self.now(), since)
    }

    /// Start a delay countdown of `ticks`
    ///
    /// Only one countdown may be outstanding; arming again overwrites it.
    pub fn arm_delay(&self, ticks: u32) {
        self.delay_budget.store(ticks, Ordering::Release);
    }

    /// Ticks left on the outstanding delay (0 when idle)
    #[inline]
    pub fn delay_remaining(&self) -> u32 {
        self.delay_budget.load(Ordering::Acquire)
    }

    /// Zero the counter and drop any outstanding delay
    ///
    /// Called once during bring-up, before the tick interrupt is enabled.
    pub fn reset(&self) {
        self.ticks.store(0, Ordering::Release);
        self.delay_budget.store(0, Ordering::Release);
    }

    #[cfg(test)]
    pub(crate) fn preset(&self, ticks: Ticks) {
        self.ticks.store(ticks, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_on_tick_increments_by_one() {
        let clock = TickClock::new();
        assert_eq!(clock.now(), 0);
        clock.on_tick();
        clock.on_tick();
        assert_eq!(clock.now(), 2);
    }

    #[test]
    fn test_counter_wraps_instead_of_saturating() {
        let clock = TickClock::new();
        clock.preset(u32::MAX);
        clock.on_tick();
        assert_eq!(clock.now(), 0);
    }

    #[test]
    fn test_elapsed_across_wraparound() {
        let before = u32::MAX - 4;
        let after = before.wrapping_add(10);
        assert_eq!(after, 5);
        assert_eq!(elapsed(after, before), 10);
    }

    #[test]
    fn test_delay_budget_counts_down_and_stops_at_zero() {
        let clock = TickClock::new();
        clock.arm_delay(2);
        clock.on_tick();
        assert_eq!(clock.delay_remaining(), 1);
        clock.on_tick();
        assert_eq!(clock.delay_remaining(), 0);
        clock.on_tick();
        assert_eq!(clock.delay_remaining(), 0);
        assert_eq!(clock.now(), 3);
    }

    #[test]
    fn test_reset_clears_counter_and_budget() {
        let clock = TickClock::new();
        clock.preset(1234);
        clock.arm_delay(50);
        clock.reset();
        assert_eq!(clock.now(), 0);
        assert_eq!(clock.delay_remaining(), 0);
    }

    #[test]
    fn test_reload_value_reference_design() {
        assert_eq!(reload_value(72_000_000, DEFAULT_TICK_HZ), Ok(71_999));
        assert_eq!(reload_value(8_000_000, DEFAULT_TICK_HZ), Ok(7_999));
    }

    #[test]
    fn test_reload_value_rejects_unreachable_rates() {
        assert_eq!(reload_value(72_000_000, 0), Err(ClockError::ZeroTickRate));
        // 72 MHz / 1 Hz needs a 72M reload, wider than 24 bits
        assert_eq!(reload_value(72_000_000, 1), Err(ClockError::ReloadOutOfRange));
        // Tick faster than the core clock
        assert_eq!(reload_value(1_000, 2_000), Err(ClockError::ReloadOutOfRange));
    }

    proptest! {
        #[test]
        fn prop_elapsed_matches_ticks_advanced(start in any::<u32>(), advanced in any::<u32>()) {
            let now = start.wrapping_add(advanced);
            prop_assert_eq!(elapsed(now, start), advanced);
        }

        #[test]
        fn prop_clock_elapsed_survives_wrap(start in (u32::MAX - 500)..=u32::MAX, steps in 0u32..1_000) {
            let clock = TickClock::new();
            clock.preset(start);
            let reference = clock.now();
            for _ in 0..steps {
                clock.on_tick();
            }
            prop_assert_eq!(clock.elapsed_since(reference), steps);
        }
    }
}
