//! Blocking delay primitive
//!
//! Main-loop only. The countdown is driven by the tick interrupt, so calling
//! this from an interrupt handler (or with the tick interrupt masked) never
//! returns.

use crate::clock::TickClock;

/// Busy-wait delay measured in clock ticks
pub trait BlockingDelay {
    /// Block for at least `ms` ticks
    fn delay_ms(&mut self, ms: u32);
}

/// Delay that spins on the shared clock's countdown
pub struct TickDelay<'a> {
    clock: &'a TickClock,
}

impl<'a> TickDelay<'a> {
    /// Create a delay bound to `clock`
    pub const fn new(clock: &'a TickClock) -> Self {
        Self { clock }
    }
}

impl BlockingDelay for TickDelay<'_> {
    fn delay_ms(&mut self, ms: u32) {
        if ms == 0 {
            return;
        }
        // The call lands somewhere inside a tick period, so one extra tick
        // keeps the wait from coming up short.
        self.clock.arm_delay(ms.saturating_add(1));
        while self.clock.delay_remaining() > 0 {
            core::hint::spin_loop();
        }
    }
}

impl<D: BlockingDelay + ?Sized> BlockingDelay for &mut D {
    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms);
    }
}
