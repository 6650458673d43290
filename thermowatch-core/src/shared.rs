//! State shared between interrupt handlers and the main loop
//!
//! The firmware keeps one `static` instance. Interrupt handlers call the
//! `on_*` entry points; the main loop borrows the same instance through
//! [`crate::monitor::Monitor`].
//!
//! | Field | Written by | Read by |
//! |---|---|---|
//! | tick counter | tick IRQ | everyone |
//! | delay budget | main loop (arm), tick IRQ (count down) | main loop |
//! | button pending | edge IRQ (raise), main loop (clear) | main loop |
//! | button last trigger | edge IRQ | edge IRQ |
//! | serial byte | receive IRQ | main loop |
//! | serial ready | receive IRQ (raise), main loop (clear) | main loop |

use crate::clock::TickClock;
use crate::command::SerialRxCell;
use crate::debounce::EdgeLatch;

/// Interrupt-writable, loop-readable context
pub struct Shared {
    pub clock: TickClock,
    pub button: EdgeLatch,
    pub serial_rx: SerialRxCell,
}

impl Shared {
    pub const fn new(debounce_window_ms: u32) -> Self {
        Self {
            clock: TickClock::new(),
            button: EdgeLatch::new(debounce_window_ms),
            serial_rx: SerialRxCell::new(),
        }
    }

    /// Periodic timer interrupt
    #[inline]
    pub fn on_tick(&self) {
        self.clock.on_tick();
    }

    /// Button falling-edge interrupt; true if the edge was accepted
    pub fn on_button_edge(&self) -> bool {
        self.button.on_falling_edge(self.clock.now())
    }

    /// Serial receive interrupt
    pub fn on_serial_byte(&self, byte: u8) {
        self.serial_rx.store(byte);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SHARED: Shared = Shared::new(200);

    #[test]
    fn test_usable_as_static() {
        SHARED.on_serial_byte(0x01);
        assert_eq!(SHARED.serial_rx.take(), Some(0x01));
    }

    #[test]
    fn test_button_edge_uses_clock_time() {
        let shared = Shared::new(200);
        // At boot the last trigger and the clock are both 0
        assert!(!shared.on_button_edge());
        for _ in 0..201 {
            shared.on_tick();
        }
        assert!(shared.on_button_edge());
        assert_eq!(shared.button.last_trigger(), 201);
        assert!(!shared.on_button_edge());
    }
}
