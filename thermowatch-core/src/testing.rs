//! Host-side stand-ins for interrupts and peripherals

use core::cell::Cell;

use heapless::Vec;
use thermowatch_hal::{InputPin, UartTx};

use crate::clock::TickClock;
use crate::delay::BlockingDelay;
use crate::traits::{AlarmIndicator, SensorError, StatusIndicator, TemperatureSensor};

/// Delay that fires the tick interrupt itself, one tick at a time
///
/// Runs the same `ms + 1` ticks as [`TickDelay`](crate::delay::TickDelay),
/// so tick counts in tests match the firmware's cadence. The hook sees the
/// 1-based tick count within the current delay, which lets a test change an
/// input level part way through a settle delay.
pub struct SimDelay<'a, F = fn(u32)> {
    clock: &'a TickClock,
    hook: F,
}

fn no_hook(_: u32) {}

impl<'a> SimDelay<'a> {
    pub fn new(clock: &'a TickClock) -> Self {
        Self {
            clock,
            hook: no_hook,
        }
    }
}

impl<'a, F: FnMut(u32)> SimDelay<'a, F> {
    pub fn on_tick<G: FnMut(u32)>(self, hook: G) -> SimDelay<'a, G> {
        SimDelay {
            clock: self.clock,
            hook,
        }
    }
}

impl<F: FnMut(u32)> BlockingDelay for SimDelay<'_, F> {
    fn delay_ms(&mut self, ms: u32) {
        if ms == 0 {
            return;
        }
        for n in 1..=ms.saturating_add(1) {
            self.clock.on_tick();
            (self.hook)(n);
        }
    }
}

/// Active-low button line whose level the test controls
pub struct ScriptedLine {
    asserted: Cell<bool>,
}

impl ScriptedLine {
    pub fn released() -> Self {
        Self {
            asserted: Cell::new(false),
        }
    }

    pub fn set_asserted(&self, pressed: bool) {
        self.asserted.set(pressed);
    }
}

impl InputPin for ScriptedLine {
    fn is_high(&self) -> bool {
        !self.asserted.get()
    }
}

pub struct MockSensor {
    pub next: Result<f32, SensorError>,
}

impl MockSensor {
    pub fn reading(celsius: f32) -> Self {
        Self {
            next: Ok(celsius),
        }
    }
}

impl TemperatureSensor for MockSensor {
    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        self.next
    }
}

#[derive(Default)]
pub struct MockStatusLed {
    pub on: bool,
    pub history: Vec<bool, 64>,
}

impl StatusIndicator for MockStatusLed {
    fn set_status(&mut self, on: bool) {
        self.on = on;
        // Only the startup sequence tests read the history
        let _ = self.history.push(on);
    }
}

#[derive(Default)]
pub struct MockAlarmLed {
    pub duty: u16,
    pub peak: u16,
}

impl AlarmIndicator for MockAlarmLed {
    fn set_duty(&mut self, duty: u16) {
        self.duty = duty;
        self.peak = self.peak.max(duty);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineDown;

/// Serial sink that captures everything written to it
#[derive(Default)]
pub struct RecordingSerial {
    sent: Vec<u8, 1024>,
    pub fail: bool,
}

impl RecordingSerial {
    pub fn text(&self) -> &str {
        core::str::from_utf8(&self.sent).expect("replies are UTF-8")
    }

    pub fn clear(&mut self) {
        self.sent.clear();
    }
}

impl UartTx for RecordingSerial {
    type Error = LineDown;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(LineDown);
        }
        self.sent.extend_from_slice(data).map_err(|_| LineDown)
    }
}
