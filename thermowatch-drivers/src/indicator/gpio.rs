//! GPIO status LED
//!
//! Simple on/off indicator on a push-pull pin.

use thermowatch_core::traits::StatusIndicator;
use thermowatch_hal::OutputPin;

/// GPIO status LED
///
/// The pin can be configured as active-high (default) or active-low, as on
/// boards where the LED sinks into the MCU.
pub struct GpioStatusLed<P> {
    pin: P,
    /// If true, LED ON = pin LOW
    inverted: bool,
}

impl<P: OutputPin> GpioStatusLed<P> {
    /// Create a new status LED; it starts dark
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, the LED is lit when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut led = Self { pin, inverted };
        led.set_status(false);
        led
    }

    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }
}

impl<P: OutputPin> StatusIndicator for GpioStatusLed<P> {
    fn set_status(&mut self, on: bool) {
        self.pin.set_state(on != self.inverted);
    }
}
