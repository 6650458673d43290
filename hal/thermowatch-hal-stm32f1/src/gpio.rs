//! GPIO wrappers for STM32F1
//!
//! Thin newtypes so embassy pins satisfy the `thermowatch-hal` traits.

use embassy_stm32::gpio::{Input, Output};
use thermowatch_hal::{InputPin, OutputPin};

/// Push-pull output pin
pub struct StmOutput<'d>(pub Output<'d>);

impl OutputPin for StmOutput<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Digital input pin
pub struct StmInput<'d>(pub Input<'d>);

impl InputPin for StmInput<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}
