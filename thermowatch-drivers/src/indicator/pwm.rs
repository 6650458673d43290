//! PWM alarm LED

use core::convert::Infallible;

use embedded_hal::pwm::SetDutyCycle;
use thermowatch_core::traits::AlarmIndicator;

/// Alarm LED on one PWM channel
///
/// Duty values are given in `0..=period` (the breathing generator's range)
/// and scaled onto the channel's own resolution.
pub struct PwmAlarmLed<C> {
    channel: C,
    period: u16,
    duty: u16,
}

impl<C: SetDutyCycle<Error = Infallible>> PwmAlarmLed<C> {
    /// Wrap `channel`; the LED starts dark
    ///
    /// A `period` of zero is treated as 1.
    pub fn new(channel: C, period: u16) -> Self {
        let mut led = Self {
            channel,
            period: period.max(1),
            duty: 0,
        };
        led.set_duty(0);
        led
    }

    /// Last duty written, in `0..=period`
    pub fn duty(&self) -> u16 {
        self.duty
    }
}

impl<C: SetDutyCycle<Error = Infallible>> AlarmIndicator for PwmAlarmLed<C> {
    fn set_duty(&mut self, duty: u16) {
        let duty = duty.min(self.period);
        self.duty = duty;
        if let Err(never) = self.channel.set_duty_cycle_fraction(duty, self.period) {
            match never {}
        }
    }
}
