//! LM35 linear temperature sensor
//!
//! The LM35 outputs 10 mV per °C, so the conversion is a single scale:
//! `celsius = raw * vref_mv / full_scale / 10`.

use thermowatch_core::traits::{SensorError, TemperatureSensor};
use thermowatch_hal::AdcChannel;

/// Reference voltage of the reference board (mV)
pub const DEFAULT_VREF_MV: u16 = 3300;

/// LM35 on one ADC channel
pub struct Lm35Sensor<A> {
    adc: A,
    /// ADC reference voltage in mV
    vref_mv: u16,
}

impl<A: AdcChannel> Lm35Sensor<A> {
    /// Create a new LM35 sensor
    ///
    /// # Arguments
    /// - `adc`: ADC channel wired to the sensor output
    /// - `vref_mv`: Reference voltage in millivolts (typically 3300)
    pub fn new(adc: A, vref_mv: u16) -> Self {
        Self { adc, vref_mv }
    }

    /// Convert a raw conversion result to °C
    ///
    /// A code at full scale means the input is saturated (or floating high),
    /// so the real temperature is unknown.
    pub fn raw_to_celsius(&self, raw: u16) -> Result<f32, SensorError> {
        if raw >= A::FULL_SCALE {
            return Err(SensorError::OutOfRange);
        }
        let millivolts = f32::from(raw) * f32::from(self.vref_mv) / f32::from(A::FULL_SCALE);
        Ok(millivolts / 10.0)
    }
}

impl<A: AdcChannel> TemperatureSensor for Lm35Sensor<A> {
    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        let raw = self.adc.read_raw()?;
        self.raw_to_celsius(raw)
    }
}
