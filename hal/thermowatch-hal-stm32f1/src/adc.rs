//! Blocking ADC channel for STM32F1
//!
//! embassy's F1 ADC driver only exposes an async `read`. There is no
//! executor in this firmware, so the conversion future is driven to
//! completion in place.

use embassy_futures::block_on;
use embassy_stm32::adc::{Adc, AdcChannel as EmbassyAdcChannel, Instance, SampleTime};
use thermowatch_hal::{AdcChannel, AdcError};

/// One regular channel on a dedicated converter
pub struct BlockingAdc<'d, T: Instance, C> {
    adc: Adc<'d, T>,
    channel: C,
}

impl<'d, T: Instance, C: EmbassyAdcChannel<T>> BlockingAdc<'d, T, C> {
    /// Wrap `adc` and `channel`, using 55.5-cycle sampling
    ///
    /// The long sample time suits the LM35's output impedance.
    pub fn new(mut adc: Adc<'d, T>, channel: C) -> Self {
        adc.set_sample_time(SampleTime::CYCLES55_5);
        Self { adc, channel }
    }
}

impl<T: Instance, C: EmbassyAdcChannel<T>> AdcChannel for BlockingAdc<'_, T, C> {
    const FULL_SCALE: u16 = 4095;

    fn read_raw(&mut self) -> Result<u16, AdcError> {
        let raw = block_on(self.adc.read(&mut self.channel));
        if raw > Self::FULL_SCALE {
            return Err(AdcError::Hardware);
        }
        Ok(raw)
    }
}
