//! Temperature sensor trait

/// Errors that can occur with temperature sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Reading pinned at the converter limits (sensor missing or shorted)
    OutOfRange,
    /// ADC conversion error
    ConversionError,
}

impl From<thermowatch_hal::AdcError> for SensorError {
    fn from(_: thermowatch_hal::AdcError) -> Self {
        SensorError::ConversionError
    }
}

/// Trait for temperature sensors
///
/// Implementations handle the specific sensor type and its transfer
/// function.
pub trait TemperatureSensor {
    /// Read the current temperature in degrees Celsius
    ///
    /// Blocks until a fresh conversion is ready. Takes `&mut self` because
    /// ADC reads require mutable access.
    fn read_celsius(&mut self) -> Result<f32, SensorError>;
}
