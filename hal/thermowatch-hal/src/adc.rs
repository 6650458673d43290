//! Analog-to-digital converter abstraction

/// Failure of a single conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError {
    /// The converter did not signal end-of-conversion
    Timeout,
    /// The peripheral reported an overrun or similar fault
    Hardware,
}

/// One analog input channel
///
/// `read_raw` blocks until a fresh conversion is available.
pub trait AdcChannel {
    /// Full-scale value of the converter (4095 for 12-bit)
    const FULL_SCALE: u16;

    /// Perform one conversion and return the raw code
    fn read_raw(&mut self) -> Result<u16, AdcError>;
}
