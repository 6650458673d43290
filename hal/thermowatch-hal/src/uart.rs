//! UART serial communication abstractions
//!
//! Only the transmit direction is a trait: received bytes arrive through the
//! receive interrupt and land in the shared one-byte mailbox owned by the
//! monitor core.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks byte by byte until every byte has been shifted out (transmit
    /// register empty, then transmission complete) or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

/// UART configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self { baudrate: 9600 }
    }
}
