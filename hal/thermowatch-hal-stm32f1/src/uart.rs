//! USART driver for STM32F1
//!
//! Transmit goes through embassy's blocking driver. Receive is interrupt
//! driven: the handler reads the data register directly and hands the byte
//! to the shared mailbox, so no embassy receive path is involved.

use embassy_stm32::interrupt::{self, InterruptExt};
use embassy_stm32::mode::Blocking;
use embassy_stm32::pac;
use embassy_stm32::usart::{Config, Error as UsartError, UartTx as EmbassyUartTx};
use thermowatch_hal::uart::{UartConfig, UartTx};

/// Error from UART operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartBusError {
    /// Framing error
    Framing,
    /// Noise error
    Noise,
    /// Overrun error
    Overrun,
    /// Parity error
    Parity,
    /// Other error
    Other,
}

impl From<UsartError> for UartBusError {
    fn from(e: UsartError) -> Self {
        match e {
            UsartError::Framing => UartBusError::Framing,
            UsartError::Noise => UartBusError::Noise,
            UsartError::Overrun => UartBusError::Overrun,
            UsartError::Parity => UartBusError::Parity,
            _ => UartBusError::Other,
        }
    }
}

/// Embassy USART configuration for `config` (8N1)
pub fn usart_config(config: &UartConfig) -> Config {
    let mut usart = Config::default();
    usart.baudrate = config.baudrate;
    usart
}

/// Blocking transmitter
pub struct SerialTx<'d> {
    tx: EmbassyUartTx<'d, Blocking>,
}

impl<'d> SerialTx<'d> {
    pub fn new(tx: EmbassyUartTx<'d, Blocking>) -> Self {
        Self { tx }
    }
}

impl UartTx for SerialTx<'_> {
    type Error = UartBusError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.tx.blocking_write(data)?;
        // Waits for transmission complete, not just an empty data register
        self.tx.blocking_flush()?;
        Ok(())
    }
}

/// Enable the USART1 receive-not-empty interrupt
///
/// Call after the USART has been configured.
pub fn enable_usart1_rx_interrupt() {
    pac::USART1.cr1().modify(|w| w.set_rxneie(true));
    interrupt::USART1.unpend();
    // SAFETY: the firmware defines the USART1 handler before calling this
    unsafe { interrupt::USART1.enable() };
}

/// Fetch the received byte, if any (USART1 interrupt context)
///
/// Reading the data register clears both RXNE and a pending overrun, so an
/// overrun never leaves the interrupt stuck.
pub fn usart1_take_byte() -> Option<u8> {
    let sr = pac::USART1.sr().read();
    if sr.rxne() || sr.ore() {
        Some(pac::USART1.dr().read().dr() as u8)
    } else {
        None
    }
}
