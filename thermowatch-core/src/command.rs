//! Single-byte serial commands
//!
//! There is no framing: every received byte is one complete command.

use portable_atomic::{AtomicBool, AtomicU8, Ordering};

/// Request for the active threshold
pub const QUERY_THRESHOLD: u8 = 0x01;

/// Decoded command byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Reply with the active threshold
    QueryThreshold,
    /// Anything else; answered with the invalid-instruction text
    Invalid(u8),
}

impl Command {
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            QUERY_THRESHOLD => Command::QueryThreshold,
            other => Command::Invalid(other),
        }
    }
}

impl From<u8> for Command {
    fn from(byte: u8) -> Self {
        Self::from_byte(byte)
    }
}

/// One-byte receive mailbox
///
/// Written by the receive interrupt, drained by the main loop. A byte that
/// arrives before the previous one was taken overwrites it.
pub struct SerialRxCell {
    byte: AtomicU8,
    ready: AtomicBool,
}

impl Default for SerialRxCell {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialRxCell {
    pub const fn new() -> Self {
        Self {
            byte: AtomicU8::new(0),
            ready: AtomicBool::new(false),
        }
    }

    /// Deposit a received byte (interrupt context)
    pub fn store(&self, byte: u8) {
        self.byte.store(byte, Ordering::Relaxed);
        // Publishes the byte written above
        self.ready.store(true, Ordering::Release);
    }

    /// Take the pending byte, if any, clearing the ready flag
    pub fn take(&self) -> Option<u8> {
        if self.ready.swap(false, Ordering::Acquire) {
            Some(self.byte.load(Ordering::Relaxed))
        } else {
            None
        }
    }

    /// Whether a byte is waiting
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}
