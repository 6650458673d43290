//! Thermowatch Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the monitor core
//! consumes. Chip-specific crates implement them over real peripherals and
//! tests implement them over plain structs.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  thermowatch-firmware (main loop, IRQs) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  thermowatch-core / thermowatch-drivers │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  thermowatch-hal (this crate - traits)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  thermowatch-hal-stm32f1                │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`uart::UartTx`] - Blocking serial transmit
//! - [`adc::AdcChannel`] - Raw analog conversions

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use adc::{AdcChannel, AdcError};
pub use gpio::{InputPin, OutputPin};
pub use uart::UartTx;
