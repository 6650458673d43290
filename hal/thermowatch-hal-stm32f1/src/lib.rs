//! STM32F1-specific HAL for the Thermowatch firmware
//!
//! This crate adapts `embassy-stm32` peripherals (blocking mode, no
//! executor, no time driver) to the `thermowatch-hal` traits and provides
//! the register-level bring-up the monitor needs:
//!
//! - Clock tree (8 MHz HSE to 72 MHz)
//! - SysTick as the tick interrupt source
//! - EXTI falling-edge arming for the button
//! - USART receive interrupt arming and byte fetch
//!
//! # Features
//!
//! - `defmt` - Enable debug formatting support

#![no_std]

pub mod adc;
pub mod exti;
pub mod gpio;
pub mod rcc;
pub mod systick;
pub mod uart;

pub use adc::BlockingAdc;
pub use gpio::{StmInput, StmOutput};
pub use uart::{SerialTx, UartBusError};
