//! Board-agnostic core logic for the temperature monitor firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Tick clock and the shared interrupt context
//! - Blocking delay and non-blocking interval gates
//! - Breathing waveform generator for the alarm LED
//! - Debounced button edge detection and threshold selection
//! - Serial command decoding and report formatting
//! - The cooperative dispatch loop tying them together
//! - Configuration type definitions
//!
//! Interrupt handlers only ever touch [`shared::Shared`]; everything else
//! runs in the main loop.

#![no_std]
#![deny(unsafe_code)]

pub mod breathing;
pub mod clock;
pub mod command;
pub mod config;
pub mod debounce;
pub mod delay;
pub mod gate;
pub mod monitor;
pub mod report;
pub mod shared;
pub mod traits;

#[cfg(test)]
mod testing;
