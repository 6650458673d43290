//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator traits
//! defined in thermowatch-core:
//!
//! - Temperature sensors (LM35 on an ADC channel)
//! - Status indicator (GPIO LED, active-high or active-low)
//! - Alarm indicator (PWM LED over `embedded-hal`)

#![no_std]
#![deny(unsafe_code)]

pub mod indicator;
pub mod sensor;
