//! Collaborator traits
//!
//! These traits define the interface between the dispatch loop and the
//! concrete sensor and indicator drivers.

pub mod indicator;
pub mod sensor;

pub use indicator::{AlarmIndicator, StatusIndicator};
pub use sensor::{SensorError, TemperatureSensor};
