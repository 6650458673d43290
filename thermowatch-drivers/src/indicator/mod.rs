//! Status and alarm indicator drivers

pub mod gpio;
pub mod pwm;

pub use gpio::GpioStatusLed;
pub use pwm::PwmAlarmLed;
