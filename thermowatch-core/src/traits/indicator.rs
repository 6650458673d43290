//! Status and alarm output traits

/// Binary status indicator (normal / not normal)
pub trait StatusIndicator {
    /// Drive the indicator on or off
    fn set_status(&mut self, on: bool);
}

/// Dimmable alarm indicator
///
/// Receives the breathing generator's output verbatim.
pub trait AlarmIndicator {
    /// Set brightness in `0..=pwm_period`
    fn set_duty(&mut self, duty: u16);
}
