//! Fixed-format text replies
//!
//! All lines are CRLF-terminated and use one decimal place.

use core::fmt::Write;
use heapless::String;

/// Longest formatted line
///
/// `New Threshold: ` plus `-f32::MAX` at one decimal (42 bytes) plus the
/// 5-byte `°C\r\n` tail is 62 bytes, so every `f32` fits.
pub const REPORT_CAPACITY: usize = 64;

/// Formatted report line
pub type ReportLine = String<REPORT_CAPACITY>;

/// Reply to any unrecognised command byte
pub const INVALID_INSTRUCTION: &str = "invalid instruction.\r\n";

fn format_celsius(label: &str, value: f32) -> ReportLine {
    let mut line = ReportLine::new();
    // Cannot overflow, see REPORT_CAPACITY
    let _ = write!(line, "{label}: {value:.1}°C\r\n");
    line
}

/// Periodic telemetry line, `Temp: 27.4°C`
pub fn temperature_report(celsius: f32) -> ReportLine {
    format_celsius("Temp", celsius)
}

/// Reply to a threshold query
pub fn threshold_report(celsius: f32) -> ReportLine {
    format_celsius("Threshold", celsius)
}

/// Notice emitted after a confirmed button press
pub fn new_threshold_notice(celsius: f32) -> ReportLine {
    format_celsius("New Threshold", celsius)
}
