//! Configuration type definitions
//!
//! The firmware build script deserializes `monitor.toml` into
//! [`MonitorConfig`] (with the `serde` feature) and bakes the result into the
//! binary as a constant. Nothing is persisted at runtime.

use crate::breathing::BreathingConfig;
use crate::clock::DEFAULT_TICK_HZ;
use crate::debounce::{DebounceConfig, ThresholdSelector, DEFAULT_THRESHOLDS_C, THRESHOLD_COUNT};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Startup blink sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct StartupConfig {
    /// On/off cycles of the status LED before the loop starts
    pub blinks: u8,
    /// Length of each on and each off phase
    pub blink_ms: u32,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            blinks: 2,
            blink_ms: 300,
        }
    }
}

/// Complete monitor configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct MonitorConfig {
    /// Selectable alarm thresholds (°C), ascending
    pub thresholds_c: [f32; THRESHOLD_COUNT],
    /// Index of the threshold active at boot
    pub initial_threshold: u8,
    /// Tick interrupt rate
    pub tick_hz: u32,
    /// Period of the `Temp:` telemetry line
    pub telemetry_interval_ms: u32,
    /// Cadence delay at the end of every loop iteration
    pub loop_period_ms: u32,
    pub breathing: BreathingConfig,
    pub debounce: DebounceConfig,
    pub startup: StartupConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            thresholds_c: DEFAULT_THRESHOLDS_C,
            initial_threshold: 1,
            tick_hz: DEFAULT_TICK_HZ,
            telemetry_interval_ms: 1000,
            loop_period_ms: 20,
            breathing: BreathingConfig::default(),
            debounce: DebounceConfig::default(),
            startup: StartupConfig::default(),
        }
    }
}

/// Invalid configuration value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A threshold is NaN or infinite
    ThresholdNotFinite,
    /// Thresholds must increase strictly from first to last
    ThresholdsNotAscending,
    /// Initial index past the end of the threshold table
    ThresholdIndexOutOfRange,
    /// Tick rate of zero
    ZeroTickRate,
    /// Telemetry, loop, step, or debounce interval of zero
    ZeroInterval,
    /// Breathing waveform with no steps or no PWM range
    EmptyWaveform,
    /// Settle delay not shorter than the debounce window
    SettleExceedsWindow,
}

impl ConfigError {
    /// Human-readable explanation, used by the build script
    pub const fn message(&self) -> &'static str {
        match self {
            ConfigError::ThresholdNotFinite => "thresholds_c must be finite numbers",
            ConfigError::ThresholdsNotAscending => "thresholds_c must be strictly ascending",
            ConfigError::ThresholdIndexOutOfRange => "initial_threshold must be 0, 1 or 2",
            ConfigError::ZeroTickRate => "tick_hz must be nonzero",
            ConfigError::ZeroInterval => "intervals and periods must be nonzero",
            ConfigError::EmptyWaveform => "breathing steps and pwm_period must be nonzero",
            ConfigError::SettleExceedsWindow => {
                "debounce settle_ms must be shorter than window_ms"
            }
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

impl MonitorConfig {
    /// Check every field for values the monitor cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thresholds_c.iter().any(|t| !t.is_finite()) {
            return Err(ConfigError::ThresholdNotFinite);
        }
        if self.thresholds_c.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::ThresholdsNotAscending);
        }
        if usize::from(self.initial_threshold) >= THRESHOLD_COUNT {
            return Err(ConfigError::ThresholdIndexOutOfRange);
        }
        if self.tick_hz == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        let intervals = [
            self.telemetry_interval_ms,
            self.loop_period_ms,
            self.breathing.step_interval_ms,
            self.debounce.window_ms,
            self.debounce.settle_ms,
            self.startup.blink_ms,
        ];
        if intervals.contains(&0) {
            return Err(ConfigError::ZeroInterval);
        }
        if self.breathing.steps == 0 || self.breathing.pwm_period == 0 {
            return Err(ConfigError::EmptyWaveform);
        }
        if self.debounce.settle_ms >= self.debounce.window_ms {
            return Err(ConfigError::SettleExceedsWindow);
        }
        Ok(())
    }

    /// Threshold selector positioned at the boot index
    pub fn threshold_selector(&self) -> ThresholdSelector {
        ThresholdSelector::new(self.thresholds_c, usize::from(self.initial_threshold))
    }
}
