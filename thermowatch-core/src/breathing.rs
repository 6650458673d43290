//! Breathing waveform generator
//!
//! A triangular brightness ramp for the alarm LED. The step counter moves
//! one position per step interval, up from 0 to `steps` and back down, and
//! the duty cycle is `step * pwm_period / steps`.
//!
//! The generator moves at most one step per [`BreathingGenerator::update`]
//! call. The monitor calls it once per loop iteration, and with the
//! reference values (20 ms loop period plus one tick of delay slack, 10 ms
//! step interval) every iteration is due. A half cycle therefore takes 50
//! iterations, about 1.05 s, and a full breath about 2.1 s.
//!
//! The generator is a pure function of the timestamps it is fed, so it can
//! be driven with synthetic tick sequences.

use crate::clock::Ticks;
use crate::gate::IntervalGate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Steps per half cycle in the reference design
pub const DEFAULT_STEPS: u16 = 50;

/// PWM compare range in the reference design
pub const DEFAULT_PWM_PERIOD: u16 = 1000;

/// Ticks between steps in the reference design
pub const DEFAULT_STEP_INTERVAL_MS: u32 = 10;

/// Waveform shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct BreathingConfig {
    /// Steps from dark to full brightness
    pub steps: u16,
    /// Duty value meaning "fully on"
    pub pwm_period: u16,
    /// Ticks between steps
    pub step_interval_ms: u32,
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
            pwm_period: DEFAULT_PWM_PERIOD,
            step_interval_ms: DEFAULT_STEP_INTERVAL_MS,
        }
    }
}

/// Ramp direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Rising,
    Falling,
}

/// Breathing LED state machine
#[derive(Debug, Clone)]
pub struct BreathingGenerator {
    config: BreathingConfig,
    enabled: bool,
    /// Always within `0..=config.steps`
    step: u16,
    direction: Direction,
    duty: u16,
    gate: IntervalGate,
}

impl BreathingGenerator {
    /// Create a disabled generator at the bottom of the waveform
    pub fn new(config: BreathingConfig) -> Self {
        Self {
            gate: IntervalGate::new(config.step_interval_ms),
            config,
            enabled: false,
            step: 0,
            direction: Direction::Rising,
            duty: 0,
        }
    }

    /// Waveform configuration
    pub fn config(&self) -> &BreathingConfig {
        &self.config
    }

    /// Whether the ramp is running
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current step position
    pub fn step(&self) -> u16 {
        self.step
    }

    /// Current ramp direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Current output duty in `0..=pwm_period`
    pub fn duty(&self) -> u16 {
        self.duty
    }

    /// Start or stop the ramp
    ///
    /// Enabling from off restarts at the bottom of the waveform. Disabling
    /// forces the output to 0 and resets the ramp, so the next enable never
    /// resumes mid-cycle. Enabling while already on changes nothing.
    ///
    /// Returns true when the enabled state changed.
    pub fn enable(&mut self, on: bool) -> bool {
        if on == self.enabled {
            return false;
        }
        self.rewind();
        self.enabled = on;
        true
    }

    /// Advance by at most one step if the step interval has elapsed
    ///
    /// Returns the duty to forward to the PWM sink. A disabled generator
    /// always yields 0.
    pub fn update(&mut self, now: Ticks) -> u16 {
        if !self.enabled {
            self.duty = 0;
            return 0;
        }
        if self.gate.poll(now) {
            self.advance();
        }
        self.duty
    }

    fn advance(&mut self) {
        let steps = self.config.steps;
        match self.direction {
            Direction::Rising => {
                self.step = self.step.saturating_add(1);
                if self.step >= steps {
                    self.step = steps;
                    self.direction = Direction::Falling;
                }
            }
            Direction::Falling => {
                self.step = self.step.saturating_sub(1);
                if self.step == 0 {
                    self.direction = Direction::Rising;
                }
            }
        }
        self.duty = self.duty_for(self.step);
    }

    fn duty_for(&self, step: u16) -> u16 {
        if self.config.steps == 0 {
            return 0;
        }
        let period = u32::from(self.config.pwm_period);
        let duty = u32::from(step) * period / u32::from(self.config.steps);
        duty.min(period) as u16
    }

    fn rewind(&mut self) {
        self.step = 0;
        self.direction = Direction::Rising;
        self.duty = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: u32 = DEFAULT_STEP_INTERVAL_MS;
    const STEPS: u32 = DEFAULT_STEPS as u32;
    const PERIOD: u16 = DEFAULT_PWM_PERIOD;

    fn enabled_generator() -> BreathingGenerator {
        let mut gen = BreathingGenerator::new(BreathingConfig::default());
        assert!(gen.enable(true));
        gen
    }

    /// Feed `count` step intervals starting after `start`, collecting duties
    fn feed(gen: &mut BreathingGenerator, start: Ticks, count: u32) -> ([u16; 128], Ticks) {
        let mut duties = [0u16; 128];
        let mut now = start;
        for slot in duties.iter_mut().take(count as usize) {
            now = now.wrapping_add(INTERVAL);
            *slot = gen.update(now);
        }
        (duties, now)
    }

    #[test]
    fn test_starts_disabled_at_bottom() {
        let gen = BreathingGenerator::new(BreathingConfig::default());
        assert!(!gen.is_enabled());
        assert_eq!(gen.step(), 0);
        assert_eq!(gen.direction(), Direction::Rising);
        assert_eq!(gen.duty(), 0);
    }

    #[test]
    fn test_disabled_output_is_zero_whatever_the_time() {
        let mut gen = BreathingGenerator::new(BreathingConfig::default());
        for now in (0..1000).step_by(7) {
            assert_eq!(gen.update(now), 0);
        }
        assert_eq!(gen.step(), 0);
    }

    #[test]
    fn test_rise_reaches_period_after_steps_intervals() {
        let mut gen = enabled_generator();
        let (duties, _) = feed(&mut gen, 0, STEPS);
        let rise = &duties[..STEPS as usize];

        assert!(rise.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(rise[STEPS as usize - 1], PERIOD);
        assert_eq!(gen.step(), DEFAULT_STEPS);
        assert_eq!(gen.direction(), Direction::Falling);
    }

    #[test]
    fn test_fall_follows_rise_and_returns_to_zero() {
        let mut gen = enabled_generator();
        let (_, now) = feed(&mut gen, 0, STEPS);
        let (duties, _) = feed(&mut gen, now, STEPS);
        let fall = &duties[..STEPS as usize];

        assert!(fall[0] < PERIOD);
        assert!(fall.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(fall[STEPS as usize - 1], 0);
        assert_eq!(gen.step(), 0);
        assert_eq!(gen.direction(), Direction::Rising);
    }

    #[test]
    fn test_full_cycle_is_two_times_steps_intervals() {
        let mut gen = enabled_generator();
        let (_, now) = feed(&mut gen, 0, 2 * STEPS);
        let state_after_cycle = (gen.step(), gen.direction(), gen.duty());
        assert_eq!(state_after_cycle, (0, Direction::Rising, 0));

        // And the next cycle repeats the first one
        let (first_again, _) = feed(&mut gen, now, 1);
        assert_eq!(first_again[0], PERIOD / DEFAULT_STEPS);
    }

    #[test]
    fn test_step_only_once_per_interval() {
        let mut gen = enabled_generator();
        assert_eq!(gen.update(INTERVAL), PERIOD / DEFAULT_STEPS);
        for now in INTERVAL..(2 * INTERVAL) {
            gen.update(now);
        }
        assert_eq!(gen.step(), 1);
        gen.update(2 * INTERVAL);
        assert_eq!(gen.step(), 2);
    }

    #[test]
    fn test_disable_forces_zero_and_rewinds() {
        let mut gen = enabled_generator();
        feed(&mut gen, 0, 60);
        assert_eq!(gen.direction(), Direction::Falling);

        assert!(gen.enable(false));
        assert_eq!(gen.duty(), 0);
        assert_eq!(gen.step(), 0);
        assert_eq!(gen.direction(), Direction::Rising);
    }

    #[test]
    fn test_reenable_restarts_from_bottom() {
        let mut gen = enabled_generator();
        let (_, now) = feed(&mut gen, 0, 30);
        gen.enable(false);
        gen.enable(true);
        let (duties, _) = feed(&mut gen, now, 1);
        assert_eq!(duties[0], PERIOD / DEFAULT_STEPS);
        assert_eq!(gen.step(), 1);
    }

    #[test]
    fn test_enable_while_enabled_keeps_position() {
        let mut gen = enabled_generator();
        feed(&mut gen, 0, 10);
        assert!(!gen.enable(true));
        assert_eq!(gen.step(), 10);
    }

    #[test]
    fn test_step_interval_survives_tick_wraparound() {
        let mut gen = enabled_generator();
        let start = u32::MAX - 25;
        gen.update(start); // first step, gate now rebased just below the wrap
        let (duties, _) = feed(&mut gen, start, 5);
        assert!(duties[..5].windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_duty_never_exceeds_period_with_odd_ratio() {
        let config = BreathingConfig {
            steps: 7,
            pwm_period: 1000,
            step_interval_ms: 1,
        };
        let mut gen = BreathingGenerator::new(config);
        gen.enable(true);
        for now in 1..100 {
            assert!(gen.update(now) <= 1000);
        }
    }
}
