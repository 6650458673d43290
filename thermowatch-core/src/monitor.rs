//! Cooperative dispatch loop
//!
//! [`Monitor::poll`] runs one iteration of the main loop. Every step is
//! non-blocking apart from the debounce settle delay, which only runs when a
//! button edge is pending. [`Monitor::pace`] is the deliberate cadence delay
//! between iterations.
//!
//! ```text
//! ┌── poll ───────────────────────────────────────────┐
//! │ 1. read sensor (keep last reading on error)        │
//! │ 2. compare with threshold -> status / breathing    │
//! │ 3. advance breathing, forward duty                 │
//! │ 4. debounce button, cycle threshold                │
//! │ 5. telemetry gate -> "Temp: .."                    │
//! │ 6. drain serial mailbox -> reply                   │
//! └────────────────────────────────────────────────────┘
//!   pace: blocking delay of `loop_period_ms`
//! ```

use thermowatch_hal::{InputPin, UartTx};

use crate::breathing::BreathingGenerator;
use crate::command::Command;
use crate::config::{MonitorConfig, StartupConfig};
use crate::debounce::{ButtonOutcome, EdgeDetector, ThresholdSelector};
use crate::delay::BlockingDelay;
use crate::gate::IntervalGate;
use crate::report::{
    new_threshold_notice, temperature_report, threshold_report, INVALID_INSTRUCTION,
};
use crate::shared::Shared;
use crate::traits::{AlarmIndicator, SensorError, StatusIndicator, TemperatureSensor};

/// Peripherals and services the loop drives
pub struct MonitorIo<S, T, A, B, U, D> {
    pub sensor: S,
    pub status: T,
    pub alarm: A,
    pub button: B,
    pub serial: U,
    pub delay: D,
}

/// Alarm state change seen in one iteration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmTransition {
    /// Reading rose above the threshold
    Raised { reading: f32, threshold: f32 },
    /// Reading fell back to or below the threshold
    Cleared { reading: f32, threshold: f32 },
}

/// What happened during one [`Monitor::poll`]
///
/// The loop itself never logs; the firmware reports from this record.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoopEvents {
    /// Fresh reading, if the sensor produced one
    pub reading: Option<f32>,
    pub sensor_fault: Option<SensorError>,
    pub alarm: Option<AlarmTransition>,
    pub button: ButtonOutcome,
    pub telemetry_sent: bool,
    pub command: Option<Command>,
    /// Serial writes that failed during this iteration
    pub serial_failures: u8,
}

impl Default for LoopEvents {
    fn default() -> Self {
        Self {
            reading: None,
            sensor_fault: None,
            alarm: None,
            button: ButtonOutcome::Idle,
            telemetry_sent: false,
            command: None,
            serial_failures: 0,
        }
    }
}

/// Main-loop state of the temperature monitor
pub struct Monitor<'a, S, T, A, B, U, D> {
    shared: &'a Shared,
    io: MonitorIo<S, T, A, B, U, D>,
    selector: ThresholdSelector,
    detector: EdgeDetector,
    breathing: BreathingGenerator,
    telemetry: IntervalGate,
    startup: StartupConfig,
    loop_period_ms: u32,
    last_reading: Option<f32>,
    alarm_active: bool,
    serial_failures: u32,
}

impl<'a, S, T, A, B, U, D> Monitor<'a, S, T, A, B, U, D>
where
    S: TemperatureSensor,
    T: StatusIndicator,
    A: AlarmIndicator,
    B: InputPin,
    U: UartTx,
    D: BlockingDelay,
{
    /// Create the loop state; `config` is expected to be validated
    pub fn new(
        shared: &'a Shared,
        config: &MonitorConfig,
        io: MonitorIo<S, T, A, B, U, D>,
    ) -> Self {
        Self {
            shared,
            io,
            selector: config.threshold_selector(),
            detector: EdgeDetector::new(config.debounce.settle_ms),
            breathing: BreathingGenerator::new(config.breathing),
            telemetry: IntervalGate::starting_at(
                config.telemetry_interval_ms,
                shared.clock.now(),
            ),
            startup: config.startup,
            loop_period_ms: config.loop_period_ms,
            last_reading: None,
            alarm_active: false,
            serial_failures: 0,
        }
    }

    /// Blink the status LED, then leave it on
    ///
    /// Blocks for at least `2 * blinks * blink_ms` ticks. The alarm output
    /// stays dark.
    pub fn startup(&mut self) {
        self.io.alarm.set_duty(0);
        for _ in 0..self.startup.blinks {
            self.io.status.set_status(true);
            self.io.delay.delay_ms(self.startup.blink_ms);
            self.io.status.set_status(false);
            self.io.delay.delay_ms(self.startup.blink_ms);
        }
        self.io.status.set_status(true);
        // Don't let the blink time count towards the first telemetry period
        self.telemetry.restart(self.shared.clock.now());
    }

    /// Run one loop iteration
    pub fn poll(&mut self) -> LoopEvents {
        let mut events = LoopEvents::default();

        match self.io.sensor.read_celsius() {
            Ok(celsius) => {
                self.last_reading = Some(celsius);
                events.reading = Some(celsius);
            }
            Err(e) => events.sensor_fault = Some(e),
        }

        if let Some(reading) = self.last_reading {
            events.alarm = self.evaluate(reading);
        }

        let duty = self.breathing.update(self.shared.clock.now());
        self.io.alarm.set_duty(duty);

        events.button = self.detector.poll(
            &self.shared.button,
            &self.io.button,
            &mut self.io.delay,
            &mut self.selector,
        );
        if let ButtonOutcome::Confirmed { threshold_c, .. } = events.button {
            self.send(&new_threshold_notice(threshold_c), &mut events);
        }

        if self.telemetry.poll(self.shared.clock.now()) {
            if let Some(reading) = self.last_reading {
                self.send(&temperature_report(reading), &mut events);
                events.telemetry_sent = true;
            }
        }

        if let Some(byte) = self.shared.serial_rx.take() {
            let command = Command::from_byte(byte);
            match command {
                Command::QueryThreshold => {
                    let reply = threshold_report(self.selector.current());
                    self.send(&reply, &mut events);
                }
                Command::Invalid(_) => self.send(INVALID_INSTRUCTION, &mut events),
            }
            events.command = Some(command);
        }

        events
    }

    /// Cadence delay between iterations
    pub fn pace(&mut self) {
        self.io.delay.delay_ms(self.loop_period_ms);
    }

    /// Active threshold (°C)
    pub fn threshold(&self) -> f32 {
        self.selector.current()
    }

    pub fn threshold_index(&self) -> usize {
        self.selector.index()
    }

    /// Most recent good reading
    pub fn last_reading(&self) -> Option<f32> {
        self.last_reading
    }

    pub fn alarm_active(&self) -> bool {
        self.alarm_active
    }

    pub fn breathing(&self) -> &BreathingGenerator {
        &self.breathing
    }

    /// Serial writes that have failed since boot
    pub fn serial_failures(&self) -> u32 {
        self.serial_failures
    }

    #[cfg(test)]
    pub fn io(&self) -> &MonitorIo<S, T, A, B, U, D> {
        &self.io
    }

    #[cfg(test)]
    pub fn io_mut(&mut self) -> &mut MonitorIo<S, T, A, B, U, D> {
        &mut self.io
    }

    /// Binary comparison, no hysteresis
    fn evaluate(&mut self, reading: f32) -> Option<AlarmTransition> {
        let threshold = self.selector.current();
        let alarm = reading > threshold;

        self.io.status.set_status(!alarm);
        // Disabling zeroes the generator; the duty forwarded right after
        // this turns the LED off in the same iteration.
        self.breathing.enable(alarm);

        if alarm == self.alarm_active {
            return None;
        }
        self.alarm_active = alarm;
        Some(if alarm {
            AlarmTransition::Raised { reading, threshold }
        } else {
            AlarmTransition::Cleared { reading, threshold }
        })
    }

    fn send(&mut self, text: &str, events: &mut LoopEvents) {
        if self.io.serial.write_blocking(text.as_bytes()).is_err() {
            self.serial_failures = self.serial_failures.wrapping_add(1);
            events.serial_failures = events.serial_failures.saturating_add(1);
        }
    }
}
