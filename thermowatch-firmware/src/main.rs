//! Thermowatch - Single-Board Temperature Monitor Firmware
//!
//! Main firmware binary for STM32F103 boards. An LM35 on PA2 is sampled
//! every loop iteration; PA0 drives the green status LED, TIM2_CH2 on PA1
//! breathes the red alarm LED, the button on PA8 cycles the alarm
//! threshold, and USART1 (PA9/PA10, 9600 8N1) carries telemetry and
//! single-byte commands.
//!
//! There is no executor. SysTick, EXTI9_5 and USART1 interrupts feed the
//! shared context in [`SHARED`]; everything else runs in the main loop.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::*;
use embassy_stm32::adc::{self, Adc};
use embassy_stm32::bind_interrupts;
use embassy_stm32::gpio::{Input, Level, Output, OutputType, Pull, Speed};
use embassy_stm32::peripherals::ADC1;
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::usart::Uart;
use {defmt_rtt as _, panic_probe as _};

use thermowatch_core::breathing::BreathingConfig;
use thermowatch_core::config::{MonitorConfig, StartupConfig};
use thermowatch_core::debounce::{ButtonOutcome, DebounceConfig};
use thermowatch_core::delay::TickDelay;
use thermowatch_core::monitor::{AlarmTransition, LoopEvents, Monitor, MonitorIo};
use thermowatch_core::shared::Shared;
use thermowatch_core::traits::SensorError;
use thermowatch_drivers::indicator::{GpioStatusLed, PwmAlarmLed};
use thermowatch_drivers::sensor::lm35::{Lm35Sensor, DEFAULT_VREF_MV};
use thermowatch_hal::uart::UartConfig;
use thermowatch_hal_stm32f1::exti::{self, Port};
use thermowatch_hal_stm32f1::rcc::{self, SYSCLK_HZ};
use thermowatch_hal_stm32f1::uart::{self as serial, SerialTx};
use thermowatch_hal_stm32f1::{systick, BlockingAdc, StmInput, StmOutput};

mod irq;

include!(concat!(env!("OUT_DIR"), "/monitor_config.rs"));

/// EXTI line of the button (PA8)
pub const BUTTON_LINE: usize = 8;

/// State shared with the interrupt handlers
pub static SHARED: Shared = Shared::new(MONITOR_CONFIG.debounce.window_ms);

/// Alarm LED PWM carrier
const PWM_FREQ: Hertz = Hertz(100);

bind_interrupts!(struct Irqs {
    ADC1_2 => adc::InterruptHandler<ADC1>;
});

/// Main entry point
#[entry]
fn main() -> ! {
    info!("Thermowatch firmware starting...");

    let config = MONITOR_CONFIG;
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        halt();
    }
    log_config(&config);

    let p = embassy_stm32::init(rcc::clock_config());
    info!("Clocks configured, SYSCLK={}Hz", SYSCLK_HZ);

    // Status LED (PA0, active high) and button (PA8, pulled up, active low)
    let status = Output::new(p.PA0, Level::Low, Speed::Low);
    let button = Input::new(p.PA8, Pull::Up);

    // Alarm LED on TIM2_CH2 (PA1)
    let alarm_pin = PwmPin::new(p.PA1, OutputType::PushPull);
    let pwm = SimplePwm::new(
        p.TIM2,
        None,
        Some(alarm_pin),
        None,
        None,
        PWM_FREQ,
        Default::default(),
    );
    let mut alarm_channel = pwm.split().ch2;
    alarm_channel.enable();

    // LM35 on ADC1 channel 2 (PA2)
    let adc = Adc::new(p.ADC1);
    let sensor_adc = BlockingAdc::new(adc, p.PA2);

    // USART1: TX on PA9, RX on PA10. The receiver half is never read through
    // embassy; it stays alive so the peripheral keeps receiving.
    let uart = match Uart::new_blocking(
        p.USART1,
        p.PA10,
        p.PA9,
        serial::usart_config(&UartConfig::default()),
    ) {
        Ok(uart) => uart,
        Err(e) => {
            error!("USART1 configuration failed: {}", e);
            halt();
        }
    };
    let (tx, _rx) = uart.split();
    info!("Peripherals initialized");

    // Interrupt sources, tick last so the clock starts from zero
    SHARED.clock.reset();
    if let Err(e) = exti::listen_falling(Port::A, BUTTON_LINE) {
        error!("Button EXTI setup failed: {}", e);
        halt();
    }
    serial::enable_usart1_rx_interrupt();

    let Some(mut core) = cortex_m::Peripherals::take() else {
        error!("Core peripherals already taken");
        halt();
    };
    match systick::start(&mut core.SYST, SYSCLK_HZ, config.tick_hz) {
        Ok(reload) => info!("SysTick running at {}Hz (reload {})", config.tick_hz, reload),
        Err(e) => {
            error!("SysTick configuration failed: {}", e);
            halt();
        }
    }

    let io = MonitorIo {
        sensor: Lm35Sensor::new(sensor_adc, DEFAULT_VREF_MV),
        status: GpioStatusLed::new_active_high(StmOutput(status)),
        alarm: PwmAlarmLed::new(alarm_channel, config.breathing.pwm_period),
        button: StmInput(button),
        serial: SerialTx::new(tx),
        delay: TickDelay::new(&SHARED.clock),
    };
    let mut monitor = Monitor::new(&SHARED, &config, io);

    monitor.startup();
    info!(
        "System ready, threshold {}°C (index {})",
        monitor.threshold(),
        monitor.threshold_index()
    );

    let mut last_fault: Option<SensorError> = None;
    loop {
        let events = monitor.poll();
        log_events(&events, &mut last_fault);
        monitor.pace();
    }
}

fn log_config(config: &MonitorConfig) {
    info!(
        "Config: thresholds={}°C initial={} tick={}Hz telemetry={}ms loop={}ms",
        config.thresholds_c,
        config.initial_threshold,
        config.tick_hz,
        config.telemetry_interval_ms,
        config.loop_period_ms
    );
    debug!(
        "Config: breathing={} debounce={} startup={}",
        config.breathing, config.debounce, config.startup
    );
}

/// Report one loop iteration
///
/// Sensor faults are logged when they start or change, not every iteration.
fn log_events(events: &LoopEvents, last_fault: &mut Option<SensorError>) {
    if events.sensor_fault != *last_fault {
        match events.sensor_fault {
            Some(fault) => warn!("Sensor fault: {}, keeping last reading", fault),
            None => info!("Sensor recovered"),
        }
        *last_fault = events.sensor_fault;
    }

    match events.alarm {
        Some(AlarmTransition::Raised { reading, threshold }) => {
            info!("Alarm: {}°C above {}°C", reading, threshold)
        }
        Some(AlarmTransition::Cleared { reading, threshold }) => {
            info!("Alarm cleared: {}°C at or below {}°C", reading, threshold)
        }
        None => {}
    }

    match events.button {
        ButtonOutcome::Confirmed { index, threshold_c } => {
            info!("Threshold changed to {}°C (index {})", threshold_c, index)
        }
        ButtonOutcome::Rejected => debug!("Button bounce rejected"),
        ButtonOutcome::Released => debug!("Button released"),
        ButtonOutcome::Idle | ButtonOutcome::Held => {}
    }

    if let Some(command) = events.command {
        debug!("Serial command: {}", command);
    }

    if events.serial_failures > 0 {
        warn!("{} serial write(s) failed", events.serial_failures);
    }
}

/// Stop making progress after a fatal bring-up error
fn halt() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}
