//! Build script for thermowatch-firmware
//!
//! - Emits the linker scripts (`memory.x` itself comes from embassy-stm32)
//! - Parses and validates monitor.toml at compile time
//! - Generates `MONITOR_CONFIG` for the firmware to include

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thermowatch_core::config::MonitorConfig;

fn main() {
    setup_linker();
    let config = load_config();
    write_config(&config);
}

/// Emit linker arguments unless `.cargo/config.toml` already supplies them
fn setup_linker() {
    let rustflags = env::var("CARGO_ENCODED_RUSTFLAGS").unwrap_or_default();
    if !rustflags.contains("link.x") {
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
    }
    if !rustflags.contains("defmt.x") {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read, deserialize and validate monitor.toml
fn load_config() -> MonitorConfig {
    println!("cargo:rerun-if-changed=monitor.toml");

    let config_path = Path::new("monitor.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: monitor.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a monitor.toml configuration file.        ║\n\
            ║  Please create one in the thermowatch-firmware directory.        ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read monitor.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Unknown or mistyped keys are reported here along with syntax errors
    let config: MonitorConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid monitor.toml                                     ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    if let Err(e) = config.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: monitor.toml validation failed                           ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            ║                                                                  ║\n\
            {}\n\
            ║                                                                  ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(e.message())
        );
    }

    println!("cargo:warning=monitor.toml validated successfully");
    config
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                let head: String = line.chars().take(61).collect();
                format!("{head}...")
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generate `$OUT_DIR/monitor_config.rs`
fn write_config(config: &MonitorConfig) {
    let [t0, t1, t2] = config.thresholds_c;
    let code = format!(
        "/// Configuration baked in from monitor.toml\n\
         pub const MONITOR_CONFIG: MonitorConfig = MonitorConfig {{\n    \
             thresholds_c: [{t0:?}, {t1:?}, {t2:?}],\n    \
             initial_threshold: {initial},\n    \
             tick_hz: {tick_hz},\n    \
             telemetry_interval_ms: {telemetry},\n    \
             loop_period_ms: {loop_period},\n    \
             breathing: BreathingConfig {{\n        \
                 steps: {steps},\n        \
                 pwm_period: {pwm_period},\n        \
                 step_interval_ms: {step_interval},\n    \
             }},\n    \
             debounce: DebounceConfig {{\n        \
                 window_ms: {window},\n        \
                 settle_ms: {settle},\n    \
             }},\n    \
             startup: StartupConfig {{\n        \
                 blinks: {blinks},\n        \
                 blink_ms: {blink_ms},\n    \
             }},\n\
         }};\n",
        initial = config.initial_threshold,
        tick_hz = config.tick_hz,
        telemetry = config.telemetry_interval_ms,
        loop_period = config.loop_period_ms,
        steps = config.breathing.steps,
        pwm_period = config.breathing.pwm_period,
        step_interval = config.breathing.step_interval_ms,
        window = config.debounce.window_ms,
        settle = config.debounce.settle_ms,
        blinks = config.startup.blinks,
        blink_ms = config.startup.blink_ms,
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("cargo sets OUT_DIR"));
    let path = out_dir.join("monitor_config.rs");
    if let Err(e) = fs::write(&path, code) {
        panic!("failed to write {}: {e}", path.display());
    }
}
