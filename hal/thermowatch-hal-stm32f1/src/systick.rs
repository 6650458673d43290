//! SysTick as the tick interrupt source

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;
use thermowatch_core::clock::{reload_value, ClockError};

/// Start SysTick firing at `tick_hz` from the core clock
///
/// The counter is left untouched on error, so the tick interrupt never
/// fires with a bad period.
pub fn start(syst: &mut SYST, core_hz: u32, tick_hz: u32) -> Result<u32, ClockError> {
    let reload = reload_value(core_hz, tick_hz)?;

    syst.disable_counter();
    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(reload);
    syst.clear_current();
    syst.enable_interrupt();
    syst.enable_counter();

    Ok(reload)
}
