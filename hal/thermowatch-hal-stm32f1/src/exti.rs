//! External interrupt line setup for STM32F1
//!
//! embassy's `ExtiInput` is async-only, so the button line is armed
//! directly: AFIO routes the pin to its EXTI line, the line is set to
//! falling-edge and unmasked, and the NVIC vector is enabled.

use embassy_stm32::interrupt::{self, InterruptExt};
use embassy_stm32::pac;

/// GPIO port routed to an EXTI line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
}

/// EXTI setup failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExtiError {
    /// Only lines 0..=15 map to GPIO pins
    InvalidLine,
}

/// Route `port`/`line` to EXTI and trigger on falling edges only
///
/// The pin itself must already be configured as an input.
pub fn listen_falling(port: Port, line: usize) -> Result<(), ExtiError> {
    if line > 15 {
        return Err(ExtiError::InvalidLine);
    }
    pac::RCC.apb2enr().modify(|w| w.set_afioen(true));
    pac::AFIO
        .exticr(line / 4)
        .modify(|w| w.set_exti(line % 4, port as u8));

    pac::EXTI.rtsr(0).modify(|w| w.set_line(line, false));
    pac::EXTI.ftsr(0).modify(|w| w.set_line(line, true));
    clear_pending(line);
    pac::EXTI.imr(0).modify(|w| w.set_line(line, true));

    let irq = vector_for(line);
    irq.unpend();
    // SAFETY: the firmware defines the matching handler before arming
    unsafe { irq.enable() };
    Ok(())
}

/// Whether `line` has a pending edge
pub fn is_pending(line: usize) -> bool {
    pac::EXTI.pr(0).read().line(line)
}

/// Acknowledge a pending edge on `line` (write-one-to-clear)
pub fn clear_pending(line: usize) {
    pac::EXTI.pr(0).write(|w| w.set_line(line, true));
}

fn vector_for(line: usize) -> interrupt::Interrupt {
    match line {
        0 => interrupt::EXTI0,
        1 => interrupt::EXTI1,
        2 => interrupt::EXTI2,
        3 => interrupt::EXTI3,
        4 => interrupt::EXTI4,
        5..=9 => interrupt::EXTI9_5,
        _ => interrupt::EXTI15_10,
    }
}
