//! Interrupt handlers
//!
//! Each handler does the minimum: acknowledge the hardware and forward to
//! the shared context. None of them block.

use cortex_m_rt::exception;
use embassy_stm32::interrupt;
use thermowatch_hal_stm32f1::{exti, uart};

use crate::{BUTTON_LINE, SHARED};

#[exception]
fn SysTick() {
    SHARED.on_tick();
}

/// Button on PA8
#[interrupt]
fn EXTI9_5() {
    if exti::is_pending(BUTTON_LINE) {
        exti::clear_pending(BUTTON_LINE);
        // Edges inside the debounce window are dropped here
        let _ = SHARED.on_button_edge();
    }
}

#[interrupt]
fn USART1() {
    if let Some(byte) = uart::usart1_take_byte() {
        SHARED.on_serial_byte(byte);
    }
}
