//! Clock tree for STM32F103 boards with an 8 MHz crystal

use embassy_stm32::rcc::{
    ADCPrescaler, AHBPrescaler, APBPrescaler, Hse, HseMode, Pll, PllMul, PllPreDiv, PllSource,
    Sysclk,
};
use embassy_stm32::time::Hertz;
use embassy_stm32::Config;

/// External crystal
pub const HSE_HZ: u32 = 8_000_000;

/// Core clock after the PLL (8 MHz x 9)
pub const SYSCLK_HZ: u32 = 72_000_000;

/// HSE x 9 -> 72 MHz SYSCLK, AHB /1, APB1 /2 (36 MHz), APB2 /1, ADC /6
pub fn clock_config() -> Config {
    let mut config = Config::default();
    config.rcc.hse = Some(Hse {
        freq: Hertz(HSE_HZ),
        mode: HseMode::Oscillator,
    });
    config.rcc.pll = Some(Pll {
        src: PllSource::HSE,
        prediv: PllPreDiv::DIV1,
        mul: PllMul::MUL9,
    });
    config.rcc.sys = Sysclk::PLL1_P;
    config.rcc.ahb_pre = AHBPrescaler::DIV1;
    config.rcc.apb1_pre = APBPrescaler::DIV2;
    config.rcc.apb2_pre = APBPrescaler::DIV1;
    // 12 MHz, under the 14 MHz converter limit
    config.rcc.adc_pre = ADCPrescaler::DIV6;
    config
}
