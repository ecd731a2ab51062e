// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F767 corner node.

use stm32f7xx_hal::{
    gpio::{gpioa, gpioc, gpiod, Alternate, Analog, Floating, Input, Output, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD);
/// ```
pub struct BoardPins {
    pub status: gpiod::PD9<Output<PushPull>>,
    pub usart1: Usart1Pins,
    pub usart2: Usart2Pins,
    pub range: RangePins,
}

/// Debug console (ST-LINK VCP)
pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// Radio coprocessor link
pub struct Usart2Pins {
    pub tx: gpiod::PD5<Alternate<7>>,
    pub rx: gpiod::PD6<Alternate<7>>,
}

/// Rangefinder chain
pub struct RangePins {
    /// RX of the first rangefinder; a pulse starts the chain.
    pub trigger: gpioa::PA4<Output<PushPull>>,
    pub an0: gpioa::PA3<Analog>, // ADC1_IN3
    pub an1: gpioc::PC0<Analog>, // ADC1_IN10
    pub an2: gpioc::PC3<Analog>, // ADC1_IN13
}

impl RangePins {
    /// ADC1 channel for each corner position.
    pub const CHANNELS: [u8; 3] = [3, 10, 13];
}

/// Hold the chain trigger low while the rangefinders power up, pulse it, then release the line so
/// the chain free-runs.
pub fn start_rangefinders(
    mut trigger: gpioa::PA4<Output<PushPull>>,
    cycles_per_ms: u32,
) -> gpioa::PA4<Input<Floating>> {
    trigger.set_low();
    cortex_m::asm::delay(500 * cycles_per_ms);
    trigger.set_high();
    cortex_m::asm::delay(10 * cycles_per_ms);
    trigger.set_low();
    trigger.into_floating_input()
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpioc: pac::GPIOC, gpiod: pac::GPIOD) -> Self {
        let gpioa = gpioa.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();

        Self {
            status: gpiod.pd9.into_push_pull_output(),

            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            usart2: Usart2Pins {
                tx: gpiod.pd5.into_alternate::<7>(),
                rx: gpiod.pd6.into_alternate::<7>(),
            },

            range: RangePins {
                trigger: gpioa.pa4.into_push_pull_output(),
                an0: gpioa.pa3.into_analog(),
                an1: gpioc.pc0.into_analog(),
                an2: gpioc.pc3.into_analog(),
            },
        }
    }
}
