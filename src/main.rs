// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Corner node firmware.
//!
//! Corners sample their rangefinders when the ring hands them the turn, solve the triangle, write
//! their slot and forward the record. Any other node id only listens and logs the record.

#![no_main]
#![no_std]

use cortex_m_rt::entry;
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use shadows::{
    config::{NetworkConfig, SIDE_LENGTH},
    geometry::Triangle,
    hw::{
        logger,
        pins::{self, RangePins},
        Adc, BackupStore, BoardPins, Led, SystemReset, UartPort, Usart,
    },
    network::Network,
    radio::bridge::{Handoff, SerialRadio},
    sensing::Rangefinders,
};

/// 12-bit ADC counts at 3.3 V to half inches (Vcc/512 per inch).
const RANGE_SHIFT: u8 = 2;

#[entry]
fn main() -> ! {
    // Peripherals
    let Some(dp) = pac::Peripherals::take() else {
        halt();
    };

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let cycles_per_ms = clocks.sysclk().raw() / 1_000;

    let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD);
    let mut status = Led::active_low(pins.status);

    // USART1 (DBG): log output, node number entry
    let usart_cfg = Config {
        baud_rate: 115_200.bps(),
        ..Default::default()
    };
    let serial = Serial::new(dp.USART1, (pins.usart1.tx, pins.usart1.rx), &clocks, usart_cfg);
    let (usart, mut console) = Usart::with_console(serial);
    logger::init(usart, log::LevelFilter::Debug);
    log::info!("Setup. starting.");

    // USART2: radio coprocessor
    let radio_cfg = Config {
        baud_rate: 230_400.bps(),
        ..Default::default()
    };
    let radio_serial = Serial::new(dp.USART2, (pins.usart2.tx, pins.usart2.rx), &clocks, radio_cfg);
    let radio = SerialRadio::new(UartPort::new(radio_serial));

    let mut store = BackupStore::new(dp.RTC);
    let Some(mut network) = Network::begin(
        radio,
        Handoff,
        SystemReset,
        &mut store,
        &mut console,
        NetworkConfig::default(),
        None,
    ) else {
        log::error!("Setup. ring configuration invalid; halting.");
        halt();
    };

    // Rangefinders
    let RangePins {
        trigger,
        an0: _an0,
        an1: _an1,
        an2: _an2,
    } = pins.range;
    let _trigger = pins::start_rangefinders(trigger, cycles_per_ms);
    let mut range = Rangefinders::new(Adc::adc1(dp.ADC1), RangePins::CHANNELS, RANGE_SHIFT);
    let Some(triangle) = Triangle::new(SIDE_LENGTH) else {
        log::error!("Setup. side length must be non-zero; halting.");
        halt();
    };

    let slot = network.my_slot();
    match slot {
        Some(slot) => log::info!("Setup. corner node, writing slot {}.", slot),
        None => log::info!("Setup. listener node."),
    }
    log::info!("Setup. complete.");

    loop {
        if network.update() {
            status.toggle();
            if slot.is_none() {
                network.log_message();
            }
        }

        let Some(slot) = slot else { continue };
        if network.me_next() {
            range.update();
            let geometry = triangle.solve(range.distances());
            network.publish(geometry.reading(slot));
            if let Some(attempts) = network.send() {
                log::debug!("Loop. forwarded after {} attempt(s).", attempts);
                network.log_message();
            }
        }
    }
}

fn halt() -> ! {
    loop {
        cortex_m::asm::nop();
    }
}
