// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! `log` backend that prints to the debug USART.
//!
//! Lines end in CRLF for the terminal.

use core::cell::RefCell;
use core::fmt::Write;

use cortex_m::interrupt::{self, Mutex};
use log::{LevelFilter, Log, Metadata, Record};
use stm32f7xx_hal::pac::USART1;

use crate::hw::Usart;

pub struct UsartLogger {
    usart: Mutex<RefCell<Option<Usart<USART1>>>>,
}

static LOGGER: UsartLogger = UsartLogger {
    usart: Mutex::new(RefCell::new(None)),
};

impl Log for UsartLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        interrupt::free(|cs| {
            if let Some(usart) = self.usart.borrow(cs).borrow_mut().as_mut() {
                let _ = write!(usart, "{}\r\n", record.args());
            }
        });
    }

    fn flush(&self) {
        interrupt::free(|cs| {
            if let Some(usart) = self.usart.borrow(cs).borrow_mut().as_mut() {
                usart.flush();
            }
        });
    }
}

/// Install the logger on USART1. Later calls only change the level.
pub fn init(usart: Usart<USART1>, level: LevelFilter) {
    interrupt::free(|cs| {
        LOGGER.usart.borrow(cs).replace(Some(usart));
    });
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
