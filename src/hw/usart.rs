// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART abstraction layer.
//!
//! - `Usart` is the write half of the debug port; it backs the logger.
//! - `Console` is the read half, used to type in a node number when none is stored.
//! - `UartPort` is a full-duplex port for the radio coprocessor.
//!
//! To access the debug terminal on the host machine, connect to the debug USB port and use
//! `screen /dev/tty.usbmodem* 115200`. Close it with `Ctrl+A` then `Ctrl+\` then `y`.

use core::fmt;
use nb::block;

use stm32f7xx_hal::{
    prelude::*,
    serial::{Instance, Pins, Rx, Serial, Tx},
};

use crate::network::IdentityPrompt;
use crate::radio::bridge::SerialPort;

pub struct Usart<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> Usart<U> {
    /// Split the debug port into the log writer and the identity console.
    pub fn with_console<PINS: Pins<U>>(serial: Serial<U, PINS>) -> (Self, Console<U>) {
        let (tx, rx) = serial.split();
        (Self { tx }, Console::new(rx))
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }

    /// Block until the hardware TX FIFO/drain is flushed.
    #[inline]
    pub fn flush(&mut self) {
        let _ = block!(self.tx.flush());
    }
}

// Implement `core::fmt::Write` so we can use `write!` / `writeln!` on `Usart`.
impl<U: Instance> fmt::Write for Usart<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Usart::write_str(self, s);
        Ok(())
    }
}

/// Reads a decimal node number terminated by CR or LF.
pub struct Console<U: Instance> {
    rx: Rx<U>,
    value: u16,
    digits: u8,
}

impl<U: Instance> Console<U> {
    fn new(rx: Rx<U>) -> Self {
        Self {
            rx,
            value: 0,
            digits: 0,
        }
    }
}

impl<U: Instance> IdentityPrompt for Console<U> {
    type Error = ();

    fn prompt(&mut self) {
        log::error!("Enter the node number for this node:");
    }

    fn read_identity(&mut self) -> nb::Result<u8, ()> {
        let byte = self.rx.read().map_err(|e| e.map(|_| ()))?;
        match byte {
            b'0'..=b'9' => {
                self.value = (self.value * 10 + (byte - b'0') as u16).min(999);
                self.digits = self.digits.saturating_add(1);
                Err(nb::Error::WouldBlock)
            }
            b'\r' | b'\n' if self.digits > 0 => {
                let entered = self.value.min(u8::MAX as u16) as u8;
                self.value = 0;
                self.digits = 0;
                Ok(entered)
            }
            _ => Err(nb::Error::WouldBlock),
        }
    }
}

/// Full-duplex USART for the radio coprocessor link.
pub struct UartPort<U: Instance> {
    tx: Tx<U>,
    rx: Rx<U>,
}

impl<U: Instance> UartPort<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, rx) = serial.split();
        Self { tx, rx }
    }
}

impl<U: Instance> SerialPort for UartPort<U> {
    type Error = ();

    #[inline]
    fn read(&mut self) -> nb::Result<u8, ()> {
        self.rx.read().map_err(|e| e.map(|_| ()))
    }

    #[inline]
    fn write(&mut self, byte: u8) -> nb::Result<(), ()> {
        self.tx.write(byte).map_err(|e| e.map(|_| ()))
    }
}
