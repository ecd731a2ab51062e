// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! ADC1 with blocking single-channel reads, via direct PAC register access.

use stm32f7xx_hal::pac;

use crate::sensing::AdcRead;

/// Longest sample time (480 cycles); the rangefinder outputs are high impedance.
const SMP_480: u32 = 0b111;

pub struct Adc {
    adc: pac::ADC1,
}

impl Adc {
    /// Create and initialize ADC1: 12-bit, right-aligned, software trigger.
    pub fn adc1(adc: pac::ADC1) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

        let common = unsafe { &*pac::ADC_COMMON::ptr() };
        common.ccr.modify(|_, w| w.adcpre().div4());

        adc.cr2.modify(|_, w| w.adon().clear_bit());
        adc.cr1.modify(|_, w| w.res().bits(0b00));
        adc.cr2.modify(|_, w| {
            w.cont().clear_bit();
            w.align().right();
            w.exten().disabled();
            w
        });
        adc.sqr1.modify(|_, w| w.l().bits(0));
        adc.cr2.modify(|_, w| w.adon().set_bit());

        Self { adc }
    }

    /// Read a single channel (0..=18).
    pub fn read(&self, channel: u8) -> u16 {
        let adc = &self.adc;
        let channel = channel.min(18);

        match channel {
            0..=9 => {
                let shift = 3 * channel as u32;
                adc.smpr2
                    .modify(|r, w| unsafe { w.bits(r.bits() | (SMP_480 << shift)) });
            }
            _ => {
                let shift = 3 * (channel as u32 - 10);
                adc.smpr1
                    .modify(|r, w| unsafe { w.bits(r.bits() | (SMP_480 << shift)) });
            }
        }

        adc.sqr3.modify(|_, w| unsafe { w.sq1().bits(channel) });
        adc.cr2.modify(|_, w| w.swstart().set_bit());
        while adc.sr.read().eoc().bit_is_clear() {}

        adc.dr.read().data().bits()
    }

    #[inline]
    pub fn free(self) -> pac::ADC1 {
        self.adc
    }
}

impl AdcRead for Adc {
    fn read_channel(&mut self, ch: u8) -> u16 {
        self.read(ch)
    }
}
