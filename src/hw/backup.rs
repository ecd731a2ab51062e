// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Node identity kept in the RTC backup registers.
//!
//! The backup domain survives resets and, with VBAT, power loss. The registers power up as zero,
//! so bytes are stored inverted: a blank domain reads back as `0xFF`, the unset identity.

use core::ptr;

use stm32f7xx_hal::pac;

use crate::network::IdentityStore;

/// Offset of RTC_BKP0R from the RTC base.
const BKP_OFFSET: usize = 0x50;
const BKP_BYTES: u16 = 32 * 4;

pub struct BackupStore {
    _rtc: pac::RTC,
}

impl BackupStore {
    /// Enable the power interface and unlock the backup domain for writes.
    pub fn new(rtc: pac::RTC) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        let pwr = unsafe { &*pac::PWR::ptr() };
        rcc.apb1enr.modify(|_, w| w.pwren().set_bit());
        pwr.cr1.modify(|_, w| w.dbp().set_bit());
        Self { _rtc: rtc }
    }

    fn register(offset: u16) -> *mut u32 {
        let base = pac::RTC::ptr() as *const u8 as *mut u8;
        base.wrapping_add(BKP_OFFSET + (offset as usize / 4) * 4) as *mut u32
    }
}

impl IdentityStore for BackupStore {
    fn read(&mut self, offset: u16) -> u8 {
        if offset >= BKP_BYTES {
            return 0xFF;
        }
        let word = unsafe { ptr::read_volatile(Self::register(offset)) };
        !((word >> (8 * (offset % 4))) as u8)
    }

    fn update(&mut self, offset: u16, value: u8) {
        if offset >= BKP_BYTES || self.read(offset) == value {
            return;
        }
        let reg = Self::register(offset);
        let shift = 8 * (offset % 4) as u32;
        unsafe {
            let word = ptr::read_volatile(reg);
            let word = (word & !(0xFF << shift)) | ((!value as u32) << shift);
            ptr::write_volatile(reg, word);
        }
    }
}
