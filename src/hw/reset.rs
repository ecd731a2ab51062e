// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

use crate::radio::Rebooter;

/// Reboots through the Cortex-M system reset request.
pub struct SystemReset;

impl Rebooter for SystemReset {
    fn reboot(&mut self) {
        cortex_m::peripheral::SCB::sys_reset();
    }
}
