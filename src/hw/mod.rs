// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! MCU-level wrappers for the corner node board.

pub mod adc;
pub mod backup;
pub mod led;
pub mod logger;
pub mod pins;
pub mod reset;
pub mod usart;

pub use adc::Adc;
pub use backup::BackupStore;
pub use led::Led;
pub use pins::BoardPins;
pub use reset::SystemReset;
pub use usart::{Console, UartPort, Usart};
