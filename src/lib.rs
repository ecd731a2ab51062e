// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Shadows Corner-Node Firmware
//!
//! This crate contains the firmware for the Shadows installation: three rangefinder nodes at the
//! corners of a triangular arena locate an object inside it and share the result over a packet
//! radio, so the LED nodes can light up where the object is. Written in Rust, targeting an
//! STM32F767 MCU with a radio coprocessor on a serial line.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`geometry`] | Integer triangulation (altitudes, cevians, area fractions) |
//! | [`protocol`] | Shared ring record, system mode and length-based framing |
//! | [`network`]  | Node identity, implicit token ring, reliable forwarding |
//! | [`radio`]    | Radio transport boundary and the serial coprocessor bridge |
//! | [`sensing`]  | Rangefinder averaging and clamping |
//! | [`config`]   | Installation constants and network configuration |
//! | `hw`         | MCU-level wrappers (USART, ADC, LED, backup registers); `board` feature only |
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash a corner node:
//!
//! ```bash
//! cargo run --release --features board
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod geometry;
pub mod network;
pub mod protocol;
pub mod radio;
pub mod sensing;

#[cfg(feature = "board")]
pub mod hw;
