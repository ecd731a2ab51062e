// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Geometry
//!
//! Integer-only triangulation of the object inside the sensor triangle.
//!
//! ## Modules
//!
//! - [`isqrt`] - rounded integer square root.
//! - [`slot`] - per-corner slot addressing.
//! - [`triangulation`] - distances to altitudes, cevians and area fractions.

pub mod isqrt;
pub mod slot;
pub mod triangulation;

pub use isqrt::isqrt;
pub use slot::{SlotIndex, N_CORNERS};
pub use triangulation::{Geometry, Triangle};
