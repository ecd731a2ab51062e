// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Records shared between nodes and the length-based framing that carries them.

pub mod error;
pub mod frame;
pub mod messages;

pub use error::DecodeError;
pub use frame::{Frame, FrameKind};
pub use messages::{Message, SlotReading, SystemMode, OFFLINE};
