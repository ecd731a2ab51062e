// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

use thiserror::Error;

/// Why a payload could not be turned into a record.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("payload is {actual} bytes, expected {expected}")]
    Length { expected: usize, actual: usize },

    #[error("unknown system mode {0}")]
    UnknownMode(u16),
}
