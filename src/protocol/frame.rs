// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Inbound frame classification.
//!
//! Nodes never tag their payloads; a frame's meaning comes from its length and whether it was
//! addressed to us. All of that dispatch lives here so the network layer only sees a decoded
//! [`Frame`].

use crate::protocol::error::DecodeError;
use crate::protocol::messages::{Message, SystemMode};

/// What a payload is, decided from its length alone.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FrameKind {
    /// Ring record update.
    Data,
    /// Network-wide mode change.
    ModeChange,
    /// Addressed to us but not a ring record: a reprogramming session is starting.
    Reprogram,
    /// Someone else's traffic.
    Unrecognized,
}

impl FrameKind {
    pub fn classify(len: usize, addressed_to_us: bool) -> Self {
        if len == Message::WIRE_LEN {
            FrameKind::Data
        } else if len == SystemMode::WIRE_LEN {
            FrameKind::ModeChange
        } else if addressed_to_us {
            FrameKind::Reprogram
        } else {
            FrameKind::Unrecognized
        }
    }
}

/// A classified and decoded payload.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Frame {
    Data(Message),
    ModeChange(SystemMode),
    Reprogram,
    Unrecognized,
}

impl Frame {
    pub fn decode(payload: &[u8], addressed_to_us: bool) -> Result<Self, DecodeError> {
        Ok(match FrameKind::classify(payload.len(), addressed_to_us) {
            FrameKind::Data => Frame::Data(Message::from_bytes(payload)?),
            FrameKind::ModeChange => Frame::ModeChange(SystemMode::from_bytes(payload)?),
            FrameKind::Reprogram => Frame::Reprogram,
            FrameKind::Unrecognized => Frame::Unrecognized,
        })
    }

    pub fn kind(&self) -> FrameKind {
        match self {
            Frame::Data(_) => FrameKind::Data,
            Frame::ModeChange(_) => FrameKind::ModeChange,
            Frame::Reprogram => FrameKind::Reprogram,
            Frame::Unrecognized => FrameKind::Unrecognized,
        }
    }
}
