// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Installation constants and the network configuration built from them.
//!
//! Distances are in rangefinder units (half inches).

use crate::network::NodeId;

/// Distance between two corner rangefinders.
pub const SIDE_LENGTH: u8 = 200;

/// A corner reading at or below this means the object is inside the arena plane.
pub const IN_PLANE: u16 = 200;

/// First and last corner identities. Exactly three.
pub const MIN_CORNER: NodeId = NodeId(10);
pub const MAX_CORNER: NodeId = NodeId(12);

/// Gateway that pushes firmware images.
pub const PROGRAMMER_NODE: NodeId = NodeId(254);

/// Radio band code passed to the transport (915 MHz).
pub const FREQUENCY: u8 = 91;
/// Radio network (group) identity shared by every node.
pub const GROUP_ID: u8 = 188;
/// Transmit power level, 0..=31.
pub const POWER_LEVEL: u8 = 31;

/// Over-the-air bit rate, bits per second.
pub const BIT_RATE_BPS: u32 = 55_555;
/// Radio framing overhead around the payload: preamble, sync, header, CRC.
pub const FRAME_OVERHEAD_BYTES: u32 = 3 + 2 + 4 + 2;
/// Attempts per reliable send before the network layer re-services the receiver.
pub const SEND_RETRIES: u8 = 3;

/// Byte offset of the node identity in persistent storage.
pub const IDENTITY_OFFSET: u16 = 42;

/// Network-layer settings.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct NetworkConfig {
    pub frequency: u8,
    pub group: u8,
    pub power_level: u8,
    pub first_corner: NodeId,
    pub last_corner: NodeId,
    /// Identity whose own slot is position 0.
    pub slot_base: NodeId,
    /// Sender assumed to have spoken last before any traffic is heard.
    pub bootstrap_sender: NodeId,
    pub programmer: NodeId,
    pub in_plane: u16,
    pub send_retries: u8,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            frequency: FREQUENCY,
            group: GROUP_ID,
            power_level: POWER_LEVEL,
            first_corner: MIN_CORNER,
            last_corner: MAX_CORNER,
            slot_base: MIN_CORNER,
            bootstrap_sender: MIN_CORNER,
            programmer: PROGRAMMER_NODE,
            in_plane: IN_PLANE,
            send_retries: SEND_RETRIES,
        }
    }
}

impl NetworkConfig {
    /// Place the ring at `first..=first + 2`, moving the slot base and bootstrap with it.
    pub fn with_ring(mut self, first: NodeId) -> Self {
        self.first_corner = first;
        self.last_corner = NodeId(first.0.saturating_add(2));
        self.slot_base = first;
        self.bootstrap_sender = first;
        self
    }

    pub fn with_slot_base(mut self, base: NodeId) -> Self {
        self.slot_base = base;
        self
    }

    pub fn with_bootstrap_sender(mut self, sender: NodeId) -> Self {
        self.bootstrap_sender = sender;
        self
    }

    pub fn with_radio(mut self, frequency: u8, group: u8, power_level: u8) -> Self {
        self.frequency = frequency;
        self.group = group;
        self.power_level = power_level;
        self
    }
}

/// Milliseconds to wait for an acknowledgement of a `payload_len`-byte frame.
///
/// Twice the airtime of the frame, rounded up to the next millisecond.
pub const fn resend_interval_ms(payload_len: usize) -> u16 {
    let bits = 8 * (FRAME_OVERHEAD_BYTES + payload_len as u32);
    ((bits * 1000 / BIT_RATE_BPS + 1) * 2) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Message;

    #[test]
    fn resend_interval_for_ring_message() {
        // 232 bits at 55.555 kbit/s is ~4.2 ms.
        assert_eq!(resend_interval_ms(Message::WIRE_LEN), 10);
    }

    #[test]
    fn with_ring_moves_everything() {
        let c = NetworkConfig::default().with_ring(NodeId(20));
        assert_eq!(c.first_corner, NodeId(20));
        assert_eq!(c.last_corner, NodeId(22));
        assert_eq!(c.slot_base, NodeId(20));
        assert_eq!(c.bootstrap_sender, NodeId(20));
    }
}
