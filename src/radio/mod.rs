// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Radio Boundary
//!
//! The packet radio itself (modulation, acknowledgements, retries, OTA image transfer) is not
//! implemented here. This module defines what the network layer needs from it.
//!
//! - [`Transport`] - send/receive capability of the radio.
//! - [`Reprogrammer`] - takes over the channel when a node is asked to reflash itself.
//! - [`Rebooter`] - restarts the node.
//! - [`bridge`] - `Transport` for a radio coprocessor attached over a serial line.

pub mod bridge;

use heapless::Vec;

use crate::network::NodeId;

/// Largest payload the radio carries.
pub const MAX_PAYLOAD: usize = 61;

/// Address that reaches every node.
pub const BROADCAST: NodeId = NodeId(255);

/// A frame pulled off the air.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Received {
    pub sender: NodeId,
    pub target: NodeId,
    pub ack_requested: bool,
    pub payload: Vec<u8, MAX_PAYLOAD>,
}

impl Received {
    /// Build a frame, or `None` if the payload does not fit.
    pub fn new(sender: NodeId, target: NodeId, ack_requested: bool, payload: &[u8]) -> Option<Self> {
        Some(Self {
            sender,
            target,
            ack_requested,
            payload: Vec::from_slice(payload).ok()?,
        })
    }

    #[inline]
    pub fn is_for(&self, node: NodeId) -> bool {
        self.target == node
    }
}

/// Packet radio as seen by the network layer.
pub trait Transport {
    type Error: core::fmt::Debug;

    /// Bring the radio up on `frequency` as `node` inside network `group`.
    fn initialize(&mut self, frequency: u8, node: NodeId, group: u8);

    fn set_high_power(&mut self);

    /// Deliver frames addressed to other nodes as well.
    fn set_promiscuous(&mut self, on: bool);

    fn set_power_level(&mut self, level: u8);

    /// Next received frame. `WouldBlock` when nothing is pending.
    fn receive(&mut self) -> nb::Result<Received, Self::Error>;

    /// Acknowledge the frame most recently received from `to`.
    fn send_ack(&mut self, to: NodeId);

    /// Send `payload` to `target`, waiting up to `timeout_ms` for an ack and retrying up to
    /// `retries` times. Returns whether an ack arrived.
    fn send_with_retry(&mut self, target: NodeId, payload: &[u8], retries: u8, timeout_ms: u16) -> bool;
}

/// Reprogramming session handler. Owns whatever flash it writes the image to.
pub trait Reprogrammer<T: Transport> {
    /// Called with the frame that opened the session. May not return if the node reboots into
    /// new firmware.
    fn reprogram(&mut self, radio: &mut T, request: &Received);
}

/// Node restart.
pub trait Rebooter {
    fn reboot(&mut self);
}
