// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Node identities and the three-corner ring.
//!
//! There is no token message. Whoever follows the last node heard on the air speaks next, so
//! every corner has to hear every other corner.

use core::fmt;

use crate::geometry::slot::{SlotIndex, N_CORNERS};

/// Radio identity of a physical unit.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(pub u8);

impl NodeId {
    /// Stored value meaning "not assigned yet".
    pub const UNSET: u8 = 255;
    /// Highest assignable identity.
    pub const MAX_VALID: u8 = 200;

    /// Identity from a stored byte, or `None` if it is unset or out of range.
    pub const fn from_stored(raw: u8) -> Option<Self> {
        if raw <= Self::MAX_VALID {
            Some(NodeId(raw))
        } else {
            None
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The corner ring `first..=last`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Ring {
    first: NodeId,
    last: NodeId,
}

impl Ring {
    /// Ring of exactly three consecutive identities, or `None` if `last` is not `first + 2`.
    pub fn new(first: NodeId, last: NodeId) -> Option<Self> {
        (last.0.checked_sub(first.0)? as usize == N_CORNERS - 1).then_some(Self { first, last })
    }

    #[inline]
    pub fn first(&self) -> NodeId {
        self.first
    }

    #[inline]
    pub fn last(&self) -> NodeId {
        self.last
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        (self.first..=self.last).contains(&node)
    }

    /// Next corner after `node`. Anything at or past the end wraps to the first corner.
    pub fn successor(&self, node: NodeId) -> NodeId {
        if node.0 >= self.last.0 {
            self.first
        } else {
            NodeId(node.0 + 1)
        }
    }

    /// Corner before `node`. Anything at or before the start wraps to the last corner.
    pub fn predecessor(&self, node: NodeId) -> NodeId {
        if node.0 <= self.first.0 {
            self.last
        } else {
            NodeId(node.0 - 1)
        }
    }

    /// Whether `me` should transmit, given the last sender heard.
    #[inline]
    pub fn is_next(&self, last_sender: NodeId, me: NodeId) -> bool {
        self.successor(last_sender) == me
    }

    /// Own slot of `node` when position 0 belongs to `base`.
    pub fn slot_of(node: NodeId, base: NodeId, group: u8) -> Option<SlotIndex> {
        SlotIndex::new(group, node.0.checked_sub(base.0)?)
    }
}
