// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Slot addressing for per-corner values.
//!
//! A slot is a `position` (0, 1 or 2) inside a `group` of three. Neighbours wrap within the group:
//! `left` is the cyclic successor and `right` the cyclic predecessor.

use core::fmt;

/// Number of corners, and therefore positions per group.
pub const N_CORNERS: usize = 3;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SlotIndex {
    group: u8,
    position: u8,
}

impl SlotIndex {
    /// Create a slot, or `None` if `position` is not 0, 1 or 2.
    pub const fn new(group: u8, position: u8) -> Option<Self> {
        if (position as usize) < N_CORNERS {
            Some(Self { group, position })
        } else {
            None
        }
    }

    /// All three slots of a group in position order.
    pub const fn group(group: u8) -> [Self; N_CORNERS] {
        [
            Self { group, position: 0 },
            Self { group, position: 1 },
            Self { group, position: 2 },
        ]
    }

    #[inline]
    pub const fn group_id(&self) -> u8 {
        self.group
    }

    #[inline]
    pub const fn position(&self) -> u8 {
        self.position
    }

    /// Position as an array index.
    #[inline]
    pub const fn index(&self) -> usize {
        self.position as usize
    }

    /// Cyclic successor in the same group.
    #[inline]
    pub const fn left(&self) -> Self {
        let position = if self.position < 2 { self.position + 1 } else { 0 };
        Self {
            group: self.group,
            position,
        }
    }

    /// Cyclic predecessor in the same group.
    #[inline]
    pub const fn right(&self) -> Self {
        let position = if self.position > 0 { self.position - 1 } else { 2 };
        Self {
            group: self.group,
            position,
        }
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group, self.position)
    }
}
