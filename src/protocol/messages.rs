// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Records exchanged between nodes.
//!
//! Both records are plain little-endian `u16` fields. Frames are told apart only by length, so
//! the two lengths must differ.

use core::fmt;

use crate::geometry::slot::{SlotIndex, N_CORNERS};
use crate::protocol::error::DecodeError;

/// Sentinel for a slot whose corner has not published yet.
pub const OFFLINE: u16 = 0xFFFF;

/// Shared record forwarded around the ring. One entry per corner position.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Message {
    pub distance: [u16; N_CORNERS],
    pub intercept: [u16; N_CORNERS],
    pub range: [u16; N_CORNERS],
}

/// What a corner writes into its own slot.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SlotReading {
    pub distance: u16,
    pub intercept: u16,
    pub range: u16,
}

impl Message {
    /// Encoded size in bytes.
    pub const WIRE_LEN: usize = 3 * N_CORNERS * 2;

    /// Everything OFFLINE.
    pub const fn offline() -> Self {
        Self {
            distance: [OFFLINE; N_CORNERS],
            intercept: [OFFLINE; N_CORNERS],
            range: [OFFLINE; N_CORNERS],
        }
    }

    pub fn slot(&self, slot: SlotIndex) -> SlotReading {
        let i = slot.index();
        SlotReading {
            distance: self.distance[i],
            intercept: self.intercept[i],
            range: self.range[i],
        }
    }

    pub fn set_slot(&mut self, slot: SlotIndex, reading: SlotReading) {
        let i = slot.index();
        self.distance[i] = reading.distance;
        self.intercept[i] = reading.intercept;
        self.range[i] = reading.range;
    }

    pub fn to_bytes(&self) -> [u8; Self::WIRE_LEN] {
        let mut out = [0u8; Self::WIRE_LEN];
        let fields = self
            .distance
            .iter()
            .chain(self.intercept.iter())
            .chain(self.range.iter());
        for (chunk, v) in out.chunks_exact_mut(2).zip(fields) {
            chunk.copy_from_slice(&v.to_le_bytes());
        }
        out
    }

    /// Decode a payload that must be exactly [`Message::WIRE_LEN`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != Self::WIRE_LEN {
            return Err(DecodeError::Length {
                expected: Self::WIRE_LEN,
                actual: bytes.len(),
            });
        }

        let mut words = [0u16; 3 * N_CORNERS];
        for (w, chunk) in words.iter_mut().zip(bytes.chunks_exact(2)) {
            *w = u16::from_le_bytes([chunk[0], chunk[1]]);
        }

        Ok(Self {
            distance: [words[0], words[1], words[2]],
            intercept: [words[3], words[4], words[5]],
            range: [words[6], words[7], words[8]],
        })
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::offline()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "d 0={} 1={} 2={}",
            self.distance[0], self.distance[1], self.distance[2]
        )?;
        for i in 0..N_CORNERS {
            write!(f, "\tp {}={}- {}|", i, self.intercept[i], self.range[i])?;
        }
        Ok(())
    }
}

/// Network-wide operating mode.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum SystemMode {
    /// Ring running, corners forwarding readings.
    #[default]
    Normal,
    /// Channel reserved for reprogramming; corners stay silent.
    Program,
    /// Restart every node that hears it.
    Reboot,
}

impl SystemMode {
    /// Encoded size in bytes.
    pub const WIRE_LEN: usize = 2;

    pub const fn code(self) -> u16 {
        match self {
            SystemMode::Normal => 0,
            SystemMode::Program => 1,
            SystemMode::Reboot => 2,
        }
    }

    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(SystemMode::Normal),
            1 => Some(SystemMode::Program),
            2 => Some(SystemMode::Reboot),
            _ => None,
        }
    }

    pub fn to_bytes(self) -> [u8; Self::WIRE_LEN] {
        self.code().to_le_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let raw: [u8; Self::WIRE_LEN] = bytes.try_into().map_err(|_| DecodeError::Length {
            expected: Self::WIRE_LEN,
            actual: bytes.len(),
        })?;
        let code = u16::from_le_bytes(raw);
        Self::from_code(code).ok_or(DecodeError::UnknownMode(code))
    }
}

impl fmt::Display for SystemMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SystemMode::Normal => "NORMAL",
            SystemMode::Program => "PROGRAM",
            SystemMode::Reboot => "REBOOT",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_lengths_differ() {
        assert_eq!(Message::WIRE_LEN, 18);
        assert_eq!(SystemMode::WIRE_LEN, 2);
        assert_ne!(Message::WIRE_LEN, SystemMode::WIRE_LEN);
    }

    #[test]
    fn starts_offline() {
        let m = Message::default();
        assert!(m.distance.iter().all(|&v| v == OFFLINE));
        assert!(m.intercept.iter().all(|&v| v == OFFLINE));
        assert!(m.range.iter().all(|&v| v == OFFLINE));
    }

    #[test]
    fn field_layout_is_little_endian_in_order() {
        let m = Message {
            distance: [0x0102, 3, 4],
            intercept: [5, 6, 7],
            range: [8, 9, 0xA0B0],
        };
        let b = m.to_bytes();
        assert_eq!(&b[0..2], &[0x02, 0x01]);
        assert_eq!(&b[6..8], &[5, 0]);
        assert_eq!(&b[16..18], &[0xB0, 0xA0]);
        assert_eq!(Message::from_bytes(&b), Ok(m));
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            Message::from_bytes(&[0u8; 17]),
            Err(DecodeError::Length {
                expected: 18,
                actual: 17
            })
        );
        assert!(SystemMode::from_bytes(&[0u8; 3]).is_err());
    }

    #[test]
    fn mode_codes() {
        assert_eq!(SystemMode::from_bytes(&[2, 0]), Ok(SystemMode::Reboot));
        assert_eq!(SystemMode::Program.to_bytes(), [1, 0]);
        assert_eq!(
            SystemMode::from_bytes(&[9, 0]),
            Err(DecodeError::UnknownMode(9))
        );
    }

    #[test]
    fn slot_access() {
        let mut m = Message::offline();
        let [_, s1, _] = SlotIndex::group(0);
        let r = SlotReading {
            distance: 40,
            intercept: 100,
            range: 90,
        };
        m.set_slot(s1, r);
        assert_eq!(m.slot(s1), r);
        assert_eq!(m.distance, [OFFLINE, 40, OFFLINE]);
    }
}
