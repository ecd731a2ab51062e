// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Node identity resolution at startup.
//!
//! The identity lives in one byte of persistent storage. A missing or out-of-range value is a
//! configuration fault that only a person at the console can fix, so resolution blocks on the
//! console until a number is entered, stores it, and tries again.

use log::{error, info, warn};

use crate::config::IDENTITY_OFFSET;
use crate::network::NodeId;

/// Byte-addressed persistent storage.
pub trait IdentityStore {
    fn read(&mut self, offset: u16) -> u8;
    /// Write `value` if it differs from what is stored.
    fn update(&mut self, offset: u16, value: u8);
}

/// Operator console used to recover from a missing identity.
pub trait IdentityPrompt {
    type Error: core::fmt::Debug;

    /// Ask the operator for a node number.
    fn prompt(&mut self);

    /// Number typed by the operator. `WouldBlock` until a full entry is available.
    fn read_identity(&mut self) -> nb::Result<u8, Self::Error>;
}

/// Resolve this node's identity.
///
/// An explicit `assigned` identity is stored and used. Otherwise the stored value is used. Only
/// returns once a valid identity is known.
pub fn resolve<S, P>(store: &mut S, console: &mut P, assigned: Option<NodeId>) -> NodeId
where
    S: IdentityStore,
    P: IdentityPrompt,
{
    let mut assigned = assigned;

    loop {
        let raw = match assigned.take() {
            Some(id) => {
                info!("Network. writing nodeID to storage={}", id);
                store.update(IDENTITY_OFFSET, id.0);
                id.0
            }
            None => {
                let raw = store.read(IDENTITY_OFFSET);
                info!("Network. read nodeID from storage={}", raw);
                raw
            }
        };

        if let Some(id) = NodeId::from_stored(raw) {
            return id;
        }

        error!("Network. no valid nodeID in storage ({})", raw);
        console.prompt();
        match nb::block!(console.read_identity()) {
            Ok(entered) => store.update(IDENTITY_OFFSET, entered),
            Err(e) => warn!("Network. console read failed: {:?}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::collections::VecDeque;
    use std::vec::Vec;

    struct Store {
        bytes: [u8; 64],
        writes: usize,
    }

    impl Default for Store {
        fn default() -> Self {
            Self {
                bytes: [0; 64],
                writes: 0,
            }
        }
    }

    impl IdentityStore for Store {
        fn read(&mut self, offset: u16) -> u8 {
            self.bytes[offset as usize]
        }

        fn update(&mut self, offset: u16, value: u8) {
            if self.bytes[offset as usize] != value {
                self.bytes[offset as usize] = value;
                self.writes += 1;
            }
        }
    }

    /// Console that replays scripted polls. `None` polls are `WouldBlock`.
    struct Console {
        polls: VecDeque<Option<Result<u8, ()>>>,
        prompts: usize,
    }

    impl Console {
        fn new(polls: Vec<Option<Result<u8, ()>>>) -> Self {
            Self {
                polls: polls.into(),
                prompts: 0,
            }
        }
    }

    impl IdentityPrompt for Console {
        type Error = ();

        fn prompt(&mut self) {
            self.prompts += 1;
        }

        fn read_identity(&mut self) -> nb::Result<u8, ()> {
            match self.polls.pop_front().expect("console polled past script") {
                None => Err(nb::Error::WouldBlock),
                Some(Ok(v)) => Ok(v),
                Some(Err(e)) => Err(nb::Error::Other(e)),
            }
        }
    }

    fn store_with(value: u8) -> Store {
        let mut s = Store::default();
        s.bytes[IDENTITY_OFFSET as usize] = value;
        s
    }

    #[test]
    fn uses_stored_identity() {
        let mut store = store_with(11);
        let mut console = Console::new(Vec::new());
        assert_eq!(resolve(&mut store, &mut console, None), NodeId(11));
        assert_eq!(console.prompts, 0);
        assert_eq!(store.writes, 0);
    }

    #[test]
    fn explicit_identity_is_persisted() {
        let mut store = store_with(NodeId::UNSET);
        let mut console = Console::new(Vec::new());
        assert_eq!(resolve(&mut store, &mut console, Some(NodeId(12))), NodeId(12));
        assert_eq!(store.bytes[IDENTITY_OFFSET as usize], 12);
        assert_eq!(console.prompts, 0);
    }

    #[test]
    fn unset_identity_blocks_for_console() {
        let mut store = store_with(NodeId::UNSET);
        let mut console = Console::new(vec![None, None, Some(Ok(10))]);
        assert_eq!(resolve(&mut store, &mut console, None), NodeId(10));
        assert_eq!(console.prompts, 1);
        assert_eq!(store.bytes[IDENTITY_OFFSET as usize], 10);
    }

    #[test]
    fn keeps_asking_until_valid() {
        let mut store = store_with(230);
        let mut console = Console::new(vec![Some(Err(())), Some(Ok(201)), Some(Ok(12))]);
        assert_eq!(resolve(&mut store, &mut console, None), NodeId(12));
        assert_eq!(console.prompts, 3);
    }

    #[test]
    fn invalid_explicit_identity_falls_back_to_console() {
        let mut store = store_with(5);
        let mut console = Console::new(vec![Some(Ok(11))]);
        assert_eq!(resolve(&mut store, &mut console, Some(NodeId(250))), NodeId(11));
        assert_eq!(console.prompts, 1);
    }
}
