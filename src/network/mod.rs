// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Ring Network
//!
//! Three corner nodes pass one shared [`Message`](crate::protocol::Message) around a ring over
//! the radio. Everyone else listens.
//!
//! ## Modules
//!
//! - [`ring`] - node identities, ring order and turn-taking.
//! - [`identity`] - persisted identity and console recovery at startup.
//! - [`node`] - the per-node protocol endpoint.

pub mod identity;
pub mod node;
pub mod ring;

pub use identity::{IdentityPrompt, IdentityStore};
pub use node::Network;
pub use ring::{NodeId, Ring};
