// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Ring protocol endpoint for one node.
//!
//! Typical corner loop:
//!
//! ```ignore
//! loop {
//!     network.update();
//!     if network.me_next() {
//!         network.publish(geometry.reading(slot));
//!         network.send();
//!     }
//! }
//! ```

use log::{debug, info, warn};

use crate::config::{resend_interval_ms, NetworkConfig};
use crate::geometry::slot::SlotIndex;
use crate::geometry::triangulation::GEOMETRY_GROUP;
use crate::network::identity::{self, IdentityPrompt, IdentityStore};
use crate::network::ring::{NodeId, Ring};
use crate::protocol::{Frame, Message, SlotReading, SystemMode};
use crate::radio::{Rebooter, Reprogrammer, Transport};

/// Protocol state and the collaborators it drives.
pub struct Network<T, P, B> {
    radio: T,
    reprogrammer: P,
    rebooter: B,

    config: NetworkConfig,
    ring: Ring,
    me: NodeId,
    mode: SystemMode,
    last_sender: NodeId,
    msg: Message,

    /// Ack timeout for one ring message (ms)
    resend_interval: u16,
}

impl<T, P, B> Network<T, P, B>
where
    T: Transport,
    P: Reprogrammer<T>,
    B: Rebooter,
{
    /// Resolve identity, bring the radio up and reset the ring state.
    ///
    /// Blocks on `console` if no valid identity is stored and none is `assigned`.
    ///
    /// Returns `None` if `config` does not describe a three-corner ring.
    pub fn begin<S, C>(
        mut radio: T,
        reprogrammer: P,
        rebooter: B,
        store: &mut S,
        console: &mut C,
        config: NetworkConfig,
        assigned: Option<NodeId>,
    ) -> Option<Self>
    where
        S: IdentityStore,
        C: IdentityPrompt,
    {
        info!("Network. startup.");
        let ring = Ring::new(config.first_corner, config.last_corner)?;
        let me = identity::resolve(store, console, assigned);

        radio.initialize(config.frequency, me, config.group);
        radio.set_high_power();
        radio.set_promiscuous(true);
        radio.set_power_level(config.power_level);

        let resend_interval = resend_interval_ms(Message::WIRE_LEN);
        info!(
            "Network. packet size(bytes)={} will resend packets every(ms)={}",
            Message::WIRE_LEN,
            resend_interval
        );

        let mut network = Self {
            radio,
            reprogrammer,
            rebooter,
            config,
            ring,
            me,
            mode: SystemMode::Normal,
            last_sender: config.bootstrap_sender,
            msg: Message::offline(),
            resend_interval,
        };
        network.set_mode(SystemMode::Normal);

        info!("Network. startup complete with node number={}", me);
        Some(network)
    }

    /// Service at most one inbound frame. Never blocks.
    ///
    /// Returns `true` only when a ring record was taken in.
    pub fn update(&mut self) -> bool {
        let activity = match self.radio.receive() {
            Ok(rx) => {
                let for_me = rx.is_for(self.me);
                match Frame::decode(&rx.payload, for_me) {
                    Ok(Frame::Data(msg)) => {
                        self.msg = msg;
                        self.last_sender = rx.sender;
                        if for_me && rx.ack_requested {
                            self.radio.send_ack(rx.sender);
                        }
                        true
                    }
                    Ok(Frame::Reprogram) => {
                        info!("Network. reprogram request from {}", rx.sender);
                        self.reprogrammer.reprogram(&mut self.radio, &rx);
                        return false;
                    }
                    Ok(Frame::ModeChange(mode)) => {
                        self.set_mode(mode);
                        false
                    }
                    Ok(Frame::Unrecognized) => {
                        if rx.sender == self.config.programmer {
                            info!("Network. Programmer traffic.");
                            self.set_mode(SystemMode::Program);
                        }
                        false
                    }
                    Err(e) => {
                        warn!("Network. dropped frame from {}: {}", rx.sender, e);
                        false
                    }
                }
            }
            Err(nb::Error::WouldBlock) => false,
            Err(nb::Error::Other(e)) => {
                warn!("Network. receive failed: {:?}", e);
                false
            }
        };

        if self.mode == SystemMode::Reboot {
            self.rebooter.reboot();
        }

        activity
    }

    /// Forward the current record to the next corner, blocking until it is acknowledged.
    ///
    /// Skipped while the channel is reserved for reprogramming. Inbound traffic keeps being
    /// serviced between attempts. Returns the number of reliable-send attempts it took.
    pub fn send(&mut self) -> Option<u32> {
        if self.mode == SystemMode::Program {
            return None;
        }

        // Don't clobber a record that is already on its way to us.
        self.update();
        if self.mode == SystemMode::Program {
            return None;
        }

        let next = self.ring.successor(self.me);
        let mut attempts = 1;
        // Records heard between attempts replace ours, so re-encode each time.
        while !self.radio.send_with_retry(
            next,
            &self.msg.to_bytes(),
            self.config.send_retries,
            self.resend_interval,
        ) {
            self.update();
            attempts += 1;
        }
        if attempts > 1 {
            debug!("Network. {} delivered after {} attempts", next, attempts);
        }

        self.last_sender = self.me;
        Some(attempts)
    }

    /// Write this node's own slot. Non-corner nodes have no slot and are ignored.
    pub fn publish(&mut self, reading: SlotReading) {
        if let Some(slot) = self.my_slot() {
            self.msg.set_slot(slot, reading);
        }
    }

    #[inline]
    pub fn who_am_i(&self) -> NodeId {
        self.me
    }

    #[inline]
    pub fn mode(&self) -> SystemMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SystemMode) {
        info!("Network. setting systemState={}", mode);
        self.mode = mode;
    }

    /// Ring successor of the last sender is us.
    #[inline]
    pub fn me_next(&self) -> bool {
        self.ring.is_next(self.last_sender, self.me)
    }

    /// We spoke last and nobody has spoken since.
    #[inline]
    pub fn me_last(&self) -> bool {
        self.last_sender == self.me
    }

    #[inline]
    pub fn last_sender(&self) -> NodeId {
        self.last_sender
    }

    #[inline]
    pub fn message(&self) -> &Message {
        &self.msg
    }

    #[inline]
    pub fn ring(&self) -> Ring {
        self.ring
    }

    #[inline]
    pub fn resend_interval(&self) -> u16 {
        self.resend_interval
    }

    /// Own slot in the shared record, if this node is a corner.
    pub fn my_slot(&self) -> Option<SlotIndex> {
        if !self.ring.contains(self.me) {
            return None;
        }
        Ring::slot_of(self.me, self.config.slot_base, GEOMETRY_GROUP)
    }

    pub fn my_distance(&self) -> Option<u16> {
        self.my_slot().map(|s| self.msg.slot(s).distance)
    }

    pub fn my_range(&self) -> Option<u16> {
        self.my_slot().map(|s| self.msg.slot(s).range)
    }

    pub fn my_intercept(&self) -> Option<u16> {
        self.my_slot().map(|s| self.msg.slot(s).intercept)
    }

    /// Some corner sees the object inside the arena.
    pub fn object_in_plane(&self) -> bool {
        self.msg.distance.iter().any(|&d| d <= self.config.in_plane)
    }

    /// Dump the current record to the log.
    pub fn log_message(&self) {
        debug!("Network. MSG from {}\t{}", self.last_sender, self.msg);
    }

    pub fn radio(&mut self) -> &mut T {
        &mut self.radio
    }
}
