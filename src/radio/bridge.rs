// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Radio coprocessor attached over a serial line.
//!
//! The coprocessor owns the packet radio (and its flash, for over-the-air images) and does the
//! acknowledgement/retry work itself. This side speaks a small framed protocol to it:
//!
//! ```text
//! START_BYTE | kind | len | body[len] | checksum
//! ```
//!
//! `checksum` is the wrapping sum of `kind`, `len` and the body bytes.

use heapless::{Deque, Vec};
use log::{debug, warn};
use thiserror::Error;

use crate::network::NodeId;
use crate::radio::{Received, Reprogrammer, Transport, MAX_PAYLOAD};

/// Sync byte for the bridge protocol.
pub const START_BYTE: u8 = 0xA5;

// Commands, host -> coprocessor
pub const CMD_INIT: u8 = 0x10;
pub const CMD_HIGH_POWER: u8 = 0x11;
pub const CMD_PROMISCUOUS: u8 = 0x12;
pub const CMD_POWER_LEVEL: u8 = 0x13;
pub const CMD_SEND_ACK: u8 = 0x14;
pub const CMD_SEND: u8 = 0x15;
pub const CMD_REPROGRAM: u8 = 0x16;

// Events, coprocessor -> host
pub const EVT_RECEIVED: u8 = 0x20;
pub const EVT_SEND_RESULT: u8 = 0x21;

/// sender, target, ack-requested
const RECEIVED_HEADER: usize = 3;
const MAX_BODY: usize = RECEIVED_HEADER + MAX_PAYLOAD;

/// Frames received while waiting on a send result.
const RX_QUEUE: usize = 4;

/// Polls of the serial port before giving up on a send result.
pub const DEFAULT_REPLY_POLLS: u32 = 2_000_000;

/// Byte-level serial link.
pub trait SerialPort {
    type Error: core::fmt::Debug;

    fn read(&mut self) -> nb::Result<u8, Self::Error>;
    fn write(&mut self, byte: u8) -> nb::Result<(), Self::Error>;
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BridgeError {
    #[error("checksum mismatch: got {actual:#04x}, expected {expected:#04x}")]
    Checksum { expected: u8, actual: u8 },

    #[error("frame body of {0} bytes exceeds limit")]
    Oversize(u8),

    #[error("unknown event {0:#04x}")]
    UnknownEvent(u8),

    #[error("malformed event {0:#04x}")]
    Malformed(u8),

    #[error("serial link error")]
    Serial,
}

/// Decoded coprocessor event.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    Received(Received),
    SendResult(bool),
}

enum State {
    WaitStart,
    WaitKind,
    WaitLen { kind: u8 },
    Body { kind: u8, len: u8 },
    WaitChecksum { kind: u8 },
}

/// Byte-at-a-time decoder for coprocessor events.
pub struct Parser {
    state: State,
    checksum: u8,
    body: Vec<u8, MAX_BODY>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            state: State::WaitStart,
            checksum: 0,
            body: Vec::new(),
        }
    }

    /// Process a single incoming byte. Returns `Ok(Some(_))` once a complete event is decoded.
    ///
    /// On any error the parser is already resynchronising on the next start byte.
    pub fn push(&mut self, byte: u8) -> Result<Option<Event>, BridgeError> {
        match self.state {
            State::WaitStart => {
                if byte == START_BYTE {
                    self.state = State::WaitKind;
                    self.checksum = 0;
                    self.body.clear();
                }
            }
            State::WaitKind => {
                self.checksum = self.checksum.wrapping_add(byte);
                match byte {
                    EVT_RECEIVED | EVT_SEND_RESULT => self.state = State::WaitLen { kind: byte },
                    _ => {
                        self.state = State::WaitStart;
                        return Err(BridgeError::UnknownEvent(byte));
                    }
                }
            }
            State::WaitLen { kind } => {
                self.checksum = self.checksum.wrapping_add(byte);
                if byte as usize > MAX_BODY {
                    self.state = State::WaitStart;
                    return Err(BridgeError::Oversize(byte));
                }
                self.state = if byte == 0 {
                    State::WaitChecksum { kind }
                } else {
                    State::Body { kind, len: byte }
                };
            }
            State::Body { kind, len } => {
                self.checksum = self.checksum.wrapping_add(byte);
                // Capacity was checked against `len` above.
                let _ = self.body.push(byte);
                if self.body.len() == len as usize {
                    self.state = State::WaitChecksum { kind };
                }
            }
            State::WaitChecksum { kind } => {
                self.state = State::WaitStart;
                if byte != self.checksum {
                    return Err(BridgeError::Checksum {
                        expected: self.checksum,
                        actual: byte,
                    });
                }
                return self.decode(kind).map(Some);
            }
        }
        Ok(None)
    }

    fn decode(&self, kind: u8) -> Result<Event, BridgeError> {
        match kind {
            EVT_RECEIVED => {
                if self.body.len() < RECEIVED_HEADER {
                    return Err(BridgeError::Malformed(kind));
                }
                let (header, payload) = self.body.split_at(RECEIVED_HEADER);
                Received::new(NodeId(header[0]), NodeId(header[1]), header[2] != 0, payload)
                    .map(Event::Received)
                    .ok_or(BridgeError::Malformed(kind))
            }
            EVT_SEND_RESULT => match self.body.as_slice() {
                [ok] => Ok(Event::SendResult(*ok != 0)),
                _ => Err(BridgeError::Malformed(kind)),
            },
            _ => Err(BridgeError::UnknownEvent(kind)),
        }
    }
}

/// [`Transport`] over a radio coprocessor.
pub struct SerialRadio<S> {
    port: S,
    parser: Parser,
    pending: Deque<Received, RX_QUEUE>,
    reply_polls: u32,
}

impl<S: SerialPort> SerialRadio<S> {
    pub fn new(port: S) -> Self {
        Self {
            port,
            parser: Parser::new(),
            pending: Deque::new(),
            reply_polls: DEFAULT_REPLY_POLLS,
        }
    }

    /// Give up on a send result after this many polls of the serial port, whatever they yield.
    pub fn with_reply_polls(mut self, polls: u32) -> Self {
        self.reply_polls = polls;
        self
    }

    pub fn free(self) -> S {
        self.port
    }

    /// Ask the coprocessor to run the reprogramming session `request` opened.
    pub fn hand_off_reprogram(&mut self, request: &Received) {
        self.command(CMD_REPROGRAM, &[request.sender.0], &[]);
    }

    /// Write one command frame. Serial errors are logged and the frame is abandoned.
    fn command(&mut self, kind: u8, header: &[u8], payload: &[u8]) {
        if let Err(e) = self.write_frame(kind, header, payload) {
            warn!("Bridge. command {:#04x} failed: {:?}", kind, e);
        }
    }

    fn write_frame(&mut self, kind: u8, header: &[u8], payload: &[u8]) -> Result<(), S::Error> {
        let len = (header.len() + payload.len()) as u8;
        let mut checksum = kind.wrapping_add(len);

        nb::block!(self.port.write(START_BYTE))?;
        nb::block!(self.port.write(kind))?;
        nb::block!(self.port.write(len))?;
        for &b in header.iter().chain(payload) {
            checksum = checksum.wrapping_add(b);
            nb::block!(self.port.write(b))?;
        }
        nb::block!(self.port.write(checksum))?;
        Ok(())
    }

    /// Drain available bytes until an event completes.
    fn poll_event(&mut self) -> nb::Result<Event, BridgeError> {
        loop {
            let byte = match self.port.read() {
                Ok(b) => b,
                Err(nb::Error::WouldBlock) => return Err(nb::Error::WouldBlock),
                Err(nb::Error::Other(e)) => {
                    debug!("Bridge. serial read: {:?}", e);
                    return Err(nb::Error::Other(BridgeError::Serial));
                }
            };
            if let Some(event) = self.parser.push(byte)? {
                return Ok(event);
            }
        }
    }

    fn queue(&mut self, rx: Received) {
        if self.pending.is_full() {
            warn!("Bridge. rx queue full, dropping frame");
            self.pending.pop_front();
        }
        let _ = self.pending.push_back(rx);
    }
}

impl<S: SerialPort> Transport for SerialRadio<S> {
    type Error = BridgeError;

    fn initialize(&mut self, frequency: u8, node: NodeId, group: u8) {
        self.command(CMD_INIT, &[frequency, node.0, group], &[]);
    }

    fn set_high_power(&mut self) {
        self.command(CMD_HIGH_POWER, &[], &[]);
    }

    fn set_promiscuous(&mut self, on: bool) {
        self.command(CMD_PROMISCUOUS, &[on as u8], &[]);
    }

    fn set_power_level(&mut self, level: u8) {
        self.command(CMD_POWER_LEVEL, &[level], &[]);
    }

    fn receive(&mut self) -> nb::Result<Received, BridgeError> {
        if let Some(rx) = self.pending.pop_front() {
            return Ok(rx);
        }
        loop {
            match self.poll_event()? {
                Event::Received(rx) => return Ok(rx),
                Event::SendResult(_) => debug!("Bridge. stray send result"),
            }
        }
    }

    fn send_ack(&mut self, to: NodeId) {
        self.command(CMD_SEND_ACK, &[to.0], &[]);
    }

    fn send_with_retry(&mut self, target: NodeId, payload: &[u8], retries: u8, timeout_ms: u16) -> bool {
        let [t_lo, t_hi] = timeout_ms.to_le_bytes();
        if let Err(e) = self.write_frame(CMD_SEND, &[target.0, retries, t_lo, t_hi], payload) {
            warn!("Bridge. send to {} failed: {:?}", target, e);
            return false;
        }

        for _ in 0..self.reply_polls {
            match self.poll_event() {
                Ok(Event::SendResult(ok)) => return ok,
                Ok(Event::Received(rx)) => self.queue(rx),
                Err(nb::Error::WouldBlock) => {}
                Err(nb::Error::Other(e)) => warn!("Bridge. {}", e),
            }
        }

        warn!("Bridge. no send result from coprocessor");
        false
    }
}

/// Hands reprogramming sessions to the coprocessor, which writes the image to its own flash.
pub struct Handoff;

impl<S: SerialPort> Reprogrammer<SerialRadio<S>> for Handoff {
    fn reprogram(&mut self, radio: &mut SerialRadio<S>, request: &Received) {
        radio.hand_off_reprogram(request);
    }
}
