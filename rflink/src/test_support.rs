//! Test support helpers intended for use by unit and integration tests.
//!
//! These centralize common transport setup so tests across the crate and
//! the tests/ directory share one vocabulary: a clonable mock the test
//! can keep inspecting after the session took ownership, canned response
//! frames, and a minimal legacy-only device simulation.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use crate::capabilities::Capabilities;
use crate::constants::OLD_FRAME_SIZE;
use crate::protocol::frame;
use crate::protocol::registry::Opcode;
use crate::session::{Ready, Session};
use crate::status::Status;
use crate::transport::mock::MockTransport;
use crate::transport::traits::Transport;
use crate::types::{FrameFormat, OldArgs};
use crate::Result;

/// Clonable handle over a [`MockTransport`], so a test can seed reads
/// and inspect writes after handing a clone to the session.
#[derive(Clone, Default)]
pub struct SharedMock(Rc<RefCell<MockTransport>>);

impl SharedMock {
    #[doc(hidden)]
    pub fn new() -> Self {
        Self::default()
    }

    #[doc(hidden)]
    pub fn push_bytes(&self, bytes: Vec<u8>) {
        self.0.borrow_mut().push_bytes(bytes);
    }

    #[doc(hidden)]
    pub fn push_chunked(&self, bytes: &[u8], piece: usize) {
        self.0.borrow_mut().push_chunked(bytes, piece);
    }

    #[doc(hidden)]
    pub fn written(&self) -> Vec<u8> {
        self.0.borrow().written()
    }

    #[doc(hidden)]
    pub fn writes(&self) -> usize {
        self.0.borrow().sent.len()
    }
}

impl Transport for SharedMock {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.0.borrow_mut().write(data)
    }

    fn read(&mut self, max: usize, timeout: Duration) -> Result<Vec<u8>> {
        self.0.borrow_mut().read(max, timeout)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Encode a canned self-describing success response.
#[doc(hidden)]
pub fn ng_reply(opcode: Opcode, data: &[u8]) -> Vec<u8> {
    frame::encode_response_ng(opcode.raw(), Status::Success, -1, data)
        .expect("canned reply fits the payload cap")
}

/// Encode a canned self-describing response with an explicit status.
#[doc(hidden)]
pub fn ng_reply_status(opcode: Opcode, status: Status, reason: i8, data: &[u8]) -> Vec<u8> {
    frame::encode_response_ng(opcode.raw(), status, reason, data)
        .expect("canned reply fits the payload cap")
}

/// Queue the two frames a modern handshake consumes: the ping echo and
/// the capabilities reply.
#[doc(hidden)]
pub fn seed_modern_handshake(mock: &SharedMock, caps: &Capabilities) {
    let token = crate::protocol::commands::ping::default_token();
    mock.push_bytes(ng_reply(Opcode::Ping, &token));
    mock.push_bytes(ng_reply(Opcode::Capabilities, &caps.encode()));
}

/// A negotiated modern session over a [`SharedMock`], skipping the wire
/// handshake. The caller keeps the clone for seeding and inspection.
#[doc(hidden)]
pub fn ready_session(mock: &SharedMock, caps: Capabilities) -> Session<Ready> {
    Session::attach(Box::new(mock.clone())).assume_negotiated(FrameFormat::Ng, caps)
}

/// Minimal simulation of a device that only speaks the legacy format:
/// it ignores anything that is not a full fixed-size frame, answers a
/// ping with the keep-alive sentinel and the capabilities query with its
/// descriptor.
pub struct LegacyDeviceSim {
    caps: Capabilities,
    outbound: VecDeque<Vec<u8>>,
}

impl LegacyDeviceSim {
    #[doc(hidden)]
    pub fn new(caps: Capabilities) -> Self {
        Self {
            caps,
            outbound: VecDeque::new(),
        }
    }

    fn reply(&mut self, bytes: Vec<u8>) {
        self.outbound.push_back(bytes);
    }
}

impl Transport for LegacyDeviceSim {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        if data.len() != OLD_FRAME_SIZE {
            // A legacy device reads fixed-size frames; anything else
            // never completes a read on its side.
            return Ok(());
        }
        let Ok(Some((cmd, _))) = frame::decode_command(data, FrameFormat::Old) else {
            return Ok(());
        };
        match Opcode::from_raw(cmd.cmd) {
            Some(Opcode::Ping) => {
                let ack =
                    frame::encode_response_old(Opcode::Ack.raw(), &OldArgs::default(), &[])?;
                self.reply(ack);
            }
            Some(Opcode::Capabilities) => {
                let descriptor = self.caps.encode();
                let reply = frame::encode_response_old(
                    Opcode::Capabilities.raw(),
                    &OldArgs::default(),
                    &descriptor,
                )?;
                self.reply(reply);
            }
            _ => {}
        }
        Ok(())
    }

    fn read(&mut self, max: usize, _timeout: Duration) -> Result<Vec<u8>> {
        let Some(front) = self.outbound.front_mut() else {
            return Err(crate::Error::Timeout);
        };
        if front.len() <= max {
            Ok(self.outbound.pop_front().unwrap_or_default())
        } else {
            let rest = front.split_off(max);
            Ok(std::mem::replace(front, rest))
        }
    }

    fn name(&self) -> &str {
        "legacy-sim"
    }
}
