// rflink/src/protocol/packet.rs

//! In-memory packet model.
//!
//! Every command handler works against these two shapes regardless of
//! which wire format a frame traveled in; the codec raises decoded
//! frames into them and lowers them back onto the wire. A packet is
//! built by one producer and consumed by exactly one dispatch call.

use crate::constants::{CMD_DATA_SIZE, CMD_DATA_SIZE_MIX};
use crate::protocol::registry::{self, Opcode};
use crate::status::{REASON_UNKNOWN, Status};
use crate::types::{FrameFormat, OldArgs};
use crate::{Error, Result};

pub(crate) fn check_payload(len: usize, max: usize) -> Result<()> {
    if len > max {
        return Err(Error::PayloadOverflow { len, max });
    }
    Ok(())
}

/// Status synthesized for a legacy frame, which has no status byte of
/// its own. The ACK/NACK sentinels carry their meaning in the opcode.
pub(crate) fn legacy_status(cmd: u16) -> Status {
    if cmd == Opcode::Nack.raw() {
        Status::WrongAnswer
    } else {
        Status::Success
    }
}

/// A host-to-device request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommandPacket {
    /// Raw 16-bit opcode. Kept raw so frames with opcodes this build
    /// does not know can still pass through; see the registry.
    pub cmd: u16,
    /// Legacy arguments, meaningful for the `Mix` and `Old` shapes.
    pub args: OldArgs,
    pub data: Vec<u8>,
    /// Wire shape this packet should be encoded in.
    pub format: FrameFormat,
}

impl CommandPacket {
    /// Self-describing command with a variable-length payload.
    pub fn ng(cmd: u16, data: impl Into<Vec<u8>>) -> Result<Self> {
        let data = data.into();
        check_payload(data.len(), CMD_DATA_SIZE)?;
        Ok(Self {
            cmd,
            args: OldArgs::default(),
            data,
            format: FrameFormat::Ng,
        })
    }

    /// Compatibility command: legacy arguments folded into the front of
    /// a self-describing container.
    pub fn mix(cmd: u16, args: OldArgs, data: impl Into<Vec<u8>>) -> Result<Self> {
        let data = data.into();
        check_payload(data.len(), CMD_DATA_SIZE_MIX)?;
        Ok(Self {
            cmd,
            args,
            data,
            format: FrameFormat::Mix,
        })
    }

    /// Fixed-size legacy command.
    pub fn old(cmd: u16, args: OldArgs, data: impl Into<Vec<u8>>) -> Result<Self> {
        let data = data.into();
        check_payload(data.len(), CMD_DATA_SIZE)?;
        Ok(Self {
            cmd,
            args,
            data,
            format: FrameFormat::Old,
        })
    }

    /// Registry view of the opcode, if this build knows it.
    pub fn opcode(&self) -> Option<Opcode> {
        Opcode::from_raw(self.cmd)
    }

    /// Registry entry for the opcode, if any.
    pub fn definition(&self) -> Option<&'static registry::CommandDef> {
        registry::lookup(self.cmd)
    }
}

/// A device-to-host reply or notification.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResponsePacket {
    pub cmd: u16,
    pub status: Status,
    /// Refinement of a failure status; [`REASON_UNKNOWN`] when the
    /// device did not supply one. Only meaningful when the status is
    /// not success.
    pub reason: i8,
    /// Legacy arguments, meaningful for the `Mix` and `Old` shapes.
    pub args: OldArgs,
    pub data: Vec<u8>,
    /// Wire shape this packet was decoded from or will be encoded in.
    pub format: FrameFormat,
}

impl ResponsePacket {
    /// Self-describing response. Used by the device side of a link and
    /// by tests simulating one.
    pub fn ng(cmd: u16, status: Status, data: impl Into<Vec<u8>>) -> Result<Self> {
        let data = data.into();
        check_payload(data.len(), CMD_DATA_SIZE)?;
        Ok(Self {
            cmd,
            status,
            reason: REASON_UNKNOWN,
            args: OldArgs::default(),
            data,
            format: FrameFormat::Ng,
        })
    }

    /// Compatibility response carrying legacy arguments.
    pub fn mix(
        cmd: u16,
        status: Status,
        args: OldArgs,
        data: impl Into<Vec<u8>>,
    ) -> Result<Self> {
        let data = data.into();
        check_payload(data.len(), CMD_DATA_SIZE_MIX)?;
        Ok(Self {
            cmd,
            status,
            reason: REASON_UNKNOWN,
            args,
            data,
            format: FrameFormat::Mix,
        })
    }

    /// Fixed-size legacy response. The status is synthesized from the
    /// opcode since the format has no status concept.
    pub fn old(cmd: u16, args: OldArgs, data: impl Into<Vec<u8>>) -> Result<Self> {
        let data = data.into();
        check_payload(data.len(), CMD_DATA_SIZE)?;
        Ok(Self {
            cmd,
            status: legacy_status(cmd),
            reason: REASON_UNKNOWN,
            args,
            data,
            format: FrameFormat::Old,
        })
    }

    /// Attach a reason code refining a failure status.
    pub fn with_reason(mut self, reason: i8) -> Self {
        self.reason = reason;
        self
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Turn a device-reported failure into a typed error.
    pub fn require_success(&self) -> Result<()> {
        if self.status.is_success() {
            Ok(())
        } else {
            Err(Error::Device {
                status: self.status,
                reason: self.reason,
            })
        }
    }

    pub fn opcode(&self) -> Option<Opcode> {
        Opcode::from_raw(self.cmd)
    }
}
