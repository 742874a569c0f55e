// rflink/src/protocol/commands/device.rs

//! Session and device housekeeping commands.

use crate::protocol::packet::CommandPacket;
use crate::protocol::registry::Opcode;
use crate::types::{DebugLevel, FrameFormat, OldArgs};

fn bare(opcode: Opcode) -> CommandPacket {
    CommandPacket {
        cmd: opcode.raw(),
        args: OldArgs::default(),
        data: Vec::new(),
        format: FrameFormat::Ng,
    }
}

/// Query the firmware version string.
pub fn version() -> CommandPacket {
    bare(Opcode::Version)
}

/// Query the device status summary.
pub fn status_query() -> CommandPacket {
    bare(Opcode::Status)
}

/// Query the capability descriptor. Issued once per connection by the
/// handshake.
pub fn capabilities_query() -> CommandPacket {
    bare(Opcode::Capabilities)
}

/// Tell the device the host is going away. No reply is expected.
pub fn quit_session() -> CommandPacket {
    bare(Opcode::QuitSession)
}

/// Set the device-side debug verbosity. `persist` survives a reboot on
/// devices with flash.
pub fn set_debug_level(level: DebugLevel, persist: bool) -> CommandPacket {
    CommandPacket {
        cmd: Opcode::SetDbgMode.raw(),
        args: OldArgs::default(),
        data: vec![level as u8, persist as u8],
        format: FrameFormat::Ng,
    }
}

/// Read back the device-side debug verbosity.
pub fn get_debug_level() -> CommandPacket {
    bare(Opcode::GetDbgMode)
}

/// Reboot the device. The connection is gone after this one.
pub fn hardware_reset() -> CommandPacket {
    bare(Opcode::HardwareReset)
}
