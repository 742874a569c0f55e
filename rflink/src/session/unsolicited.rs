// rflink/src/session/unsolicited.rs

//! Classification of frames the device sends on its own.
//!
//! While a command runs, the device may interleave debug output,
//! keep-alive acknowledgements and wait-time extensions with the actual
//! reply. The dispatcher consumes these, hands them to a side-channel
//! observer and keeps waiting; they never count as the caller's answer.

use crate::protocol::packet::ResponsePacket;
use crate::protocol::registry::Opcode;

/// What kind of out-of-band frame arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsolicitedKind {
    DebugString,
    DebugIntegers,
    DebugBytes,
    KeepAlive,
    WaitTimeExtension,
}

/// Side-channel callback invoked once per unsolicited frame.
pub type Observer = Box<dyn FnMut(UnsolicitedKind, &ResponsePacket)>;

/// Classify an opcode, returning `None` for ordinary replies.
pub fn classify(cmd: u16) -> Option<UnsolicitedKind> {
    match Opcode::from_raw(cmd)? {
        Opcode::DebugPrintString => Some(UnsolicitedKind::DebugString),
        Opcode::DebugPrintIntegers => Some(UnsolicitedKind::DebugIntegers),
        Opcode::DebugPrintBytes => Some(UnsolicitedKind::DebugBytes),
        Opcode::Ack => Some(UnsolicitedKind::KeepAlive),
        Opcode::Wtx => Some(UnsolicitedKind::WaitTimeExtension),
        _ => None,
    }
}

/// Text carried by a debug-print frame, lossily decoded.
pub fn debug_text(packet: &ResponsePacket) -> Option<String> {
    if classify(packet.cmd) != Some(UnsolicitedKind::DebugString) {
        return None;
    }
    Some(String::from_utf8_lossy(&packet.data).into_owned())
}

/// Requested wait extension in milliseconds, for a WTX frame.
pub fn wtx_ms(packet: &ResponsePacket) -> Option<u16> {
    if classify(packet.cmd) != Some(UnsolicitedKind::WaitTimeExtension) {
        return None;
    }
    let bytes = packet.data.get(..2)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}
