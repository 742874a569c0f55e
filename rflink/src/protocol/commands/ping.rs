// rflink/src/protocol/commands/ping.rs

use crate::constants::PING_ECHO_LEN;
use crate::protocol::packet::{CommandPacket, ResponsePacket};
use crate::protocol::registry::Opcode;
use crate::types::{FrameFormat, OldArgs};
use crate::{Error, Result};

/// Deterministic echo pattern for a keep-alive ping.
pub fn default_token() -> [u8; PING_ECHO_LEN] {
    core::array::from_fn(|i| i as u8)
}

/// Ping with the default echo token.
pub fn ping() -> CommandPacket {
    ping_with(&default_token())
}

/// Ping carrying an arbitrary echo payload. The device answers with the
/// same opcode and the same bytes; anything else means the two sides
/// lost sync.
pub fn ping_with(token: &[u8]) -> CommandPacket {
    CommandPacket {
        cmd: Opcode::Ping.raw(),
        args: OldArgs::default(),
        data: token.to_vec(),
        format: FrameFormat::Ng,
    }
}

/// Verify a ping reply echoes the token that was sent.
pub fn check_echo(sent: &[u8], reply: &ResponsePacket) -> Result<()> {
    reply.require_success()?;
    if reply.data != sent {
        return Err(Error::WrongAnswer(format!(
            "ping echoed {} bytes that do not match the {} sent",
            reply.data.len(),
            sent.len()
        )));
    }
    Ok(())
}
