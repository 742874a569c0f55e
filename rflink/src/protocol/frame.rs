// rflink/src/protocol/frame.rs

//! Wire frame codecs.
//!
//! Three shapes travel on the link:
//!
//! * `NG`: `[magic u32][length:15|flag:1 u16][opcode u16][payload][crc u16]`
//!   for commands; responses insert a status and a reason byte between
//!   the length word and the opcode. The CRC covers everything after the
//!   magic word.
//! * `MIX`: the same container with the flag bit clear; the payload
//!   opens with three folded 64-bit legacy arguments.
//! * `OLD`: a fixed 544-byte image with a 64-bit opcode, three 64-bit
//!   arguments and a full 512-byte payload region. No length, no CRC.
//!
//! Which decoder runs is decided by the connection's negotiated
//! [`FrameFormat`], never re-inferred per frame: the legacy format has
//! no self-describing marker, so sniffing it from the byte stream would
//! be ambiguous. Decoders are incremental and return `Ok(None)` until
//! the buffer holds a complete frame; they never partially accept one.

use crate::constants::{
    CMD_DATA_SIZE, CMD_PREAMBLE_MAGIC, NG_CMD_PREAMBLE_LEN, NG_FLAG_BIT, NG_LENGTH_MASK,
    NG_POSTAMBLE_LEN, NG_RESP_PREAMBLE_LEN, OLD_ARG_COUNT, OLD_FRAME_SIZE, RESP_PREAMBLE_MAGIC,
};
use crate::protocol::crc::frame_crc;
use crate::protocol::packet::{CommandPacket, ResponsePacket, check_payload, legacy_status};
use crate::status::Status;
use crate::types::{FrameFormat, OldArgs};
use crate::{Error, Result};

const ARGS_LEN: usize = OLD_ARG_COUNT * 8;

fn le_u16(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}

fn le_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

fn le_u64(buf: &[u8], at: usize) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&buf[at..at + 8]);
    u64::from_le_bytes(word)
}

/// Encode a command for the negotiated connection format.
///
/// On a legacy connection every packet is lowered to the fixed OLD
/// image. On a modern connection the packet's own shape decides between
/// the self-describing and the mixed container; a packet built as `Old`
/// travels in the mixed container, which carries the same arguments.
pub fn encode_command(packet: &CommandPacket, link: FrameFormat) -> Result<Vec<u8>> {
    match (link, packet.format) {
        (FrameFormat::Old, _) => encode_command_old(packet.cmd, &packet.args, &packet.data),
        (_, FrameFormat::Ng) => encode_command_ng(packet.cmd, &packet.data),
        (_, FrameFormat::Mix | FrameFormat::Old) => {
            encode_command_mix(packet.cmd, &packet.args, &packet.data)
        }
    }
}

/// Encode a self-describing command frame.
pub fn encode_command_ng(cmd: u16, data: &[u8]) -> Result<Vec<u8>> {
    check_payload(data.len(), CMD_DATA_SIZE)?;
    let mut out = Vec::with_capacity(NG_CMD_PREAMBLE_LEN + data.len() + NG_POSTAMBLE_LEN);
    out.extend_from_slice(&CMD_PREAMBLE_MAGIC.to_le_bytes());
    out.extend_from_slice(&(data.len() as u16 | NG_FLAG_BIT).to_le_bytes());
    out.extend_from_slice(&cmd.to_le_bytes());
    out.extend_from_slice(data);
    let crc = frame_crc(&out[4..]);
    out.extend_from_slice(&crc.to_le_bytes());
    Ok(out)
}

/// Encode a mixed-container command frame: legacy arguments folded into
/// the front of the payload, flag bit clear.
pub fn encode_command_mix(cmd: u16, args: &OldArgs, data: &[u8]) -> Result<Vec<u8>> {
    check_payload(data.len(), CMD_DATA_SIZE - ARGS_LEN)?;
    let length = ARGS_LEN + data.len();
    let mut out = Vec::with_capacity(NG_CMD_PREAMBLE_LEN + length + NG_POSTAMBLE_LEN);
    out.extend_from_slice(&CMD_PREAMBLE_MAGIC.to_le_bytes());
    out.extend_from_slice(&(length as u16).to_le_bytes());
    out.extend_from_slice(&cmd.to_le_bytes());
    out.extend_from_slice(&args.to_bytes());
    out.extend_from_slice(data);
    let crc = frame_crc(&out[4..]);
    out.extend_from_slice(&crc.to_le_bytes());
    Ok(out)
}

/// Encode a fixed-size legacy command frame. The payload region is
/// zero-padded; nothing on the wire says how much of it is meaningful.
pub fn encode_command_old(cmd: u16, args: &OldArgs, data: &[u8]) -> Result<Vec<u8>> {
    check_payload(data.len(), CMD_DATA_SIZE)?;
    let mut out = Vec::with_capacity(OLD_FRAME_SIZE);
    out.extend_from_slice(&(cmd as u64).to_le_bytes());
    out.extend_from_slice(&args.to_bytes());
    out.extend_from_slice(data);
    out.resize(OLD_FRAME_SIZE, 0);
    Ok(out)
}

/// Encode a response for the negotiated connection format.
pub fn encode_response(packet: &ResponsePacket, link: FrameFormat) -> Result<Vec<u8>> {
    match (link, packet.format) {
        (FrameFormat::Old, _) => encode_response_old(packet.cmd, &packet.args, &packet.data),
        (_, FrameFormat::Ng) => {
            encode_response_ng(packet.cmd, packet.status, packet.reason, &packet.data)
        }
        (_, FrameFormat::Mix | FrameFormat::Old) => encode_response_mix(
            packet.cmd,
            packet.status,
            packet.reason,
            &packet.args,
            &packet.data,
        ),
    }
}

/// Encode a self-describing response frame.
pub fn encode_response_ng(cmd: u16, status: Status, reason: i8, data: &[u8]) -> Result<Vec<u8>> {
    check_payload(data.len(), CMD_DATA_SIZE)?;
    let mut out = Vec::with_capacity(NG_RESP_PREAMBLE_LEN + data.len() + NG_POSTAMBLE_LEN);
    out.extend_from_slice(&RESP_PREAMBLE_MAGIC.to_le_bytes());
    out.extend_from_slice(&(data.len() as u16 | NG_FLAG_BIT).to_le_bytes());
    out.push(status.code() as u8);
    out.push(reason as u8);
    out.extend_from_slice(&cmd.to_le_bytes());
    out.extend_from_slice(data);
    let crc = frame_crc(&out[4..]);
    out.extend_from_slice(&crc.to_le_bytes());
    Ok(out)
}

/// Encode a mixed-container response frame.
pub fn encode_response_mix(
    cmd: u16,
    status: Status,
    reason: i8,
    args: &OldArgs,
    data: &[u8],
) -> Result<Vec<u8>> {
    check_payload(data.len(), CMD_DATA_SIZE - ARGS_LEN)?;
    let length = ARGS_LEN + data.len();
    let mut out = Vec::with_capacity(NG_RESP_PREAMBLE_LEN + length + NG_POSTAMBLE_LEN);
    out.extend_from_slice(&RESP_PREAMBLE_MAGIC.to_le_bytes());
    out.extend_from_slice(&(length as u16).to_le_bytes());
    out.push(status.code() as u8);
    out.push(reason as u8);
    out.extend_from_slice(&cmd.to_le_bytes());
    out.extend_from_slice(&args.to_bytes());
    out.extend_from_slice(data);
    let crc = frame_crc(&out[4..]);
    out.extend_from_slice(&crc.to_le_bytes());
    Ok(out)
}

/// Encode a fixed-size legacy response frame.
pub fn encode_response_old(cmd: u16, args: &OldArgs, data: &[u8]) -> Result<Vec<u8>> {
    check_payload(data.len(), CMD_DATA_SIZE)?;
    let mut out = Vec::with_capacity(OLD_FRAME_SIZE);
    out.extend_from_slice(&(cmd as u64).to_le_bytes());
    out.extend_from_slice(&args.to_bytes());
    out.extend_from_slice(data);
    out.resize(OLD_FRAME_SIZE, 0);
    Ok(out)
}

/// Try to decode one response frame from the front of `buf`.
///
/// `Ok(None)` means the buffer does not yet hold a complete frame; the
/// caller should read more bytes. `Ok(Some((packet, used)))` hands back
/// the packet and how many bytes it consumed. Structural or CRC
/// failures discard nothing by themselves; the caller owns
/// resynchronization.
pub fn decode_response(buf: &[u8], link: FrameFormat) -> Result<Option<(ResponsePacket, usize)>> {
    match link {
        FrameFormat::Old => decode_response_old(buf),
        FrameFormat::Ng | FrameFormat::Mix => decode_response_ng(buf),
    }
}

fn decode_response_ng(buf: &[u8]) -> Result<Option<(ResponsePacket, usize)>> {
    if buf.len() < 4 {
        return Ok(None);
    }
    let magic = le_u32(buf, 0);
    if magic != RESP_PREAMBLE_MAGIC {
        return Err(Error::Malformed(format!(
            "bad response magic {magic:#010x}"
        )));
    }
    if buf.len() < NG_RESP_PREAMBLE_LEN {
        return Ok(None);
    }
    let word = le_u16(buf, 4);
    let length = (word & NG_LENGTH_MASK) as usize;
    let ng = word & NG_FLAG_BIT != 0;
    if length > CMD_DATA_SIZE {
        return Err(Error::Malformed(format!(
            "declared payload length {length} exceeds cap"
        )));
    }
    let total = NG_RESP_PREAMBLE_LEN + length + NG_POSTAMBLE_LEN;
    if buf.len() < total {
        return Ok(None);
    }
    let expected = frame_crc(&buf[4..NG_RESP_PREAMBLE_LEN + length]);
    let actual = le_u16(buf, NG_RESP_PREAMBLE_LEN + length);
    if expected != actual {
        return Err(Error::Crc { expected, actual });
    }

    let status = Status::from_code(buf[6] as i8);
    let reason = buf[7] as i8;
    let cmd = le_u16(buf, 8);
    let payload = &buf[NG_RESP_PREAMBLE_LEN..NG_RESP_PREAMBLE_LEN + length];

    let packet = if ng {
        ResponsePacket {
            cmd,
            status,
            reason,
            args: OldArgs::default(),
            data: payload.to_vec(),
            format: FrameFormat::Ng,
        }
    } else {
        if length < ARGS_LEN {
            return Err(Error::Malformed(format!(
                "mixed payload of {length} bytes cannot hold the legacy arguments"
            )));
        }
        ResponsePacket {
            cmd,
            status,
            reason,
            args: OldArgs::from_bytes(payload)?,
            data: payload[ARGS_LEN..].to_vec(),
            format: FrameFormat::Mix,
        }
    };
    Ok(Some((packet, total)))
}

fn decode_response_old(buf: &[u8]) -> Result<Option<(ResponsePacket, usize)>> {
    if buf.len() < OLD_FRAME_SIZE {
        return Ok(None);
    }
    // The legacy image has no marker and no checksum; any 544 bytes
    // decode. The opcode field is 64 bits wide but only the low 16 ever
    // carried meaning.
    let cmd = (le_u64(buf, 0) & 0xffff) as u16;
    let args = OldArgs::from_bytes(&buf[8..8 + ARGS_LEN])?;
    let data = buf[8 + ARGS_LEN..OLD_FRAME_SIZE].to_vec();
    let packet = ResponsePacket {
        cmd,
        status: legacy_status(cmd),
        reason: crate::status::REASON_UNKNOWN,
        args,
        data,
        format: FrameFormat::Old,
    };
    Ok(Some((packet, OLD_FRAME_SIZE)))
}

/// Try to decode one command frame from the front of `buf`. Mirror of
/// [`decode_response`] for the device side of a link and for tests.
pub fn decode_command(buf: &[u8], link: FrameFormat) -> Result<Option<(CommandPacket, usize)>> {
    match link {
        FrameFormat::Old => decode_command_old(buf),
        FrameFormat::Ng | FrameFormat::Mix => decode_command_ng(buf),
    }
}

fn decode_command_ng(buf: &[u8]) -> Result<Option<(CommandPacket, usize)>> {
    if buf.len() < 4 {
        return Ok(None);
    }
    let magic = le_u32(buf, 0);
    if magic != CMD_PREAMBLE_MAGIC {
        return Err(Error::Malformed(format!("bad command magic {magic:#010x}")));
    }
    if buf.len() < NG_CMD_PREAMBLE_LEN {
        return Ok(None);
    }
    let word = le_u16(buf, 4);
    let length = (word & NG_LENGTH_MASK) as usize;
    let ng = word & NG_FLAG_BIT != 0;
    if length > CMD_DATA_SIZE {
        return Err(Error::Malformed(format!(
            "declared payload length {length} exceeds cap"
        )));
    }
    let total = NG_CMD_PREAMBLE_LEN + length + NG_POSTAMBLE_LEN;
    if buf.len() < total {
        return Ok(None);
    }
    let expected = frame_crc(&buf[4..NG_CMD_PREAMBLE_LEN + length]);
    let actual = le_u16(buf, NG_CMD_PREAMBLE_LEN + length);
    if expected != actual {
        return Err(Error::Crc { expected, actual });
    }

    let cmd = le_u16(buf, 6);
    let payload = &buf[NG_CMD_PREAMBLE_LEN..NG_CMD_PREAMBLE_LEN + length];

    let packet = if ng {
        CommandPacket {
            cmd,
            args: OldArgs::default(),
            data: payload.to_vec(),
            format: FrameFormat::Ng,
        }
    } else {
        if length < ARGS_LEN {
            return Err(Error::Malformed(format!(
                "mixed payload of {length} bytes cannot hold the legacy arguments"
            )));
        }
        CommandPacket {
            cmd,
            args: OldArgs::from_bytes(payload)?,
            data: payload[ARGS_LEN..].to_vec(),
            format: FrameFormat::Mix,
        }
    };
    Ok(Some((packet, total)))
}

fn decode_command_old(buf: &[u8]) -> Result<Option<(CommandPacket, usize)>> {
    if buf.len() < OLD_FRAME_SIZE {
        return Ok(None);
    }
    let cmd = (le_u64(buf, 0) & 0xffff) as u16;
    let args = OldArgs::from_bytes(&buf[8..8 + ARGS_LEN])?;
    let data = buf[8 + ARGS_LEN..OLD_FRAME_SIZE].to_vec();
    let packet = CommandPacket {
        cmd,
        args,
        data,
        format: FrameFormat::Old,
    };
    Ok(Some((packet, OLD_FRAME_SIZE)))
}
