// rflink/src/constants.rs
//! Wire-level constants shared by both ends of the link.

/// Magic word opening a command frame in the self-describing format.
pub const CMD_PREAMBLE_MAGIC: u32 = 0x6133_4d50;

/// Magic word opening a response frame in the self-describing format.
pub const RESP_PREAMBLE_MAGIC: u32 = 0x6233_4d50;

/// Maximum payload carried by a single frame, any format.
pub const CMD_DATA_SIZE: usize = 512;

/// Payload room left in a mixed-format frame once the three legacy
/// arguments are folded into the front of the data region.
pub const CMD_DATA_SIZE_MIX: usize = CMD_DATA_SIZE - 3 * 8;

/// Number of generic 64-bit arguments in a legacy frame.
pub const OLD_ARG_COUNT: usize = 3;

/// Total size of a legacy frame: opcode + 3 args + fixed payload region.
pub const OLD_FRAME_SIZE: usize = 8 + OLD_ARG_COUNT * 8 + CMD_DATA_SIZE;

/// Command preamble: magic (4) + length/flag (2) + opcode (2).
pub const NG_CMD_PREAMBLE_LEN: usize = 8;

/// Response preamble: magic (4) + length/flag (2) + status (1) +
/// reason (1) + opcode (2).
pub const NG_RESP_PREAMBLE_LEN: usize = 10;

/// Postamble: 16-bit CRC.
pub const NG_POSTAMBLE_LEN: usize = 2;

/// Low 15 bits of the length word carry the payload length.
pub const NG_LENGTH_MASK: u16 = 0x7fff;

/// Top bit of the length word marks a self-describing payload; when it
/// is clear the payload opens with the three folded legacy arguments.
pub const NG_FLAG_BIT: u16 = 0x8000;

/// Capability descriptor version this implementation understands.
pub const CAPABILITIES_VERSION: u8 = 6;

/// Encoded size of the capability descriptor in bytes.
pub const CAPABILITIES_SIZE: usize = 13;

/// Number of echo bytes carried by a keep-alive ping.
pub const PING_ECHO_LEN: usize = 32;

/// Granularity of a single transport read attempt while waiting for a
/// reply. The dispatcher never blocks longer than this per read so it
/// can notice cancellation and deadline expiry promptly.
pub const READ_SLICE_MS: u64 = 20;

/// Upper bound on bytes requested from the transport per read attempt.
pub const READ_CHUNK_SIZE: usize = 2 * OLD_FRAME_SIZE;
