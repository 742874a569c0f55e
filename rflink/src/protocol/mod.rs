// rflink/src/protocol/mod.rs

pub mod commands;
pub mod crc;
pub mod frame;
pub mod legacy;
pub mod packet;
pub mod registry;

pub use crc::frame_crc;
pub use packet::{CommandPacket, ResponsePacket};
pub use registry::{CommandDef, Direction, Opcode, OpcodeRange};
