// rflink/src/prelude.rs

pub use crate::capabilities::{Capabilities, Capability};
pub use crate::protocol::commands;
pub use crate::protocol::legacy::{BigBufWindow, HidClone, LegacyArgs, LfDivisor};
pub use crate::protocol::{CommandPacket, Opcode, ResponsePacket};
pub use crate::session::{
    CancelToken, Ready, Session, SessionBuilder, Uninitialized, UnsolicitedKind,
};
pub use crate::{DebugLevel, Error, FrameFormat, OldArgs, Result, Status};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, default_timeout, ms, parse_hex};
