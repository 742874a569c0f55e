// rflink/src/protocol/commands/mod.rs

//! Typed builders for common operations.
//!
//! Each builder produces a [`CommandPacket`](crate::protocol::packet::CommandPacket)
//! ready for the session; payload semantics beyond what these builders
//! write belong to the command handlers on each side, not to the link
//! layer.

pub mod device;
pub mod lf;
pub mod ping;

pub use device::{
    capabilities_query, get_debug_level, hardware_reset, quit_session, set_debug_level,
    status_query, version,
};
pub use lf::{download_bigbuf, hid_clone, set_divisor};
pub use ping::{check_echo, default_token, ping, ping_with};
