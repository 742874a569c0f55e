// rflink/src/lib.rs

//! rflink
//!
//! Pure Rust host-side link layer for handheld RFID/NFC field
//! analyzers: frame codecs for the modern and legacy wire formats, the
//! opcode registry, capability negotiation and a blocking
//! request/response session over an abstract byte transport.

pub mod capabilities;
pub mod constants;
pub mod error;
pub mod prelude;
pub mod protocol;
pub mod session;
pub mod status;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at the crate root so `crate::Error`,
// `crate::Result` and the core wire types are available directly.
pub use crate::error::*;
pub use crate::status::Status;
pub use crate::types::*;

pub use prelude::*;
