//! Small helpers shared across the crate: hex formatting for log lines
//! and timeout plumbing.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
