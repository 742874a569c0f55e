//! Timeout helpers.
//!
//! Centralizes the handful of durations the crate cares about so tests
//! and callers express them consistently.

use std::time::Duration;

/// Default budget for an ordinary command exchange.
pub const DEFAULT_TIMEOUT_MS: u64 = 2000;

/// Budget for each step of the connection handshake.
pub const HANDSHAKE_TIMEOUT_MS: u64 = 1000;

/// Convert milliseconds to a Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Default exchange timeout as a Duration.
pub fn default_timeout() -> Duration {
    ms(DEFAULT_TIMEOUT_MS)
}

/// Default handshake step timeout as a Duration.
pub fn handshake_timeout() -> Duration {
    ms(HANDSHAKE_TIMEOUT_MS)
}
