// rflink/src/transport/traits.rs

use std::time::Duration;

use crate::Result;

/// Transport trait abstracts the byte channel away from the protocol
/// core. The only contract is that bytes arrive in order; framing is
/// entirely the codec's business.
pub trait Transport {
    /// Send raw bytes to the device.
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Receive up to `max` raw bytes, waiting at most `timeout`.
    /// Returns [`Error::Timeout`](crate::Error::Timeout) when nothing
    /// arrived in time; a successful read is never empty.
    fn read(&mut self, max: usize, timeout: Duration) -> Result<Vec<u8>>;

    /// Human-readable name of the channel for log lines.
    fn name(&self) -> &str {
        "unnamed"
    }
}
