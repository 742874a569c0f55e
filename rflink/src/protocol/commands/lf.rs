// rflink/src/protocol/commands/lf.rs

//! Low-frequency commands still expressed through the legacy argument
//! adapters.

use crate::protocol::legacy::{BigBufWindow, HidClone, LegacyArgs, LfDivisor};
use crate::protocol::packet::CommandPacket;

/// Clone an HID Prox identifier onto a writable tag.
pub fn hid_clone(id: HidClone) -> CommandPacket {
    id.to_command()
}

/// Set the low-frequency antenna divisor.
pub fn set_divisor(divisor: LfDivisor) -> CommandPacket {
    divisor.to_command()
}

/// Request a window of the device's big sample buffer.
pub fn download_bigbuf(window: BigBufWindow) -> CommandPacket {
    window.to_command()
}
