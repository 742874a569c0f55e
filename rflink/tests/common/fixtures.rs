// fixtures.rs — capability descriptors and payloads shared by the
// integration tests
#![allow(dead_code)]

use rflink::prelude::*;

/// A descriptor resembling a well-equipped field unit.
pub fn device_caps() -> Capabilities {
    let mut caps = Capabilities::default();
    caps.baudrate = 460_800;
    caps.bigbuf_size = 40_000;
    for cap in [
        Capability::ViaUsb,
        Capability::Flash,
        Capability::Lf,
        Capability::Hitag,
        Capability::Iso14443a,
        Capability::Iso15693,
    ] {
        caps.set(cap, true);
    }
    caps
}

/// A descriptor for a minimal build: no optional subsystem at all.
pub fn bare_caps() -> Capabilities {
    Capabilities::default().with(Capability::ViaUsb)
}

/// Sample firmware version text as the version command would report it.
pub fn version_payload() -> Vec<u8> {
    b"fieldprobe os v4.18 (2026-05-11)".to_vec()
}
