// rflink/src/capabilities.rs

//! Capability descriptor negotiated once per connection.
//!
//! The device answers the capabilities query with a small fixed-layout
//! descriptor saying which optional subsystems its firmware was built
//! with. Bit positions are only meaningful for a matching descriptor
//! version, so the version byte is checked before anything else and a
//! mismatch is fatal for the connection.

use crate::constants::{CAPABILITIES_SIZE, CAPABILITIES_VERSION};
use crate::{Error, Result};

/// One optional subsystem the firmware may have been built with.
///
/// The discriminant is the bit position inside the descriptor's packed
/// flag word; the order is part of the wire format and append-only.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Capability {
    ViaFpc = 0,
    ViaUsb = 1,
    Flash = 2,
    Smartcard = 3,
    FpcUsart = 4,
    FpcUsartDev = 5,
    FpcUsartHost = 6,
    Lf = 7,
    Hitag = 8,
    Em4x50 = 9,
    Em4x70 = 10,
    Zx8211 = 11,
    HfSniff = 12,
    HfPlot = 13,
    Iso14443a = 14,
    Iso14443b = 15,
    Iso15693 = 16,
    Felica = 17,
    LegicRf = 18,
    Iclass = 19,
    NfcBarcode = 20,
    Lcd = 21,
    HwFlash = 22,
    HwSmartcard = 23,
    IsRdv4 = 24,
}

impl Capability {
    /// Every defined capability bit, in wire order.
    pub const ALL: &'static [Capability] = &[
        Self::ViaFpc,
        Self::ViaUsb,
        Self::Flash,
        Self::Smartcard,
        Self::FpcUsart,
        Self::FpcUsartDev,
        Self::FpcUsartHost,
        Self::Lf,
        Self::Hitag,
        Self::Em4x50,
        Self::Em4x70,
        Self::Zx8211,
        Self::HfSniff,
        Self::HfPlot,
        Self::Iso14443a,
        Self::Iso14443b,
        Self::Iso15693,
        Self::Felica,
        Self::LegicRf,
        Self::Iclass,
        Self::NfcBarcode,
        Self::Lcd,
        Self::HwFlash,
        Self::HwSmartcard,
        Self::IsRdv4,
    ];

    pub const fn mask(self) -> u32 {
        1u32 << (self as u8)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::ViaFpc => "fpc link",
            Self::ViaUsb => "usb link",
            Self::Flash => "flash",
            Self::Smartcard => "smartcard",
            Self::FpcUsart => "fpc usart",
            Self::FpcUsartDev => "fpc usart dev",
            Self::FpcUsartHost => "fpc usart host",
            Self::Lf => "low frequency",
            Self::Hitag => "hitag",
            Self::Em4x50 => "em4x50",
            Self::Em4x70 => "em4x70",
            Self::Zx8211 => "zx8211",
            Self::HfSniff => "hf sniff",
            Self::HfPlot => "hf plot",
            Self::Iso14443a => "iso14443a",
            Self::Iso14443b => "iso14443b",
            Self::Iso15693 => "iso15693",
            Self::Felica => "felica",
            Self::LegicRf => "legic rf",
            Self::Iclass => "iclass",
            Self::NfcBarcode => "nfc barcode",
            Self::Lcd => "lcd",
            Self::HwFlash => "flash hardware",
            Self::HwSmartcard => "smartcard hardware",
            Self::IsRdv4 => "rdv4 board",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded capability descriptor.
///
/// Created once after a successful handshake and owned by the session;
/// a reconnect replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Capabilities {
    pub version: u8,
    /// Link baudrate reported by the device.
    pub baudrate: u32,
    /// Size of the device's big sample buffer in bytes.
    pub bigbuf_size: u32,
    flags: u32,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            version: CAPABILITIES_VERSION,
            baudrate: 0,
            bigbuf_size: 0,
            flags: 0,
        }
    }
}

impl Capabilities {
    /// Whether the connected firmware was built with `cap`.
    pub const fn has(&self, cap: Capability) -> bool {
        self.flags & cap.mask() != 0
    }

    /// Set or clear a capability bit. Mostly useful for tests and for
    /// the device side of a simulated link.
    pub fn set(&mut self, cap: Capability, enabled: bool) {
        if enabled {
            self.flags |= cap.mask();
        } else {
            self.flags &= !cap.mask();
        }
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, cap: Capability) -> Self {
        self.set(cap, true);
        self
    }

    /// All capability bits present in this descriptor.
    pub fn enabled(&self) -> Vec<Capability> {
        Capability::ALL
            .iter()
            .copied()
            .filter(|c| self.has(*c))
            .collect()
    }

    /// Serialize to the fixed 13-byte wire layout: version, baudrate,
    /// big-buffer size, packed flag word, all little-endian.
    pub fn encode(&self) -> [u8; CAPABILITIES_SIZE] {
        let mut out = [0u8; CAPABILITIES_SIZE];
        out[0] = self.version;
        out[1..5].copy_from_slice(&self.baudrate.to_le_bytes());
        out[5..9].copy_from_slice(&self.bigbuf_size.to_le_bytes());
        out[9..13].copy_from_slice(&self.flags.to_le_bytes());
        out
    }

    /// Decode a descriptor, rejecting any version this implementation
    /// does not understand. The version byte is checked before any flag
    /// bit is interpreted; there is no best-effort path because bit
    /// positions are not stable across versions.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::WrongLength {
                expected: CAPABILITIES_SIZE,
                actual: 0,
            });
        }
        let version = bytes[0];
        if version != CAPABILITIES_VERSION {
            return Err(Error::CapabilityVersion {
                expected: CAPABILITIES_VERSION,
                actual: version,
            });
        }
        if bytes.len() != CAPABILITIES_SIZE {
            return Err(Error::WrongLength {
                expected: CAPABILITIES_SIZE,
                actual: bytes.len(),
            });
        }
        let word = |at: usize| {
            let mut w = [0u8; 4];
            w.copy_from_slice(&bytes[at..at + 4]);
            u32::from_le_bytes(w)
        };
        Ok(Self {
            version,
            baudrate: word(1),
            bigbuf_size: word(5),
            flags: word(9),
        })
    }
}
