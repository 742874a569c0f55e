// rflink/src/protocol/legacy.rs

//! Typed adapters for the legacy argument model.
//!
//! The legacy frame carries three generic 64-bit arguments whose meaning
//! depends entirely on the opcode. Each opcode that still uses them gets
//! an explicit adapter here, so the mapping between typed fields and raw
//! words is auditable and testable per opcode instead of being an
//! implicit byte reinterpretation at call sites.

use crate::protocol::packet::CommandPacket;
use crate::protocol::registry::Opcode;
use crate::types::OldArgs;
use crate::{Error, Result};

/// A typed view over the three legacy arguments of one opcode.
pub trait LegacyArgs: Sized {
    /// Opcode this adapter belongs to.
    const OPCODE: Opcode;

    /// Fold the typed fields into the three raw words.
    fn fold(&self) -> OldArgs;

    /// Reconstruct the typed fields from the raw words.
    fn unfold(args: &OldArgs) -> Result<Self>;

    /// Build a command packet in the mixed compatibility shape. The
    /// session lowers it to the fixed legacy image when the connection
    /// was negotiated legacy.
    fn to_command(&self) -> CommandPacket {
        CommandPacket {
            cmd: Self::OPCODE.raw(),
            args: self.fold(),
            data: Vec::new(),
            format: crate::types::FrameFormat::Mix,
        }
    }
}

fn arg_as_u32(args: &OldArgs, index: usize) -> Result<u32> {
    u32::try_from(args.arg(index)).map_err(|_| {
        Error::InvalidArgument(format!(
            "legacy arg{index} {:#x} does not fit in 32 bits",
            args.arg(index)
        ))
    })
}

/// Clone an HID Prox identifier onto a writable tag.
///
/// The up-to-96-bit identifier travels as three 32-bit words, highest
/// first. `hi2` doubles as the long-format switch: zero means the short
/// 44-bit format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HidClone {
    pub hi2: u32,
    pub hi: u32,
    pub lo: u32,
}

impl HidClone {
    pub const fn long_format(&self) -> bool {
        self.hi2 != 0
    }
}

impl LegacyArgs for HidClone {
    const OPCODE: Opcode = Opcode::LfHidClone;

    fn fold(&self) -> OldArgs {
        OldArgs::new(self.hi2 as u64, self.hi as u64, self.lo as u64)
    }

    fn unfold(args: &OldArgs) -> Result<Self> {
        Ok(Self {
            hi2: arg_as_u32(args, 0)?,
            hi: arg_as_u32(args, 1)?,
            lo: arg_as_u32(args, 2)?,
        })
    }
}

/// Window into the device's big sample buffer for a download request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BigBufWindow {
    /// Byte offset of the first sample to transfer.
    pub start: u32,
    /// Number of bytes to transfer.
    pub len: u32,
}

impl LegacyArgs for BigBufWindow {
    const OPCODE: Opcode = Opcode::DownloadBigBuf;

    fn fold(&self) -> OldArgs {
        OldArgs::new(self.start as u64, self.len as u64, 0)
    }

    fn unfold(args: &OldArgs) -> Result<Self> {
        Ok(Self {
            start: arg_as_u32(args, 0)?,
            len: arg_as_u32(args, 1)?,
        })
    }
}

/// Antenna divisor for the low-frequency field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LfDivisor {
    pub divisor: u8,
}

impl LfDivisor {
    /// Divisor producing 125 kHz.
    pub const KHZ_125: Self = Self { divisor: 95 };
    /// Divisor producing 134.2 kHz.
    pub const KHZ_134: Self = Self { divisor: 88 };

    /// Divisor for an arbitrary field frequency in kHz.
    pub fn for_khz(khz: f64) -> Self {
        let divisor = ((12_000.0 + khz / 2.0) / khz) - 1.0;
        Self {
            divisor: divisor as u8,
        }
    }

    /// Field frequency this divisor produces, in kHz.
    pub fn khz(&self) -> f64 {
        12_000.0 / (self.divisor as f64 + 1.0)
    }
}

impl LegacyArgs for LfDivisor {
    const OPCODE: Opcode = Opcode::LfSetDivisor;

    fn fold(&self) -> OldArgs {
        OldArgs::new(self.divisor as u64, 0, 0)
    }

    fn unfold(args: &OldArgs) -> Result<Self> {
        let raw = args.arg(0);
        let divisor = u8::try_from(raw).map_err(|_| {
            Error::InvalidArgument(format!("divisor {raw:#x} does not fit in 8 bits"))
        })?;
        Ok(Self { divisor })
    }
}
