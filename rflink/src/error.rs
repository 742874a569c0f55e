// rflink/src/error.rs

use thiserror::Error;

use crate::capabilities::Capability;
use crate::status::Status;

/// Common error type for the whole crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("device not found")]
    DeviceNotFound,

    #[error("operation timed out")]
    Timeout,

    #[error("operation aborted by user")]
    Aborted,

    #[error("crc mismatch: expected {expected:#06x}, got {actual:#06x}")]
    Crc { expected: u16, actual: u16 },

    #[error("payload of {len} bytes exceeds the {max} byte cap")]
    PayloadOverflow { len: usize, max: usize },

    #[error("wrong length: expected {expected}, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("malformed frame: {0}")]
    Malformed(String),

    #[error("unknown command {0:#06x}")]
    UnknownCommand(u16),

    #[error("command {opcode:#06x} requires the {capability} capability")]
    MissingCapability { opcode: u16, capability: Capability },

    #[error("capability descriptor version {actual}, this client expects {expected}")]
    CapabilityVersion { expected: u8, actual: u8 },

    #[error("device reported: {status}")]
    Device { status: Status, reason: i8 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unexpected answer: {0}")]
    WrongAnswer(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // USB support can be compiled out, keep the variant with it
    #[cfg(feature = "usb")]
    #[error("usb error: {0}")]
    Usb(#[from] rusb::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Map this error onto the shared status vocabulary. Codes are total
    /// across the system: client-side validation failures use the same
    /// numbers the device would echo back.
    pub fn status(&self) -> Status {
        match self {
            Self::DeviceNotFound => Status::Tty,
            Self::Timeout => Status::Timeout,
            Self::Aborted => Status::OperationAborted,
            Self::Crc { .. } => Status::Crc,
            Self::PayloadOverflow { .. } => Status::Overflow,
            Self::WrongLength { .. } => Status::WrongLength,
            Self::Malformed(_) => Status::Software,
            Self::UnknownCommand(_) => Status::NotImplemented,
            Self::MissingCapability { .. } => Status::DeviceNotSupported,
            Self::CapabilityVersion { .. } => Status::Init,
            Self::Device { status, .. } => *status,
            Self::InvalidArgument(_) => Status::InvalidArg,
            Self::WrongAnswer(_) => Status::WrongAnswer,
            Self::Io(_) => Status::Io,
            #[cfg(feature = "usb")]
            Self::Usb(_) => Status::Io,
        }
    }
}
