// rflink/src/status.rs

//! Status codes shared by both ends of the link.
//!
//! The same closed vocabulary is used for client-side argument validation
//! and for the status byte echoed back inside a response frame, so a
//! failure always maps to exactly one of these kinds regardless of which
//! side detected it.

/// Signed status code carried in response frames.
///
/// Positive values are reserved for commands that need to report several
/// results at once; everything the link layer produces is zero or
/// negative.
#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// No error.
    Success = 0,
    /// Undefined or unrecognized error.
    Undefined = -1,
    /// Invalid argument(s).
    InvalidArg = -2,
    /// Operation not supported by the connected device.
    DeviceNotSupported = -3,
    /// Operation timed out.
    Timeout = -4,
    /// Operation aborted by the user.
    OperationAborted = -5,
    /// Not (yet) implemented.
    NotImplemented = -6,
    /// Error during RF transmission between device and tag.
    RfTransmission = -7,
    /// Input / output error.
    Io = -8,
    /// Buffer overflow, payload too large for the operation.
    Overflow = -9,
    /// Software error, e.g. while parsing data.
    Software = -10,
    /// Error in an on-device flash operation.
    Flash = -11,
    /// Memory allocation error.
    Malloc = -12,
    /// File access error on the host.
    File = -13,
    /// Generic TTY error.
    Tty = -14,
    /// Initialization error.
    Init = -15,
    /// Expected one answer and got another.
    WrongAnswer = -16,
    /// Read or write outside the expected array.
    OutOfBounds = -17,
    /// Card exchange failed or answered incorrectly.
    CardExchange = -18,
    /// Failed to encode an APDU.
    ApduEncode = -19,
    /// APDU responded with a failure code.
    ApduFail = -20,
    /// Command executed and reported failure.
    Failed = -21,
    /// Partial success, e.g. an incomplete dump.
    Partial = -22,
    /// A tear-off hook fired and a tear-off actually happened.
    Tearoff = -23,
    /// CRC mismatch in transferred data.
    Crc = -24,
    /// Static nonce detected while collecting nonces.
    StaticNonce = -25,
    /// No PACS data available.
    NoPacs = -26,
    /// Received data of the wrong length.
    WrongLength = -27,
    /// No cryptographic key available.
    NoKey = -28,
    /// Cryptographic operation failed.
    Crypto = -29,
    /// File not found in any search path.
    NoFile = -30,
    /// No data available.
    NoData = -98,
    /// Fatal condition, session cannot continue.
    Fatal = -99,
    /// Regular quit.
    Quit = -100,
    /// Reserved for a future protocol change.
    Reserved = -128,
}

/// Placeholder reason byte when a response does not refine its status.
pub const REASON_UNKNOWN: i8 = -1;

impl Status {
    /// Decode a wire status byte. Codes outside the known vocabulary
    /// totalize to [`Status::Undefined`] so a newer peer never makes a
    /// frame undecodable.
    pub fn from_code(code: i8) -> Self {
        match code {
            0 => Self::Success,
            -1 => Self::Undefined,
            -2 => Self::InvalidArg,
            -3 => Self::DeviceNotSupported,
            -4 => Self::Timeout,
            -5 => Self::OperationAborted,
            -6 => Self::NotImplemented,
            -7 => Self::RfTransmission,
            -8 => Self::Io,
            -9 => Self::Overflow,
            -10 => Self::Software,
            -11 => Self::Flash,
            -12 => Self::Malloc,
            -13 => Self::File,
            -14 => Self::Tty,
            -15 => Self::Init,
            -16 => Self::WrongAnswer,
            -17 => Self::OutOfBounds,
            -18 => Self::CardExchange,
            -19 => Self::ApduEncode,
            -20 => Self::ApduFail,
            -21 => Self::Failed,
            -22 => Self::Partial,
            -23 => Self::Tearoff,
            -24 => Self::Crc,
            -25 => Self::StaticNonce,
            -26 => Self::NoPacs,
            -27 => Self::WrongLength,
            -28 => Self::NoKey,
            -29 => Self::Crypto,
            -30 => Self::NoFile,
            -98 => Self::NoData,
            -99 => Self::Fatal,
            -100 => Self::Quit,
            -128 => Self::Reserved,
            _ => Self::Undefined,
        }
    }

    /// Wire representation of this status.
    pub const fn code(self) -> i8 {
        self as i8
    }

    /// True for [`Status::Success`] only.
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Short human-readable description.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Undefined => "undefined error",
            Self::InvalidArg => "invalid argument",
            Self::DeviceNotSupported => "operation not supported by device",
            Self::Timeout => "timeout",
            Self::OperationAborted => "aborted by user",
            Self::NotImplemented => "not implemented",
            Self::RfTransmission => "RF transmission error",
            Self::Io => "input / output error",
            Self::Overflow => "buffer overflow",
            Self::Software => "software error",
            Self::Flash => "flash error",
            Self::Malloc => "memory allocation error",
            Self::File => "file error",
            Self::Tty => "TTY error",
            Self::Init => "initialization error",
            Self::WrongAnswer => "unexpected answer",
            Self::OutOfBounds => "out of bounds",
            Self::CardExchange => "card exchange error",
            Self::ApduEncode => "APDU encode failed",
            Self::ApduFail => "APDU failure code",
            Self::Failed => "command failed",
            Self::Partial => "partial success",
            Self::Tearoff => "tear-off triggered",
            Self::Crc => "CRC error",
            Self::StaticNonce => "static nonce detected",
            Self::NoPacs => "no PACS data",
            Self::WrongLength => "wrong length",
            Self::NoKey => "no key available",
            Self::Crypto => "cryptographic error",
            Self::NoFile => "file not found",
            Self::NoData => "no data",
            Self::Fatal => "fatal error",
            Self::Quit => "quit",
            Self::Reserved => "reserved",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.code())
    }
}
