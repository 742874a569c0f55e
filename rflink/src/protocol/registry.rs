// rflink/src/protocol/registry.rs

//! Central opcode registry.
//!
//! One append-only table maps each 16-bit opcode to its name, the
//! direction it may travel in, and the capability bit that gates it, if
//! any. Unknown opcodes are not rejected here: they simply have no
//! entry, and the dispatcher decides whether that matters. The numeric
//! range partition lives in [`RANGES`] as data rather than scattered
//! literals.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::capabilities::Capability;

/// Which way an opcode may travel on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    HostToDevice,
    DeviceToHost,
    Both,
}

impl Direction {
    /// Whether the host may put this opcode in a command frame.
    pub const fn host_may_send(self) -> bool {
        matches!(self, Self::HostToDevice | Self::Both)
    }
}

/// One registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDef {
    pub opcode: Opcode,
    pub direction: Direction,
    /// Capability bit that must be set in the negotiated descriptor
    /// before this command may be issued.
    pub capability: Option<Capability>,
}

impl CommandDef {
    pub const fn name(&self) -> &'static str {
        self.opcode.label()
    }

    /// Numeric range owning this opcode.
    pub fn range(&self) -> Option<&'static OpcodeRange> {
        range_of(self.opcode.raw())
    }
}

/// A contiguous slice of the opcode space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeRange {
    pub name: &'static str,
    pub start: u16,
    pub end: u16,
}

impl OpcodeRange {
    pub const fn contains(&self, raw: u16) -> bool {
        self.start <= raw && raw <= self.end
    }
}

/// The canonical partition of the opcode space. Ranges never overlap;
/// the explicit unknown sentinel 0xffff sits outside all of them.
pub const RANGES: &[OpcodeRange] = &[
    OpcodeRange { name: "bootloader", start: 0x0000, end: 0x00ff },
    OpcodeRange { name: "general", start: 0x0100, end: 0x01ff },
    OpcodeRange { name: "low frequency", start: 0x0200, end: 0x02ff },
    OpcodeRange { name: "high frequency", start: 0x0300, end: 0x03ff },
    OpcodeRange { name: "measurement", start: 0x0400, end: 0x04ff },
    OpcodeRange { name: "fpga", start: 0x0500, end: 0x05ff },
    OpcodeRange { name: "mifare", start: 0x0600, end: 0x07ff },
    OpcodeRange { name: "high frequency ext", start: 0x0800, end: 0x09ff },
    OpcodeRange { name: "high level", start: 0x1000, end: 0x3fff },
];

/// Range owning a raw opcode, if any.
pub fn range_of(raw: u16) -> Option<&'static OpcodeRange> {
    RANGES.iter().find(|r| r.contains(raw))
}

macro_rules! command_table {
    ($($name:ident = $code:literal, $dir:ident $(, $cap:ident)? ;)+) => {
        /// Every operation this build knows by name.
        ///
        /// The discriminant is the wire opcode. The table is append-only;
        /// retired opcodes keep their number and are simply never issued.
        #[repr(u16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum Opcode {
            $( $name = $code, )+
        }

        impl Opcode {
            /// Opcode for a raw wire value, when this build knows it.
            pub fn from_raw(raw: u16) -> Option<Self> {
                match raw {
                    $( $code => Some(Self::$name), )+
                    _ => None,
                }
            }

            pub const fn label(self) -> &'static str {
                match self {
                    $( Self::$name => stringify!($name), )+
                }
            }
        }

        /// Registry table, one entry per opcode, in numeric order per
        /// range.
        pub const COMMANDS: &[CommandDef] = &[
            $( CommandDef {
                opcode: Opcode::$name,
                direction: Direction::$dir,
                capability: command_table!(@cap $($cap)?),
            }, )+
        ];
    };
    (@cap) => { None };
    (@cap $cap:ident) => { Some(Capability::$cap) };
}

command_table! {
    // bootloader
    DeviceInfo = 0x0000, Both;
    FinishWrite = 0x0003, Both;
    HardwareReset = 0x0004, HostToDevice;
    StartFlash = 0x0005, Both;
    ChipInfo = 0x0006, Both;
    BootVersion = 0x0007, Both;
    Nack = 0x00fe, DeviceToHost;
    Ack = 0x00ff, DeviceToHost;

    // general
    DebugPrintString = 0x0100, DeviceToHost;
    DebugPrintIntegers = 0x0101, DeviceToHost;
    DebugPrintBytes = 0x0102, DeviceToHost;
    LcdReset = 0x0103, HostToDevice, Lcd;
    Lcd = 0x0104, HostToDevice, Lcd;
    BuffClear = 0x0105, HostToDevice;
    ReadMem = 0x0106, Both;
    Version = 0x0107, Both;
    Status = 0x0108, Both;
    Ping = 0x0109, Both;
    ReadMemDownload = 0x010a, Both;
    ReadMemDownloaded = 0x010b, DeviceToHost;
    DownloadEmlBigBuf = 0x0110, Both;
    DownloadedEmlBigBuf = 0x0111, DeviceToHost;
    Capabilities = 0x0112, Both;
    QuitSession = 0x0113, HostToDevice;
    SetDbgMode = 0x0114, Both;
    Standalone = 0x0115, HostToDevice;
    Wtx = 0x0116, DeviceToHost;
    Tia = 0x0117, Both;
    BreakLoop = 0x0118, HostToDevice;
    SetTearoff = 0x0119, Both;
    GetDbgMode = 0x0120, Both;

    // flash memory and its filesystem
    FlashMemWrite = 0x0121, Both, Flash;
    FlashMemWipe = 0x0122, Both, Flash;
    FlashMemDownload = 0x0123, Both, Flash;
    FlashMemDownloaded = 0x0124, DeviceToHost, Flash;
    FlashMemInfo = 0x0125, Both, Flash;
    FlashMemSetSpiBaudrate = 0x0126, Both, Flash;
    FlashMemPages64k = 0x0127, Both, Flash;
    SpiffsMount = 0x0130, Both, Flash;
    SpiffsUnmount = 0x0131, Both, Flash;
    SpiffsWrite = 0x0132, Both, Flash;
    SpiffsRead = 0x0133, Both, Flash;
    SpiffsRemove = 0x0134, Both, Flash;
    SpiffsRename = 0x0135, Both, Flash;
    SpiffsCopy = 0x0136, Both, Flash;
    SpiffsStat = 0x0137, Both, Flash;
    SpiffsFstat = 0x0138, Both, Flash;
    SpiffsInfo = 0x0139, Both, Flash;
    SpiffsWipe = 0x013a, Both, Flash;
    SetFpgaMode = 0x013f, Both;

    // smartcard interface
    SmartRaw = 0x0140, Both, Smartcard;
    SmartUpgrade = 0x0141, Both, Smartcard;
    SmartUpload = 0x0142, Both, Smartcard;
    SmartAtr = 0x0143, Both, Smartcard;
    SmartSetBaud = 0x0144, Both, Smartcard;
    SmartSetClock = 0x0145, Both, Smartcard;

    // auxiliary usart
    UsartRx = 0x0160, Both, FpcUsart;
    UsartTx = 0x0161, Both, FpcUsart;
    UsartTxRx = 0x0162, Both, FpcUsart;
    UsartConfig = 0x0163, Both, FpcUsart;

    // low frequency
    LfTiRead = 0x0202, Both, Lf;
    LfTiWrite = 0x0203, Both, Lf;
    LfAcqRawAdc = 0x0205, Both, Lf;
    LfModThenAcqRawAdc = 0x0206, Both, Lf;
    DownloadBigBuf = 0x0207, Both;
    DownloadedBigBuf = 0x0208, DeviceToHost;
    LfUploadSimSamples = 0x0209, Both, Lf;
    LfSimulate = 0x020a, Both, Lf;
    LfHidWatch = 0x020b, Both, Lf;
    LfHidSimulate = 0x020c, Both, Lf;
    LfSetDivisor = 0x020d, Both, Lf;
    LfSimulateBidir = 0x020e, Both, Lf;
    SetAdcMux = 0x020f, Both;
    LfHidClone = 0x0210, Both, Lf;
    LfEm410xClone = 0x0211, Both, Lf;
    LfT55xxReadBl = 0x0214, Both, Lf;
    LfT55xxWriteBl = 0x0215, Both, Lf;
    LfT55xxResetRead = 0x0216, Both, Lf;
    LfPcf7931Read = 0x0217, Both, Lf;
    LfEm4xReadWord = 0x0218, Both, Lf;
    LfEm4xWriteWord = 0x0219, Both, Lf;
    LfIoWatch = 0x021a, Both, Lf;
    LfEm4xProtectWord = 0x021b, Both, Lf;
    LfEm410xWatch = 0x021c, Both, Lf;
    LfSamplingSetConfig = 0x021d, Both, Lf;
    LfFskSimulate = 0x021e, Both, Lf;
    LfAskSimulate = 0x021f, Both, Lf;
    LfPskSimulate = 0x0220, Both, Lf;
    LfAwidWatch = 0x0221, Both, Lf;
    LfVikingClone = 0x0222, Both, Lf;
    LfPcf7931Write = 0x0223, Both, Lf;
    LfT55xxWakeup = 0x0224, Both, Lf;
    LfCotagRead = 0x0225, Both, Lf;
    LfT55xxSetConfig = 0x0226, Both, Lf;
    LfSamplingPrintConfig = 0x0227, Both, Lf;
    LfSamplingGetConfig = 0x0228, Both, Lf;
    LfEm4xLogin = 0x0229, Both, Lf;
    LfEm4xBf = 0x022a, Both, Lf;
    LfT55xxChkPwds = 0x0230, Both, Lf;
    LfT55xxDangerRaw = 0x0231, Both, Lf;
    LfNrzSimulate = 0x0232, Both, Lf;
    LfEm4x50Info = 0x0240, Both, Em4x50;
    LfEm4x50Write = 0x0241, Both, Em4x50;
    LfEm4x50WritePwd = 0x0242, Both, Em4x50;
    LfEm4x50Read = 0x0243, Both, Em4x50;
    LfEm4x50Brute = 0x0245, Both, Em4x50;
    LfEm4x50Login = 0x0246, Both, Em4x50;
    LfEm4x50Sim = 0x0250, Both, Em4x50;
    LfEm4x50Reader = 0x0251, Both, Em4x50;
    LfEm4x50Eset = 0x0252, Both, Em4x50;
    LfEm4x50Chk = 0x0253, Both, Em4x50;
    LfEm4x70Info = 0x0260, Both, Em4x70;
    LfEm4x70Write = 0x0261, Both, Em4x70;
    LfEm4x70Unlock = 0x0262, Both, Em4x70;
    LfEm4x70Auth = 0x0263, Both, Em4x70;
    LfEm4x70SetPin = 0x0264, Both, Em4x70;
    LfEm4x70SetKey = 0x0265, Both, Em4x70;
    LfEm4x70Brute = 0x0266, Both, Em4x70;
    LfZxRead = 0x0270, Both, Zx8211;
    LfZxWrite = 0x0271, Both, Zx8211;

    // high frequency
    HfIso15693AcqRawAdc = 0x0300, Both, Iso15693;
    HfAcqRawAdc = 0x0301, Both;
    HfSriRead = 0x0303, Both, Iso14443b;
    HfIso14443bCommand = 0x0305, Both, Iso14443b;
    HfIso15693Reader = 0x0310, Both, Iso15693;
    HfIso15693Simulate = 0x0311, Both, Iso15693;
    HfIso15693Sniff = 0x0312, Both, Iso15693;
    HfIso15693Command = 0x0313, Both, Iso15693;
    HfIso15693FindAfi = 0x0315, Both, Iso15693;
    HfIso15693CsetUid = 0x0316, Both, Iso15693;
    HfIso15693SlixDisablePrivacy = 0x0317, Both, Iso15693;
    HfIso15693SlixDisableEas = 0x0318, Both, Iso15693;
    HfTexkomSimulate = 0x0320, Both;
    HfIso15693EmlClear = 0x0330, Both, Iso15693;
    HfIso15693EmlSetMem = 0x0331, Both, Iso15693;
    HfIso15693EmlGetMem = 0x0332, Both, Iso15693;
    HfIso15693CsetUidV2 = 0x0333, Both, Iso15693;
    LfSniffRawAdc = 0x0360, Both, Lf;
    LfHitagsTestTraces = 0x0367, Both, Hitag;
    LfHitagSniff = 0x0370, Both, Hitag;
    LfHitagSimulate = 0x0371, Both, Hitag;
    LfHitagReader = 0x0372, Both, Hitag;
    LfHitagsRead = 0x0373, Both, Hitag;
    LfHitagsWrite = 0x0375, Both, Hitag;
    LfHitagEload = 0x0376, Both, Hitag;
    LfHitag2Write = 0x0377, Both, Hitag;
    LfHitag2Crack = 0x0378, Both, Hitag;
    LfHitag2Crack2 = 0x0379, Both, Hitag;
    LfHitagsUid = 0x037a, Both, Hitag;
    LfHitagURead = 0x037b, Both, Hitag;
    LfHitagUWrite = 0x037c, Both, Hitag;
    LfHitagUSimulate = 0x037d, Both, Hitag;
    LfHitagUUid = 0x037e, Both, Hitag;
    HfIso14443aAntifuzz = 0x0380, Both, Iso14443a;
    HfIso14443bSimulate = 0x0381, Both, Iso14443b;
    HfIso14443bSniff = 0x0382, Both, Iso14443b;
    HfIso14443aSniff = 0x0383, Both, Iso14443a;
    HfIso14443aSimulate = 0x0384, Both, Iso14443a;
    HfIso14443aReader = 0x0385, Both, Iso14443a;
    HfIso14443aEmvSimulate = 0x0386, Both, Iso14443a;
    HfLegicSimulate = 0x0387, Both, LegicRf;
    HfLegicReader = 0x0388, Both, LegicRf;
    HfLegicWriter = 0x0389, Both, LegicRf;
    HfEpaCollectNonce = 0x038a, Both, Iso14443a;
    HfEpaReplay = 0x038b, Both, Iso14443a;
    HfEpaPaceSimulate = 0x038c, Both, Iso14443a;
    HfIclassReadCheck = 0x038f, Both, Iclass;
    HfIclassDump = 0x0391, Both, Iclass;
    HfIclassSniff = 0x0392, Both, Iclass;
    HfIclassSimulate = 0x0393, Both, Iclass;
    HfIclassReader = 0x0394, Both, Iclass;
    HfIclassReadBl = 0x0396, Both, Iclass;
    HfIclassWriteBl = 0x0397, Both, Iclass;
    HfIclassEmlMemSet = 0x0398, Both, Iclass;
    HfIclassChkKeys = 0x039a, Both, Iclass;
    HfIclassRestore = 0x039b, Both, Iclass;
    HfIclassCreditEpurse = 0x039c, Both, Iclass;
    HfIclassRecover = 0x039d, Both, Iclass;
    HfIclassTearBl = 0x039e, Both, Iclass;
    HfFelicaSimulate = 0x03a0, Both, Felica;
    HfFelicaSniff = 0x03a1, Both, Felica;
    HfFelicaCommand = 0x03a2, Both, Felica;
    HfFelicaLiteDump = 0x03aa, Both, Felica;
    HfFelicaLiteSimulate = 0x03ab, Both, Felica;
    HfIso14443aPrintConfig = 0x03b0, Both, Iso14443a;
    HfIso14443aGetConfig = 0x03b1, Both, Iso14443a;
    HfIso14443aSetConfig = 0x03b2, Both, Iso14443a;
    HfIso14443aSetThresholds = 0x03b8, Both, Iso14443a;
    HfLegicInfo = 0x03bc, Both, LegicRf;
    HfLegicEset = 0x03bd, Both, LegicRf;

    // antenna measurements
    MeasureAntennaTuning = 0x0400, Both;
    MeasureAntennaTuningHf = 0x0401, Both;
    MeasureAntennaTuningLf = 0x0402, Both;
    ListenReaderField = 0x0420, Both;
    HfDropField = 0x0430, HostToDevice;

    // direct fpga control
    FpgaMajorModeOff = 0x0500, HostToDevice;

    // mifare family
    HfMifareEmlMemClr = 0x0601, Both, Iso14443a;
    HfMifareEmlMemSet = 0x0602, Both, Iso14443a;
    HfMifareEmlMemGet = 0x0603, Both, Iso14443a;
    HfMifareEmlLoad = 0x0604, Both, Iso14443a;
    HfMifareCsetBl = 0x0605, Both, Iso14443a;
    HfMifareCgetBl = 0x0606, Both, Iso14443a;
    HfMifareCident = 0x0607, Both, Iso14443a;
    HfMifareSimulate = 0x0610, Both, Iso14443a;
    HfMifareReader = 0x0611, Both, Iso14443a;
    HfMifareNested = 0x0612, Both, Iso14443a;
    HfMifareAcqEncryptedNonces = 0x0613, Both, Iso14443a;
    HfMifareAcqNonces = 0x0614, Both, Iso14443a;
    HfMifareStaticNested = 0x0615, Both, Iso14443a;
    HfMifareStaticEnc = 0x0616, Both, Iso14443a;
    HfMifareAcqStaticEncryptedNonces = 0x0617, Both, Iso14443a;
    HfMifareReadBl = 0x0620, Both, Iso14443a;
    HfMifareReadSc = 0x0621, Both, Iso14443a;
    HfMifareWriteBl = 0x0622, Both, Iso14443a;
    HfMifareChkKeys = 0x0623, Both, Iso14443a;
    HfMifareSetMod = 0x0624, Both, Iso14443a;
    HfMifareChkKeysFast = 0x0625, Both, Iso14443a;
    HfMifareChkKeysFile = 0x0626, Both, Iso14443a;
    HfMifareValue = 0x0627, Both, Iso14443a;
    HfMifareReadBlEx = 0x0628, Both, Iso14443a;
    HfMifareWriteBlEx = 0x0629, Both, Iso14443a;
    HfMifareSniff = 0x0630, Both, Iso14443a;
    HfMifareMfkey = 0x0631, Both, Iso14443a;
    HfMifarePersonalizeUid = 0x0632, Both, Iso14443a;
    HfMifareUReadBl = 0x0720, Both, Iso14443a;
    HfMifareUReadCard = 0x0721, Both, Iso14443a;
    HfMifareUWriteBl = 0x0722, Both, Iso14443a;
    HfMifareUWriteBlCompat = 0x0723, Both, Iso14443a;
    HfMifareUcAuth = 0x0724, Both, Iso14443a;
    HfMifareUlAesAuth = 0x0725, Both, Iso14443a;
    HfMifareUcSetPwd = 0x0727, Both, Iso14443a;
    HfDesfireReadBl = 0x0728, Both, Iso14443a;
    HfDesfireWriteBl = 0x0729, Both, Iso14443a;
    HfDesfireAuth1 = 0x072a, Both, Iso14443a;
    HfDesfireAuth2 = 0x072b, Both, Iso14443a;
    HfDesfireReader = 0x072c, Both, Iso14443a;
    HfDesfireInfo = 0x072d, Both, Iso14443a;
    HfDesfireCommand = 0x072e, Both, Iso14443a;
    HfMifareNackDetect = 0x0730, Both, Iso14443a;
    HfMifareStaticNonce = 0x0731, Both, Iso14443a;
    HfMifareStaticEncryptedNonce = 0x0732, Both, Iso14443a;
    HfMfuOtpTearoff = 0x0740, Both, Iso14443a;
    HfMfuCounterTearoff = 0x0741, Both, Iso14443a;

    // high frequency extensions
    HfSniff = 0x0800, Both, HfSniff;
    HfPlot = 0x0801, Both, HfPlot;
    FpgaMemDownload = 0x0802, Both;
    FpgaMemDownloaded = 0x0803, DeviceToHost;
    HfThinfilmRead = 0x0810, Both, NfcBarcode;
    HfThinfilmSimulate = 0x0811, Both, NfcBarcode;
    HfCryptoRfSim = 0x0820, Both, Iso14443b;
    HfMifareGen3Uid = 0x0850, Both, Iso14443a;
    HfMifareGen3Blk = 0x0851, Both, Iso14443a;
    HfMifareGen3Freez = 0x0852, Both, Iso14443a;
    HfMifareG4RdBl = 0x0860, Both, Iso14443a;
    HfMifareG4WrBl = 0x0861, Both, Iso14443a;
    HfIso15693SlixEnableEas = 0x0862, Both, Iso15693;
    HfIso15693SlixPassProtectAfi = 0x0863, Both, Iso15693;
    HfIso15693SlixPassProtectEas = 0x0864, Both, Iso15693;
    HfIso15693SlixWritePwd = 0x0865, Both, Iso15693;
    HfIso15693WriteAfi = 0x0866, Both, Iso15693;
    HfIso15693SlixEnablePrivacy = 0x0867, Both, Iso15693;
    HfIso15693SlixProtectPage = 0x0868, Both, Iso15693;
    HfMifareG4GdmRdBl = 0x0870, Both, Iso14443a;
    HfMifareG4GdmWrBl = 0x0871, Both, Iso14443a;
    HfSamPicopass = 0x0900, Both, Smartcard;
    HfSamSeos = 0x0901, Both, Smartcard;
    HfSamMfc = 0x0902, Both, Smartcard;

    // high level helpers and variants
    SpiffsAppend = 0x1132, Both, Flash;
    HfIso14443aSimAid = 0x1420, Both, Iso14443a;
    SpiffsPrintTree = 0x2130, Both, Flash;
    SpiffsGetTree = 0x2131, Both, Flash;
    SpiffsTest = 0x2132, Both, Flash;
    SpiffsPrintFsInfo = 0x2133, Both, Flash;
    SpiffsDownload = 0x2134, Both, Flash;
    SpiffsDownloaded = 0x2135, DeviceToHost, Flash;
    SpiffsEload = 0x2136, Both, Flash;
    SpiffsCheck = 0x3000, Both, Flash;

    // explicit unknown-command sentinel
    Unknown = 0xffff, Both;
}

impl Opcode {
    /// Wire representation of this opcode.
    pub const fn raw(self) -> u16 {
        self as u16
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:#06x})", self.label(), self.raw())
    }
}

fn index() -> &'static HashMap<u16, &'static CommandDef> {
    static INDEX: OnceLock<HashMap<u16, &'static CommandDef>> = OnceLock::new();
    INDEX.get_or_init(|| COMMANDS.iter().map(|def| (def.opcode.raw(), def)).collect())
}

/// Constant-time registry lookup. `None` means this build does not
/// recognize the opcode; the frame is still structurally valid.
pub fn lookup(raw: u16) -> Option<&'static CommandDef> {
    index().get(&raw).copied()
}
