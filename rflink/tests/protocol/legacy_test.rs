use rflink::protocol::frame::{decode_command, encode_command};
use rflink::{BigBufWindow, FrameFormat, HidClone, LegacyArgs, LfDivisor, Opcode};

#[test]
fn hid_clone_survives_the_legacy_wire() {
    let id = HidClone {
        hi2: 0,
        hi: 0x0000_01a2,
        lo: 0x1234_5678,
    };
    let packet = id.to_command();

    // Lowered to the fixed legacy image on a legacy connection.
    let bytes = encode_command(&packet, FrameFormat::Old).unwrap();
    let (decoded, _) = decode_command(&bytes, FrameFormat::Old).unwrap().unwrap();
    assert_eq!(decoded.cmd, Opcode::LfHidClone.raw());
    assert_eq!(HidClone::unfold(&decoded.args).unwrap(), id);
}

#[test]
fn hid_clone_survives_the_mixed_container() {
    let id = HidClone {
        hi2: 0x1,
        hi: 0xdead_beef,
        lo: 0xcafe_f00d,
    };
    assert!(id.long_format());

    let packet = id.to_command();
    let bytes = encode_command(&packet, FrameFormat::Ng).unwrap();
    let (decoded, _) = decode_command(&bytes, FrameFormat::Ng).unwrap().unwrap();
    assert_eq!(decoded.format, FrameFormat::Mix);
    assert_eq!(HidClone::unfold(&decoded.args).unwrap(), id);
}

#[test]
fn bigbuf_window_folds_start_and_length() {
    let window = BigBufWindow {
        start: 0x8000,
        len: 2048,
    };
    let args = window.fold();
    assert_eq!(args.arg(0), 0x8000);
    assert_eq!(args.arg(1), 2048);
    assert_eq!(args.arg(2), 0);
    assert_eq!(BigBufWindow::unfold(&args).unwrap(), window);
}

#[test]
fn divisor_adapter_and_frequencies() {
    assert_eq!(LfDivisor::KHZ_125.divisor, 95);
    assert_eq!(LfDivisor::KHZ_134.divisor, 88);

    let packet = LfDivisor::KHZ_125.to_command();
    assert_eq!(packet.cmd, Opcode::LfSetDivisor.raw());
    assert_eq!(LfDivisor::unfold(&packet.args).unwrap(), LfDivisor::KHZ_125);
}

#[test]
fn unfold_rejects_words_that_do_not_fit() {
    let bogus = rflink::OldArgs::new(u64::MAX, 0, 0);
    assert!(HidClone::unfold(&bogus).is_err());
    assert!(LfDivisor::unfold(&bogus).is_err());
}
