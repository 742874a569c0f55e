use rflink::constants::{CMD_DATA_SIZE, OLD_FRAME_SIZE};
use rflink::protocol::frame::{
    decode_command, decode_response, encode_command_old, encode_response_old,
};
use rflink::{FrameFormat, OldArgs, Opcode, Status};

#[test]
fn hid_clone_request_round_trips_exactly() {
    // Short-format HID clone: arg0 carries the long-format switch.
    let args = OldArgs::new(0, 0x0000_01a2, 0x1234_5678);
    let bytes = encode_command_old(Opcode::LfHidClone.raw(), &args, &[]).unwrap();
    assert_eq!(bytes.len(), OLD_FRAME_SIZE);

    let (pkt, used) = decode_command(&bytes, FrameFormat::Old).unwrap().unwrap();
    assert_eq!(used, OLD_FRAME_SIZE);
    assert_eq!(pkt.cmd, Opcode::LfHidClone.raw());
    assert_eq!(pkt.args.arg(0), 0);
    assert_eq!(pkt.args.arg(1), 0x0000_01a2);
    assert_eq!(pkt.args.arg(2), 0x1234_5678);
    assert_eq!(pkt.format, FrameFormat::Old);
}

#[test]
fn payload_region_is_fixed_and_zero_padded() {
    let bytes =
        encode_response_old(Opcode::DownloadedBigBuf.raw(), &OldArgs::default(), &[0xcc; 10])
            .unwrap();
    let (pkt, _) = decode_response(&bytes, FrameFormat::Old).unwrap().unwrap();
    assert_eq!(pkt.data.len(), CMD_DATA_SIZE);
    assert_eq!(&pkt.data[..10], &[0xcc; 10]);
    assert!(pkt.data[10..].iter().all(|&b| b == 0));
}

#[test]
fn any_full_image_decodes() {
    // The legacy format has no marker and no checksum; 544 arbitrary
    // bytes always produce a packet. Integrity relies entirely on the
    // negotiated connection state.
    let junk: Vec<u8> = (0..OLD_FRAME_SIZE).map(|i| (i * 7) as u8).collect();
    let (pkt, used) = decode_response(&junk, FrameFormat::Old).unwrap().unwrap();
    assert_eq!(used, OLD_FRAME_SIZE);
    assert_eq!(pkt.format, FrameFormat::Old);
}

#[test]
fn ack_and_nack_sentinels_set_the_synthesized_status() {
    let ack = encode_response_old(Opcode::Ack.raw(), &OldArgs::default(), &[]).unwrap();
    let (pkt, _) = decode_response(&ack, FrameFormat::Old).unwrap().unwrap();
    assert_eq!(pkt.status, Status::Success);

    let nack = encode_response_old(Opcode::Nack.raw(), &OldArgs::default(), &[]).unwrap();
    let (pkt, _) = decode_response(&nack, FrameFormat::Old).unwrap().unwrap();
    assert_eq!(pkt.status, Status::WrongAnswer);

    let plain = encode_response_old(Opcode::Version.raw(), &OldArgs::default(), &[]).unwrap();
    let (pkt, _) = decode_response(&plain, FrameFormat::Old).unwrap().unwrap();
    assert_eq!(pkt.status, Status::Success);
}

#[test]
fn short_image_waits_for_more() {
    let bytes = encode_command_old(Opcode::Ping.raw(), &OldArgs::default(), &[]).unwrap();
    assert!(
        decode_command(&bytes[..OLD_FRAME_SIZE - 1], FrameFormat::Old)
            .unwrap()
            .is_none()
    );
}

#[test]
fn opcode_width_truncates_to_sixteen_bits() {
    // The wire field is 64 bits wide for historical reasons; only the
    // low 16 ever carried meaning.
    let mut bytes = encode_command_old(0x0210, &OldArgs::default(), &[]).unwrap();
    bytes[4] = 0xaa; // stray high bits in the opcode word
    let (pkt, _) = decode_command(&bytes, FrameFormat::Old).unwrap().unwrap();
    assert_eq!(pkt.cmd, 0x0210);
}
