use rflink::constants::OLD_FRAME_SIZE;
use rflink::protocol::frame::{
    decode_command, decode_response, encode_command_mix, encode_command_ng, encode_command_old,
    encode_response_ng,
};
use rflink::{Error, FrameFormat, OldArgs, Opcode, Status};

use proptest::prelude::*;

#[test]
fn command_round_trip() {
    let bytes = encode_command_ng(Opcode::Version.raw(), &[]).unwrap();
    let (pkt, used) = decode_command(&bytes, FrameFormat::Ng).unwrap().unwrap();
    assert_eq!(used, bytes.len());
    assert_eq!(pkt.cmd, Opcode::Version.raw());
    assert!(pkt.data.is_empty());
}

#[test]
fn response_round_trip_keeps_status_and_reason() {
    let bytes = encode_response_ng(Opcode::HfMifareReadBl.raw(), Status::NoKey, 4, &[9; 64]).unwrap();
    let (pkt, _) = decode_response(&bytes, FrameFormat::Ng).unwrap().unwrap();
    assert_eq!(pkt.cmd, Opcode::HfMifareReadBl.raw());
    assert_eq!(pkt.status, Status::NoKey);
    assert_eq!(pkt.reason, 4);
    assert_eq!(pkt.data, vec![9; 64]);
    assert!(pkt.require_success().is_err());
}

#[test]
fn payload_cap_is_512_for_every_encoder() {
    let args = OldArgs::default();
    assert!(encode_command_ng(0x0100, &[0; 512]).is_ok());
    assert!(encode_command_old(0x0100, &args, &[0; 512]).is_ok());
    for result in [
        encode_command_ng(0x0100, &[0; 513]),
        encode_command_old(0x0100, &args, &[0; 513]),
    ] {
        assert!(matches!(
            result,
            Err(Error::PayloadOverflow { len: 513, max: 512 })
        ));
    }
    // the mixed container additionally reserves room for the arguments
    assert!(encode_command_mix(0x0100, &args, &[0; 488]).is_ok());
    assert!(matches!(
        encode_command_mix(0x0100, &args, &[0; 489]),
        Err(Error::PayloadOverflow { len: 489, max: 488 })
    ));
}

#[test]
fn every_single_bit_flip_is_caught() {
    let payload = [0x11, 0x22, 0x33, 0x44, 0x55];
    let bytes = encode_response_ng(Opcode::Status.raw(), Status::Success, -1, &payload).unwrap();
    let crc_start = bytes.len() - 2;

    for bit in 0..bytes.len() * 8 {
        let mut corrupt = bytes.clone();
        corrupt[bit / 8] ^= 1 << (bit % 8);
        let result = decode_response(&corrupt, FrameFormat::Ng);

        // No corrupted frame is ever accepted as a packet.
        assert!(
            !matches!(result, Ok(Some(_))),
            "bit flip at {bit} was accepted"
        );

        // Everything between the length word and the CRC is covered by
        // the checksum, so those flips must fail as CRC mismatches.
        let byte = bit / 8;
        if (6..crc_start).contains(&byte) {
            assert!(
                matches!(result, Err(Error::Crc { .. })),
                "bit flip at {bit} did not raise a CRC error"
            );
        }
    }
}

#[test]
fn mix_container_carries_args_and_data() {
    let args = OldArgs::new(0xdead, 0xbeef, 0xf00d);
    let bytes = encode_command_mix(Opcode::LfT55xxReadBl.raw(), &args, &[1, 2, 3]).unwrap();
    let (pkt, _) = decode_command(&bytes, FrameFormat::Ng).unwrap().unwrap();
    assert_eq!(pkt.format, FrameFormat::Mix);
    assert_eq!(pkt.args, args);
    assert_eq!(pkt.data, vec![1, 2, 3]);
}

#[test]
fn truncated_buffers_are_incomplete_not_errors() {
    let bytes = encode_response_ng(Opcode::Ping.raw(), Status::Success, -1, &[7; 32]).unwrap();
    for cut in 0..bytes.len() {
        let result = decode_response(&bytes[..cut], FrameFormat::Ng);
        assert!(matches!(result, Ok(None)), "cut at {cut}");
    }
}

#[test]
fn declared_length_beyond_cap_is_malformed() {
    let mut bytes = encode_response_ng(Opcode::Ping.raw(), Status::Success, -1, &[]).unwrap();
    // Patch the length word to 0x7fff while keeping the flag bit set.
    bytes[4] = 0xff;
    bytes[5] = 0xff;
    assert!(matches!(
        decode_response(&bytes, FrameFormat::Ng),
        Err(Error::Malformed(_))
    ));
}

#[test]
fn modern_decoder_rejects_legacy_image() {
    // A legacy frame has no magic; feeding one to a modern connection
    // must be flagged, not guessed at.
    let old = encode_command_old(Opcode::Ping.raw(), &OldArgs::default(), &[]).unwrap();
    assert_eq!(old.len(), OLD_FRAME_SIZE);
    assert!(matches!(
        decode_response(&old, FrameFormat::Ng),
        Err(Error::Malformed(_))
    ));
}

proptest! {
    #[test]
    fn response_round_trip_prop(
        cmd in any::<u16>(),
        status in prop::sample::select(vec![0i8, -1, -4, -9, -24, -99]),
        data in prop::collection::vec(any::<u8>(), 0..512),
    ) {
        let bytes = encode_response_ng(cmd, Status::from_code(status), -1, &data).unwrap();
        let (pkt, used) = decode_response(&bytes, FrameFormat::Ng).unwrap().unwrap();
        prop_assert_eq!(used, bytes.len());
        prop_assert_eq!(pkt.cmd, cmd);
        prop_assert_eq!(pkt.status, Status::from_code(status));
        prop_assert_eq!(pkt.data, data);
    }

    #[test]
    fn split_reassembly_prop(data in prop::collection::vec(any::<u8>(), 0..200), split in 1usize..64) {
        // Feeding the frame in two arbitrary pieces: the first piece is
        // incomplete, the whole is complete.
        let bytes = encode_response_ng(0x0109, Status::Success, -1, &data).unwrap();
        let cut = split.min(bytes.len() - 1);
        prop_assert!(decode_response(&bytes[..cut], FrameFormat::Ng).unwrap().is_none());
        prop_assert!(decode_response(&bytes, FrameFormat::Ng).unwrap().is_some());
    }
}
