use rflink::protocol::frame::encode_response_ng;
use rflink::protocol::frame_crc;
use rflink::{Opcode, Status};

#[test]
fn known_check_value() {
    assert_eq!(frame_crc(b"123456789"), 0xbf05);
}

#[test]
fn postamble_covers_preamble_after_magic_plus_payload() {
    let bytes = encode_response_ng(Opcode::Status.raw(), Status::Success, -1, &[1, 2, 3]).unwrap();
    let stored = u16::from_le_bytes([bytes[bytes.len() - 2], bytes[bytes.len() - 1]]);
    // Recompute over everything between the magic word and the CRC.
    assert_eq!(stored, frame_crc(&bytes[4..bytes.len() - 2]));
    // The magic word itself is not covered.
    assert_ne!(stored, frame_crc(&bytes[..bytes.len() - 2]));
}

#[test]
fn distinct_payloads_distinct_sums() {
    let a = frame_crc(&[0x00; 32]);
    let b = frame_crc(&[0x01; 32]);
    assert_ne!(a, b);
}
