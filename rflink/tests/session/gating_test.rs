#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use rflink::test_support::{SharedMock, ng_reply, ready_session};
use rflink::{Capability, CommandPacket, Error, Opcode};

use common::fixtures;

#[test]
fn missing_capability_is_rejected_before_sending() {
    let mock = SharedMock::new();
    let mut session = ready_session(&mock, fixtures::bare_caps());

    let cmd = CommandPacket::ng(Opcode::HfFelicaCommand.raw(), vec![]).unwrap();
    match session.send(&cmd) {
        Err(Error::MissingCapability { opcode, capability }) => {
            assert_eq!(opcode, Opcode::HfFelicaCommand.raw());
            assert_eq!(capability, Capability::Felica);
        }
        other => panic!("expected missing capability, got: {:?}", other.err()),
    }
    // Nothing reached the transport.
    assert_eq!(mock.writes(), 0);
}

#[test]
fn present_capability_lets_the_command_through() {
    let mock = SharedMock::new();
    mock.push_bytes(ng_reply(Opcode::HfMifareReadBl, &[0u8; 16]));
    let mut session = ready_session(&mock, fixtures::device_caps());

    let cmd = CommandPacket::ng(Opcode::HfMifareReadBl.raw(), vec![0x01, 0x60]).unwrap();
    let reply = session.exchange(&cmd, Duration::from_millis(500)).unwrap();
    assert_eq!(reply.data.len(), 16);
    assert_eq!(mock.writes(), 1);
}

#[test]
fn requested_unknown_opcode_is_fatal() {
    let mock = SharedMock::new();
    let mut session = ready_session(&mock, fixtures::device_caps());
    let cmd = CommandPacket::ng(0x7aaa, vec![]).unwrap();
    assert!(matches!(
        session.send(&cmd),
        Err(Error::UnknownCommand(0x7aaa))
    ));
    assert_eq!(mock.writes(), 0);
}

#[test]
fn unrecognized_unsolicited_frame_is_tolerated() {
    // A peer newer than this build may notify with opcodes we do not
    // know; a requested exchange still completes around them.
    let mock = SharedMock::new();
    mock.push_bytes(ng_reply(Opcode::DebugPrintBytes, &[0xde, 0xad]));
    mock.push_bytes(ng_reply(Opcode::Status, &[1]));

    let mut session = ready_session(&mock, fixtures::device_caps());
    let reply = session
        .wait_for(Some(Opcode::Status.raw()), Duration::from_millis(500))
        .unwrap();
    assert_eq!(reply.cmd, Opcode::Status.raw());
}

#[test]
fn response_only_opcodes_cannot_be_requested() {
    let mock = SharedMock::new();
    let mut session = ready_session(&mock, fixtures::device_caps());
    for opcode in [Opcode::Ack, Opcode::DebugPrintString, Opcode::Wtx] {
        let cmd = CommandPacket::ng(opcode.raw(), vec![]).unwrap();
        assert!(
            matches!(session.send(&cmd), Err(Error::InvalidArgument(_))),
            "{opcode} should be response-only"
        );
    }
}
