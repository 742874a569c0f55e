#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use rflink::test_support::{LegacyDeviceSim, SharedMock, ng_reply, seed_modern_handshake};
use rflink::{Capability, Error, FrameFormat, Opcode, Session, SessionBuilder};

use common::fixtures;

#[test]
fn modern_handshake_negotiates_capabilities() {
    let caps = fixtures::device_caps();
    let mock = SharedMock::new();
    seed_modern_handshake(&mock, &caps);

    let session = SessionBuilder::new()
        .with_transport(Box::new(mock.clone()))
        .connect()
        .unwrap();

    assert_eq!(session.format(), FrameFormat::Ng);
    assert!(session.capabilities().has(Capability::Lf));
    assert!(!session.capabilities().has(Capability::Felica));
    assert_eq!(session.capabilities().baudrate, 460_800);
    // Two requests left the host: the ping and the capabilities query.
    assert_eq!(mock.writes(), 2);
}

#[test]
fn version_mismatch_aborts_the_connection() {
    let mut descriptor = fixtures::device_caps().encode();
    descriptor[0] = 5;

    let mock = SharedMock::new();
    let token = rflink::commands::default_token();
    mock.push_bytes(ng_reply(Opcode::Ping, &token));
    mock.push_bytes(ng_reply(Opcode::Capabilities, &descriptor));

    match SessionBuilder::new()
        .with_transport(Box::new(mock))
        .connect()
    {
        Err(Error::CapabilityVersion {
            expected: 6,
            actual: 5,
        }) => {}
        other => panic!("expected fatal init error, got: {:?}", other.err()),
    }
}

#[test]
fn wrong_ping_echo_fails_the_handshake() {
    let mock = SharedMock::new();
    mock.push_bytes(ng_reply(Opcode::Ping, b"not the token"));

    match SessionBuilder::new()
        .with_transport(Box::new(mock))
        .connect()
    {
        Err(Error::WrongAnswer(_)) => {}
        other => panic!("expected echo mismatch, got: {:?}", other.err()),
    }
}

#[test]
fn silent_modern_peer_falls_back_to_legacy() {
    let sim = LegacyDeviceSim::new(fixtures::device_caps());
    let session = Session::attach(Box::new(sim))
        .with_handshake_budget(Duration::from_millis(60))
        .handshake()
        .unwrap();

    // The format was fixed at handshake time and the descriptor decoded
    // from the zero-padded legacy payload region.
    assert_eq!(session.format(), FrameFormat::Old);
    assert!(session.capabilities().has(Capability::Iso14443a));
}
