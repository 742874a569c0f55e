#[path = "../common/mod.rs"]
mod common;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use rflink::test_support::{SharedMock, ng_reply, ng_reply_status, ready_session};
use rflink::{Error, Opcode, Status, UnsolicitedKind, commands};

use common::fixtures;

#[test]
fn silent_transport_times_out_within_one_read_slice() {
    let mock = SharedMock::new();
    let mut session = ready_session(&mock, fixtures::device_caps());

    let budget = Duration::from_millis(80);
    let started = Instant::now();
    let result = session.wait_for(Some(Opcode::Version.raw()), budget);
    let elapsed = started.elapsed();

    assert!(matches!(result, Err(Error::Timeout)));
    assert!(elapsed >= budget, "returned early after {elapsed:?}");
    // No later than the budget plus one read-attempt granularity, with
    // some scheduling slack.
    assert!(
        elapsed < budget + Duration::from_millis(100),
        "returned late after {elapsed:?}"
    );
}

#[test]
fn debug_print_is_surfaced_once_and_wait_still_succeeds() {
    let mock = SharedMock::new();
    mock.push_bytes(ng_reply(Opcode::DebugPrintString, b"tuning antenna"));
    mock.push_bytes(ng_reply(Opcode::Version, &fixtures::version_payload()));

    let mut session = ready_session(&mock, fixtures::device_caps());
    let seen: Rc<RefCell<Vec<(UnsolicitedKind, u16)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    session.set_observer(Box::new(move |kind, pkt| {
        sink.borrow_mut().push((kind, pkt.cmd));
    }));

    let reply = session
        .exchange(&commands::version(), Duration::from_millis(500))
        .unwrap();
    assert_eq!(reply.data, fixtures::version_payload());

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1, "debug frame surfaced exactly once");
    assert_eq!(
        seen[0],
        (UnsolicitedKind::DebugString, Opcode::DebugPrintString.raw())
    );
}

#[test]
fn keep_alive_and_wtx_do_not_satisfy_a_wildcard_wait() {
    let mock = SharedMock::new();
    mock.push_bytes(ng_reply(Opcode::Ack, &[]));
    mock.push_bytes(ng_reply(Opcode::Wtx, &1000u16.to_le_bytes()));
    mock.push_bytes(ng_reply(Opcode::Status, &[1]));

    let mut session = ready_session(&mock, fixtures::device_caps());
    let reply = session.wait_for(None, Duration::from_millis(500)).unwrap();
    assert_eq!(reply.cmd, Opcode::Status.raw());
}

#[test]
fn line_noise_before_a_frame_is_skipped() {
    let mock = SharedMock::new();
    let mut stream = vec![0x13, 0x37, 0x00, 0xfa, 0xde]; // garbage prefix
    stream.extend_from_slice(&ng_reply(Opcode::Ping, &commands::default_token()));
    mock.push_bytes(stream);

    let mut session = ready_session(&mock, fixtures::device_caps());
    let reply = session
        .wait_for(Some(Opcode::Ping.raw()), Duration::from_millis(500))
        .unwrap();
    assert_eq!(reply.data, commands::default_token().to_vec());
}

#[test]
fn corrupted_frame_then_clean_frame_recovers() {
    let mock = SharedMock::new();
    let mut bad = ng_reply(Opcode::Status, &[0xee; 8]);
    let len = bad.len();
    bad[len - 4] ^= 0xff; // breaks the CRC
    mock.push_bytes(bad);
    mock.push_bytes(ng_reply(Opcode::Status, &[0x01]));

    let mut session = ready_session(&mock, fixtures::device_caps());
    let reply = session
        .wait_for(Some(Opcode::Status.raw()), Duration::from_millis(500))
        .unwrap();
    assert_eq!(reply.data, vec![0x01]);
}

#[test]
fn frames_split_across_many_reads_reassemble() {
    let mock = SharedMock::new();
    let frame = ng_reply(Opcode::Version, &fixtures::version_payload());
    mock.push_chunked(&frame, 3);

    let mut session = ready_session(&mock, fixtures::device_caps());
    let reply = session
        .wait_for(Some(Opcode::Version.raw()), Duration::from_millis(500))
        .unwrap();
    assert_eq!(reply.data, fixtures::version_payload());
}

#[test]
fn stale_reply_for_another_opcode_is_dropped() {
    let mock = SharedMock::new();
    mock.push_bytes(ng_reply(Opcode::Version, b"stale"));
    mock.push_bytes(ng_reply(Opcode::Status, &[7]));

    let mut session = ready_session(&mock, fixtures::device_caps());
    let reply = session
        .wait_for(Some(Opcode::Status.raw()), Duration::from_millis(500))
        .unwrap();
    assert_eq!(reply.data, vec![7]);
}

#[test]
fn device_failure_status_becomes_a_typed_error() {
    let mock = SharedMock::new();
    mock.push_bytes(ng_reply_status(Opcode::HfMifareChkKeys, Status::NoKey, 2, &[]));

    let mut session = ready_session(&mock, fixtures::device_caps());
    let reply = session
        .wait_for(Some(Opcode::HfMifareChkKeys.raw()), Duration::from_millis(500))
        .unwrap();
    match reply.require_success() {
        Err(Error::Device {
            status: Status::NoKey,
            reason: 2,
        }) => {}
        other => panic!("expected device error, got: {:?}", other),
    }
}

#[test]
fn cancellation_from_another_thread_aborts_the_wait() {
    let mock = SharedMock::new();
    let mut session = ready_session(&mock, fixtures::device_caps());
    let token = session.cancel_token();

    let canceller = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(30));
        token.cancel();
    });

    let started = Instant::now();
    let result = session.wait_for(Some(Opcode::Version.raw()), Duration::from_secs(10));
    canceller.join().unwrap();

    assert!(matches!(result, Err(Error::Aborted)));
    assert!(started.elapsed() < Duration::from_secs(5));
    // The dispatcher pinged the peer to resynchronize it.
    let writes = mock.written();
    assert!(!writes.is_empty());
}

#[test]
fn ping_round_trip_through_the_dispatcher() {
    let mock = SharedMock::new();
    mock.push_bytes(ng_reply(Opcode::Ping, &commands::default_token()));
    let mut session = ready_session(&mock, fixtures::device_caps());
    session.ping(Duration::from_millis(500)).unwrap();
}
