use std::sync::{Arc, Mutex};
use std::time::Duration;

use pixxi_session::{
    Arg, ErrorKind, ErrorState, Op, OpcodeOverrides, OperationTable, Reply, Session,
    SessionConfig, SessionError,
};
use pixxi_transport::ScriptedTransport;

fn recorder() -> (
    Arc<Mutex<Vec<(ErrorKind, u8)>>>,
    impl FnMut(ErrorKind, u8) + Send + 'static,
) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    (calls, move |kind, byte| {
        sink.lock().expect("observer lock should not be poisoned").push((kind, byte))
    })
}

#[test]
fn info_queries_back_to_back() {
    let mut transport = ScriptedTransport::new();
    transport.push_reply(&[0x06, 0x00, 0x04, b'P', b'X', b'3', b'5']);
    transport.push_reply(&[0x06, 0x01, 0x02]);
    transport.push_reply(&[0x06, 0x00, 0x2A]);
    let mut session = Session::new(transport);

    assert_eq!(session.sys_get_model().expect("model should decode"), "PX35");
    assert_eq!(session.sys_get_version().expect("version should decode"), 0x0102);
    assert_eq!(session.sys_get_pmmc().expect("pmmc should decode"), 42);
    assert!(session.last_error().is_none());
    assert_eq!(session.get_ref().pending(), 0);
}

#[test]
fn failure_then_recovery_notifies_once() {
    let mut session = Session::new(ScriptedTransport::with_reply(&[0x15]));
    let (calls, observer) = recorder();
    session.set_observer(observer);

    let err = session.gfx_cls().expect_err("nak should fail the call");
    assert_eq!(err.error_kind(), Some(ErrorKind::NegativeAck));
    assert_eq!(session.last_error(), ErrorState::NegativeAck(0x15));

    session.get_mut().push_reply(&[0x06]);
    session.gfx_cls().expect("second call should succeed");
    assert!(session.last_error().is_none());

    assert_eq!(
        *calls.lock().expect("lock"),
        vec![(ErrorKind::NegativeAck, 0x15)]
    );
}

#[test]
fn short_reply_is_flushed_before_next_call() {
    let mut session = Session::with_config(
        ScriptedTransport::with_reply(&[0x06, 0x00]),
        SessionConfig::with_timeout(Duration::from_millis(50)),
    );
    let (calls, observer) = recorder();
    session.set_observer(observer);

    let err = session.gfx_contrast(1).expect_err("short reply should time out");
    assert_eq!(err.error_kind(), Some(ErrorKind::Timeout));
    assert_eq!(session.get_ref().aborts(), 1);
    assert_eq!(*calls.lock().expect("lock"), vec![(ErrorKind::Timeout, 0)]);

    session.get_mut().push_reply(&[0x06, 0x00, 0x07]);
    assert_eq!(session.gfx_contrast(1).expect("clean reply should decode"), 7);
}

#[test]
fn string_blob_nak_reads_once() {
    let mut session = Session::new(ScriptedTransport::with_reply(&[0x15, 0x00, 0x04]));

    let err = session.read_string(1).expect_err("nak should fail");

    assert!(matches!(err, SessionError::Frame(_)));
    assert_eq!(session.get_ref().reads(), 1);
}

#[test]
fn dispatch_by_name_with_overrides() {
    let overrides = OpcodeOverrides::from_json(r#"{"gfx_Circle": "0xFF78"}"#)
        .expect("override json should parse");
    let table = OperationTable::with_overrides(&overrides).expect("override should apply");
    let mut session = Session::new(ScriptedTransport::with_reply(&[0x06])).with_table(table);

    let reply = session
        .call_named(
            "gfx_Circle",
            &[Arg::Word(1), Arg::Word(2), Arg::Word(3), Arg::Word(4)],
        )
        .expect("circle should succeed");

    assert_eq!(reply, Reply::Ack);
    assert_eq!(&session.get_ref().written()[..2], &[0xFF, 0x78]);
}

#[test]
fn long_text_is_capped_on_the_wire() {
    let mut session = Session::new(ScriptedTransport::with_reply(&[0x06, 0x00, 0x00]));
    let text = "z".repeat(1500);

    session.put_str(&text).expect("putstr should succeed");

    assert_eq!(session.get_ref().written().len(), 2 + 1000);
}

#[test]
fn every_operation_encodes_with_placeholder_args() {
    let words = [0u16; 2];
    let bytes = [0u8; 2];
    let sector = [0u8; 512];
    let session = Session::new(ScriptedTransport::new());

    for op in Op::ALL {
        let descriptor = session.table().get(*op);
        let args: Vec<Arg<'_>> = descriptor
            .args
            .iter()
            .map(|shape| match shape {
                pixxi_session::ArgShape::Word => Arg::Word(1),
                pixxi_session::ArgShape::Count => Arg::Word(2),
                pixxi_session::ArgShape::Byte => Arg::Byte(b'r'),
                pixxi_session::ArgShape::Text => Arg::Text("A.TXT"),
                pixxi_session::ArgShape::Words => Arg::Words(&words),
                pixxi_session::ArgShape::Bytes => Arg::Bytes(&bytes),
                pixxi_session::ArgShape::Sector => Arg::Bytes(&sector),
                pixxi_session::ArgShape::Pixels => Arg::Bytes(&bytes),
            })
            .collect();

        let request = session
            .encode(*op, &args)
            .unwrap_or_else(|err| panic!("{} should encode: {err}", op.name()));
        assert_eq!(request.opcode(), descriptor.opcode);
    }
}
