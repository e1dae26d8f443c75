use ibc_core::connection::types::msgs::{ConnectionMsg, MsgConnectionOpenConfirm};
use ibc_core::connection::types::State;
use ibc_core::entrypoint::{execute, validate};
use ibc_core::handler::types::events::IbcEvent;
use ibc_core::handler::types::msgs::MsgEnvelope;
use ibc_core::host::types::error::ErrorKind;
use ibc_core::host::types::identifiers::ConnectionId;
use ibc_core::primitives::Signer;
use ibc_testkit::relayer::utils::{last_event, RelayerOps};
use rstest::{fixture, rstest};

use super::Handshake;

#[fixture]
fn handshake() -> Handshake {
    let mut hs = Handshake::new().init_on_a().try_on_b().ack_on_a();
    hs.relayer.sync_client_on_b(&hs.client_id_on_b);
    hs
}

fn msg_conn_open_confirm(hs: &Handshake) -> MsgConnectionOpenConfirm {
    let envelope = RelayerOps::msg_connection_open_confirm(
        hs.relayer.get_ctx_a(),
        hs.conn_id_on_a.clone(),
        hs.conn_id_on_b.clone(),
    );

    match envelope {
        MsgEnvelope::Connection(ConnectionMsg::OpenConfirm(msg)) => msg,
        _ => panic!("unexpected message"),
    }
}

fn envelope(msg: MsgConnectionOpenConfirm) -> MsgEnvelope {
    MsgEnvelope::Connection(ConnectionMsg::OpenConfirm(msg))
}

fn validate_on_b(hs: &Handshake, msg: MsgConnectionOpenConfirm) -> Result<(), ErrorKind> {
    let ctx_b = hs.relayer.get_ctx_b();
    validate(ctx_b.ibc_store(), &ctx_b.ibc_router, envelope(msg)).map_err(|e| e.kind())
}

#[rstest]
fn conn_open_confirm_happy_path(mut handshake: Handshake) {
    let msg = msg_conn_open_confirm(&handshake);
    validate_on_b(&handshake, msg.clone()).expect("validation succeeds");

    let ctx_b = handshake.relayer.get_ctx_b_mut();
    execute(&mut ctx_b.ibc_store, &mut ctx_b.ibc_router, envelope(msg))
        .expect("execution succeeds");

    assert_eq!(handshake.conn_end_on_b().state(), &State::Open);
    assert_eq!(handshake.conn_end_on_a().state(), &State::Open);

    let event = last_event(handshake.relayer.get_ctx_b(), |event| match event {
        IbcEvent::OpenConfirmConnection(e) => Some(e.clone()),
        _ => None,
    })
    .expect("event emitted");
    assert_eq!(event.conn_id_on_b(), &handshake.conn_id_on_b);
    assert_eq!(event.conn_id_on_a(), Some(&handshake.conn_id_on_a));
}

#[test_log::test]
fn conn_open_confirm_before_ack_on_a() {
    let mut hs = Handshake::new().init_on_a().try_on_b();
    hs.relayer.sync_client_on_b(&hs.client_id_on_b);

    // The end on `A` is still in INIT.
    let msg = msg_conn_open_confirm(&hs);

    assert_eq!(validate_on_b(&hs, msg), Err(ErrorKind::InvalidProof));
}

#[rstest]
fn conn_open_confirm_for_unknown_connection(handshake: Handshake) {
    let msg = MsgConnectionOpenConfirm {
        conn_id_on_b: ConnectionId::new(9),
        ..msg_conn_open_confirm(&handshake)
    };

    assert_eq!(validate_on_b(&handshake, msg), Err(ErrorKind::NotFound));
}

#[rstest]
fn conn_open_confirm_with_empty_signer(handshake: Handshake) {
    let msg = MsgConnectionOpenConfirm {
        signer: Signer::new_empty(),
        ..msg_conn_open_confirm(&handshake)
    };

    assert_eq!(
        validate_on_b(&handshake, msg),
        Err(ErrorKind::Unauthorized)
    );
}

#[rstest]
fn conn_open_confirm_replayed(mut handshake: Handshake) {
    let msg = msg_conn_open_confirm(&handshake);
    handshake
        .relayer
        .get_ctx_b_mut()
        .deliver(envelope(msg.clone()))
        .expect("first delivery succeeds");

    assert_eq!(validate_on_b(&handshake, msg), Err(ErrorKind::InvalidState));
}
