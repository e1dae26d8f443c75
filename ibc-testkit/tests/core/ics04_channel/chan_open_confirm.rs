use ibc_core::channel::types::channel::{Order, State};
use ibc_core::channel::types::msgs::{ChannelMsg, MsgChannelOpenConfirm};
use ibc_core::entrypoint::{execute, validate};
use ibc_core::handler::types::events::IbcEvent;
use ibc_core::handler::types::msgs::MsgEnvelope;
use ibc_core::host::types::error::ErrorKind;
use ibc_core::primitives::Signer;
use ibc_testkit::relayer::utils::last_event;
use rstest::{fixture, rstest};

use super::{validate_kind, ChannelHandshake};

#[fixture]
fn handshake() -> ChannelHandshake {
    let mut hs = ChannelHandshake::new(Order::Unordered)
        .init_on_a()
        .try_on_b()
        .ack_on_a();
    hs.relayer.sync_client_on_b(&hs.client_id_on_b);
    hs
}

fn msg_chan_open_confirm(hs: &ChannelHandshake) -> MsgChannelOpenConfirm {
    match hs.msg_chan_open_confirm() {
        MsgEnvelope::Channel(ChannelMsg::OpenConfirm(msg)) => msg,
        _ => panic!("unexpected message"),
    }
}

fn envelope(msg: MsgChannelOpenConfirm) -> MsgEnvelope {
    MsgEnvelope::Channel(ChannelMsg::OpenConfirm(msg))
}

#[rstest]
fn chan_open_confirm_happy_path(mut handshake: ChannelHandshake) {
    let msg = envelope(msg_chan_open_confirm(&handshake));

    let ctx_b = handshake.relayer.get_ctx_b_mut();
    validate(ctx_b.ibc_store(), &ctx_b.ibc_router, msg.clone()).expect("validation succeeds");
    execute(&mut ctx_b.ibc_store, &mut ctx_b.ibc_router, msg).expect("execution succeeds");

    assert_eq!(handshake.chan_end_on_b().state, State::Open);

    let event = last_event(handshake.relayer.get_ctx_b(), |event| match event {
        IbcEvent::OpenConfirmChannel(e) => Some(e.clone()),
        _ => None,
    })
    .expect("event emitted");
    assert_eq!(event.chan_id_on_b(), &handshake.chan_id_on_b);
    assert_eq!(event.conn_id_on_b(), &handshake.conn_id_on_b);
}

#[test_log::test]
fn chan_open_confirm_before_ack_on_a() {
    let mut hs = ChannelHandshake::new(Order::Unordered)
        .init_on_a()
        .try_on_b();
    hs.relayer.sync_client_on_b(&hs.client_id_on_b);

    // The end on `A` is still in INIT.
    let msg = envelope(msg_chan_open_confirm(&hs));

    assert_eq!(
        validate_kind(hs.relayer.get_ctx_b(), msg),
        ErrorKind::InvalidProof
    );
}

#[rstest]
fn chan_open_confirm_with_empty_signer(handshake: ChannelHandshake) {
    let msg = MsgChannelOpenConfirm {
        signer: Signer::new_empty(),
        ..msg_chan_open_confirm(&handshake)
    };

    assert_eq!(
        validate_kind(handshake.relayer.get_ctx_b(), envelope(msg)),
        ErrorKind::Unauthorized
    );
}

#[rstest]
fn chan_open_confirm_replayed(mut handshake: ChannelHandshake) {
    let msg = envelope(msg_chan_open_confirm(&handshake));
    handshake
        .relayer
        .get_ctx_b_mut()
        .deliver(msg.clone())
        .expect("first delivery succeeds");

    assert_eq!(
        validate_kind(handshake.relayer.get_ctx_b(), msg),
        ErrorKind::InvalidState
    );
}
