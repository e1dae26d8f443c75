use ibc_core::channel::types::channel::{Order, State};
use ibc_core::channel::types::msgs::{ChannelMsg, MsgChannelOpenAck};
use ibc_core::channel::types::Version;
use ibc_core::entrypoint::{execute, validate};
use ibc_core::handler::types::events::IbcEvent;
use ibc_core::handler::types::msgs::MsgEnvelope;
use ibc_core::host::types::error::ErrorKind;
use ibc_core::host::types::identifiers::ChannelId;
use ibc_testkit::relayer::utils::last_event;
use rstest::{fixture, rstest};

use super::{validate_kind, ChannelHandshake};

/// `A` in INIT, `B` in TRYOPEN and the client on `A` synced.
#[fixture]
fn handshake() -> ChannelHandshake {
    let mut hs = ChannelHandshake::new(Order::Ordered).init_on_a().try_on_b();
    hs.relayer.sync_client_on_a(&hs.client_id_on_a);
    hs
}

fn msg_chan_open_ack(hs: &ChannelHandshake) -> MsgChannelOpenAck {
    match hs.msg_chan_open_ack() {
        MsgEnvelope::Channel(ChannelMsg::OpenAck(msg)) => msg,
        _ => panic!("unexpected message"),
    }
}

fn envelope(msg: MsgChannelOpenAck) -> MsgEnvelope {
    MsgEnvelope::Channel(ChannelMsg::OpenAck(msg))
}

#[rstest]
fn chan_open_ack_happy_path(mut handshake: ChannelHandshake) {
    let msg = envelope(msg_chan_open_ack(&handshake));

    let ctx_a = handshake.relayer.get_ctx_a_mut();
    validate(ctx_a.ibc_store(), &ctx_a.ibc_router, msg.clone()).expect("validation succeeds");
    execute(&mut ctx_a.ibc_store, &mut ctx_a.ibc_router, msg).expect("execution succeeds");

    let chan_end_on_a = handshake.chan_end_on_a();
    assert_eq!(chan_end_on_a.state, State::Open);
    assert_eq!(
        chan_end_on_a.counterparty().channel_id(),
        Some(&handshake.chan_id_on_b)
    );

    let event = last_event(handshake.relayer.get_ctx_a(), |event| match event {
        IbcEvent::OpenAckChannel(e) => Some(e.clone()),
        _ => None,
    })
    .expect("event emitted");
    assert_eq!(event.chan_id_on_a(), &handshake.chan_id_on_a);
    assert_eq!(event.chan_id_on_b(), Some(&handshake.chan_id_on_b));
}

#[rstest]
fn chan_open_ack_with_version_b_did_not_choose(handshake: ChannelHandshake) {
    let msg = MsgChannelOpenAck {
        version_on_b: Version::new("ics20-1".to_string()),
        ..msg_chan_open_ack(&handshake)
    };

    assert_eq!(
        validate_kind(handshake.relayer.get_ctx_a(), envelope(msg)),
        ErrorKind::InvalidProof
    );
}

#[rstest]
fn chan_open_ack_for_unknown_channel(handshake: ChannelHandshake) {
    let msg = MsgChannelOpenAck {
        chan_id_on_a: ChannelId::new(3),
        ..msg_chan_open_ack(&handshake)
    };

    assert_eq!(
        validate_kind(handshake.relayer.get_ctx_a(), envelope(msg)),
        ErrorKind::NotFound
    );
}

#[test_log::test]
fn chan_open_ack_with_stale_client() {
    let hs = ChannelHandshake::new(Order::Ordered).init_on_a().try_on_b();

    let msg = envelope(msg_chan_open_ack(&hs));

    assert_eq!(
        validate_kind(hs.relayer.get_ctx_a(), msg),
        ErrorKind::InvalidProof
    );
}

#[rstest]
fn chan_open_ack_replayed(mut handshake: ChannelHandshake) {
    let msg = envelope(msg_chan_open_ack(&handshake));
    handshake
        .relayer
        .get_ctx_a_mut()
        .deliver(msg.clone())
        .expect("first delivery succeeds");

    assert_eq!(
        validate_kind(handshake.relayer.get_ctx_a(), msg),
        ErrorKind::InvalidState
    );
}
