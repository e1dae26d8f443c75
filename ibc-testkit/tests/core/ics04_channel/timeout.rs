use ibc_core::channel::types::channel::{Order, State};
use ibc_core::channel::types::msgs::PacketMsg;
use ibc_core::channel::types::packet::Packet;
use ibc_core::entrypoint::{execute, validate};
use ibc_core::handler::types::events::IbcEvent;
use ibc_core::handler::types::msgs::MsgEnvelope;
use ibc_core::host::types::error::ErrorKind;
use ibc_core::host::types::identifiers::Sequence;
use ibc_core::host::types::path::CommitmentPath;
use ibc_core::host::ValidationContext;
use ibc_testkit::relayer::utils::{last_event, RelayerOps};
use ibc_testkit::testapp::ibc::applications::mock::{AckMode, MockModule};
use rstest::{fixture, rstest};

use super::validate_kind;
use crate::core::LinkedChains;

struct Fixture {
    chains: LinkedChains,
    packet: Packet,
}

/// A packet sent on `A` that expires on `B` a few blocks later.
fn expiring_packet(ordering: Order) -> Fixture {
    let mut chains = LinkedChains::new(ordering, AckMode::Echo);
    let timeout_height = chains.relayer.get_ctx_b().latest_height().add(3);
    let packet = chains.packet_to_b(1, b"late", timeout_height);

    chains
        .relayer
        .get_ctx_a_mut()
        .send_packet(packet.clone())
        .expect("success");

    Fixture { chains, packet }
}

/// Advances `B` past the timeout of `packet`, then syncs the client on `A`.
fn expire_on_b(chains: &mut LinkedChains, packet: &Packet) {
    while !packet.timed_out(
        &chains.relayer.get_ctx_b().latest_timestamp(),
        chains.relayer.get_ctx_b().latest_height(),
    ) {
        chains.relayer.get_ctx_b_mut().advance_block();
    }
    chains.relayer.sync_client_on_a(&chains.client_id_on_a);
}

#[fixture]
fn fixture() -> Fixture {
    let mut fixture = expiring_packet(Order::Unordered);
    expire_on_b(&mut fixture.chains, &fixture.packet);
    fixture
}

fn msg_timeout(chains: &LinkedChains, packet: &Packet) -> MsgEnvelope {
    RelayerOps::msg_timeout(chains.relayer.get_ctx_b(), packet.clone())
}

#[rstest]
fn timeout_happy_path(fixture: Fixture) {
    let Fixture { mut chains, packet } = fixture;

    let msg = msg_timeout(&chains, &packet);
    let ctx_a = chains.relayer.get_ctx_a_mut();
    validate(ctx_a.ibc_store(), &ctx_a.ibc_router, msg.clone()).expect("validation succeeds");
    execute(&mut ctx_a.ibc_store, &mut ctx_a.ibc_router, msg).expect("execution succeeds");

    assert!(chains
        .relayer
        .get_ctx_a()
        .ibc_store()
        .get_packet_commitment(&CommitmentPath::new(
            &packet.port_id_on_a,
            &packet.chan_id_on_a,
            packet.seq_on_a,
        ))
        .is_err());
    assert_eq!(chains.module_a.state().lock().timed_out, vec![packet.clone()]);

    let event = last_event(chains.relayer.get_ctx_a(), |event| match event {
        IbcEvent::TimeoutPacket(e) => Some(e.clone()),
        _ => None,
    })
    .expect("event emitted");
    assert_eq!(event.packet(), &packet);

    // Unordered channels stay open.
    let chan_end_on_a = chains
        .relayer
        .channel_end_on_a(&MockModule::port_id(), &chains.chan_id_on_a);
    assert_eq!(chan_end_on_a.state, State::Open);
}

#[test_log::test]
fn timeout_before_expiry() {
    let Fixture { mut chains, packet } = expiring_packet(Order::Unordered);
    chains.relayer.sync_client_on_a(&chains.client_id_on_a);

    assert_eq!(
        validate_kind(chains.relayer.get_ctx_a(), msg_timeout(&chains, &packet)),
        ErrorKind::Timeout
    );
}

#[test_log::test]
fn timeout_of_received_packet() {
    let Fixture { mut chains, packet } = expiring_packet(Order::Unordered);

    // `B` receives the packet just in time.
    chains.relayer.sync_client_on_b(&chains.client_id_on_b);
    let recv = RelayerOps::msg_recv_packet(chains.relayer.get_ctx_a(), packet.clone());
    chains
        .relayer
        .get_ctx_b_mut()
        .deliver(recv)
        .expect("success");
    expire_on_b(&mut chains, &packet);

    assert_eq!(
        validate_kind(chains.relayer.get_ctx_a(), msg_timeout(&chains, &packet)),
        ErrorKind::InvalidProof
    );
}

#[rstest]
fn timeout_with_other_data(fixture: Fixture) {
    let Fixture { chains, packet } = fixture;

    let msg = match msg_timeout(&chains, &packet) {
        MsgEnvelope::Packet(PacketMsg::Timeout(mut msg)) => {
            msg.packet.data = b"early".to_vec();
            MsgEnvelope::Packet(PacketMsg::Timeout(msg))
        }
        _ => panic!("unexpected message"),
    };

    assert_eq!(
        validate_kind(chains.relayer.get_ctx_a(), msg),
        ErrorKind::InvalidPacket
    );
}

#[rstest]
fn timeout_replayed(fixture: Fixture) {
    let Fixture { mut chains, packet } = fixture;

    let msg = msg_timeout(&chains, &packet);
    chains
        .relayer
        .get_ctx_a_mut()
        .deliver(msg.clone())
        .expect("first delivery succeeds");

    assert_eq!(
        validate_kind(chains.relayer.get_ctx_a(), msg),
        ErrorKind::NotFound
    );
}

#[test_log::test]
fn timeout_on_ordered_channel_closes_it() {
    let Fixture { mut chains, packet } = expiring_packet(Order::Ordered);
    expire_on_b(&mut chains, &packet);

    let msg = msg_timeout(&chains, &packet);
    chains
        .relayer
        .get_ctx_a_mut()
        .deliver(msg)
        .expect("success");

    let chan_end_on_a = chains
        .relayer
        .channel_end_on_a(&MockModule::port_id(), &chains.chan_id_on_a);
    assert_eq!(chan_end_on_a.state, State::Closed);

    let event = last_event(chains.relayer.get_ctx_a(), |event| match event {
        IbcEvent::ChannelClosed(e) => Some(e.clone()),
        _ => None,
    })
    .expect("event emitted");
    assert_eq!(event.chan_id_on_a(), &chains.chan_id_on_a);
}

#[test_log::test]
fn timeout_on_ordered_channel_with_stale_receive_sequence() {
    let Fixture { mut chains, packet } = expiring_packet(Order::Ordered);
    expire_on_b(&mut chains, &packet);

    let msg = match msg_timeout(&chains, &packet) {
        MsgEnvelope::Packet(PacketMsg::Timeout(mut msg)) => {
            msg.next_seq_recv_on_b = Sequence::from(2);
            MsgEnvelope::Packet(PacketMsg::Timeout(msg))
        }
        _ => panic!("unexpected message"),
    };

    assert_eq!(
        validate_kind(chains.relayer.get_ctx_a(), msg),
        ErrorKind::InvalidPacket
    );
}
