use ibc_core::channel::types::channel::Order;
use ibc_core::channel::types::commitment::compute_ack_commitment;
use ibc_core::channel::types::msgs::{ChannelMsg, MsgChannelCloseInit, PacketMsg};
use ibc_core::channel::types::packet::Packet;
use ibc_core::entrypoint::{execute, validate};
use ibc_core::handler::types::events::IbcEvent;
use ibc_core::handler::types::msgs::MsgEnvelope;
use ibc_core::host::types::error::ErrorKind;
use ibc_core::host::types::identifiers::Sequence;
use ibc_core::host::types::path::{AckPath, ReceiptPath, SeqRecvPath};
use ibc_core::host::ValidationContext;
use ibc_testkit::fixtures::core::signer::dummy_account_id;
use ibc_testkit::relayer::utils::RelayerOps;
use ibc_testkit::testapp::ibc::applications::mock::{AckMode, MockModule};
use rstest::{fixture, rstest};

use super::validate_kind;
use crate::core::LinkedChains;

struct Fixture {
    chains: LinkedChains,
    packet: Packet,
}

/// A packet sent on `A`, with the client on `B` synced to prove it.
fn sent_packet(ordering: Order) -> Fixture {
    let mut chains = LinkedChains::new(ordering, AckMode::Echo);
    let packet = chains.packet_to_b(1, b"ping", chains.far_height_on_b());

    chains
        .relayer
        .send_packet_on_a(&chains.client_id_on_b, packet.clone());

    Fixture { chains, packet }
}

#[fixture]
fn fixture() -> Fixture {
    sent_packet(Order::Unordered)
}

fn msg_recv_packet(chains: &LinkedChains, packet: Packet) -> MsgEnvelope {
    RelayerOps::msg_recv_packet(chains.relayer.get_ctx_a(), packet)
}

#[rstest]
fn recv_packet_happy_path(fixture: Fixture) {
    let Fixture { mut chains, packet } = fixture;

    let msg = msg_recv_packet(&chains, packet.clone());
    let ctx_b = chains.relayer.get_ctx_b_mut();
    validate(ctx_b.ibc_store(), &ctx_b.ibc_router, msg.clone()).expect("validation succeeds");
    execute(&mut ctx_b.ibc_store, &mut ctx_b.ibc_router, msg).expect("execution succeeds");

    let store = chains.relayer.get_ctx_b().ibc_store();
    let receipt = store
        .get_packet_receipt(&ReceiptPath::new(
            &packet.port_id_on_b,
            &packet.chan_id_on_b,
            packet.seq_on_a,
        ))
        .expect("no error");
    assert!(receipt.is_ok());

    // The echoing module acknowledges right away.
    let ack_commitment = store
        .get_packet_acknowledgement(&AckPath::new(
            &packet.port_id_on_b,
            &packet.chan_id_on_b,
            packet.seq_on_a,
        ))
        .expect("acknowledgement written");
    assert_eq!(
        ack_commitment,
        compute_ack_commitment(&packet.data.clone().into())
    );
    assert_eq!(chains.module_b.state().lock().received, vec![packet]);

    let events = chains.relayer.get_ctx_b().get_events();
    let recv_at = events
        .iter()
        .position(|event| matches!(event, IbcEvent::ReceivePacket(_)))
        .expect("receive event");
    let ack_at = events
        .iter()
        .position(|event| matches!(event, IbcEvent::WriteAcknowledgement(_)))
        .expect("write acknowledgement event");
    assert!(recv_at < ack_at);
}

#[test_log::test]
fn recv_packet_on_ordered_channel_moves_the_receive_sequence() {
    let Fixture { mut chains, packet } = sent_packet(Order::Ordered);

    let msg = msg_recv_packet(&chains, packet.clone());
    chains
        .relayer
        .get_ctx_b_mut()
        .deliver(msg)
        .expect("success");

    let next_seq_recv = chains
        .relayer
        .get_ctx_b()
        .ibc_store()
        .get_next_sequence_recv(&SeqRecvPath::new(&packet.port_id_on_b, &packet.chan_id_on_b))
        .expect("sequence stored");
    assert_eq!(next_seq_recv, Sequence::from(2));
}

#[test_log::test]
fn recv_packet_with_stale_client() {
    let mut chains = LinkedChains::new(Order::Unordered, AckMode::Echo);
    let packet = chains.packet_to_b(1, b"ping", chains.far_height_on_b());

    // Sent without updating the client on `B`.
    chains
        .relayer
        .get_ctx_a_mut()
        .send_packet(packet.clone())
        .expect("success");

    assert_eq!(
        validate_kind(chains.relayer.get_ctx_b(), msg_recv_packet(&chains, packet)),
        ErrorKind::InvalidProof
    );
}

#[rstest]
fn recv_packet_with_other_data(fixture: Fixture) {
    let Fixture { chains, packet } = fixture;

    let msg = match msg_recv_packet(&chains, packet) {
        MsgEnvelope::Packet(PacketMsg::Recv(mut msg)) => {
            msg.packet.data = b"pong".to_vec();
            MsgEnvelope::Packet(PacketMsg::Recv(msg))
        }
        _ => panic!("unexpected message"),
    };

    assert_eq!(
        validate_kind(chains.relayer.get_ctx_b(), msg),
        ErrorKind::InvalidProof
    );
}

#[rstest]
fn recv_packet_replayed(fixture: Fixture) {
    let Fixture { mut chains, packet } = fixture;

    let msg = msg_recv_packet(&chains, packet);
    chains
        .relayer
        .get_ctx_b_mut()
        .deliver(msg.clone())
        .expect("first delivery succeeds");

    assert_eq!(
        validate_kind(chains.relayer.get_ctx_b(), msg),
        ErrorKind::InvalidState
    );
}

#[test_log::test]
fn recv_packet_after_its_timeout() {
    let mut chains = LinkedChains::new(Order::Unordered, AckMode::Echo);
    let timeout_height = chains.relayer.get_ctx_b().latest_height().add(1);
    let packet = chains.packet_to_b(1, b"ping", timeout_height);

    chains
        .relayer
        .send_packet_on_a(&chains.client_id_on_b, packet.clone());
    // `B` moves past the timeout height.
    chains.relayer.get_ctx_b_mut().advance_block();

    assert_eq!(
        validate_kind(chains.relayer.get_ctx_b(), msg_recv_packet(&chains, packet)),
        ErrorKind::Timeout
    );
}

#[rstest]
fn recv_packet_on_closed_channel(fixture: Fixture) {
    let Fixture { mut chains, packet } = fixture;

    let close = MsgEnvelope::Channel(ChannelMsg::CloseInit(MsgChannelCloseInit {
        port_id_on_a: MockModule::port_id(),
        chan_id_on_a: chains.chan_id_on_b.clone(),
        signer: dummy_account_id(),
    }));
    chains
        .relayer
        .get_ctx_b_mut()
        .deliver(close)
        .expect("success");

    assert_eq!(
        validate_kind(chains.relayer.get_ctx_b(), msg_recv_packet(&chains, packet)),
        ErrorKind::InvalidState
    );
}
