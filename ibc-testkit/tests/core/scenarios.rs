//! End-to-end runs between two mock chains: handshakes, a packet round trip
//! on each kind of channel, timeouts and channel closing.

use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::channel::types::channel::{Order, State as ChannelState};
use ibc_core::channel::types::packet::Packet;
use ibc_core::connection::types::msgs::{ConnectionMsg, MsgConnectionOpenInit};
use ibc_core::connection::types::{Counterparty as ConnectionCounterparty, State as ConnectionState};
use ibc_core::handler::types::events::IbcEvent;
use ibc_core::handler::types::msgs::MsgEnvelope;
use ibc_core::host::types::error::ErrorKind;
use ibc_core::host::types::identifiers::Sequence;
use ibc_core::host::types::path::{AckPath, CommitmentPath, ReceiptPath, SeqAckPath, SeqRecvPath};
use ibc_core::host::ValidationContext;
use ibc_testkit::context::MockContext;
use ibc_testkit::fixtures::core::client::mock_client_id;
use ibc_testkit::fixtures::core::signer::dummy_account_id;
use ibc_testkit::relayer::context::RelayerContext;
use ibc_testkit::relayer::utils::{last_event, RelayerOps};
use ibc_testkit::testapp::ibc::applications::mock::{AckMode, MockModule};
use sha2::{Digest, Sha256};

use super::{error_kind, LinkedChains};

fn commitment_path(packet: &Packet) -> CommitmentPath {
    CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a)
}

fn receipt_path(packet: &Packet) -> ReceiptPath {
    ReceiptPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a)
}

fn has_commitment(ctx: &MockContext, packet: &Packet) -> bool {
    ctx.ibc_store()
        .get_packet_commitment(&commitment_path(packet))
        .is_ok()
}

fn has_receipt(ctx: &MockContext, packet: &Packet) -> bool {
    ctx.ibc_store()
        .get_packet_receipt(&receipt_path(packet))
        .expect("no error")
        .is_ok()
}

/// Advances `B` until its height is past the timeout height of `packet`.
fn let_packet_expire_on_b(chains: &mut LinkedChains, packet: &Packet) {
    while !packet.timed_out(
        &chains.relayer.get_ctx_b().latest_timestamp(),
        chains.relayer.get_ctx_b().latest_height(),
    ) {
        chains.relayer.get_ctx_b_mut().advance_block();
    }
}

#[test_log::test]
fn connection_handshake_opens_both_ends() {
    let mut relayer = RelayerContext::new(MockContext::default(), MockContext::default());

    let client_id_on_a = relayer.create_client_on_a();
    let client_id_on_b = relayer.create_client_on_b();

    assert_eq!(client_id_on_a, mock_client_id(0));
    assert_eq!(client_id_on_b, mock_client_id(0));

    let (conn_id_on_a, conn_id_on_b) =
        relayer.create_connection_on_a(client_id_on_a.clone(), client_id_on_b.clone());

    let conn_end_on_a = relayer
        .get_ctx_a()
        .ibc_store()
        .connection_end(&conn_id_on_a)
        .expect("connection exists");
    let conn_end_on_b = relayer
        .get_ctx_b()
        .ibc_store()
        .connection_end(&conn_id_on_b)
        .expect("connection exists");

    assert_eq!(conn_end_on_a.state(), &ConnectionState::Open);
    assert_eq!(conn_end_on_b.state(), &ConnectionState::Open);
    assert_eq!(conn_end_on_a.counterparty().connection_id(), Some(&conn_id_on_b));
    assert_eq!(conn_end_on_b.counterparty().connection_id(), Some(&conn_id_on_a));
    assert_eq!(conn_end_on_a.versions(), conn_end_on_b.versions());
    assert_eq!(conn_end_on_a.versions().len(), 1);

    // Every handshake step is rejected once both ends are open.
    let msg_init = MsgEnvelope::Connection(ConnectionMsg::OpenInit(MsgConnectionOpenInit {
        conn_id_on_a: conn_id_on_a.clone(),
        client_id_on_a: client_id_on_a.clone(),
        counterparty: ConnectionCounterparty::new(
            client_id_on_b.clone(),
            None,
            relayer.get_ctx_b().ibc_store().commitment_prefix(),
        ),
        version: None,
        signer: dummy_account_id(),
    }));
    assert_eq!(
        error_kind(relayer.get_ctx_a_mut().deliver(msg_init)),
        ErrorKind::InvalidState
    );

    let msg_try = RelayerOps::msg_connection_open_try(
        relayer.get_ctx_a(),
        conn_id_on_a.clone(),
        conn_id_on_b.clone(),
        client_id_on_a.clone(),
        client_id_on_b.clone(),
    );
    assert_eq!(
        error_kind(relayer.get_ctx_b_mut().deliver(msg_try)),
        ErrorKind::InvalidState
    );

    let msg_ack = RelayerOps::msg_connection_open_ack(
        relayer.get_ctx_b(),
        conn_id_on_a.clone(),
        conn_id_on_b.clone(),
        client_id_on_b,
    );
    assert_eq!(
        error_kind(relayer.get_ctx_a_mut().deliver(msg_ack)),
        ErrorKind::InvalidState
    );

    let msg_confirm =
        RelayerOps::msg_connection_open_confirm(relayer.get_ctx_a(), conn_id_on_a, conn_id_on_b);
    assert_eq!(
        error_kind(relayer.get_ctx_b_mut().deliver(msg_confirm)),
        ErrorKind::InvalidState
    );
}

#[test_log::test]
fn unordered_packet_round_trip_with_late_acknowledgement() {
    let mut chains = LinkedChains::new(Order::Unordered, AckMode::Async);

    let packet = chains.packet_to_b(1, b"hello", chains.far_height_on_b());

    chains
        .relayer
        .send_packet_on_a(&chains.client_id_on_b, packet.clone());

    assert_eq!(
        chains
            .relayer
            .get_ctx_a()
            .ibc_store()
            .get_packet_commitment(&commitment_path(&packet))
            .expect("commitment stored"),
        packet.commitment()
    );

    // `B` receives the packet but does not acknowledge it yet.
    let acknowledgement = chains.relayer.relay_packet_to_b(
        &chains.client_id_on_a,
        &chains.client_id_on_b,
        packet.clone(),
    );
    assert!(acknowledgement.is_none());
    assert!(has_receipt(chains.relayer.get_ctx_b(), &packet));
    assert!(has_commitment(chains.relayer.get_ctx_a(), &packet));

    let acknowledgement = Acknowledgement::from(b"ok".to_vec());
    chains
        .relayer
        .get_ctx_b_mut()
        .write_acknowledgement(packet.clone(), acknowledgement.clone())
        .expect("success");

    let ack_path = AckPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);
    assert_eq!(
        chains
            .relayer
            .get_ctx_b()
            .ibc_store()
            .get_packet_acknowledgement(&ack_path)
            .expect("acknowledgement stored")
            .into_vec(),
        Sha256::digest(b"ok").to_vec()
    );

    chains
        .relayer
        .ack_packet_on_a(&chains.client_id_on_a, packet.clone(), acknowledgement.clone());

    assert!(!has_commitment(chains.relayer.get_ctx_a(), &packet));
    assert_eq!(chains.module_a.state().lock().acknowledged.len(), 1);

    // Replays are rejected on both ends.
    chains.relayer.sync_client_on_b(&chains.client_id_on_b);
    let msg_recv = RelayerOps::msg_recv_packet(chains.relayer.get_ctx_a(), packet.clone());
    assert_eq!(
        error_kind(chains.relayer.get_ctx_b_mut().deliver(msg_recv)),
        ErrorKind::InvalidState
    );

    let msg_ack =
        RelayerOps::msg_acknowledgement(chains.relayer.get_ctx_b(), packet, acknowledgement);
    assert_eq!(
        error_kind(chains.relayer.get_ctx_a_mut().deliver(msg_ack)),
        ErrorKind::NotFound
    );
}

#[test_log::test]
fn ordered_channel_rejects_out_of_order_packets() {
    let mut chains = LinkedChains::new(Order::Ordered, AckMode::Echo);

    let timeout_height = chains.far_height_on_b();
    let packet_1 = chains.packet_to_b(1, b"first", timeout_height);
    let packet_2 = chains.packet_to_b(2, b"second", timeout_height);

    chains
        .relayer
        .send_packet_on_a(&chains.client_id_on_b, packet_1.clone());
    chains
        .relayer
        .send_packet_on_a(&chains.client_id_on_b, packet_2.clone());

    let msg_recv_2 = RelayerOps::msg_recv_packet(chains.relayer.get_ctx_a(), packet_2.clone());
    assert_eq!(
        error_kind(chains.relayer.get_ctx_b_mut().deliver(msg_recv_2)),
        ErrorKind::InvalidPacket
    );

    let ack_1 = chains.relayer.relay_packet_to_b(
        &chains.client_id_on_a,
        &chains.client_id_on_b,
        packet_1,
    );
    assert_eq!(ack_1, Some(Acknowledgement::from(b"first".to_vec())));

    let ack_2 = chains.relayer.relay_packet_to_b(
        &chains.client_id_on_a,
        &chains.client_id_on_b,
        packet_2.clone(),
    );
    assert_eq!(ack_2, Some(Acknowledgement::from(b"second".to_vec())));

    let next_seq_recv_on_b = chains
        .relayer
        .get_ctx_b()
        .ibc_store()
        .get_next_sequence_recv(&SeqRecvPath::new(&packet_2.port_id_on_b, &packet_2.chan_id_on_b))
        .expect("sequence exists");
    let next_seq_ack_on_a = chains
        .relayer
        .get_ctx_a()
        .ibc_store()
        .get_next_sequence_ack(&SeqAckPath::new(&packet_2.port_id_on_a, &packet_2.chan_id_on_a))
        .expect("sequence exists");

    assert_eq!(next_seq_recv_on_b, Sequence::from(3));
    assert_eq!(next_seq_ack_on_a, Sequence::from(3));

    let received: Vec<Sequence> = chains
        .module_b
        .state()
        .lock()
        .received
        .iter()
        .map(|packet| packet.seq_on_a)
        .collect();
    assert_eq!(received, vec![Sequence::from(1), Sequence::from(2)]);
}

#[test_log::test]
fn unordered_timeout_leaves_the_channel_open() {
    let mut chains = LinkedChains::new(Order::Unordered, AckMode::Echo);

    for seq in 1..=4 {
        let packet = chains.packet_to_b(seq, b"ping", chains.far_height_on_b());
        let acknowledgement = chains.relayer.send_packet_on_a_and_relay(
            &chains.client_id_on_a,
            &chains.client_id_on_b,
            packet,
        );
        assert!(acknowledgement.is_some());
    }

    let timeout_height = chains.relayer.get_ctx_b().latest_height().add(5);
    let packet = chains.packet_to_b(5, b"late", timeout_height);

    chains
        .relayer
        .send_packet_on_a(&chains.client_id_on_b, packet.clone());
    assert!(has_commitment(chains.relayer.get_ctx_a(), &packet));

    let_packet_expire_on_b(&mut chains, &packet);
    assert!(!has_receipt(chains.relayer.get_ctx_b(), &packet));

    chains
        .relayer
        .timeout_packet_on_a(&chains.client_id_on_a, packet.clone());

    assert!(!has_commitment(chains.relayer.get_ctx_a(), &packet));
    assert_eq!(chains.module_a.state().lock().timed_out, vec![packet.clone()]);
    assert_eq!(
        chains
            .relayer
            .channel_end_on_a(&MockModule::port_id(), &chains.chan_id_on_a)
            .state,
        ChannelState::Open
    );

    // `B` can no longer receive the packet.
    chains.relayer.sync_client_on_b(&chains.client_id_on_b);
    let msg_recv = RelayerOps::msg_recv_packet(chains.relayer.get_ctx_a(), packet);
    assert_eq!(
        error_kind(chains.relayer.get_ctx_b_mut().deliver(msg_recv)),
        ErrorKind::Timeout
    );

    // Later sequences still go through.
    assert_eq!(
        chains
            .relayer
            .channel_end_on_b(&MockModule::port_id(), &chains.chan_id_on_b)
            .state,
        ChannelState::Open
    );
    let packet_6 = chains.packet_to_b(6, b"pong", chains.far_height_on_b());
    assert_eq!(
        chains.relayer.send_packet_on_a_and_relay(
            &chains.client_id_on_a,
            &chains.client_id_on_b,
            packet_6
        ),
        Some(Acknowledgement::from(b"pong".to_vec()))
    );
}

#[test_log::test]
fn ordered_timeout_closes_the_channel() {
    let mut chains = LinkedChains::new(Order::Ordered, AckMode::Echo);

    let timeout_height = chains.relayer.get_ctx_b().latest_height().add(5);
    let packet = chains.packet_to_b(1, b"late", timeout_height);

    chains
        .relayer
        .send_packet_on_a(&chains.client_id_on_b, packet.clone());

    let_packet_expire_on_b(&mut chains, &packet);

    chains
        .relayer
        .timeout_packet_on_a(&chains.client_id_on_a, packet.clone());

    assert!(!has_commitment(chains.relayer.get_ctx_a(), &packet));
    assert_eq!(
        chains
            .relayer
            .channel_end_on_a(&MockModule::port_id(), &chains.chan_id_on_a)
            .state,
        ChannelState::Closed
    );
    assert!(last_event(chains.relayer.get_ctx_a(), |event| match event {
        IbcEvent::ChannelClosed(e) => Some(e.clone()),
        _ => None,
    })
    .is_some());

    // Nothing is sent on the closed end any more.
    let next_packet = chains.packet_to_b(2, b"again", chains.far_height_on_b());
    assert_eq!(
        error_kind(chains.relayer.get_ctx_a_mut().send_packet(next_packet)),
        ErrorKind::InvalidState
    );

    // Nor received on it.
    let packet_from_b = chains.packet_to_a(1, b"reply");
    chains
        .relayer
        .get_ctx_b_mut()
        .send_packet(packet_from_b.clone())
        .expect("the end on B is still open");
    chains.relayer.sync_client_on_a(&chains.client_id_on_a);

    let msg_recv = RelayerOps::msg_recv_packet(chains.relayer.get_ctx_b(), packet_from_b);
    assert_eq!(
        error_kind(chains.relayer.get_ctx_a_mut().deliver(msg_recv)),
        ErrorKind::InvalidState
    );
}

#[test_log::test]
fn channel_close_handshake_stops_packets() {
    let mut chains = LinkedChains::new(Order::Unordered, AckMode::Echo);

    let in_flight = chains.packet_to_b(1, b"in flight", chains.far_height_on_b());
    chains
        .relayer
        .send_packet_on_a(&chains.client_id_on_b, in_flight.clone());

    chains.relayer.close_channel_on_a(
        chains.client_id_on_a.clone(),
        MockModule::port_id(),
        chains.chan_id_on_a.clone(),
        chains.client_id_on_b.clone(),
        MockModule::port_id(),
        chains.chan_id_on_b.clone(),
    );

    assert_eq!(
        chains
            .relayer
            .channel_end_on_a(&MockModule::port_id(), &chains.chan_id_on_a)
            .state,
        ChannelState::Closed
    );
    assert_eq!(
        chains
            .relayer
            .channel_end_on_b(&MockModule::port_id(), &chains.chan_id_on_b)
            .state,
        ChannelState::Closed
    );
    assert_eq!(
        chains.module_a.state().lock().closed_channels,
        vec![(MockModule::port_id(), chains.chan_id_on_a.clone())]
    );
    assert_eq!(
        chains.module_b.state().lock().closed_channels,
        vec![(MockModule::port_id(), chains.chan_id_on_b.clone())]
    );

    let next_packet = chains.packet_to_b(2, b"after close", chains.far_height_on_b());
    assert_eq!(
        error_kind(chains.relayer.get_ctx_a_mut().send_packet(next_packet)),
        ErrorKind::InvalidState
    );

    let packet_from_b = chains.packet_to_a(1, b"after close");
    assert_eq!(
        error_kind(chains.relayer.get_ctx_b_mut().send_packet(packet_from_b)),
        ErrorKind::InvalidState
    );

    chains.relayer.sync_client_on_b(&chains.client_id_on_b);
    let msg_recv = RelayerOps::msg_recv_packet(chains.relayer.get_ctx_a(), in_flight.clone());
    assert_eq!(
        error_kind(chains.relayer.get_ctx_b_mut().deliver(msg_recv)),
        ErrorKind::InvalidState
    );

    // The packet that was in flight is settled through the closed channel.
    chains
        .relayer
        .timeout_packet_on_close_on_a(&chains.client_id_on_a, in_flight.clone());

    assert!(!has_commitment(chains.relayer.get_ctx_a(), &in_flight));
    assert_eq!(chains.module_a.state().lock().timed_out, vec![in_flight]);
}
