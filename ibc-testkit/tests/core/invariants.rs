//! Properties that hold for any sequence of messages between two chains.

use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::channel::types::channel::{Order, State as ChannelState};
use ibc_core::channel::types::commitment::compute_packet_commitment;
use ibc_core::channel::types::msgs::{ChannelMsg, MsgChannelCloseInit};
use ibc_core::channel::types::packet::Packet;
use ibc_core::handler::types::msgs::MsgEnvelope;
use ibc_core::host::types::error::ErrorKind;
use ibc_core::host::types::identifiers::Sequence;
use ibc_core::host::types::path::{CommitmentPath, SeqSendPath};
use ibc_core::host::ValidationContext;
use ibc_testkit::fixtures::core::signer::dummy_account_id;
use ibc_testkit::relayer::utils::RelayerOps;
use ibc_testkit::testapp::ibc::applications::mock::{AckMode, MockModule};
use rstest::rstest;

use super::{error_kind, LinkedChains};

fn commitment_path(packet: &Packet) -> CommitmentPath {
    CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a)
}

fn expiring_packet(chains: &LinkedChains, seq: u64) -> Packet {
    let timeout_height = chains.relayer.get_ctx_b().latest_height().add(4);
    chains.packet_to_b(seq, b"expiring", timeout_height)
}

fn expire_on_b(chains: &mut LinkedChains, packet: &Packet) {
    while !packet.timed_out(
        &chains.relayer.get_ctx_b().latest_timestamp(),
        chains.relayer.get_ctx_b().latest_height(),
    ) {
        chains.relayer.get_ctx_b_mut().advance_block();
    }
}

#[rstest]
#[case::ordered(Order::Ordered)]
#[case::unordered(Order::Unordered)]
fn acknowledged_packet_cannot_time_out(#[case] ordering: Order) {
    let mut chains = LinkedChains::new(ordering, AckMode::Echo);
    let packet = expiring_packet(&chains, 1);

    let acknowledgement = chains.relayer.send_packet_on_a_and_relay(
        &chains.client_id_on_a,
        &chains.client_id_on_b,
        packet.clone(),
    );
    assert!(acknowledgement.is_some());

    expire_on_b(&mut chains, &packet);
    chains.relayer.sync_client_on_a(&chains.client_id_on_a);

    let msg_timeout = RelayerOps::msg_timeout(chains.relayer.get_ctx_b(), packet);
    assert_eq!(
        error_kind(chains.relayer.get_ctx_a_mut().deliver(msg_timeout)),
        ErrorKind::NotFound
    );
    assert!(chains.module_a.state().lock().timed_out.is_empty());
}

#[rstest]
#[case::ordered(Order::Ordered)]
#[case::unordered(Order::Unordered)]
fn received_packet_cannot_time_out(#[case] ordering: Order) {
    let mut chains = LinkedChains::new(ordering, AckMode::Async);
    let packet = expiring_packet(&chains, 1);

    let acknowledgement = chains.relayer.send_packet_on_a_and_relay(
        &chains.client_id_on_a,
        &chains.client_id_on_b,
        packet.clone(),
    );
    assert!(acknowledgement.is_none());

    expire_on_b(&mut chains, &packet);
    chains.relayer.sync_client_on_a(&chains.client_id_on_a);

    // The commitment is still on `A`, but `B` cannot prove it never got it.
    let msg_timeout = RelayerOps::msg_timeout(chains.relayer.get_ctx_b(), packet.clone());
    assert!(chains.relayer.get_ctx_a_mut().deliver(msg_timeout).is_err());
    assert!(chains
        .relayer
        .get_ctx_a()
        .ibc_store()
        .get_packet_commitment(&commitment_path(&packet))
        .is_ok());
}

#[test_log::test]
fn timed_out_packet_cannot_be_acknowledged() {
    let mut chains = LinkedChains::new(Order::Unordered, AckMode::Echo);
    let packet = expiring_packet(&chains, 1);

    chains
        .relayer
        .send_packet_on_a(&chains.client_id_on_b, packet.clone());
    expire_on_b(&mut chains, &packet);
    chains
        .relayer
        .timeout_packet_on_a(&chains.client_id_on_a, packet.clone());

    let msg_ack = RelayerOps::msg_acknowledgement(
        chains.relayer.get_ctx_b(),
        packet,
        Acknowledgement::from(b"expiring".to_vec()),
    );
    assert_eq!(
        error_kind(chains.relayer.get_ctx_a_mut().deliver(msg_ack)),
        ErrorKind::NotFound
    );
    assert!(chains.module_a.state().lock().acknowledged.is_empty());
}

#[test_log::test]
fn timed_out_packet_cannot_be_timed_out_again() {
    let mut chains = LinkedChains::new(Order::Unordered, AckMode::Echo);
    let packet = expiring_packet(&chains, 1);

    chains
        .relayer
        .send_packet_on_a(&chains.client_id_on_b, packet.clone());
    expire_on_b(&mut chains, &packet);
    chains
        .relayer
        .timeout_packet_on_a(&chains.client_id_on_a, packet.clone());

    let msg_timeout = RelayerOps::msg_timeout(chains.relayer.get_ctx_b(), packet);
    assert_eq!(
        error_kind(chains.relayer.get_ctx_a_mut().deliver(msg_timeout)),
        ErrorKind::NotFound
    );
    assert_eq!(chains.module_a.state().lock().timed_out.len(), 1);
}

#[rstest]
#[case::ordered(Order::Ordered)]
#[case::unordered(Order::Unordered)]
fn packet_is_delivered_to_the_application_at_most_once(#[case] ordering: Order) {
    let mut chains = LinkedChains::new(ordering, AckMode::Echo);
    let packet = chains.packet_to_b(1, b"once", chains.far_height_on_b());

    chains.relayer.send_packet_on_a_and_relay(
        &chains.client_id_on_a,
        &chains.client_id_on_b,
        packet.clone(),
    );

    chains.relayer.sync_client_on_b(&chains.client_id_on_b);
    let msg_recv = RelayerOps::msg_recv_packet(chains.relayer.get_ctx_a(), packet);
    assert!(chains.relayer.get_ctx_b_mut().deliver(msg_recv).is_err());

    assert_eq!(chains.module_b.state().lock().received.len(), 1);
}

#[test_log::test]
fn stored_commitment_only_depends_on_the_packet() {
    let mut chains_1 = LinkedChains::new(Order::Unordered, AckMode::Echo);
    let mut chains_2 = LinkedChains::new(Order::Unordered, AckMode::Echo);

    let timeout_height = chains_1.far_height_on_b().add(10);
    let packet = chains_1.packet_to_b(1, b"same", timeout_height);

    chains_1
        .relayer
        .get_ctx_a_mut()
        .send_packet(packet.clone())
        .expect("success");

    // Let the second chain be at another height when it sends.
    chains_2.relayer.get_ctx_a_mut().advance_block();
    chains_2
        .relayer
        .get_ctx_a_mut()
        .send_packet(packet.clone())
        .expect("success");

    let commitment_on_1 = chains_1
        .relayer
        .get_ctx_a()
        .ibc_store()
        .get_packet_commitment(&commitment_path(&packet))
        .expect("commitment stored");
    let commitment_on_2 = chains_2
        .relayer
        .get_ctx_a()
        .ibc_store()
        .get_packet_commitment(&commitment_path(&packet))
        .expect("commitment stored");

    assert_eq!(commitment_on_1, commitment_on_2);
    assert_eq!(
        commitment_on_1,
        compute_packet_commitment(
            &packet.data,
            &packet.timeout_height_on_b,
            &packet.timeout_timestamp_on_b,
        )
    );
}

#[test_log::test]
fn send_sequences_are_consecutive() {
    let mut chains = LinkedChains::new(Order::Unordered, AckMode::Echo);
    let timeout_height = chains.far_height_on_b();

    let skipped = chains.packet_to_b(2, b"skipped", timeout_height);
    assert_eq!(
        error_kind(chains.relayer.get_ctx_a_mut().send_packet(skipped)),
        ErrorKind::InvalidPacket
    );

    for seq in 1..=3 {
        let packet = chains.packet_to_b(seq, b"next", timeout_height);
        chains
            .relayer
            .get_ctx_a_mut()
            .send_packet(packet)
            .expect("success");
    }

    let reused = chains.packet_to_b(3, b"reused", timeout_height);
    assert_eq!(
        error_kind(chains.relayer.get_ctx_a_mut().send_packet(reused)),
        ErrorKind::InvalidPacket
    );

    let next_seq_send = chains
        .relayer
        .get_ctx_a()
        .ibc_store()
        .get_next_sequence_send(&SeqSendPath::new(
            &MockModule::port_id(),
            &chains.chan_id_on_a,
        ))
        .expect("sequence exists");
    assert_eq!(next_seq_send, Sequence::from(4));
}

#[test_log::test]
fn closed_channel_does_not_reopen() {
    let mut chains = LinkedChains::new(Order::Unordered, AckMode::Echo);

    chains.relayer.close_channel_on_a(
        chains.client_id_on_a.clone(),
        MockModule::port_id(),
        chains.chan_id_on_a.clone(),
        chains.client_id_on_b.clone(),
        MockModule::port_id(),
        chains.chan_id_on_b.clone(),
    );

    let msg_close_init = MsgEnvelope::Channel(ChannelMsg::CloseInit(MsgChannelCloseInit {
        port_id_on_a: MockModule::port_id(),
        chan_id_on_a: chains.chan_id_on_a.clone(),
        signer: dummy_account_id(),
    }));
    assert_eq!(
        error_kind(chains.relayer.get_ctx_a_mut().deliver(msg_close_init)),
        ErrorKind::InvalidState
    );

    let msg_open_ack = RelayerOps::msg_channel_open_ack(
        chains.relayer.get_ctx_b(),
        MockModule::port_id(),
        chains.chan_id_on_a.clone(),
        MockModule::port_id(),
        chains.chan_id_on_b.clone(),
    );
    assert!(chains.relayer.get_ctx_a_mut().deliver(msg_open_ack).is_err());

    assert_eq!(
        chains
            .relayer
            .channel_end_on_a(&MockModule::port_id(), &chains.chan_id_on_a)
            .state,
        ChannelState::Closed
    );
}
