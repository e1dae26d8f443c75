use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::channel::types::channel::Order;
use ibc_core::channel::types::msgs::PacketMsg;
use ibc_core::channel::types::packet::Packet;
use ibc_core::entrypoint::{execute, validate};
use ibc_core::handler::types::events::IbcEvent;
use ibc_core::handler::types::msgs::MsgEnvelope;
use ibc_core::host::types::error::ErrorKind;
use ibc_core::host::types::path::{CommitmentPath, SeqAckPath};
use ibc_core::host::types::identifiers::Sequence;
use ibc_core::host::ValidationContext;
use ibc_testkit::relayer::utils::{last_event, RelayerOps};
use ibc_testkit::testapp::ibc::applications::mock::AckMode;
use rstest::{fixture, rstest};

use super::validate_kind;
use crate::core::LinkedChains;

struct Fixture {
    chains: LinkedChains,
    packets: Vec<Packet>,
}

/// Packets with sequences `1..=count` sent on `A` and received on `B`,
/// with the client on `A` synced to prove the acknowledgements.
fn received_packets(ordering: Order, count: u64) -> Fixture {
    let mut chains = LinkedChains::new(ordering, AckMode::Echo);

    let packets: Vec<Packet> = (1..=count)
        .map(|seq| chains.packet_to_b(seq, b"ping", chains.far_height_on_b()))
        .collect();

    for packet in &packets {
        chains
            .relayer
            .send_packet_on_a(&chains.client_id_on_b, packet.clone());

        let msg = RelayerOps::msg_recv_packet(chains.relayer.get_ctx_a(), packet.clone());
        chains
            .relayer
            .get_ctx_b_mut()
            .deliver(msg)
            .expect("success");
    }
    chains.relayer.sync_client_on_a(&chains.client_id_on_a);

    Fixture { chains, packets }
}

#[fixture]
fn fixture() -> Fixture {
    received_packets(Order::Unordered, 1)
}

/// What the echoing module on `B` wrote for `packet`.
fn echoed(packet: &Packet) -> Acknowledgement {
    packet.data.clone().into()
}

fn msg_acknowledgement(chains: &LinkedChains, packet: &Packet, ack: Acknowledgement) -> MsgEnvelope {
    RelayerOps::msg_acknowledgement(chains.relayer.get_ctx_b(), packet.clone(), ack)
}

#[rstest]
fn acknowledgement_happy_path(fixture: Fixture) {
    let Fixture {
        mut chains,
        packets,
    } = fixture;
    let packet = &packets[0];

    let msg = msg_acknowledgement(&chains, packet, echoed(packet));
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
    assert_eq!(
        chains.module_a.state().lock().acknowledged,
        vec![(packet.clone(), echoed(packet))]
    );

    let event = last_event(chains.relayer.get_ctx_a(), |event| match event {
        IbcEvent::AcknowledgePacket(e) => Some(e.clone()),
        _ => None,
    })
    .expect("event emitted");
    assert_eq!(event.packet(), packet);
}

#[rstest]
fn acknowledgement_with_other_bytes(fixture: Fixture) {
    let Fixture { chains, packets } = fixture;

    let msg = msg_acknowledgement(&chains, &packets[0], b"forged".to_vec().into());

    assert_eq!(
        validate_kind(chains.relayer.get_ctx_a(), msg),
        ErrorKind::InvalidProof
    );
}

#[rstest]
fn acknowledgement_of_other_packet(fixture: Fixture) {
    let Fixture { chains, packets } = fixture;

    let msg = match msg_acknowledgement(&chains, &packets[0], echoed(&packets[0])) {
        MsgEnvelope::Packet(PacketMsg::Ack(mut msg)) => {
            msg.packet.data = b"pong".to_vec();
            MsgEnvelope::Packet(PacketMsg::Ack(msg))
        }
        _ => panic!("unexpected message"),
    };

    // The commitment on `A` is for the original data.
    assert_eq!(
        validate_kind(chains.relayer.get_ctx_a(), msg),
        ErrorKind::InvalidPacket
    );
}

#[rstest]
fn acknowledgement_of_unsent_packet(fixture: Fixture) {
    let Fixture { chains, .. } = fixture;

    let unsent = chains.packet_to_b(5, b"ping", chains.far_height_on_b());
    let msg = msg_acknowledgement(&chains, &unsent, echoed(&unsent));

    assert_eq!(
        validate_kind(chains.relayer.get_ctx_a(), msg),
        ErrorKind::NotFound
    );
}

#[rstest]
fn acknowledgement_replayed(fixture: Fixture) {
    let Fixture {
        mut chains,
        packets,
    } = fixture;

    let msg = msg_acknowledgement(&chains, &packets[0], echoed(&packets[0]));
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
fn acknowledgements_on_ordered_channel_follow_the_sequence() {
    let Fixture {
        mut chains,
        packets,
    } = received_packets(Order::Ordered, 2);

    let second = msg_acknowledgement(&chains, &packets[1], echoed(&packets[1]));
    assert_eq!(
        validate_kind(chains.relayer.get_ctx_a(), second.clone()),
        ErrorKind::InvalidPacket
    );

    let first = msg_acknowledgement(&chains, &packets[0], echoed(&packets[0]));
    let ctx_a = chains.relayer.get_ctx_a_mut();
    ctx_a.deliver(first).expect("success");
    ctx_a.deliver(second).expect("success");

    let next_seq_ack = ctx_a
        .ibc_store()
        .get_next_sequence_ack(&SeqAckPath::new(
            &packets[0].port_id_on_a,
            &packets[0].chan_id_on_a,
        ))
        .expect("sequence stored");
    assert_eq!(next_seq_ack, Sequence::from(3));
}
