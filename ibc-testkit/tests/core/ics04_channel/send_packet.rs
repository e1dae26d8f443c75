use ibc_core::channel::types::channel::{Order, State};
use ibc_core::channel::types::packet::Packet;
use ibc_core::channel::types::timeout::{TimeoutHeight, TimeoutTimestamp};
use ibc_core::client::types::Height;
use ibc_core::connection::types::State as ConnectionState;
use ibc_core::handler::types::events::{IbcEvent, MessageEvent};
use ibc_core::host::types::error::ErrorKind;
use ibc_core::host::types::identifiers::{ChannelId, ConnectionId, Sequence};
use ibc_core::host::types::path::{CommitmentPath, SeqSendPath};
use ibc_core::host::ValidationContext;
use ibc_testkit::context::MockContext;
use ibc_testkit::fixtures::core::channel::{dummy_channel_end, dummy_packet, PacketConfig};
use ibc_testkit::fixtures::core::client::mock_client_id;
use ibc_testkit::fixtures::core::connection::dummy_connection_end;
use ibc_testkit::testapp::ibc::applications::mock::MockModule;
use rstest::{fixture, rstest};

use crate::core::error_kind;

/// A chain with an open channel whose client of the counterparty sits at
/// height 5. No proofs are involved in sending.
fn ctx_with_channel(state: State) -> MockContext {
    let client_id = mock_client_id(0);

    MockContext::default()
        .with_light_client_of(&client_id, &MockContext::default())
        .with_connection(
            ConnectionId::zero(),
            dummy_connection_end(
                ConnectionState::Open,
                client_id.clone(),
                mock_client_id(0),
                Some(ConnectionId::zero()),
            ),
        )
        .with_channel(
            MockModule::port_id(),
            ChannelId::zero(),
            dummy_channel_end(state, Order::Unordered, Some(ChannelId::zero())),
        )
        .with_send_sequence(MockModule::port_id(), ChannelId::zero(), Sequence::from(1))
}

#[fixture]
fn ctx() -> MockContext {
    ctx_with_channel(State::Open)
}

fn height(value: u64) -> Height {
    Height::new(value).expect("valid height")
}

#[rstest]
fn send_packet_happy_path(mut ctx: MockContext) {
    let packet = dummy_packet(Sequence::from(1));
    let height_before = ctx.latest_height();

    ctx.send_packet(packet.clone()).expect("success");

    let port_id = &packet.port_id_on_a;
    let chan_id = &packet.chan_id_on_a;
    let commitment = ctx
        .ibc_store()
        .get_packet_commitment(&CommitmentPath::new(port_id, chan_id, packet.seq_on_a))
        .expect("commitment stored");
    assert_eq!(commitment, packet.commitment());
    assert_eq!(
        ctx.ibc_store()
            .get_next_sequence_send(&SeqSendPath::new(port_id, chan_id))
            .expect("sequence stored"),
        Sequence::from(2)
    );
    assert_eq!(ctx.latest_height(), height_before.add(1));

    let events = ctx.get_events();
    assert!(matches!(events[0], IbcEvent::Message(MessageEvent::Channel)));
    let IbcEvent::SendPacket(event) = &events[1] else {
        panic!("unexpected event variant");
    };
    assert_eq!(event.packet(), &packet);
    assert_eq!(event.channel_ordering(), &Order::Unordered);
}

#[test_log::test]
fn packets_may_be_sent_before_the_channel_opens() {
    let mut ctx = ctx_with_channel(State::Init);

    assert!(ctx.send_packet(dummy_packet(Sequence::from(1))).is_ok());
}

#[rstest]
fn send_packet_out_of_sequence(mut ctx: MockContext) {
    assert_eq!(
        error_kind(ctx.send_packet(dummy_packet(Sequence::from(2)))),
        ErrorKind::InvalidPacket
    );
}

#[rstest]
#[case::below_the_client(height(3))]
#[case::at_the_client(height(5))]
fn send_packet_with_expired_timeout_height(mut ctx: MockContext, #[case] timeout_height: Height) {
    let packet: Packet = PacketConfig::builder()
        .timeout_height_on_b(TimeoutHeight::At(timeout_height))
        .build();

    assert_eq!(error_kind(ctx.send_packet(packet)), ErrorKind::Timeout);
}

#[rstest]
fn send_packet_with_expired_timeout_timestamp(mut ctx: MockContext) {
    let packet: Packet = PacketConfig::builder()
        .timeout_height_on_b(TimeoutHeight::Never)
        .timeout_timestamp_on_b(TimeoutTimestamp::from_nanoseconds(1))
        .build();

    assert_eq!(error_kind(ctx.send_packet(packet)), ErrorKind::Timeout);
}

#[rstest]
#[case::no_timeout(
    PacketConfig::builder().timeout_height_on_b(TimeoutHeight::Never).build()
)]
#[case::no_data(PacketConfig::builder().data(vec![]).build())]
#[case::zero_sequence(PacketConfig::builder().seq_on_a(Sequence::from(0)).build())]
#[case::other_counterparty(PacketConfig::builder().chan_id_on_b(ChannelId::new(8)).build())]
fn send_malformed_packet(mut ctx: MockContext, #[case] packet: Packet) {
    assert_eq!(error_kind(ctx.send_packet(packet)), ErrorKind::InvalidPacket);
}

#[test_log::test]
fn send_packet_on_closed_channel() {
    let mut ctx = ctx_with_channel(State::Closed);

    assert_eq!(
        error_kind(ctx.send_packet(dummy_packet(Sequence::from(1)))),
        ErrorKind::InvalidState
    );
}

#[rstest]
fn send_packet_on_unknown_channel(mut ctx: MockContext) {
    let packet: Packet = PacketConfig::builder()
        .chan_id_on_a(ChannelId::new(3))
        .build();

    assert_eq!(error_kind(ctx.send_packet(packet)), ErrorKind::NotFound);
}

#[rstest]
fn send_packet_over_frozen_client(ctx: MockContext) {
    let (client_state, _) = MockContext::default().generate_light_client();
    let mut ctx = ctx.with_client_state(&mock_client_id(0), client_state.frozen().into());

    assert_eq!(
        error_kind(ctx.send_packet(dummy_packet(Sequence::from(1)))),
        ErrorKind::InvalidState
    );
}

#[rstest]
fn failed_send_leaves_no_commitment(mut ctx: MockContext) {
    let packet = dummy_packet(Sequence::from(2));

    assert!(ctx.send_packet(packet.clone()).is_err());

    assert!(ctx
        .ibc_store()
        .get_packet_commitment(&CommitmentPath::new(
            &packet.port_id_on_a,
            &packet.chan_id_on_a,
            packet.seq_on_a,
        ))
        .is_err());
    assert!(ctx.get_events().is_empty());
}
