use ibc_core::channel::types::channel::Order;
use ibc_core::channel::types::msgs::{ChannelMsg, MsgChannelCloseInit};
use ibc_core::channel::types::packet::Packet;
use ibc_core::entrypoint::{execute, validate};
use ibc_core::handler::types::events::IbcEvent;
use ibc_core::handler::types::msgs::MsgEnvelope;
use ibc_core::host::types::error::ErrorKind;
use ibc_core::host::types::path::CommitmentPath;
use ibc_core::host::ValidationContext;
use ibc_testkit::fixtures::core::signer::dummy_account_id;
use ibc_testkit::relayer::utils::{last_event, RelayerOps};
use ibc_testkit::testapp::ibc::applications::mock::{AckMode, MockModule};
use rstest::{fixture, rstest};

use super::validate_kind;
use crate::core::LinkedChains;

struct Fixture {
    chains: LinkedChains,
    packet: Packet,
}

/// A packet sent on `A` that `B` never received.
#[fixture]
fn fixture() -> Fixture {
    let mut chains = LinkedChains::new(Order::Unordered, AckMode::Echo);
    let packet = chains.packet_to_b(1, b"stranded", chains.far_height_on_b());

    chains
        .relayer
        .get_ctx_a_mut()
        .send_packet(packet.clone())
        .expect("success");

    Fixture { chains, packet }
}

/// Closes the channel end on `B`, then syncs the client on `A`.
fn close_on_b(chains: &mut LinkedChains) {
    let msg = MsgEnvelope::Channel(ChannelMsg::CloseInit(MsgChannelCloseInit {
        port_id_on_a: MockModule::port_id(),
        chan_id_on_a: chains.chan_id_on_b.clone(),
        signer: dummy_account_id(),
    }));
    chains
        .relayer
        .get_ctx_b_mut()
        .deliver(msg)
        .expect("success");
    chains.relayer.sync_client_on_a(&chains.client_id_on_a);
}

fn msg_timeout_on_close(chains: &LinkedChains, packet: &Packet) -> MsgEnvelope {
    RelayerOps::msg_timeout_on_close(chains.relayer.get_ctx_b(), packet.clone())
}

#[rstest]
fn timeout_on_close_happy_path(fixture: Fixture) {
    let Fixture { mut chains, packet } = fixture;
    close_on_b(&mut chains);

    let msg = msg_timeout_on_close(&chains, &packet);
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
}

#[rstest]
fn timeout_on_close_while_b_is_open(mut fixture: Fixture) {
    fixture
        .chains
        .relayer
        .sync_client_on_a(&fixture.chains.client_id_on_a);

    assert_eq!(
        validate_kind(
            fixture.chains.relayer.get_ctx_a(),
            msg_timeout_on_close(&fixture.chains, &fixture.packet)
        ),
        ErrorKind::InvalidProof
    );
}

#[rstest]
fn timeout_on_close_of_unsent_packet(fixture: Fixture) {
    let Fixture { mut chains, .. } = fixture;
    close_on_b(&mut chains);

    let unsent = chains.packet_to_b(5, b"stranded", chains.far_height_on_b());

    assert_eq!(
        validate_kind(
            chains.relayer.get_ctx_a(),
            msg_timeout_on_close(&chains, &unsent)
        ),
        ErrorKind::NotFound
    );
}

#[rstest]
fn timeout_on_close_of_received_packet(fixture: Fixture) {
    let Fixture { mut chains, packet } = fixture;

    chains.relayer.sync_client_on_b(&chains.client_id_on_b);
    let recv = RelayerOps::msg_recv_packet(chains.relayer.get_ctx_a(), packet.clone());
    chains
        .relayer
        .get_ctx_b_mut()
        .deliver(recv)
        .expect("success");
    close_on_b(&mut chains);

    assert_eq!(
        validate_kind(
            chains.relayer.get_ctx_a(),
            msg_timeout_on_close(&chains, &packet)
        ),
        ErrorKind::InvalidProof
    );
}
