use ibc_core::channel::types::channel::{Order, State as ChannelState};
use ibc_core::channel::types::msgs::{ChannelMsg, MsgChannelOpenInit};
use ibc_core::channel::types::packet::Packet;
use ibc_core::channel::types::timeout::TimeoutHeight;
use ibc_core::channel::types::Version;
use ibc_core::entrypoint::validate;
use ibc_core::handler::types::msgs::MsgEnvelope;
use ibc_core::host::types::error::ErrorKind;
use ibc_core::host::types::identifiers::{ChannelId, PortId, Sequence};
use ibc_core::router::router::Router;
use ibc_core::router::types::module::ModuleId;
use ibc_testkit::fixtures::core::channel::PacketConfig;
use ibc_testkit::fixtures::core::signer::dummy_account_id;
use ibc_testkit::testapp::ibc::applications::mock::{AckMode, MockModule, MOCK_MODULE_ID};

use super::{error_kind, LinkedChains};

fn other_port() -> PortId {
    PortId::new("other".to_string()).expect("valid port")
}

fn other_module_id() -> ModuleId {
    ModuleId::new("other".to_string())
}

fn msg_chan_open_init(chains: &LinkedChains, port_id_on_a: PortId) -> MsgEnvelope {
    MsgEnvelope::Channel(ChannelMsg::OpenInit(MsgChannelOpenInit {
        port_id_on_a,
        chan_id_on_a: ChannelId::new(1),
        connection_hops_on_a: vec![chains.conn_id_on_a.clone()],
        port_id_on_b: MockModule::port_id(),
        ordering: Order::Unordered,
        signer: dummy_account_id(),
        version_proposal: Version::empty(),
    }))
}

/// Binds a second mock application to the `other` port on `A`.
fn bind_other_module_on_a(chains: &mut LinkedChains) -> MockModule {
    let module = MockModule::new(AckMode::Echo);
    let router = &mut chains.relayer.get_ctx_a_mut().ibc_router;

    router
        .add_route(other_module_id(), module.clone())
        .expect("new module id");
    router.scope_port_to_module(other_port(), other_module_id());

    module
}

#[test_log::test]
fn unbound_port_is_rejected() {
    let chains = LinkedChains::new(Order::Unordered, AckMode::Echo);
    let ctx_a = chains.relayer.get_ctx_a();

    let err = validate(
        ctx_a.ibc_store(),
        &ctx_a.ibc_router,
        msg_chan_open_init(&chains, other_port()),
    )
    .expect_err("no module owns the port");

    assert_eq!(err.kind(), ErrorKind::Unauthorized);
}

#[test_log::test]
fn port_bound_to_an_unregistered_module_is_rejected() {
    let mut chains = LinkedChains::new(Order::Unordered, AckMode::Echo);
    chains
        .relayer
        .get_ctx_a_mut()
        .ibc_router
        .scope_port_to_module(other_port(), other_module_id());

    let ctx_a = chains.relayer.get_ctx_a();
    let err = validate(
        ctx_a.ibc_store(),
        &ctx_a.ibc_router,
        msg_chan_open_init(&chains, other_port()),
    )
    .expect_err("the module is not registered");

    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test_log::test]
fn duplicate_module_id_is_refused() {
    let mut chains = LinkedChains::new(Order::Unordered, AckMode::Echo);
    let router = &mut chains.relayer.get_ctx_a_mut().ibc_router;

    assert!(router
        .add_route(ModuleId::new(MOCK_MODULE_ID.to_string()), MockModule::default())
        .is_err());
    assert_eq!(
        router.lookup_module(&MockModule::port_id()),
        Some(ModuleId::new(MOCK_MODULE_ID.to_string()))
    );
}

#[test_log::test]
fn messages_reach_the_module_owning_the_port() {
    let mut chains = LinkedChains::new(Order::Unordered, AckMode::Echo);
    let other_module = bind_other_module_on_a(&mut chains);

    let (chan_id_on_a, chan_id_on_b) = chains.relayer.create_channel_on_a(
        chains.client_id_on_a.clone(),
        chains.conn_id_on_a.clone(),
        other_port(),
        chains.client_id_on_b.clone(),
        chains.conn_id_on_b.clone(),
        MockModule::port_id(),
        Order::Unordered,
    );

    assert_eq!(
        chains.relayer.channel_end_on_a(&other_port(), &chan_id_on_a).state,
        ChannelState::Open
    );
    assert_eq!(
        other_module.state().lock().opened_channels,
        vec![(other_port(), chan_id_on_a.clone())]
    );
    // Only the channel made while linking the chains went to the mock port.
    assert_eq!(chains.module_a.state().lock().opened_channels.len(), 1);

    let packet: Packet = PacketConfig::builder()
        .seq_on_a(Sequence::from(1))
        .port_id_on_a(other_port())
        .chan_id_on_a(chan_id_on_a)
        .chan_id_on_b(chan_id_on_b)
        .timeout_height_on_b(TimeoutHeight::At(chains.far_height_on_b()))
        .build();

    // The mock application cannot send on a port it does not own.
    assert_eq!(
        error_kind(chains.relayer.get_ctx_a_mut().send_packet(packet.clone())),
        ErrorKind::Unauthorized
    );

    chains
        .relayer
        .get_ctx_a_mut()
        .send_packet_as(&other_module_id(), packet.clone())
        .expect("success");
    chains.relayer.sync_client_on_b(&chains.client_id_on_b);

    let acknowledgement = chains.relayer.relay_packet_to_b(
        &chains.client_id_on_a,
        &chains.client_id_on_b,
        packet,
    );
    assert!(acknowledgement.is_some());
    assert_eq!(other_module.state().lock().acknowledged.len(), 1);
    assert!(chains.module_a.state().lock().acknowledged.is_empty());
}
