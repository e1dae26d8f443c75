use ibc_core::channel::types::channel::{Order, State};
use ibc_core::channel::types::msgs::{ChannelMsg, MsgChannelOpenInit};
use ibc_core::channel::types::Version;
use ibc_core::connection::types::version::Version as ConnectionVersion;
use ibc_core::connection::types::{ConnectionEnd, State as ConnectionState};
use ibc_core::entrypoint::{execute, validate};
use ibc_core::handler::types::events::{IbcEvent, MessageEvent};
use ibc_core::handler::types::msgs::MsgEnvelope;
use ibc_core::host::types::error::ErrorKind;
use ibc_core::host::types::identifiers::{ChannelId, ConnectionId, Sequence};
use ibc_core::host::types::path::{ChannelEndPath, SeqAckPath, SeqRecvPath, SeqSendPath};
use ibc_core::host::ValidationContext;
use ibc_testkit::context::MockContext;
use ibc_testkit::fixtures::core::channel::dummy_channel_end;
use ibc_testkit::fixtures::core::client::mock_client_id;
use ibc_testkit::fixtures::core::connection::dummy_connection_end;
use ibc_testkit::fixtures::core::signer::dummy_account_id;
use ibc_testkit::testapp::ibc::applications::mock::MockModule;
use rstest::{fixture, rstest};

use super::validate_kind;

struct Fixture {
    ctx: MockContext,
    msg: MsgChannelOpenInit,
}

#[fixture]
fn fixture() -> Fixture {
    let client_id = mock_client_id(0);
    let conn_end = dummy_connection_end(
        ConnectionState::Open,
        client_id.clone(),
        mock_client_id(0),
        Some(ConnectionId::zero()),
    );

    let ctx = MockContext::default()
        .with_light_client_of(&client_id, &MockContext::default())
        .with_connection(ConnectionId::zero(), conn_end);

    let msg = MsgChannelOpenInit {
        port_id_on_a: MockModule::port_id(),
        chan_id_on_a: ChannelId::zero(),
        connection_hops_on_a: vec![ConnectionId::zero()],
        port_id_on_b: MockModule::port_id(),
        ordering: Order::Unordered,
        signer: dummy_account_id(),
        version_proposal: Version::empty(),
    };

    Fixture { ctx, msg }
}

fn envelope(msg: MsgChannelOpenInit) -> MsgEnvelope {
    MsgEnvelope::Channel(ChannelMsg::OpenInit(msg))
}

#[rstest]
fn chan_open_init_happy_path(fixture: Fixture) {
    let Fixture { mut ctx, msg } = fixture;

    let envelope = envelope(msg.clone());
    validate(ctx.ibc_store(), &ctx.ibc_router, envelope.clone()).expect("validation succeeds");
    execute(&mut ctx.ibc_store, &mut ctx.ibc_router, envelope).expect("execution succeeds");

    let port_id = &msg.port_id_on_a;
    let chan_id = &msg.chan_id_on_a;
    let chan_end = ctx
        .ibc_store()
        .channel_end(&ChannelEndPath::new(port_id, chan_id))
        .expect("channel stored");
    assert_eq!(chan_end.state, State::Init);
    assert_eq!(chan_end.counterparty().channel_id(), None);
    // The module settles an empty proposal on its own version.
    assert_eq!(chan_end.version(), &MockModule::version());

    let store = ctx.ibc_store();
    let one = Sequence::from(1);
    assert_eq!(
        store
            .get_next_sequence_send(&SeqSendPath::new(port_id, chan_id))
            .expect("sequence stored"),
        one
    );
    assert_eq!(
        store
            .get_next_sequence_recv(&SeqRecvPath::new(port_id, chan_id))
            .expect("sequence stored"),
        one
    );
    assert_eq!(
        store
            .get_next_sequence_ack(&SeqAckPath::new(port_id, chan_id))
            .expect("sequence stored"),
        one
    );

    let events = ctx.get_events();
    assert!(matches!(events[0], IbcEvent::Message(MessageEvent::Channel)));
    let IbcEvent::OpenInitChannel(event) = &events[1] else {
        panic!("unexpected event variant");
    };
    assert_eq!(event.chan_id_on_a(), chan_id);
    assert_eq!(event.conn_id_on_a(), &ConnectionId::zero());
    assert!(matches!(events[2], IbcEvent::Module(_)));
}

#[rstest]
fn chan_open_init_with_foreign_version(fixture: Fixture) {
    let Fixture { ctx, msg } = fixture;

    let msg = MsgChannelOpenInit {
        version_proposal: Version::new("ics20-1".to_string()),
        ..msg
    };

    assert_eq!(validate_kind(&ctx, envelope(msg)), ErrorKind::Unauthorized);
}

#[rstest]
fn chan_open_init_without_connection(fixture: Fixture) {
    let Fixture { ctx, msg } = fixture;

    let msg = MsgChannelOpenInit {
        connection_hops_on_a: vec![ConnectionId::new(7)],
        ..msg
    };

    assert_eq!(validate_kind(&ctx, envelope(msg)), ErrorKind::NotFound);
}

#[rstest]
fn chan_open_init_over_several_hops(fixture: Fixture) {
    let Fixture { ctx, msg } = fixture;

    let msg = MsgChannelOpenInit {
        connection_hops_on_a: vec![ConnectionId::zero(), ConnectionId::new(1)],
        ..msg
    };

    assert_eq!(validate_kind(&ctx, envelope(msg)), ErrorKind::InvalidInput);
}

#[rstest]
fn chan_open_init_with_ordering_the_connection_lacks(fixture: Fixture) {
    let Fixture { ctx, msg } = fixture;

    let unordered_only = ConnectionVersion::new(
        "1".to_string(),
        vec![Order::Unordered.as_str().to_string()],
    )
    .expect("valid version");
    let conn_end = dummy_connection_end(
        ConnectionState::Open,
        mock_client_id(0),
        mock_client_id(0),
        Some(ConnectionId::zero()),
    );
    let conn_end = ConnectionEnd::new(
        ConnectionState::Open,
        conn_end.client_id().clone(),
        conn_end.counterparty().clone(),
        vec![unordered_only],
    )
    .expect("valid connection end");
    let ctx = ctx.with_connection(ConnectionId::zero(), conn_end);

    let msg = MsgChannelOpenInit {
        ordering: Order::Ordered,
        ..msg
    };

    assert_eq!(validate_kind(&ctx, envelope(msg)), ErrorKind::VersionMismatch);
}

#[rstest]
#[case::init(State::Init, ErrorKind::AlreadyExists)]
#[case::open(State::Open, ErrorKind::InvalidState)]
#[case::closed(State::Closed, ErrorKind::InvalidState)]
fn chan_open_init_on_existing_identifier(
    fixture: Fixture,
    #[case] state: State,
    #[case] expected: ErrorKind,
) {
    let Fixture { ctx, msg } = fixture;

    let ctx = ctx.with_channel(
        msg.port_id_on_a.clone(),
        msg.chan_id_on_a.clone(),
        dummy_channel_end(state, Order::Unordered, None),
    );

    assert_eq!(validate_kind(&ctx, envelope(msg)), expected);
}
