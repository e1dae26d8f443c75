use ibc_core::connection::types::msgs::{ConnectionMsg, MsgConnectionOpenInit};
use ibc_core::connection::types::version::Version;
use ibc_core::connection::types::{Counterparty, State};
use ibc_core::entrypoint::{execute, validate};
use ibc_core::handler::types::events::{IbcEvent, MessageEvent};
use ibc_core::handler::types::msgs::MsgEnvelope;
use ibc_core::host::types::error::ErrorKind;
use ibc_core::host::types::identifiers::ConnectionId;
use ibc_core::host::ValidationContext;
use ibc_testkit::context::MockContext;
use ibc_testkit::fixtures::core::client::mock_client_id;
use ibc_testkit::fixtures::core::connection::{dummy_commitment_prefix, dummy_connection_end};
use ibc_testkit::fixtures::core::signer::dummy_account_id;
use rstest::{fixture, rstest};

struct Fixture {
    ctx: MockContext,
    msg: MsgConnectionOpenInit,
}

#[fixture]
fn fixture() -> Fixture {
    let client_id = mock_client_id(0);
    let ctx = MockContext::default().with_light_client_of(&client_id, &MockContext::default());

    let msg = MsgConnectionOpenInit {
        conn_id_on_a: ConnectionId::zero(),
        client_id_on_a: client_id,
        counterparty: Counterparty::new(mock_client_id(0), None, dummy_commitment_prefix()),
        version: None,
        signer: dummy_account_id(),
    };

    Fixture { ctx, msg }
}

fn envelope(msg: MsgConnectionOpenInit) -> MsgEnvelope {
    MsgEnvelope::Connection(ConnectionMsg::OpenInit(msg))
}

fn validate_kind(ctx: &MockContext, msg: MsgConnectionOpenInit) -> ErrorKind {
    validate(ctx.ibc_store(), &ctx.ibc_router, envelope(msg))
        .expect_err("validation fails")
        .kind()
}

#[rstest]
fn conn_open_init_happy_path(fixture: Fixture) {
    let Fixture { mut ctx, msg } = fixture;

    let envelope = envelope(msg.clone());
    validate(ctx.ibc_store(), &ctx.ibc_router, envelope.clone()).expect("validation succeeds");
    execute(&mut ctx.ibc_store, &mut ctx.ibc_router, envelope).expect("execution succeeds");

    let conn_end = ctx
        .ibc_store()
        .connection_end(&msg.conn_id_on_a)
        .expect("connection stored");
    assert_eq!(conn_end.state(), &State::Init);
    assert_eq!(conn_end.client_id(), &msg.client_id_on_a);
    assert_eq!(conn_end.counterparty(), &msg.counterparty);
    // Without a proposal every compatible version is offered.
    assert_eq!(conn_end.versions(), Version::compatibles().as_slice());

    let events = ctx.get_events();
    assert!(matches!(
        events[0],
        IbcEvent::Message(MessageEvent::Connection)
    ));
    let IbcEvent::OpenInitConnection(event) = &events[1] else {
        panic!("unexpected event variant");
    };
    assert_eq!(event.conn_id_on_a(), &msg.conn_id_on_a);
    assert!(ctx
        .get_logs()
        .iter()
        .any(|log| log.contains(&msg.conn_id_on_a.to_string())));
}

#[rstest]
fn conn_open_init_with_proposed_version(fixture: Fixture) {
    let Fixture { mut ctx, msg } = fixture;

    let version = Version::new("1".to_string(), vec!["ORDER_ORDERED".to_string()])
        .expect("valid version");
    let msg = MsgConnectionOpenInit {
        version: Some(version.clone()),
        ..msg
    };

    ctx.deliver(envelope(msg.clone())).expect("success");

    let conn_end = ctx
        .ibc_store()
        .connection_end(&msg.conn_id_on_a)
        .expect("connection stored");
    assert_eq!(conn_end.versions(), &[version]);
}

#[rstest]
fn conn_open_init_with_unsupported_version(fixture: Fixture) {
    let Fixture { ctx, msg } = fixture;

    let version = Version::new("2".to_string(), vec!["ORDER_ORDERED".to_string()])
        .expect("valid version");
    let msg = MsgConnectionOpenInit {
        version: Some(version),
        ..msg
    };

    assert_eq!(validate_kind(&ctx, msg), ErrorKind::VersionMismatch);
}

#[rstest]
fn conn_open_init_with_unsupported_feature(fixture: Fixture) {
    let Fixture { ctx, msg } = fixture;

    let version = Version::new("1".to_string(), vec!["ORDER_DAG".to_string()])
        .expect("valid version");
    let msg = MsgConnectionOpenInit {
        version: Some(version),
        ..msg
    };

    assert_eq!(validate_kind(&ctx, msg), ErrorKind::VersionMismatch);
}

#[rstest]
fn conn_open_init_without_client(fixture: Fixture) {
    let Fixture { ctx, msg } = fixture;

    let msg = MsgConnectionOpenInit {
        client_id_on_a: mock_client_id(3),
        ..msg
    };

    assert_eq!(validate_kind(&ctx, msg), ErrorKind::NotFound);
}

#[rstest]
fn conn_open_init_with_counterparty_connection_id(fixture: Fixture) {
    let Fixture { ctx, msg } = fixture;

    let msg = MsgConnectionOpenInit {
        counterparty: Counterparty::new(
            mock_client_id(0),
            Some(ConnectionId::zero()),
            dummy_commitment_prefix(),
        ),
        ..msg
    };

    assert_eq!(validate_kind(&ctx, msg), ErrorKind::InvalidInput);
}

#[rstest]
#[case::init(State::Init, ErrorKind::AlreadyExists)]
#[case::try_open(State::TryOpen, ErrorKind::InvalidState)]
#[case::open(State::Open, ErrorKind::InvalidState)]
fn conn_open_init_on_existing_identifier(
    fixture: Fixture,
    #[case] state: State,
    #[case] expected: ErrorKind,
) {
    let Fixture { ctx, msg } = fixture;

    let ctx = ctx.with_connection(
        msg.conn_id_on_a.clone(),
        dummy_connection_end(state, msg.client_id_on_a.clone(), mock_client_id(0), None),
    );

    assert_eq!(validate_kind(&ctx, msg), expected);
}

#[rstest]
fn conn_open_init_with_empty_signer(fixture: Fixture) {
    let Fixture { ctx, msg } = fixture;

    let msg = MsgConnectionOpenInit {
        signer: "".to_string().into(),
        ..msg
    };

    assert_eq!(validate_kind(&ctx, msg), ErrorKind::Unauthorized);
}
