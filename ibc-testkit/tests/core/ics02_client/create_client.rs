use core::time::Duration;

use ibc_core::client::context::client_state::ClientStateCommon;
use ibc_core::client::context::ClientValidationContext;
use ibc_core::client::types::msgs::{ClientMsg, MsgCreateClient};
use ibc_core::client::types::Height;
use ibc_core::entrypoint::{execute, validate};
use ibc_core::handler::types::events::{IbcEvent, MessageEvent};
use ibc_core::handler::types::msgs::MsgEnvelope;
use ibc_core::host::types::error::ErrorKind;
use ibc_core::host::types::path::ClientConsensusStatePath;
use ibc_core::host::ValidationContext;
use ibc_core::primitives::Signer;
use ibc_testkit::context::MockContext;
use ibc_testkit::fixtures::core::client::{dummy_msg_create_client, mock_client_id};
use ibc_testkit::fixtures::core::context::MockContextConfig;
use ibc_testkit::fixtures::core::signer::dummy_account_id;
use rstest::{fixture, rstest};

struct Fixture {
    ctx: MockContext,
    counterparty: MockContext,
}

#[fixture]
fn fixture() -> Fixture {
    Fixture {
        ctx: MockContext::default(),
        counterparty: MockContext::default(),
    }
}

fn envelope(msg: MsgCreateClient) -> MsgEnvelope {
    MsgEnvelope::Client(ClientMsg::CreateClient(msg))
}

#[rstest]
fn create_client_happy_path(fixture: Fixture) {
    let Fixture {
        mut ctx,
        counterparty,
    } = fixture;

    let msg = envelope(dummy_msg_create_client(&counterparty));

    validate(ctx.ibc_store(), &ctx.ibc_router, msg.clone()).expect("validation succeeds");
    execute(&mut ctx.ibc_store, &mut ctx.ibc_router, msg).expect("execution succeeds");

    let client_id = mock_client_id(0);
    let client_val_ctx = ctx.ibc_store().get_client_validation_context();

    let client_state = client_val_ctx
        .client_state(&client_id)
        .expect("client state stored");
    assert_eq!(client_state.latest_height(), counterparty.latest_height());
    assert!(client_val_ctx
        .consensus_state(&ClientConsensusStatePath::new(
            client_id.clone(),
            counterparty.latest_height().value(),
        ))
        .is_ok());
    assert_eq!(ctx.ibc_store().client_counter().expect("no error"), 1);

    let events = ctx.get_events();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], IbcEvent::Message(MessageEvent::Client)));
    let IbcEvent::CreateClient(create_client_event) = &events[1] else {
        panic!("unexpected event variant");
    };
    assert_eq!(create_client_event.client_id(), &client_id);
    assert_eq!(
        create_client_event.consensus_height(),
        &counterparty.latest_height()
    );
}

#[rstest]
fn identifiers_follow_the_client_counter(fixture: Fixture) {
    let Fixture {
        mut ctx,
        counterparty,
    } = fixture;

    for _ in 0..2 {
        ctx.deliver(envelope(dummy_msg_create_client(&counterparty)))
            .expect("success");
    }

    let client_val_ctx = ctx.ibc_store().get_client_validation_context();
    assert!(client_val_ctx.client_state(&mock_client_id(0)).is_ok());
    assert!(client_val_ctx.client_state(&mock_client_id(1)).is_ok());
    assert_eq!(ctx.ibc_store().client_counter().expect("no error"), 2);
}

#[rstest]
fn create_client_with_empty_signer(fixture: Fixture) {
    let Fixture { ctx, counterparty } = fixture;

    let msg = MsgCreateClient {
        signer: Signer::new_empty(),
        ..dummy_msg_create_client(&counterparty)
    };

    let err = validate(ctx.ibc_store(), &ctx.ibc_router, envelope(msg))
        .expect_err("the signer is empty");
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
}

#[rstest]
fn create_frozen_client(fixture: Fixture) {
    let Fixture { ctx, counterparty } = fixture;

    let (client_state, consensus_state) = counterparty.generate_light_client();
    let msg = MsgCreateClient::new(
        client_state.frozen().into(),
        consensus_state.into(),
        dummy_account_id(),
    );

    let err = validate(ctx.ibc_store(), &ctx.ibc_router, envelope(msg))
        .expect_err("a client cannot start frozen");
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[test_log::test]
fn create_expired_client() {
    let counterparty = MockContext::default();
    let ctx: MockContext = MockContextConfig::builder()
        .latest_height(Height::new(8).expect("valid height"))
        .build();

    let (client_state, consensus_state) = counterparty.generate_light_client();
    let msg = MsgCreateClient::new(
        client_state.with_trusting_period(Duration::ZERO).into(),
        consensus_state.into(),
        dummy_account_id(),
    );

    let err = validate(ctx.ibc_store(), &ctx.ibc_router, envelope(msg))
        .expect_err("the latest header is older than the trusting period");
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[rstest]
fn create_client_with_foreign_consensus_state(fixture: Fixture) {
    let Fixture { ctx, counterparty } = fixture;

    let (client_state, _) = counterparty.generate_light_client();
    let msg = MsgCreateClient::new(
        client_state.clone().into(),
        client_state.into(),
        dummy_account_id(),
    );

    let err = validate(ctx.ibc_store(), &ctx.ibc_router, envelope(msg))
        .expect_err("not a consensus state");
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[rstest]
fn failed_creation_leaves_no_trace(fixture: Fixture) {
    let Fixture {
        mut ctx,
        counterparty,
    } = fixture;

    let height_before = ctx.latest_height();
    let msg = MsgCreateClient {
        signer: Signer::new_empty(),
        ..dummy_msg_create_client(&counterparty)
    };

    assert!(ctx.deliver(envelope(msg)).is_err());

    assert_eq!(ctx.latest_height(), height_before);
    assert_eq!(ctx.ibc_store().client_counter().expect("no error"), 0);
    assert!(ctx.get_events().is_empty());
}
