use ibc_core::client::context::client_state::ClientStateCommon;
use ibc_core::client::context::ClientValidationContext;
use ibc_core::client::types::msgs::{ClientMsg, MsgUpdateClient};
use ibc_core::client::types::Height;
use ibc_core::entrypoint::{execute, validate};
use ibc_core::handler::types::events::IbcEvent;
use ibc_core::handler::types::msgs::MsgEnvelope;
use ibc_core::host::types::error::ErrorKind;
use ibc_core::host::types::identifiers::ClientId;
use ibc_core::host::types::path::ClientConsensusStatePath;
use ibc_core::host::ValidationContext;
use ibc_testkit::context::MockContext;
use ibc_testkit::fixtures::core::client::{dummy_msg_update_client, mock_client_id};
use ibc_testkit::fixtures::core::context::MockContextConfig;
use ibc_testkit::testapp::ibc::clients::mock::header::MockHeader;
use rstest::{fixture, rstest};

struct Fixture {
    ctx: MockContext,
    counterparty: MockContext,
    client_id: ClientId,
}

/// A chain with a client of a counterparty that moved on since the client
/// was created.
#[fixture]
fn fixture() -> Fixture {
    let client_id = mock_client_id(0);
    let mut counterparty = MockContext::default();

    let ctx = MockContext::default().with_light_client_of(&client_id, &counterparty);

    for _ in 0..3 {
        counterparty.advance_block();
    }

    Fixture {
        ctx,
        counterparty,
        client_id,
    }
}

fn height(value: u64) -> Height {
    Height::new(value).expect("valid height")
}

fn envelope(msg: MsgUpdateClient) -> MsgEnvelope {
    MsgEnvelope::Client(ClientMsg::UpdateClient(msg))
}

fn client_height(ctx: &MockContext, client_id: &ClientId) -> Height {
    ctx.ibc_store()
        .get_client_validation_context()
        .client_state(client_id)
        .expect("client exists")
        .latest_height()
}

fn has_consensus_state_at(ctx: &MockContext, client_id: &ClientId, height: Height) -> bool {
    ctx.ibc_store()
        .get_client_validation_context()
        .consensus_state(&ClientConsensusStatePath::new(
            client_id.clone(),
            height.value(),
        ))
        .is_ok()
}

#[rstest]
fn update_client_happy_path(fixture: Fixture) {
    let Fixture {
        mut ctx,
        counterparty,
        client_id,
    } = fixture;

    let target_height = counterparty.latest_height();
    let header = counterparty
        .host_block(&target_height)
        .expect("block exists");
    let msg = envelope(dummy_msg_update_client(client_id.clone(), header.clone()));

    validate(ctx.ibc_store(), &ctx.ibc_router, msg.clone()).expect("validation succeeds");
    execute(&mut ctx.ibc_store, &mut ctx.ibc_router, msg).expect("execution succeeds");

    assert_eq!(client_height(&ctx, &client_id), target_height);
    assert!(has_consensus_state_at(&ctx, &client_id, target_height));

    let Some(IbcEvent::UpdateClient(update_client_event)) = ctx.get_events().pop() else {
        panic!("unexpected event variant");
    };
    assert_eq!(update_client_event.client_id(), &client_id);
    assert_eq!(update_client_event.consensus_height(), &target_height);
    assert!(!update_client_event.header().is_empty());
}

#[rstest]
fn older_header_adds_a_consensus_state_only(fixture: Fixture) {
    let Fixture {
        mut ctx,
        counterparty,
        client_id,
    } = fixture;

    let latest = counterparty.latest_height();
    let header = counterparty.host_block(&latest).expect("block exists");
    ctx.deliver(envelope(dummy_msg_update_client(client_id.clone(), header)))
        .expect("success");

    let older = height(3);
    let header = counterparty.host_block(&older).expect("block exists");
    ctx.deliver(envelope(dummy_msg_update_client(client_id.clone(), header)))
        .expect("success");

    assert_eq!(client_height(&ctx, &client_id), latest);
    assert!(has_consensus_state_at(&ctx, &client_id, older));
}

#[rstest]
fn update_unknown_client(fixture: Fixture) {
    let Fixture {
        ctx, counterparty, ..
    } = fixture;

    let header = counterparty
        .host_block(&counterparty.latest_height())
        .expect("block exists");
    let msg = envelope(dummy_msg_update_client(mock_client_id(7), header));

    let err = validate(ctx.ibc_store(), &ctx.ibc_router, msg).expect_err("no such client");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[rstest]
fn update_frozen_client(fixture: Fixture) {
    let Fixture {
        ctx,
        counterparty,
        client_id,
    } = fixture;

    let (client_state, _) = counterparty.generate_light_client();
    let ctx = ctx.with_client_state(&client_id, client_state.frozen().into());

    let header = counterparty
        .host_block(&counterparty.latest_height())
        .expect("block exists");
    let msg = envelope(dummy_msg_update_client(client_id, header));

    let err = validate(ctx.ibc_store(), &ctx.ibc_router, msg).expect_err("the client is frozen");
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[rstest]
fn update_with_header_without_root(fixture: Fixture) {
    let Fixture { ctx, client_id, .. } = fixture;

    let msg = envelope(dummy_msg_update_client(client_id, MockHeader::new(height(9))));

    let err = validate(ctx.ibc_store(), &ctx.ibc_router, msg)
        .expect_err("the header commits to nothing");
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test_log::test]
fn update_client_of_a_taller_chain() {
    let client_id = mock_client_id(0);
    let mut counterparty: MockContext = MockContextConfig::builder()
        .latest_height(height(20))
        .build();
    let mut ctx = MockContext::default().with_light_client_of(&client_id, &counterparty);

    counterparty.advance_block();
    let header = counterparty
        .host_block(&counterparty.latest_height())
        .expect("block exists");

    ctx.deliver(envelope(dummy_msg_update_client(client_id.clone(), header)))
        .expect("success");

    assert_eq!(client_height(&ctx, &client_id), height(21));
}
