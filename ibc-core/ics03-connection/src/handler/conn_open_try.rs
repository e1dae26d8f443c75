//! Protocol logic specific to processing ICS3 messages of type `MsgConnectionOpenTry`.

use ibc_core_client::context::prelude::*;
use ibc_core_connection_types::error::ConnectionError;
use ibc_core_connection_types::events::OpenTry;
use ibc_core_connection_types::msgs::MsgConnectionOpenTry;
use ibc_core_connection_types::version::Version;
use ibc_core_connection_types::{ConnectionEnd, Counterparty, State};
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::{IbcEvent, MessageEvent};
use ibc_core_host::types::error::ErrorKind;
use ibc_core_host::types::identifiers::{ClientId, ConnectionId};
use ibc_core_host::types::path::{
    ClientConnectionPath, ClientConsensusStatePath, ConnectionPath, Path,
};
use ibc_core_host::{ExecutionContext, ValidationContext};
use ibc_primitives::prelude::*;
use ibc_primitives::proto::Protobuf;

use super::{reject_existing_end, verify_host_consensus_state};

pub fn validate<Ctx>(ctx_b: &Ctx, msg: MsgConnectionOpenTry) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let vars = LocalVars::new(ctx_b, &msg)?;
    validate_impl(ctx_b, &msg, &vars)
}

fn validate_impl<Ctx>(
    ctx_b: &Ctx,
    msg: &MsgConnectionOpenTry,
    vars: &LocalVars,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_b.validate_message_signer(&msg.signer)?;

    if let Some(existing) = &vars.existing_end_on_b {
        let is_relay_retry = existing.state == State::Init
            && existing.client_id() == &msg.client_id_on_b
            && existing.counterparty().client_id() == &vars.client_id_on_a
            && existing.counterparty().prefix() == msg.counterparty.prefix()
            && existing.versions().contains(&vars.version_on_b);

        if !is_relay_retry {
            return Err(reject_existing_end(&msg.conn_id_on_b, existing).into());
        }
    }

    let client_val_ctx_b = ctx_b.get_client_validation_context();

    let client_state_of_a_on_b = client_val_ctx_b.client_state(&msg.client_id_on_b)?;

    client_state_of_a_on_b
        .status(client_val_ctx_b, &msg.client_id_on_b)?
        .verify_is_active()?;
    client_state_of_a_on_b.validate_proof_height(msg.proofs_height_on_a)?;

    let client_cons_state_path_on_b =
        ClientConsensusStatePath::new(msg.client_id_on_b.clone(), msg.proofs_height_on_a.value());
    let consensus_state_of_a_on_b =
        client_val_ctx_b.consensus_state(&client_cons_state_path_on_b)?;

    let prefix_on_a = msg.counterparty.prefix();
    let prefix_on_b = ctx_b.commitment_prefix();

    // Verify proofs
    {
        let expected_conn_end_on_a = ConnectionEnd::new(
            State::Init,
            vars.client_id_on_a.clone(),
            Counterparty::new(msg.client_id_on_b.clone(), None, prefix_on_b),
            msg.versions_on_a.clone(),
        )?;

        client_state_of_a_on_b
            .verify_membership(
                prefix_on_a,
                &msg.proof_conn_end_on_a,
                consensus_state_of_a_on_b.root(),
                Path::Connection(ConnectionPath::new(&vars.conn_id_on_a)),
                expected_conn_end_on_a.encode_vec(),
            )
            .map_err(ConnectionError::FailedToVerifyConnectionState)?;
    }

    verify_host_consensus_state(
        ctx_b,
        &client_state_of_a_on_b,
        prefix_on_a,
        consensus_state_of_a_on_b.root(),
        &msg.proof_consensus_state_of_b_on_a,
        &vars.client_id_on_a,
        msg.consensus_height_of_b_on_a,
    )?;

    Ok(())
}

pub fn execute<Ctx>(ctx_b: &mut Ctx, msg: MsgConnectionOpenTry) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let vars = LocalVars::new(ctx_b, &msg)?;
    execute_impl(ctx_b, msg, vars)
}

fn execute_impl<Ctx>(
    ctx_b: &mut Ctx,
    msg: MsgConnectionOpenTry,
    vars: LocalVars,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let conn_end_on_b = ConnectionEnd::new(
        State::TryOpen,
        msg.client_id_on_b.clone(),
        msg.counterparty.clone(),
        vec![vars.version_on_b],
    )?;

    let event = IbcEvent::OpenTryConnection(OpenTry::new(
        msg.conn_id_on_b.clone(),
        msg.client_id_on_b.clone(),
        vars.conn_id_on_a.clone(),
        vars.client_id_on_a.clone(),
    ));
    ctx_b.emit_ibc_event(IbcEvent::Message(MessageEvent::Connection))?;
    ctx_b.emit_ibc_event(event)?;
    ctx_b.log_message("success: conn_open_try verification passed".to_string())?;

    // An end advanced from INIT is already indexed under its client.
    if vars.existing_end_on_b.is_none() {
        ctx_b.store_connection_to_client(
            &ClientConnectionPath::new(msg.client_id_on_b),
            msg.conn_id_on_b.clone(),
        )?;
    }
    ctx_b.store_connection(&ConnectionPath::new(&msg.conn_id_on_b), conn_end_on_b)?;

    Ok(())
}

struct LocalVars {
    existing_end_on_b: Option<ConnectionEnd>,
    version_on_b: Version,
    client_id_on_a: ClientId,
    conn_id_on_a: ConnectionId,
}

impl LocalVars {
    fn new<Ctx>(ctx_b: &Ctx, msg: &MsgConnectionOpenTry) -> Result<Self, ContextError>
    where
        Ctx: ValidationContext,
    {
        let existing_end_on_b = match ctx_b.connection_end(&msg.conn_id_on_b) {
            Ok(end) => Some(end),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e),
        };

        Ok(Self {
            existing_end_on_b,
            version_on_b: ctx_b.pick_version(&msg.versions_on_a)?,
            client_id_on_a: msg.counterparty.client_id().clone(),
            conn_id_on_a: msg
                .counterparty
                .connection_id()
                .ok_or(ConnectionError::InvalidCounterparty {
                    description: "counterparty connection id must be set".to_string(),
                })?
                .clone(),
        })
    }
}
