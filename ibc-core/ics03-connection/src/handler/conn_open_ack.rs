//! Protocol logic specific to processing ICS3 messages of type `MsgConnectionOpenAck`.

use ibc_core_client::context::prelude::*;
use ibc_core_connection_types::error::ConnectionError;
use ibc_core_connection_types::events::OpenAck;
use ibc_core_connection_types::msgs::MsgConnectionOpenAck;
use ibc_core_connection_types::{ConnectionEnd, Counterparty, State};
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::{IbcEvent, MessageEvent};
use ibc_core_host::types::path::{ClientConsensusStatePath, ConnectionPath, Path};
use ibc_core_host::{ExecutionContext, ValidationContext};
use ibc_primitives::prelude::*;
use ibc_primitives::proto::Protobuf;

use super::verify_host_consensus_state;

pub fn validate<Ctx>(ctx_a: &Ctx, msg: MsgConnectionOpenAck) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let conn_end_on_a = ctx_a.connection_end(&msg.conn_id_on_a)?;
    validate_impl(ctx_a, &msg, &conn_end_on_a)
}

fn validate_impl<Ctx>(
    ctx_a: &Ctx,
    msg: &MsgConnectionOpenAck,
    conn_end_on_a: &ConnectionEnd,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_a.validate_message_signer(&msg.signer)?;

    // INIT accepts any version it proposed; TRYOPEN (crossing hellos) only
    // the one it already negotiated.
    match conn_end_on_a.state() {
        State::Init => msg.version.verify_is_supported(conn_end_on_a.versions())?,
        State::TryOpen => {
            if conn_end_on_a.negotiated_version()? != &msg.version {
                return Err(ConnectionError::VersionNotSupported {
                    version: msg.version.clone(),
                }
                .into());
            }
        }
        state => {
            return Err(ConnectionError::MismatchedConnectionStates {
                expected: "INIT or TRYOPEN".to_string(),
                actual: state.to_string(),
            }
            .into())
        }
    }

    let client_id_on_a = conn_end_on_a.client_id();
    let client_id_on_b = conn_end_on_a.counterparty().client_id();
    let prefix_on_b = conn_end_on_a.counterparty().prefix();

    let client_val_ctx_a = ctx_a.get_client_validation_context();

    let client_state_of_b_on_a = client_val_ctx_a.client_state(client_id_on_a)?;

    client_state_of_b_on_a
        .status(client_val_ctx_a, client_id_on_a)?
        .verify_is_active()?;
    client_state_of_b_on_a.validate_proof_height(msg.proofs_height_on_b)?;

    let client_cons_state_path_on_a =
        ClientConsensusStatePath::new(client_id_on_a.clone(), msg.proofs_height_on_b.value());
    let consensus_state_of_b_on_a =
        client_val_ctx_a.consensus_state(&client_cons_state_path_on_a)?;

    // Verify proofs
    {
        let expected_conn_end_on_b = ConnectionEnd::new(
            State::TryOpen,
            client_id_on_b.clone(),
            Counterparty::new(
                client_id_on_a.clone(),
                Some(msg.conn_id_on_a.clone()),
                ctx_a.commitment_prefix(),
            ),
            vec![msg.version.clone()],
        )?;

        client_state_of_b_on_a
            .verify_membership(
                prefix_on_b,
                &msg.proof_conn_end_on_b,
                consensus_state_of_b_on_a.root(),
                Path::Connection(ConnectionPath::new(&msg.conn_id_on_b)),
                expected_conn_end_on_b.encode_vec(),
            )
            .map_err(ConnectionError::FailedToVerifyConnectionState)?;
    }

    verify_host_consensus_state(
        ctx_a,
        &client_state_of_b_on_a,
        prefix_on_b,
        consensus_state_of_b_on_a.root(),
        &msg.proof_consensus_state_of_a_on_b,
        client_id_on_b,
        msg.consensus_height_of_a_on_b,
    )?;

    Ok(())
}

pub fn execute<Ctx>(ctx_a: &mut Ctx, msg: MsgConnectionOpenAck) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let conn_end_on_a = ctx_a.connection_end(&msg.conn_id_on_a)?;
    execute_impl(ctx_a, msg, conn_end_on_a)
}

fn execute_impl<Ctx>(
    ctx_a: &mut Ctx,
    msg: MsgConnectionOpenAck,
    conn_end_on_a: ConnectionEnd,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let client_id_on_a = conn_end_on_a.client_id().clone();
    let client_id_on_b = conn_end_on_a.counterparty().client_id().clone();

    let event = IbcEvent::OpenAckConnection(OpenAck::new(
        msg.conn_id_on_a.clone(),
        client_id_on_a,
        msg.conn_id_on_b.clone(),
        client_id_on_b,
    ));
    ctx_a.emit_ibc_event(IbcEvent::Message(MessageEvent::Connection))?;
    ctx_a.emit_ibc_event(event)?;

    ctx_a.log_message("success: conn_open_ack verification passed".to_string())?;

    {
        let new_conn_end_on_a = {
            let mut counterparty = conn_end_on_a.counterparty().clone();
            counterparty.connection_id = Some(msg.conn_id_on_b.clone());

            let mut new_conn_end_on_a = conn_end_on_a;
            new_conn_end_on_a.set_state(State::Open);
            new_conn_end_on_a.set_version(msg.version.clone());
            new_conn_end_on_a.set_counterparty(counterparty);
            new_conn_end_on_a
        };

        ctx_a.store_connection(&ConnectionPath::new(&msg.conn_id_on_a), new_conn_end_on_a)?;
    }

    Ok(())
}
