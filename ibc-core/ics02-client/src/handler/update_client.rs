//! Protocol logic for `MsgUpdateClient`.

use ibc_core_client_context::prelude::*;
use ibc_core_client_types::error::ClientError;
use ibc_core_client_types::events::UpdateClient;
use ibc_core_client_types::msgs::MsgUpdateClient;
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::{IbcEvent, MessageEvent};
use ibc_core_host::{ExecutionContext, ValidationContext};
use ibc_primitives::prelude::*;
use ibc_primitives::ToVec;

pub fn validate<Ctx>(ctx: &Ctx, msg: MsgUpdateClient) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx.validate_message_signer(&msg.signer)?;

    let client_val_ctx = ctx.get_client_validation_context();

    // Read client state from the host chain store. The client should already exist.
    let client_state = client_val_ctx.client_state(&msg.client_id)?;

    client_state
        .status(client_val_ctx, &msg.client_id)?
        .verify_is_active()?;

    client_state.verify_client_message(client_val_ctx, &msg.client_id, msg.client_message)?;

    Ok(())
}

pub fn execute<Ctx>(ctx: &mut Ctx, msg: MsgUpdateClient) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let MsgUpdateClient {
        client_id,
        client_message: header,
        signer: _,
    } = msg;

    let client_exec_ctx = ctx.get_client_execution_context();

    let client_state = client_exec_ctx.client_state_mut(&client_id)?;

    let consensus_heights = client_state.update_state(client_exec_ctx, &client_id, header.clone())?;

    let consensus_height = consensus_heights.first().ok_or(ClientError::Other {
        description: "client update state returned no updated height".to_string(),
    })?;

    let event = IbcEvent::UpdateClient(UpdateClient::new(
        client_id.clone(),
        client_state.client_type(),
        *consensus_height,
        header.to_vec(),
    ));
    ctx.emit_ibc_event(IbcEvent::Message(MessageEvent::Client))?;
    ctx.emit_ibc_event(event)?;

    ctx.log_message(format!(
        "success: client {client_id} updated to height {consensus_height}"
    ))?;

    Ok(())
}
