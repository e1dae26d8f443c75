//! Protocol logic specific to ICS3 messages of type `MsgConnectionOpenInit`.

use ibc_core_client::context::prelude::*;
use ibc_core_connection_types::events::OpenInit;
use ibc_core_connection_types::msgs::MsgConnectionOpenInit;
use ibc_core_connection_types::{ConnectionEnd, State};
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::{IbcEvent, MessageEvent};
use ibc_core_host::types::path::{ClientConnectionPath, ConnectionPath};
use ibc_core_host::{ExecutionContext, ValidationContext};
use ibc_primitives::prelude::*;

use super::reject_existing_end;

pub fn validate<Ctx>(ctx_a: &Ctx, msg: MsgConnectionOpenInit) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_a.validate_message_signer(&msg.signer)?;

    if let Ok(conn_end_on_a) = ctx_a.connection_end(&msg.conn_id_on_a) {
        return Err(reject_existing_end(&msg.conn_id_on_a, &conn_end_on_a).into());
    }

    let client_val_ctx_a = ctx_a.get_client_validation_context();

    // An IBC client running on the local (host) chain should exist.
    let client_state_of_b_on_a = client_val_ctx_a.client_state(&msg.client_id_on_a)?;

    client_state_of_b_on_a
        .status(client_val_ctx_a, &msg.client_id_on_a)?
        .verify_is_active()?;

    msg.counterparty.verify_empty_connection_id()?;

    if let Some(version) = msg.version {
        version.verify_is_supported(&ctx_a.get_compatible_versions())?;
    }

    Ok(())
}

pub fn execute<Ctx>(ctx_a: &mut Ctx, msg: MsgConnectionOpenInit) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let versions = match msg.version {
        Some(version) => vec![version],
        None => ctx_a.get_compatible_versions(),
    };

    let conn_end_on_a = ConnectionEnd::new(
        State::Init,
        msg.client_id_on_a.clone(),
        msg.counterparty.clone(),
        versions,
    )?;

    let event = IbcEvent::OpenInitConnection(OpenInit::new(
        msg.conn_id_on_a.clone(),
        msg.client_id_on_a.clone(),
        msg.counterparty.client_id().clone(),
    ));
    ctx_a.emit_ibc_event(IbcEvent::Message(MessageEvent::Connection))?;
    ctx_a.emit_ibc_event(event)?;

    ctx_a.log_message(format!(
        "success: conn_open_init: generated new connection identifier: {}",
        msg.conn_id_on_a
    ))?;

    ctx_a.store_connection_to_client(
        &ClientConnectionPath::new(msg.client_id_on_a),
        msg.conn_id_on_a.clone(),
    )?;
    ctx_a.store_connection(&ConnectionPath::new(&msg.conn_id_on_a), conn_end_on_a)?;

    Ok(())
}
