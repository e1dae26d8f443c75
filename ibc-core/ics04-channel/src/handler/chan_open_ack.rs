//! Protocol logic specific to ICS4 messages of type `MsgChannelOpenAck`.

use ibc_core_channel_types::channel::{ChannelEnd, Counterparty, State as ChannelState};
use ibc_core_channel_types::error::ChannelError;
use ibc_core_channel_types::events::OpenAck;
use ibc_core_channel_types::msgs::MsgChannelOpenAck;
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::{IbcEvent, MessageEvent};
use ibc_core_host::types::path::ChannelEndPath;
use ibc_core_host::{ExecutionContext, ValidationContext};
use ibc_core_router::module::Module;
use ibc_primitives::prelude::*;

use super::{
    counterparty_hops, emit_module_extras, open_connection_hop, verify_counterparty_channel,
};

pub fn chan_open_ack_validate<ValCtx>(
    ctx_a: &ValCtx,
    module: &dyn Module,
    msg: MsgChannelOpenAck,
) -> Result<(), ContextError>
where
    ValCtx: ValidationContext,
{
    validate(ctx_a, &msg)?;

    module.on_chan_open_ack_validate(&msg.port_id_on_a, &msg.chan_id_on_a, &msg.version_on_b)?;

    Ok(())
}

pub fn chan_open_ack_execute<ExecCtx>(
    ctx_a: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgChannelOpenAck,
) -> Result<(), ContextError>
where
    ExecCtx: ExecutionContext,
{
    let extras =
        module.on_chan_open_ack_execute(&msg.port_id_on_a, &msg.chan_id_on_a, &msg.version_on_b)?;

    let chan_end_path_on_a = ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    // state changes
    let chan_end_on_a = {
        let mut chan_end_on_a = chan_end_on_a;

        chan_end_on_a.set_state(ChannelState::Open);
        chan_end_on_a.set_version(msg.version_on_b.clone());
        chan_end_on_a.set_counterparty_channel_id(msg.chan_id_on_b.clone());
        ctx_a.store_channel(&chan_end_path_on_a, chan_end_on_a.clone())?;

        chan_end_on_a
    };

    // emit events and logs
    {
        ctx_a.log_message("success: channel open ack".to_string())?;

        let conn_id_on_a = chan_end_on_a.connection_hop()?.clone();
        let core_event = IbcEvent::OpenAckChannel(OpenAck::new(
            msg.port_id_on_a,
            msg.chan_id_on_a,
            chan_end_on_a.counterparty().port_id.clone(),
            msg.chan_id_on_b,
            conn_id_on_a,
        ));
        ctx_a.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_a.emit_ibc_event(core_event)?;

        emit_module_extras(ctx_a, extras)?;
    }

    Ok(())
}

fn validate<Ctx>(ctx_a: &Ctx, msg: &MsgChannelOpenAck) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_a.validate_message_signer(&msg.signer)?;

    let chan_end_path_on_a = ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    // Validate that the channel end is in a state where it can be ack.
    if !matches!(chan_end_on_a.state, ChannelState::Init | ChannelState::TryOpen) {
        return Err(ChannelError::MismatchedChannelState {
            expected: "INIT or TRYOPEN".to_string(),
            actual: chan_end_on_a.state.to_string(),
        }
        .into());
    }

    let conn_end_on_a = open_connection_hop(ctx_a, chan_end_on_a.connection_hop()?)?;

    // Verify proofs
    {
        let port_id_on_b = chan_end_on_a.counterparty().port_id();

        let expected_chan_end_on_b = ChannelEnd::new(
            ChannelState::TryOpen,
            chan_end_on_a.ordering,
            Counterparty::new(msg.port_id_on_a.clone(), Some(msg.chan_id_on_a.clone())),
            counterparty_hops(ctx_a, &chan_end_on_a)?,
            msg.version_on_b.clone(),
        )?;

        verify_counterparty_channel(
            ctx_a,
            &conn_end_on_a,
            &msg.proof_chan_end_on_b,
            msg.proof_height_on_b,
            port_id_on_b,
            &msg.chan_id_on_b,
            expected_chan_end_on_b,
        )?;
    }

    Ok(())
}
