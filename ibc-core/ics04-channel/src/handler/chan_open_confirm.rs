//! Protocol logic specific to ICS4 messages of type `MsgChannelOpenConfirm`.

use ibc_core_channel_types::channel::{ChannelEnd, Counterparty, State};
use ibc_core_channel_types::error::ChannelError;
use ibc_core_channel_types::events::OpenConfirm;
use ibc_core_channel_types::msgs::MsgChannelOpenConfirm;
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::{IbcEvent, MessageEvent};
use ibc_core_host::types::path::ChannelEndPath;
use ibc_core_host::{ExecutionContext, ValidationContext};
use ibc_core_router::module::Module;
use ibc_primitives::prelude::*;

use super::{
    counterparty_hops, emit_module_extras, open_connection_hop, verify_counterparty_channel,
};

pub fn chan_open_confirm_validate<ValCtx>(
    ctx_b: &ValCtx,
    module: &dyn Module,
    msg: MsgChannelOpenConfirm,
) -> Result<(), ContextError>
where
    ValCtx: ValidationContext,
{
    validate(ctx_b, &msg)?;

    module.on_chan_open_confirm_validate(&msg.port_id_on_b, &msg.chan_id_on_b)?;

    Ok(())
}

pub fn chan_open_confirm_execute<ExecCtx>(
    ctx_b: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgChannelOpenConfirm,
) -> Result<(), ContextError>
where
    ExecCtx: ExecutionContext,
{
    let extras = module.on_chan_open_confirm_execute(&msg.port_id_on_b, &msg.chan_id_on_b)?;

    let chan_end_path_on_b = ChannelEndPath::new(&msg.port_id_on_b, &msg.chan_id_on_b);
    let chan_end_on_b = ctx_b.channel_end(&chan_end_path_on_b)?;

    // state changes
    let chan_end_on_b = {
        let mut chan_end_on_b = chan_end_on_b;
        chan_end_on_b.set_state(State::Open);
        ctx_b.store_channel(&chan_end_path_on_b, chan_end_on_b.clone())?;

        chan_end_on_b
    };

    // emit events and logs
    {
        ctx_b.log_message("success: channel open confirm".to_string())?;

        let conn_id_on_b = chan_end_on_b.connection_hop()?.clone();
        let port_id_on_a = chan_end_on_b.counterparty().port_id.clone();
        let chan_id_on_a = chan_end_on_b
            .counterparty()
            .channel_id
            .clone()
            .ok_or(ChannelError::InvalidCounterparty {
                description: "counterparty channel id is unset".to_string(),
            })?;

        let core_event = IbcEvent::OpenConfirmChannel(OpenConfirm::new(
            msg.port_id_on_b,
            msg.chan_id_on_b,
            port_id_on_a,
            chan_id_on_a,
            conn_id_on_b,
        ));
        ctx_b.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_b.emit_ibc_event(core_event)?;

        emit_module_extras(ctx_b, extras)?;
    }

    Ok(())
}

fn validate<Ctx>(ctx_b: &Ctx, msg: &MsgChannelOpenConfirm) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_b.validate_message_signer(&msg.signer)?;

    let chan_end_path_on_b = ChannelEndPath::new(&msg.port_id_on_b, &msg.chan_id_on_b);
    let chan_end_on_b = ctx_b.channel_end(&chan_end_path_on_b)?;

    // Validate that the channel end is in a state where it can be confirmed.
    chan_end_on_b.verify_state_matches(&State::TryOpen)?;

    let conn_end_on_b = open_connection_hop(ctx_b, chan_end_on_b.connection_hop()?)?;

    // Verify proofs
    {
        let port_id_on_a = chan_end_on_b.counterparty().port_id();
        let chan_id_on_a = chan_end_on_b.counterparty().channel_id().ok_or(
            ChannelError::InvalidCounterparty {
                description: "counterparty channel id is unset".to_string(),
            },
        )?;

        let expected_chan_end_on_a = ChannelEnd::new(
            State::Open,
            chan_end_on_b.ordering,
            Counterparty::new(msg.port_id_on_b.clone(), Some(msg.chan_id_on_b.clone())),
            counterparty_hops(ctx_b, &chan_end_on_b)?,
            chan_end_on_b.version().clone(),
        )?;

        verify_counterparty_channel(
            ctx_b,
            &conn_end_on_b,
            &msg.proof_chan_end_on_a,
            msg.proof_height_on_a,
            port_id_on_a,
            chan_id_on_a,
            expected_chan_end_on_a,
        )?;
    }

    Ok(())
}
