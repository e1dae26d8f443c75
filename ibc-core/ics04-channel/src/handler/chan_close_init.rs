//! Protocol logic specific to ICS4 messages of type `MsgChannelCloseInit`.

use ibc_core_channel_types::channel::State;
use ibc_core_channel_types::events::CloseInit;
use ibc_core_channel_types::msgs::MsgChannelCloseInit;
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::{IbcEvent, MessageEvent};
use ibc_core_host::types::path::ChannelEndPath;
use ibc_core_host::{ExecutionContext, ValidationContext};
use ibc_core_router::module::Module;
use ibc_primitives::prelude::*;

use super::{emit_module_extras, open_connection_hop};

pub fn chan_close_init_validate<ValCtx>(
    ctx_a: &ValCtx,
    module: &dyn Module,
    msg: MsgChannelCloseInit,
) -> Result<(), ContextError>
where
    ValCtx: ValidationContext,
{
    validate(ctx_a, &msg)?;

    module.on_chan_close_init_validate(&msg.port_id_on_a, &msg.chan_id_on_a)?;

    Ok(())
}

pub fn chan_close_init_execute<ExecCtx>(
    ctx_a: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgChannelCloseInit,
) -> Result<(), ContextError>
where
    ExecCtx: ExecutionContext,
{
    let extras = module.on_chan_close_init_execute(&msg.port_id_on_a, &msg.chan_id_on_a)?;
    let chan_end_path_on_a = ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    // state changes
    let chan_end_on_a = {
        let mut chan_end_on_a = chan_end_on_a;
        chan_end_on_a.set_state(State::Closed);
        ctx_a.store_channel(&chan_end_path_on_a, chan_end_on_a.clone())?;

        chan_end_on_a
    };

    // emit events and logs
    {
        ctx_a.log_message("success: channel close init".to_string())?;

        let core_event = {
            let port_id_on_b = chan_end_on_a.counterparty().port_id.clone();
            let chan_id_on_b = chan_end_on_a.counterparty().channel_id.clone();
            let conn_id_on_a = chan_end_on_a.connection_hop()?.clone();

            IbcEvent::CloseInitChannel(CloseInit::new(
                msg.port_id_on_a,
                msg.chan_id_on_a,
                port_id_on_b,
                chan_id_on_b,
                conn_id_on_a,
            ))
        };
        ctx_a.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_a.emit_ibc_event(core_event)?;

        emit_module_extras(ctx_a, extras)?;
    }

    Ok(())
}

fn validate<Ctx>(ctx_a: &Ctx, msg: &MsgChannelCloseInit) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_a.validate_message_signer(&msg.signer)?;

    let chan_end_path_on_a = ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    // Validate that the channel end is in a state where it can be closed.
    chan_end_on_a.verify_not_closed()?;

    open_connection_hop(ctx_a, chan_end_on_a.connection_hop()?)?;

    Ok(())
}
