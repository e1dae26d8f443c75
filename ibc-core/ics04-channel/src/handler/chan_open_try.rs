//! Protocol logic specific to ICS4 messages of type `MsgChannelOpenTry`.

use ibc_core_channel_types::channel::{ChannelEnd, Counterparty, State as ChannelState};
use ibc_core_channel_types::events::OpenTry;
use ibc_core_channel_types::msgs::MsgChannelOpenTry;
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::{IbcEvent, MessageEvent};
use ibc_core_host::types::path::{ChannelEndPath, SeqAckPath, SeqRecvPath, SeqSendPath};
use ibc_core_host::{ExecutionContext, ValidationContext};
use ibc_core_router::module::Module;
use ibc_primitives::prelude::*;

use super::counterparty::invert_connection_hops;
use super::{
    emit_module_extras, open_connection_hop, reject_existing_channel, verify_counterparty_channel,
    verify_ordering_supported,
};

pub fn chan_open_try_validate<ValCtx>(
    ctx_b: &ValCtx,
    module: &dyn Module,
    msg: MsgChannelOpenTry,
) -> Result<(), ContextError>
where
    ValCtx: ValidationContext,
{
    validate(ctx_b, &msg)?;

    module.on_chan_open_try_validate(
        msg.ordering,
        &msg.connection_hops_on_b,
        &msg.port_id_on_b,
        &msg.chan_id_on_b,
        &Counterparty::new(msg.port_id_on_a.clone(), Some(msg.chan_id_on_a.clone())),
        &msg.version_supported_on_a,
    )?;

    Ok(())
}

pub fn chan_open_try_execute<ExecCtx>(
    ctx_b: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgChannelOpenTry,
) -> Result<(), ContextError>
where
    ExecCtx: ExecutionContext,
{
    let (extras, version) = module.on_chan_open_try_execute(
        msg.ordering,
        &msg.connection_hops_on_b,
        &msg.port_id_on_b,
        &msg.chan_id_on_b,
        &Counterparty::new(msg.port_id_on_a.clone(), Some(msg.chan_id_on_a.clone())),
        &msg.version_supported_on_a,
    )?;

    let chan_end_on_b = ChannelEnd::new(
        ChannelState::TryOpen,
        msg.ordering,
        Counterparty::new(msg.port_id_on_a.clone(), Some(msg.chan_id_on_a.clone())),
        msg.connection_hops_on_b.clone(),
        version.clone(),
    )?;
    let conn_id_on_b = chan_end_on_b.connection_hop()?.clone();

    // state changes
    {
        let chan_end_path_on_b = ChannelEndPath::new(&msg.port_id_on_b, &msg.chan_id_on_b);
        ctx_b.store_channel(&chan_end_path_on_b, chan_end_on_b)?;

        // Initialize send, recv, and ack sequence numbers.
        let seq_send_path = SeqSendPath::new(&msg.port_id_on_b, &msg.chan_id_on_b);
        ctx_b.store_next_sequence_send(&seq_send_path, 1.into())?;

        let seq_recv_path = SeqRecvPath::new(&msg.port_id_on_b, &msg.chan_id_on_b);
        ctx_b.store_next_sequence_recv(&seq_recv_path, 1.into())?;

        let seq_ack_path = SeqAckPath::new(&msg.port_id_on_b, &msg.chan_id_on_b);
        ctx_b.store_next_sequence_ack(&seq_ack_path, 1.into())?;
    }

    // emit events and logs
    {
        ctx_b.log_message(format!(
            "success: channel open try with channel identifier: {}",
            msg.chan_id_on_b
        ))?;

        let core_event = IbcEvent::OpenTryChannel(OpenTry::new(
            msg.port_id_on_b,
            msg.chan_id_on_b,
            msg.port_id_on_a,
            msg.chan_id_on_a,
            conn_id_on_b,
            version,
        ));
        ctx_b.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_b.emit_ibc_event(core_event)?;

        emit_module_extras(ctx_b, extras)?;
    }

    Ok(())
}

fn validate<Ctx>(ctx_b: &Ctx, msg: &MsgChannelOpenTry) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_b.validate_message_signer(&msg.signer)?;

    msg.verify_connection_hops_length()?;

    // A relay retry may find the end this chain created with `ChanOpenInit`
    // for the same handshake; anything else is a collision.
    let chan_end_path_on_b = ChannelEndPath::new(&msg.port_id_on_b, &msg.chan_id_on_b);
    if let Ok(existing) = ctx_b.channel_end(&chan_end_path_on_b) {
        let init_end = ChannelEnd::new(
            ChannelState::Init,
            msg.ordering,
            Counterparty::new(msg.port_id_on_a.clone(), None),
            msg.connection_hops_on_b.clone(),
            msg.version_proposal.clone(),
        )?;

        if existing.state != ChannelState::Init || !existing.same_parameters(&init_end) {
            return Err(
                reject_existing_channel(&msg.port_id_on_b, &msg.chan_id_on_b, &existing).into(),
            );
        }
    }

    let conn_end_on_b = open_connection_hop(ctx_b, &msg.connection_hops_on_b[0])?;

    verify_ordering_supported(&conn_end_on_b, msg.ordering)?;

    // Verify proofs
    {
        let expected_chan_end_on_a = ChannelEnd::new(
            ChannelState::Init,
            msg.ordering,
            Counterparty::new(msg.port_id_on_b.clone(), None),
            invert_connection_hops(ctx_b, &msg.connection_hops_on_b)?,
            msg.version_supported_on_a.clone(),
        )?;

        verify_counterparty_channel(
            ctx_b,
            &conn_end_on_b,
            &msg.proof_chan_end_on_a,
            msg.proof_height_on_a,
            &msg.port_id_on_a,
            &msg.chan_id_on_a,
            expected_chan_end_on_a,
        )?;
    }

    Ok(())
}
