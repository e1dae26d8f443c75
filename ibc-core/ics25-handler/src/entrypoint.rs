use ibc_core_channel::handler::{
    acknowledgement_packet_execute, acknowledgement_packet_validate, chan_close_confirm_execute,
    chan_close_confirm_validate, chan_close_init_execute, chan_close_init_validate,
    chan_open_ack_execute, chan_open_ack_validate, chan_open_confirm_execute,
    chan_open_confirm_validate, chan_open_init_execute, chan_open_init_validate,
    chan_open_try_execute, chan_open_try_validate, recv_packet_execute, recv_packet_validate,
    timeout_packet_execute, timeout_packet_validate, TimeoutMsgType,
};
use ibc_core_channel::types::msgs::{
    channel_msg_to_port_id, packet_msg_to_port_id, ChannelMsg, PacketMsg,
};
use ibc_core_client::context::{ClientExecutionContext, ClientValidationContext};
use ibc_core_client::handler::{create_client, update_client};
use ibc_core_client::types::error::ClientError;
use ibc_core_client::types::msgs::ClientMsg;
use ibc_core_connection::handler::{
    conn_open_ack, conn_open_confirm, conn_open_init, conn_open_try,
};
use ibc_core_connection::types::msgs::ConnectionMsg;
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::msgs::MsgEnvelope;
use ibc_core_host::types::identifiers::PortId;
use ibc_core_host::{ExecutionContext, ValidationContext};
use ibc_core_router::module::Module;
use ibc_core_router::router::Router;
use ibc_core_router::types::error::RouterError;
use ibc_core_router::types::module::ModuleId;
use ibc_primitives::prelude::*;
use ibc_primitives::proto::Any;

use crate::pre_pass::PrePassContext;

/// Entrypoint which performs both validation and message execution
pub fn dispatch<Ctx>(
    ctx: &mut Ctx,
    router: &mut impl Router,
    msg: MsgEnvelope,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
    <<Ctx::V as ClientValidationContext>::ClientStateRef as TryFrom<Any>>::Error: Into<ClientError>,
    <<Ctx::E as ClientExecutionContext>::ClientStateMut as TryFrom<Any>>::Error: Into<ClientError>,
{
    validate(ctx, router, msg.clone())?;
    execute(ctx, router, msg)
}

/// Entrypoint which only performs message validation
///
/// If a transaction contains `n` messages `m_1` ... `m_n`, then
/// they MUST be processed as follows:
///     validate(m_1), execute(m_1), ..., validate(m_n), execute(m_n)
/// That is, the state transition of message `i` must be applied before
/// message `i+1` is validated. This is equivalent to calling
/// `dispatch()` on each successively, or to [`deliver_tx`].
pub fn validate<Ctx>(ctx: &Ctx, router: &impl Router, msg: MsgEnvelope) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
    <<Ctx::V as ClientValidationContext>::ClientStateRef as TryFrom<Any>>::Error: Into<ClientError>,
{
    match msg {
        MsgEnvelope::Client(msg) => match msg {
            ClientMsg::CreateClient(msg) => create_client::validate(ctx, msg),
            ClientMsg::UpdateClient(msg) => update_client::validate(ctx, msg),
        },
        MsgEnvelope::Connection(msg) => match msg {
            ConnectionMsg::OpenInit(msg) => conn_open_init::validate(ctx, msg),
            ConnectionMsg::OpenTry(msg) => conn_open_try::validate(ctx, msg),
            ConnectionMsg::OpenAck(msg) => conn_open_ack::validate(ctx, msg),
            ConnectionMsg::OpenConfirm(msg) => conn_open_confirm::validate(ctx, &msg),
        },
        MsgEnvelope::Channel(msg) => {
            let module = route(router, channel_msg_to_port_id(&msg))?;

            match msg {
                ChannelMsg::OpenInit(msg) => chan_open_init_validate(ctx, module, msg),
                ChannelMsg::OpenTry(msg) => chan_open_try_validate(ctx, module, msg),
                ChannelMsg::OpenAck(msg) => chan_open_ack_validate(ctx, module, msg),
                ChannelMsg::OpenConfirm(msg) => chan_open_confirm_validate(ctx, module, msg),
                ChannelMsg::CloseInit(msg) => chan_close_init_validate(ctx, module, msg),
                ChannelMsg::CloseConfirm(msg) => chan_close_confirm_validate(ctx, module, msg),
            }
        }
        MsgEnvelope::Packet(msg) => validate_packet(ctx, router, msg),
    }
}

/// Entrypoint which only performs message execution
pub fn execute<Ctx>(
    ctx: &mut Ctx,
    router: &mut impl Router,
    msg: MsgEnvelope,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
    <<Ctx::E as ClientExecutionContext>::ClientStateMut as TryFrom<Any>>::Error: Into<ClientError>,
{
    match msg {
        MsgEnvelope::Client(msg) => match msg {
            ClientMsg::CreateClient(msg) => create_client::execute(ctx, msg),
            ClientMsg::UpdateClient(msg) => update_client::execute(ctx, msg),
        },
        MsgEnvelope::Connection(msg) => match msg {
            ConnectionMsg::OpenInit(msg) => conn_open_init::execute(ctx, msg),
            ConnectionMsg::OpenTry(msg) => conn_open_try::execute(ctx, msg),
            ConnectionMsg::OpenAck(msg) => conn_open_ack::execute(ctx, msg),
            ConnectionMsg::OpenConfirm(msg) => conn_open_confirm::execute(ctx, &msg),
        },
        MsgEnvelope::Channel(msg) => {
            let module = route_mut(router, channel_msg_to_port_id(&msg))?;

            match msg {
                ChannelMsg::OpenInit(msg) => chan_open_init_execute(ctx, module, msg),
                ChannelMsg::OpenTry(msg) => chan_open_try_execute(ctx, module, msg),
                ChannelMsg::OpenAck(msg) => chan_open_ack_execute(ctx, module, msg),
                ChannelMsg::OpenConfirm(msg) => chan_open_confirm_execute(ctx, module, msg),
                ChannelMsg::CloseInit(msg) => chan_close_init_execute(ctx, module, msg),
                ChannelMsg::CloseConfirm(msg) => chan_close_confirm_execute(ctx, module, msg),
            }
        }
        MsgEnvelope::Packet(msg) => execute_packet(ctx, router, msg),
    }
}

/// Processes the messages of one transaction.
///
/// A transaction made only of client updates and packet messages goes
/// through the proof-verification pre-pass: the client updates are applied
/// first, then every packet message is validated against the updated
/// clients, each one seeing the effects of those before it, and only then
/// are the packet messages executed. Any other transaction is dispatched
/// message by message.
///
/// The host MUST discard every write and event of the transaction when this
/// returns an error.
pub fn deliver_tx<Ctx>(
    ctx: &mut Ctx,
    router: &mut impl Router,
    msgs: Vec<MsgEnvelope>,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
    <<Ctx::V as ClientValidationContext>::ClientStateRef as TryFrom<Any>>::Error: Into<ClientError>,
    <<Ctx::E as ClientExecutionContext>::ClientStateMut as TryFrom<Any>>::Error: Into<ClientError>,
{
    if !msgs.iter().all(MsgEnvelope::is_pre_pass_eligible) {
        for msg in msgs {
            dispatch(ctx, router, msg)?;
        }
        return Ok(());
    }

    let mut packet_msgs = Vec::with_capacity(msgs.len());

    for msg in msgs {
        match msg {
            MsgEnvelope::Packet(msg) => packet_msgs.push(msg),
            msg => dispatch(ctx, router, msg)?,
        }
    }

    {
        let mut overlay = PrePassContext::new(ctx);

        for msg in &packet_msgs {
            validate_packet(&overlay, router, msg.clone())?;
            overlay.record(msg)?;
        }
    }

    ctx.log_message(format!(
        "success: pre-pass verified {} packet message(s)",
        packet_msgs.len()
    ))?;

    for msg in packet_msgs {
        execute_packet(ctx, router, msg)?;
    }

    Ok(())
}

fn validate_packet<Ctx>(ctx: &Ctx, router: &impl Router, msg: PacketMsg) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let module = route(router, packet_msg_to_port_id(&msg))?;

    match msg {
        PacketMsg::Recv(msg) => recv_packet_validate(ctx, msg),
        PacketMsg::Ack(msg) => acknowledgement_packet_validate(ctx, module, msg),
        PacketMsg::Timeout(msg) => {
            timeout_packet_validate(ctx, module, TimeoutMsgType::Timeout(msg))
        }
        PacketMsg::TimeoutOnClose(msg) => {
            timeout_packet_validate(ctx, module, TimeoutMsgType::TimeoutOnClose(msg))
        }
    }
}

fn execute_packet<Ctx>(
    ctx: &mut Ctx,
    router: &mut impl Router,
    msg: PacketMsg,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let module = route_mut(router, packet_msg_to_port_id(&msg))?;

    match msg {
        PacketMsg::Recv(msg) => recv_packet_execute(ctx, module, msg),
        PacketMsg::Ack(msg) => acknowledgement_packet_execute(ctx, module, msg),
        PacketMsg::Timeout(msg) => {
            timeout_packet_execute(ctx, module, TimeoutMsgType::Timeout(msg))
        }
        PacketMsg::TimeoutOnClose(msg) => {
            timeout_packet_execute(ctx, module, TimeoutMsgType::TimeoutOnClose(msg))
        }
    }
}

fn lookup_module_id(router: &impl Router, port_id: &PortId) -> Result<ModuleId, RouterError> {
    router
        .lookup_module(port_id)
        .ok_or(RouterError::UnknownPort {
            port_id: port_id.clone(),
        })
}

/// The module bound to `port_id`.
fn route<'r>(router: &'r impl Router, port_id: &PortId) -> Result<&'r dyn Module, RouterError> {
    let module_id = lookup_module_id(router, port_id)?;

    router
        .get_route(&module_id)
        .ok_or(RouterError::MissingModule { module_id })
}

fn route_mut<'r>(
    router: &'r mut impl Router,
    port_id: &PortId,
) -> Result<&'r mut dyn Module, RouterError> {
    let module_id = lookup_module_id(router, port_id)?;

    router
        .get_route_mut(&module_id)
        .ok_or(RouterError::MissingModule { module_id })
}
