use ibc_core_channel_types::channel::{ChannelEnd, Order, State};
use ibc_core_channel_types::error::PacketError;
use ibc_core_channel_types::events::{ChannelClosed, TimeoutPacket};
use ibc_core_channel_types::msgs::{MsgTimeout, MsgTimeoutOnClose};
use ibc_core_channel_types::packet::Packet;
use ibc_core_client::context::prelude::*;
use ibc_core_client::types::Height;
use ibc_core_commitment_types::commitment::CommitmentProofBytes;
use ibc_core_connection::types::ConnectionEnd;
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::{IbcEvent, MessageEvent};
use ibc_core_host::types::identifiers::Sequence;
use ibc_core_host::types::path::{
    ChannelEndPath, ClientConsensusStatePath, CommitmentPath, Path, ReceiptPath, SeqRecvPath,
};
use ibc_core_host::{ExecutionContext, ValidationContext};
use ibc_core_router::module::Module;
use ibc_primitives::prelude::*;

use super::{emit_module_extras, timeout_on_close, verify_packet_counterparty, verify_packet_proof};

/// Both timeout messages share the module callback and the execution step.
pub enum TimeoutMsgType {
    Timeout(MsgTimeout),
    TimeoutOnClose(MsgTimeoutOnClose),
}

impl TimeoutMsgType {
    pub fn packet(&self) -> &Packet {
        match self {
            Self::Timeout(msg) => &msg.packet,
            Self::TimeoutOnClose(msg) => &msg.packet,
        }
    }
}

pub fn timeout_packet_validate<ValCtx>(
    ctx_a: &ValCtx,
    module: &dyn Module,
    timeout_msg_type: TimeoutMsgType,
) -> Result<(), ContextError>
where
    ValCtx: ValidationContext,
{
    match &timeout_msg_type {
        TimeoutMsgType::Timeout(msg) => {
            ctx_a.validate_message_signer(&msg.signer)?;
            validate(ctx_a, msg)
        }
        TimeoutMsgType::TimeoutOnClose(msg) => {
            ctx_a.validate_message_signer(&msg.signer)?;
            timeout_on_close::validate(ctx_a, msg)
        }
    }?;

    let (packet, signer) = match timeout_msg_type {
        TimeoutMsgType::Timeout(msg) => (msg.packet, msg.signer),
        TimeoutMsgType::TimeoutOnClose(msg) => (msg.packet, msg.signer),
    };

    module.on_timeout_packet_validate(&packet, &signer)?;

    Ok(())
}

pub fn timeout_packet_execute<ExecCtx>(
    ctx_a: &mut ExecCtx,
    module: &mut dyn Module,
    timeout_msg_type: TimeoutMsgType,
) -> Result<(), ContextError>
where
    ExecCtx: ExecutionContext,
{
    let (packet, signer) = match timeout_msg_type {
        TimeoutMsgType::Timeout(msg) => (msg.packet, msg.signer),
        TimeoutMsgType::TimeoutOnClose(msg) => (msg.packet, msg.signer),
    };
    let chan_end_path_on_a = ChannelEndPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;
    let conn_id_on_a = chan_end_on_a.connection_hop()?.clone();

    // state changes
    {
        let commitment_path_on_a =
            CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a);
        ctx_a.delete_packet_commitment(&commitment_path_on_a)?;

        // A timed out packet breaks the delivery order for good.
        if let Order::Ordered = chan_end_on_a.ordering {
            let mut closed_chan_end_on_a = chan_end_on_a.clone();
            closed_chan_end_on_a.set_state(State::Closed);
            ctx_a.store_channel(&chan_end_path_on_a, closed_chan_end_on_a)?;
        }
    }

    let (extras, cb_result) = module.on_timeout_packet_execute(&packet, &signer);

    cb_result?;

    // emit events and logs
    {
        ctx_a.log_message(format!("success: packet timeout; sequence {}", packet.seq_on_a))?;

        let closed_event = match chan_end_on_a.ordering {
            Order::Ordered => Some(IbcEvent::ChannelClosed(ChannelClosed::new(
                packet.port_id_on_a.clone(),
                packet.chan_id_on_a.clone(),
                chan_end_on_a.counterparty().port_id.clone(),
                chan_end_on_a.counterparty().channel_id.clone(),
                conn_id_on_a.clone(),
                chan_end_on_a.ordering,
            ))),
            Order::Unordered => None,
        };

        let event = IbcEvent::TimeoutPacket(TimeoutPacket::new(
            packet,
            chan_end_on_a.ordering,
            conn_id_on_a,
        ));
        ctx_a.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_a.emit_ibc_event(event)?;

        if let Some(closed_event) = closed_event {
            ctx_a.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
            ctx_a.emit_ibc_event(closed_event)?;
        }

        emit_module_extras(ctx_a, extras)?;
    }

    Ok(())
}

fn validate<Ctx>(ctx_a: &Ctx, msg: &MsgTimeout) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let packet = &msg.packet;
    let chan_end_path_on_a = ChannelEndPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    chan_end_on_a.verify_state_matches(&State::Open)?;

    let conn_end_on_a = verify_packet_in_flight(ctx_a, &chan_end_on_a, packet)?;

    // The counterparty must have passed the timeout at the proof height.
    {
        let client_id_on_a = conn_end_on_a.client_id();
        let client_val_ctx_a = ctx_a.get_client_validation_context();
        let consensus_state_of_b_on_a =
            client_val_ctx_a.consensus_state(&ClientConsensusStatePath::new(
                client_id_on_a.clone(),
                msg.proof_height_on_b.value(),
            ))?;
        let timestamp_of_b = consensus_state_of_b_on_a.timestamp();

        if !packet.timed_out(&timestamp_of_b, msg.proof_height_on_b) {
            let err = if packet.timeout_height_on_b.is_set() {
                PacketError::TimeoutHeightNotReached {
                    timeout_height: packet.timeout_height_on_b,
                    proof_height: msg.proof_height_on_b,
                }
            } else {
                PacketError::TimeoutTimestampNotReached {
                    timeout_timestamp: packet.timeout_timestamp_on_b,
                    proof_timestamp: timestamp_of_b,
                }
            };
            return Err(err.into());
        }
    }

    verify_unreceived(
        ctx_a,
        &chan_end_on_a,
        &conn_end_on_a,
        packet,
        msg.next_seq_recv_on_b,
        &msg.proof_unreceived_on_b,
        msg.proof_height_on_b,
    )
}

/// Checks that the packet was sent over `chan_end_on_a` and is still
/// awaiting an outcome, returning the connection of the channel.
pub(super) fn verify_packet_in_flight<Ctx>(
    ctx_a: &Ctx,
    chan_end_on_a: &ChannelEnd,
    packet: &Packet,
) -> Result<ConnectionEnd, ContextError>
where
    Ctx: ValidationContext,
{
    verify_packet_counterparty(chan_end_on_a, &packet.port_id_on_b, &packet.chan_id_on_b)?;

    let conn_end_on_a = ctx_a.connection_end(chan_end_on_a.connection_hop()?)?;

    let commitment_path_on_a =
        CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a);
    let commitment_on_a = ctx_a
        .get_packet_commitment(&commitment_path_on_a)
        .map_err(|_| PacketError::PacketCommitmentNotFound {
            sequence: packet.seq_on_a,
        })?;

    let expected_commitment_on_a = packet.commitment();
    if commitment_on_a != expected_commitment_on_a {
        return Err(PacketError::MismatchedPacketCommitment {
            sequence: packet.seq_on_a,
            expected: expected_commitment_on_a,
            actual: commitment_on_a,
        }
        .into());
    }

    Ok(conn_end_on_a)
}

/// Proves that the counterparty has not received the packet: through its
/// next receive sequence on ordered channels, through the absence of a
/// receipt otherwise.
pub(super) fn verify_unreceived<Ctx>(
    ctx_a: &Ctx,
    chan_end_on_a: &ChannelEnd,
    conn_end_on_a: &ConnectionEnd,
    packet: &Packet,
    next_seq_recv_on_b: Sequence,
    proof_unreceived_on_b: &CommitmentProofBytes,
    proof_height_on_b: Height,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let (path, value) = match chan_end_on_a.ordering {
        Order::Ordered => {
            if packet.seq_on_a < next_seq_recv_on_b {
                return Err(PacketError::InvalidNextSequenceRecv {
                    sequence: packet.seq_on_a,
                    next_seq_recv_on_b,
                }
                .into());
            }
            let seq_recv_path_on_b = SeqRecvPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);

            (
                Path::SeqRecv(seq_recv_path_on_b),
                Some(next_seq_recv_on_b.to_vec()),
            )
        }
        Order::Unordered => {
            let receipt_path_on_b =
                ReceiptPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);

            (Path::Receipt(receipt_path_on_b), None)
        }
    };

    verify_packet_proof(
        ctx_a,
        conn_end_on_a,
        proof_unreceived_on_b,
        proof_height_on_b,
        path,
        value,
    )
}
