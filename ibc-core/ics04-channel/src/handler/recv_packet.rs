use ibc_core_channel_types::channel::{Order, State};
use ibc_core_channel_types::commitment::Receipt;
use ibc_core_channel_types::error::PacketError;
use ibc_core_channel_types::events::ReceivePacket;
use ibc_core_channel_types::msgs::MsgRecvPacket;
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::{IbcEvent, MessageEvent};
use ibc_core_host::types::path::{ChannelEndPath, CommitmentPath, Path, ReceiptPath, SeqRecvPath};
use ibc_core_host::{ExecutionContext, ValidationContext};
use ibc_core_router::module::Module;
use ibc_primitives::prelude::*;

use super::{
    emit_module_extras, open_connection_hop, verify_packet_counterparty, verify_packet_proof,
    write_acknowledgement_execute, write_acknowledgement_validate,
};

pub fn recv_packet_validate<ValCtx>(ctx_b: &ValCtx, msg: MsgRecvPacket) -> Result<(), ContextError>
where
    ValCtx: ValidationContext,
{
    ctx_b.validate_message_signer(&msg.signer)?;

    validate(ctx_b, &msg)
}

pub fn recv_packet_execute<ExecCtx>(
    ctx_b: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgRecvPacket,
) -> Result<(), ContextError>
where
    ExecCtx: ExecutionContext,
{
    let packet = &msg.packet;
    let chan_end_path_on_b = ChannelEndPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);
    let chan_end_on_b = ctx_b.channel_end(&chan_end_path_on_b)?;

    // state changes
    match chan_end_on_b.ordering {
        Order::Unordered => {
            let receipt_path_on_b =
                ReceiptPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);
            ctx_b.store_packet_receipt(&receipt_path_on_b, Receipt::Ok)?;
        }
        Order::Ordered => {
            let seq_recv_path_on_b = SeqRecvPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);
            let next_seq_recv = ctx_b.get_next_sequence_recv(&seq_recv_path_on_b)?;

            ctx_b.store_next_sequence_recv(&seq_recv_path_on_b, next_seq_recv.increment())?;
        }
    }

    let (extras, acknowledgement) = module.on_recv_packet_execute(packet, &msg.signer);

    // emit events and logs
    {
        let conn_id_on_b = chan_end_on_b.connection_hop()?.clone();

        ctx_b.log_message("success: packet receive".to_string())?;

        let event = IbcEvent::ReceivePacket(ReceivePacket::new(
            msg.packet.clone(),
            chan_end_on_b.ordering,
            conn_id_on_b,
        ));
        ctx_b.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_b.emit_ibc_event(event)?;
    }

    if let Some(acknowledgement) = acknowledgement {
        write_acknowledgement_validate(ctx_b, &msg.packet, &acknowledgement)?;
        write_acknowledgement_execute(ctx_b, msg.packet, acknowledgement)?;
    }

    emit_module_extras(ctx_b, extras)?;

    Ok(())
}

fn validate<Ctx>(ctx_b: &Ctx, msg: &MsgRecvPacket) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let packet = &msg.packet;
    let chan_end_path_on_b = ChannelEndPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);
    let chan_end_on_b = ctx_b.channel_end(&chan_end_path_on_b)?;

    chan_end_on_b.verify_state_matches(&State::Open)?;

    verify_packet_counterparty(&chan_end_on_b, &packet.port_id_on_a, &packet.chan_id_on_a)?;

    let conn_end_on_b = open_connection_hop(ctx_b, chan_end_on_b.connection_hop()?)?;

    packet.verify_not_timed_out(ctx_b.host_height()?, &ctx_b.host_timestamp()?)?;

    // Replay protection runs ahead of the proof.
    match chan_end_on_b.ordering {
        Order::Ordered => {
            let seq_recv_path_on_b = SeqRecvPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);
            let next_seq_recv = ctx_b.get_next_sequence_recv(&seq_recv_path_on_b)?;

            if packet.seq_on_a != next_seq_recv {
                return Err(PacketError::InvalidPacketSequence {
                    expected: next_seq_recv,
                    actual: packet.seq_on_a,
                }
                .into());
            }
        }
        Order::Unordered => {
            let receipt_path_on_b =
                ReceiptPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);

            if ctx_b.get_packet_receipt(&receipt_path_on_b)?.is_ok() {
                return Err(PacketError::PacketAlreadyReceived {
                    sequence: packet.seq_on_a,
                }
                .into());
            }
        }
    }

    let commitment_path_on_a =
        CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a);

    verify_packet_proof(
        ctx_b,
        &conn_end_on_b,
        &msg.proof_commitment_on_a,
        msg.proof_height_on_a,
        Path::Commitment(commitment_path_on_a),
        Some(packet.commitment().into_vec()),
    )?;

    Ok(())
}
