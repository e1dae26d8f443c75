use ibc_core_channel_types::channel::{Order, State};
use ibc_core_channel_types::commitment::compute_ack_commitment;
use ibc_core_channel_types::error::PacketError;
use ibc_core_channel_types::events::AcknowledgePacket;
use ibc_core_channel_types::msgs::MsgAcknowledgement;
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::{IbcEvent, MessageEvent};
use ibc_core_host::types::path::{AckPath, ChannelEndPath, CommitmentPath, Path, SeqAckPath};
use ibc_core_host::{ExecutionContext, ValidationContext};
use ibc_core_router::module::Module;
use ibc_primitives::prelude::*;

use super::{
    emit_module_extras, open_connection_hop, verify_packet_counterparty, verify_packet_proof,
};

pub fn acknowledgement_packet_validate<ValCtx>(
    ctx_a: &ValCtx,
    module: &dyn Module,
    msg: MsgAcknowledgement,
) -> Result<(), ContextError>
where
    ValCtx: ValidationContext,
{
    ctx_a.validate_message_signer(&msg.signer)?;

    validate(ctx_a, &msg)?;

    module.on_acknowledgement_packet_validate(&msg.packet, &msg.acknowledgement, &msg.signer)?;

    Ok(())
}

pub fn acknowledgement_packet_execute<ExecCtx>(
    ctx_a: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgAcknowledgement,
) -> Result<(), ContextError>
where
    ExecCtx: ExecutionContext,
{
    let packet = &msg.packet;
    let chan_end_path_on_a = ChannelEndPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    // apply state changes
    {
        let commitment_path_on_a =
            CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a);
        ctx_a.delete_packet_commitment(&commitment_path_on_a)?;

        if let Order::Ordered = chan_end_on_a.ordering {
            // `packet.seq_on_a == next_seq_ack` was checked in validation
            let seq_ack_path_on_a = SeqAckPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
            let next_seq_ack = ctx_a.get_next_sequence_ack(&seq_ack_path_on_a)?;

            ctx_a.store_next_sequence_ack(&seq_ack_path_on_a, next_seq_ack.increment())?;
        }
    }

    let (extras, cb_result) =
        module.on_acknowledgement_packet_execute(packet, &msg.acknowledgement, &msg.signer);

    cb_result?;

    // emit events and logs
    {
        let conn_id_on_a = chan_end_on_a.connection_hop()?.clone();

        ctx_a.log_message(format!(
            "success: packet acknowledgement; sequence {}",
            packet.seq_on_a
        ))?;

        let event = IbcEvent::AcknowledgePacket(AcknowledgePacket::new(
            msg.packet,
            chan_end_on_a.ordering,
            conn_id_on_a,
        ));
        ctx_a.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_a.emit_ibc_event(event)?;

        emit_module_extras(ctx_a, extras)?;
    }

    Ok(())
}

fn validate<Ctx>(ctx_a: &Ctx, msg: &MsgAcknowledgement) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let packet = &msg.packet;
    let chan_end_path_on_a = ChannelEndPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    chan_end_on_a.verify_state_matches(&State::Open)?;

    verify_packet_counterparty(&chan_end_on_a, &packet.port_id_on_b, &packet.chan_id_on_b)?;

    let conn_end_on_a = open_connection_hop(ctx_a, chan_end_on_a.connection_hop()?)?;

    let commitment_path_on_a =
        CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a);

    // A missing commitment means the packet was never sent or has already
    // been acknowledged or timed out.
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

    if let Order::Ordered = chan_end_on_a.ordering {
        let seq_ack_path_on_a = SeqAckPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
        let next_seq_ack = ctx_a.get_next_sequence_ack(&seq_ack_path_on_a)?;

        if packet.seq_on_a != next_seq_ack {
            return Err(PacketError::InvalidPacketSequence {
                expected: next_seq_ack,
                actual: packet.seq_on_a,
            }
            .into());
        }
    }

    let ack_path_on_b = AckPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);

    verify_packet_proof(
        ctx_a,
        &conn_end_on_a,
        &msg.proof_acked_on_b,
        msg.proof_height_on_b,
        Path::Ack(ack_path_on_b),
        Some(compute_ack_commitment(&msg.acknowledgement).into_vec()),
    )?;

    Ok(())
}
