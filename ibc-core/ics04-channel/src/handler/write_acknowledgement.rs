use ibc_core_channel_types::acknowledgement::Acknowledgement;
use ibc_core_channel_types::channel::{Order, State};
use ibc_core_channel_types::commitment::compute_ack_commitment;
use ibc_core_channel_types::error::PacketError;
use ibc_core_channel_types::events::WriteAcknowledgement;
use ibc_core_channel_types::packet::Packet;
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::{IbcEvent, MessageEvent};
use ibc_core_host::types::path::{AckPath, ChannelEndPath, ReceiptPath, SeqRecvPath};
use ibc_core_router::router::Router;
use ibc_core_router::types::module::ModuleId;
use ibc_primitives::prelude::*;

use super::verify_port_owner;
use crate::context::{WriteAckExecutionContext, WriteAckValidationContext};

/// Writes the acknowledgement of a packet received earlier, on behalf of the
/// module `module_id` bound to the packet's destination port.
///
/// Modules that answer `on_recv_packet` asynchronously call this once the
/// acknowledgement is known.
pub fn write_acknowledgement(
    ctx_b: &mut impl WriteAckExecutionContext,
    router: &impl Router,
    module_id: &ModuleId,
    packet: Packet,
    acknowledgement: Acknowledgement,
) -> Result<(), ContextError> {
    verify_port_owner(router, module_id, &packet.port_id_on_b)?;

    write_acknowledgement_validate(ctx_b, &packet, &acknowledgement)?;
    write_acknowledgement_execute(ctx_b, packet, acknowledgement)
}

pub(crate) fn write_acknowledgement_validate(
    ctx_b: &impl WriteAckValidationContext,
    packet: &Packet,
    acknowledgement: &Acknowledgement,
) -> Result<(), ContextError> {
    let chan_end_path_on_b = ChannelEndPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);
    let chan_end_on_b = ctx_b.channel_end(&chan_end_path_on_b)?;

    chan_end_on_b.verify_state_matches(&State::Open)?;

    let receipt_path_on_b =
        ReceiptPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);
    let received = match chan_end_on_b.ordering {
        Order::Ordered => {
            let seq_recv_path_on_b = SeqRecvPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);
            packet.seq_on_a < ctx_b.get_next_sequence_recv(&seq_recv_path_on_b)?
        }
        Order::Unordered => ctx_b.get_packet_receipt(&receipt_path_on_b)?.is_ok(),
    };
    if !received {
        return Err(PacketError::PacketNotReceived {
            sequence: packet.seq_on_a,
        }
        .into());
    }

    let ack_path_on_b = AckPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);
    if ctx_b.get_packet_acknowledgement(&ack_path_on_b).is_ok() {
        return Err(PacketError::AcknowledgementExists {
            sequence: packet.seq_on_a,
        }
        .into());
    }

    if acknowledgement.is_empty() && chan_end_on_b.ordering != Order::Ordered {
        return Err(PacketError::EmptyAcknowledgement.into());
    }

    Ok(())
}

/// A prior call to [`write_acknowledgement_validate`] MUST have succeeded.
pub(crate) fn write_acknowledgement_execute(
    ctx_b: &mut impl WriteAckExecutionContext,
    packet: Packet,
    acknowledgement: Acknowledgement,
) -> Result<(), ContextError> {
    // An empty acknowledgement on an ordered channel is never stored.
    if !acknowledgement.is_empty() {
        let ack_path_on_b =
            AckPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);
        ctx_b.store_packet_acknowledgement(
            &ack_path_on_b,
            compute_ack_commitment(&acknowledgement),
        )?;
    }

    let chan_end_path_on_b = ChannelEndPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);
    let conn_id_on_b = ctx_b.channel_end(&chan_end_path_on_b)?.connection_hop()?.clone();

    ctx_b.log_message(format!(
        "success: packet write acknowledgement; sequence {}",
        packet.seq_on_a
    ))?;

    let event = IbcEvent::WriteAcknowledgement(WriteAcknowledgement::new(
        packet,
        acknowledgement,
        conn_id_on_b,
    ));
    ctx_b.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
    ctx_b.emit_ibc_event(event)?;

    Ok(())
}
