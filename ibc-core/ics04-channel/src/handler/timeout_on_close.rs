use ibc_core_channel_types::channel::{ChannelEnd, Counterparty, State};
use ibc_core_channel_types::msgs::MsgTimeoutOnClose;
use ibc_core_handler_types::error::ContextError;
use ibc_core_host::types::path::ChannelEndPath;
use ibc_core_host::ValidationContext;
use ibc_primitives::prelude::*;

use super::timeout::{verify_packet_in_flight, verify_unreceived};
use super::{counterparty_hops, verify_counterparty_channel};

/// A packet whose destination channel closed can never be received, so no
/// timeout needs to have elapsed.
pub(super) fn validate<Ctx>(ctx_a: &Ctx, msg: &MsgTimeoutOnClose) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let packet = &msg.packet;
    let chan_end_path_on_a = ChannelEndPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    let conn_end_on_a = verify_packet_in_flight(ctx_a, &chan_end_on_a, packet)?;

    // The counterparty channel end must be closed.
    {
        let expected_chan_end_on_b = ChannelEnd::new(
            State::Closed,
            chan_end_on_a.ordering,
            Counterparty::new(packet.port_id_on_a.clone(), Some(packet.chan_id_on_a.clone())),
            counterparty_hops(ctx_a, &chan_end_on_a)?,
            chan_end_on_a.version().clone(),
        )?;

        verify_counterparty_channel(
            ctx_a,
            &conn_end_on_a,
            &msg.proof_close_on_b,
            msg.proof_height_on_b,
            &packet.port_id_on_b,
            &packet.chan_id_on_b,
            expected_chan_end_on_b,
        )?;
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
