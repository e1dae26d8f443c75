//! Lookups that follow a channel's connection hops.

use ibc_core_channel_types::channel::ChannelEnd;
use ibc_core_channel_types::error::ChannelError;
use ibc_core_client::context::prelude::*;
use ibc_core_handler_types::error::ContextError;
use ibc_core_host::types::identifiers::{ChannelId, ClientId, ConnectionId, PortId};
use ibc_core_host::types::path::ChannelEndPath;
use ibc_core_host::{ClientStateRef, ValidationContext};
use ibc_primitives::prelude::*;

/// The connection hops the counterparty's end of `chan_end` must declare:
/// the counterparty connection of every local hop, in reverse order.
pub fn counterparty_hops<Ctx>(
    ctx: &Ctx,
    chan_end: &ChannelEnd,
) -> Result<Vec<ConnectionId>, ContextError>
where
    Ctx: ValidationContext,
{
    invert_connection_hops(ctx, chan_end.connection_hops())
}

pub(crate) fn invert_connection_hops<Ctx>(
    ctx: &Ctx,
    connection_hops: &[ConnectionId],
) -> Result<Vec<ConnectionId>, ContextError>
where
    Ctx: ValidationContext,
{
    let mut hops = connection_hops
        .iter()
        .map(|conn_id| {
            let conn_end = ctx.connection_end(conn_id)?;
            let counterparty_conn_id = conn_end.counterparty().connection_id().ok_or(
                ChannelError::MissingCounterpartyConnection {
                    connection_id: conn_id.clone(),
                },
            )?;
            Ok(counterparty_conn_id.clone())
        })
        .collect::<Result<Vec<_>, ContextError>>()?;

    hops.reverse();

    Ok(hops)
}

/// Resolves the light client a channel's proofs are verified with.
pub fn channel_client_state<Ctx>(
    ctx: &Ctx,
    port_id: &PortId,
    channel_id: &ChannelId,
) -> Result<(ClientId, ClientStateRef<Ctx>), ContextError>
where
    Ctx: ValidationContext,
{
    let chan_end = ctx.channel_end(&ChannelEndPath::new(port_id, channel_id))?;
    let conn_end = ctx.connection_end(chan_end.connection_hop()?)?;
    let client_id = conn_end.client_id().clone();

    let client_state = ctx
        .get_client_validation_context()
        .client_state(&client_id)?;

    Ok((client_id, client_state))
}
