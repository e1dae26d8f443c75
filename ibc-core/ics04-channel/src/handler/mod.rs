//! Handlers for the channel handshake and the packet lifecycle.

use ibc_core_channel_types::channel::{ChannelEnd, Order, State as ChannelState};
use ibc_core_channel_types::error::{ChannelError, PacketError};
use ibc_core_client::context::prelude::*;
use ibc_core_client::types::Height;
use ibc_core_commitment_types::commitment::CommitmentProofBytes;
use ibc_core_connection::types::{ConnectionEnd, State as ConnectionState};
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::IbcEvent;
use ibc_core_host::types::identifiers::{ChannelId, ConnectionId, PortId};
use ibc_core_host::types::path::{ChannelEndPath, ClientConsensusStatePath, Path};
use ibc_core_host::{ExecutionContext, ValidationContext};
use ibc_core_router::router::Router;
use ibc_core_router::types::error::RouterError;
use ibc_core_router::types::module::{ModuleExtras, ModuleId};
use ibc_primitives::prelude::*;
use ibc_primitives::proto::Protobuf;

mod acknowledgement;
mod chan_close_confirm;
mod chan_close_init;
mod chan_open_ack;
mod chan_open_confirm;
mod chan_open_init;
mod chan_open_try;
mod counterparty;
mod recv_packet;
mod send_packet;
mod timeout;
mod timeout_on_close;
mod write_acknowledgement;

pub use acknowledgement::*;
pub use chan_close_confirm::*;
pub use chan_close_init::*;
pub use chan_open_ack::*;
pub use chan_open_confirm::*;
pub use chan_open_init::*;
pub use chan_open_try::*;
pub use counterparty::*;
pub use recv_packet::*;
pub use send_packet::*;
pub use timeout::*;
pub use write_acknowledgement::*;

/// Rejects an identifier collision with an existing channel end.
pub(crate) fn reject_existing_channel(
    port_id: &PortId,
    channel_id: &ChannelId,
    existing: &ChannelEnd,
) -> ChannelError {
    if existing.state == ChannelState::Init {
        ChannelError::ChannelMismatch {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
        }
    } else {
        ChannelError::ChannelAlreadyExists {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
        }
    }
}

/// Fetches the connection a channel runs over and checks that it is OPEN.
pub(crate) fn open_connection_hop<Ctx>(
    ctx: &Ctx,
    conn_id: &ConnectionId,
) -> Result<ConnectionEnd, ContextError>
where
    Ctx: ValidationContext,
{
    let conn_end = ctx.connection_end(conn_id)?;

    if conn_end.state != ConnectionState::Open {
        return Err(ChannelError::ConnectionNotOpen {
            connection_id: conn_id.clone(),
        }
        .into());
    }

    Ok(conn_end)
}

/// The ordering must be one of the features of the connection's version.
pub(crate) fn verify_ordering_supported(
    conn_end: &ConnectionEnd,
    ordering: Order,
) -> Result<(), ChannelError> {
    let supported = conn_end
        .versions()
        .first()
        .is_some_and(|version| version.verify_feature_supported(ordering.as_str()).is_ok());

    if !supported {
        return Err(ChannelError::UnsupportedOrdering { ordering });
    }
    Ok(())
}

/// The far end of a packet must be the channel's counterparty.
pub(crate) fn verify_packet_counterparty(
    chan_end: &ChannelEnd,
    port_id: &PortId,
    channel_id: &ChannelId,
) -> Result<(), PacketError> {
    let counterparty = chan_end.counterparty();

    if counterparty.port_id() != port_id || counterparty.channel_id() != Some(channel_id) {
        return Err(PacketError::MismatchedPacketCounterparty {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
        });
    }
    Ok(())
}

/// Checks that `module_id` is the module bound to `port_id`.
pub(crate) fn verify_port_owner(
    router: &impl Router,
    module_id: &ModuleId,
    port_id: &PortId,
) -> Result<(), RouterError> {
    match router.lookup_module(port_id) {
        Some(owner) if &owner == module_id => Ok(()),
        _ => Err(RouterError::UnauthorizedPort {
            port_id: port_id.clone(),
            module_id: module_id.clone(),
        }),
    }
}

/// Proves that the counterparty stores `expected_chan_end` at
/// `port_id/channel_id`, against the consensus state of the connection's
/// client at `proof_height`.
pub(crate) fn verify_counterparty_channel<Ctx>(
    ctx: &Ctx,
    conn_end: &ConnectionEnd,
    proof: &CommitmentProofBytes,
    proof_height: Height,
    port_id: &PortId,
    channel_id: &ChannelId,
    expected_chan_end: ChannelEnd,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let client_id = conn_end.client_id();
    let client_val_ctx = ctx.get_client_validation_context();
    let client_state = client_val_ctx.client_state(client_id)?;

    client_state
        .status(client_val_ctx, client_id)?
        .verify_is_active()?;

    client_state.validate_proof_height(proof_height)?;

    let consensus_state = client_val_ctx.consensus_state(&ClientConsensusStatePath::new(
        client_id.clone(),
        proof_height.value(),
    ))?;

    client_state
        .verify_membership(
            conn_end.counterparty().prefix(),
            proof,
            consensus_state.root(),
            Path::ChannelEnd(ChannelEndPath::new(port_id, channel_id)),
            expected_chan_end.encode_vec(),
        )
        .map_err(ChannelError::FailedChannelVerification)?;

    Ok(())
}

/// Proves `value` at `path` on the counterparty of `conn_end`, or the
/// absence of any value there when `value` is `None`.
pub(crate) fn verify_packet_proof<Ctx>(
    ctx: &Ctx,
    conn_end: &ConnectionEnd,
    proof: &CommitmentProofBytes,
    proof_height: Height,
    path: Path,
    value: Option<Vec<u8>>,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let client_id = conn_end.client_id();
    let client_val_ctx = ctx.get_client_validation_context();
    let client_state = client_val_ctx.client_state(client_id)?;

    client_state
        .status(client_val_ctx, client_id)?
        .verify_is_active()?;

    client_state.validate_proof_height(proof_height)?;

    let consensus_state = client_val_ctx.consensus_state(&ClientConsensusStatePath::new(
        client_id.clone(),
        proof_height.value(),
    ))?;

    let prefix = conn_end.counterparty().prefix();
    let root = consensus_state.root();

    match value {
        Some(value) => client_state.verify_membership(prefix, proof, root, path, value),
        None => client_state.verify_non_membership(prefix, proof, root, path),
    }
    .map_err(PacketError::FailedProofVerification)?;

    Ok(())
}

pub(crate) fn emit_module_extras<Ctx>(
    ctx: &mut Ctx,
    extras: ModuleExtras,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    for module_event in extras.events {
        ctx.emit_ibc_event(IbcEvent::Module(module_event))?;
    }

    for log_message in extras.log {
        ctx.log_message(log_message)?;
    }

    Ok(())
}
