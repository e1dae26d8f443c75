use ibc_core_client::context::prelude::*;
use ibc_core_client::types::Height;
use ibc_core_commitment_types::commitment::{
    CommitmentPrefix, CommitmentProofBytes, CommitmentRoot,
};
use ibc_core_connection_types::error::ConnectionError;
use ibc_core_connection_types::{ConnectionEnd, State};
use ibc_core_handler_types::error::ContextError;
use ibc_core_host::types::identifiers::{ClientId, ConnectionId};
use ibc_core_host::types::path::{ClientConsensusStatePath, Path};
use ibc_core_host::ValidationContext;

pub mod conn_open_ack;
pub mod conn_open_confirm;
pub mod conn_open_init;
pub mod conn_open_try;

/// Rejects an identifier collision with an existing connection end: an end
/// still in `INIT` is reported as already existing, one further along as
/// being in the wrong state.
pub(crate) fn reject_existing_end(
    conn_id: &ConnectionId,
    existing: &ConnectionEnd,
) -> ConnectionError {
    if existing.state == State::Init {
        ConnectionError::ConnectionMismatch {
            connection_id: conn_id.clone(),
        }
    } else {
        ConnectionError::ConnectionAlreadyExists {
            connection_id: conn_id.clone(),
        }
    }
}

/// Proves that the counterparty recorded the host's own consensus state at
/// `consensus_height`, which must be a past height of the host.
#[allow(clippy::too_many_arguments)]
pub(crate) fn verify_host_consensus_state<Ctx, CS>(
    ctx: &Ctx,
    client_state: &CS,
    prefix_on_counterparty: &CommitmentPrefix,
    root: &CommitmentRoot,
    proof: &CommitmentProofBytes,
    host_client_id_on_counterparty: &ClientId,
    consensus_height: Height,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
    CS: ClientStateCommon,
{
    let host_height = ctx.host_height()?;
    if consensus_height >= host_height {
        return Err(ConnectionError::InvalidConsensusHeight {
            target_height: consensus_height,
            current_height: host_height,
        }
        .into());
    }

    let expected_consensus_state = ctx.host_consensus_state(&consensus_height)?;

    client_state
        .verify_membership(
            prefix_on_counterparty,
            proof,
            root,
            Path::ClientConsensusState(ClientConsensusStatePath::new(
                host_client_id_on_counterparty.clone(),
                consensus_height.value(),
            )),
            expected_consensus_state.encode_vec(),
        )
        .map_err(ConnectionError::FailedToVerifyConsensusState)?;

    Ok(())
}
