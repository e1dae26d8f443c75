//! Client state and consensus state queries.

use alloc::string::ToString;
use core::str::FromStr;

use ibc_core::client::context::prelude::*;
use ibc_core::client::types::error::ClientError;
use ibc_core::client::types::Height;
use ibc_core::host::types::identifiers::ClientId;
use ibc_core::host::types::path::{ClientConsensusStatePath, ClientStatePath};
use ibc_core::host::{ClientStateRef, ConsensusStateRef, ValidationContext};
use ibc_core::primitives::proto::Any;
use ibc_proto::ibc::core::client::v1::{
    IdentifiedClientState, QueryClientStateRequest, QueryClientStateResponse,
    QueryClientStatesRequest, QueryClientStatesResponse, QueryClientStatusRequest,
    QueryClientStatusResponse, QueryConsensusStateHeightsRequest,
    QueryConsensusStateHeightsResponse, QueryConsensusStateRequest, QueryConsensusStateResponse,
};

use crate::core::context::{ProvableContext, QueryContext};
use crate::core::proof::prove_at_host_height;
use crate::error::QueryError;

/// Queries the client state of a given client id.
pub fn query_client_state<I>(
    ibc_ctx: &I,
    request: &QueryClientStateRequest,
) -> Result<QueryClientStateResponse, QueryError>
where
    I: ValidationContext + ProvableContext,
    ClientStateRef<I>: Into<Any>,
{
    let client_id = ClientId::from_str(&request.client_id)?;

    let client_state = ibc_ctx
        .get_client_validation_context()
        .client_state(&client_id)?;

    let (proof, proof_height) =
        prove_at_host_height(ibc_ctx, ClientStatePath::new(client_id))?;

    Ok(QueryClientStateResponse {
        client_state: Some(client_state.into()),
        proof,
        proof_height,
    })
}

pub fn query_client_states<I>(
    ibc_ctx: &I,
    _request: &QueryClientStatesRequest,
) -> Result<QueryClientStatesResponse, QueryError>
where
    I: QueryContext,
    ClientStateRef<I>: Into<Any>,
{
    let client_states = ibc_ctx
        .client_states()?
        .into_iter()
        .map(|(id, state)| IdentifiedClientState {
            client_id: id.to_string(),
            client_state: Some(state.into()),
        })
        .collect();

    Ok(QueryClientStatesResponse {
        client_states,
        pagination: None,
    })
}

/// Queries the consensus state of a client, either at the requested height
/// or at the client's latest height when `latest_height` is set.
pub fn query_consensus_state<I>(
    ibc_ctx: &I,
    request: &QueryConsensusStateRequest,
) -> Result<QueryConsensusStateResponse, QueryError>
where
    I: ValidationContext + ProvableContext,
    ConsensusStateRef<I>: Into<Any>,
{
    let client_id = ClientId::from_str(&request.client_id)?;
    let client_val_ctx = ibc_ctx.get_client_validation_context();

    let height = if request.latest_height {
        client_val_ctx.client_state(&client_id)?.latest_height()
    } else {
        if request.revision_number != 0 {
            return Err(ClientError::InvalidHeight.into());
        }
        Height::new(request.revision_height)?
    };

    let consensus_state_path = ClientConsensusStatePath::new(client_id, height.value());
    let consensus_state = client_val_ctx.consensus_state(&consensus_state_path)?;

    let (proof, proof_height) = prove_at_host_height(ibc_ctx, consensus_state_path)?;

    Ok(QueryConsensusStateResponse {
        consensus_state: Some(consensus_state.into()),
        proof,
        proof_height,
    })
}

pub fn query_consensus_state_heights<I>(
    ibc_ctx: &I,
    request: &QueryConsensusStateHeightsRequest,
) -> Result<QueryConsensusStateHeightsResponse, QueryError>
where
    I: QueryContext,
{
    let client_id = ClientId::from_str(&request.client_id)?;

    let consensus_state_heights = ibc_ctx
        .consensus_state_heights(&client_id)?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(QueryConsensusStateHeightsResponse {
        consensus_state_heights,
        pagination: None,
    })
}

/// Reports whether the client is `ACTIVE`, `FROZEN` or `EXPIRED`.
pub fn query_client_status<I>(
    ibc_ctx: &I,
    request: &QueryClientStatusRequest,
) -> Result<QueryClientStatusResponse, QueryError>
where
    I: ValidationContext,
{
    let client_id = ClientId::from_str(&request.client_id)?;
    let client_val_ctx = ibc_ctx.get_client_validation_context();

    let status = client_val_ctx
        .client_state(&client_id)?
        .status(client_val_ctx, &client_id)?;

    Ok(QueryClientStatusResponse {
        status: status.to_string(),
    })
}
