//! Connection end queries.

use alloc::string::ToString;
use core::str::FromStr;

use ibc_core::client::context::prelude::*;
use ibc_core::host::types::identifiers::{ClientId, ConnectionId};
use ibc_core::host::types::path::{ClientConnectionPath, ClientStatePath, ConnectionPath};
use ibc_core::host::{ClientStateRef, ValidationContext};
use ibc_core::primitives::proto::Any;
use ibc_proto::ibc::core::client::v1::IdentifiedClientState;
use ibc_proto::ibc::core::connection::v1::{
    QueryClientConnectionsRequest, QueryClientConnectionsResponse,
    QueryConnectionClientStateRequest, QueryConnectionClientStateResponse, QueryConnectionRequest,
    QueryConnectionResponse, QueryConnectionsRequest, QueryConnectionsResponse,
};

use crate::core::context::{ProvableContext, QueryContext};
use crate::core::proof::prove_at_host_height;
use crate::error::QueryError;

pub fn query_connection<I>(
    ibc_ctx: &I,
    request: &QueryConnectionRequest,
) -> Result<QueryConnectionResponse, QueryError>
where
    I: ValidationContext + ProvableContext,
{
    let connection_id = ConnectionId::from_str(&request.connection_id)?;

    let connection_end = ibc_ctx.connection_end(&connection_id)?;

    let (proof, proof_height) =
        prove_at_host_height(ibc_ctx, ConnectionPath::new(&connection_id))?;

    Ok(QueryConnectionResponse {
        connection: Some(connection_end.into()),
        proof,
        proof_height,
    })
}

pub fn query_connections<I>(
    ibc_ctx: &I,
    _request: &QueryConnectionsRequest,
) -> Result<QueryConnectionsResponse, QueryError>
where
    I: QueryContext,
{
    let connections = ibc_ctx
        .connection_ends()?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(QueryConnectionsResponse {
        connections,
        pagination: None,
        height: Some(ibc_ctx.host_height()?.into()),
    })
}

/// Lists the connections built on a client, proven against the
/// `clients/{id}/connections` index.
pub fn query_client_connections<I>(
    ibc_ctx: &I,
    request: &QueryClientConnectionsRequest,
) -> Result<QueryClientConnectionsResponse, QueryError>
where
    I: QueryContext,
{
    let client_id = ClientId::from_str(&request.client_id)?;

    let connection_paths = ibc_ctx
        .client_connection_ends(&client_id)?
        .into_iter()
        .map(|id| id.to_string())
        .collect();

    let (proof, proof_height) =
        prove_at_host_height(ibc_ctx, ClientConnectionPath::new(client_id))?;

    Ok(QueryClientConnectionsResponse {
        connection_paths,
        proof,
        proof_height,
    })
}

/// Queries the state of the client a connection is built on.
pub fn query_connection_client_state<I>(
    ibc_ctx: &I,
    request: &QueryConnectionClientStateRequest,
) -> Result<QueryConnectionClientStateResponse, QueryError>
where
    I: ValidationContext + ProvableContext,
    ClientStateRef<I>: Into<Any>,
{
    let connection_id = ConnectionId::from_str(&request.connection_id)?;

    let client_id = ibc_ctx.connection_end(&connection_id)?.client_id().clone();
    let client_state = ibc_ctx
        .get_client_validation_context()
        .client_state(&client_id)?;

    let (proof, proof_height) =
        prove_at_host_height(ibc_ctx, ClientStatePath::new(client_id.clone()))?;

    Ok(QueryConnectionClientStateResponse {
        identified_client_state: Some(IdentifiedClientState {
            client_id: client_id.to_string(),
            client_state: Some(client_state.into()),
        }),
        proof,
        proof_height,
    })
}
