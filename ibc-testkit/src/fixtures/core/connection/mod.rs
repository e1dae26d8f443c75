use ibc_core::commitment_types::commitment::CommitmentPrefix;
use ibc_core::connection::types::version::Version as ConnectionVersion;
use ibc_core::connection::types::{ConnectionEnd, Counterparty, State};
use ibc_core::host::types::identifiers::{ClientId, ConnectionId};
use ibc_core::primitives::prelude::*;

use crate::testapp::ibc::core::types::DEFAULT_COMMITMENT_PREFIX;

pub fn dummy_commitment_prefix() -> CommitmentPrefix {
    CommitmentPrefix::try_from(DEFAULT_COMMITMENT_PREFIX.as_bytes().to_vec())
        .expect("Never fails")
}

/// Returns a dummy `ConnectionEnd` over `client_id`, for testing purposes
/// only! The counterparty is `remote_client_id`, with `remote_connection_id`
/// once the handshake got that far.
pub fn dummy_connection_end(
    state: State,
    client_id: ClientId,
    remote_client_id: ClientId,
    remote_connection_id: Option<ConnectionId>,
) -> ConnectionEnd {
    ConnectionEnd::new(
        state,
        client_id,
        Counterparty::new(remote_client_id, remote_connection_id, dummy_commitment_prefix()),
        ConnectionVersion::compatibles(),
    )
    .expect("Never fails")
}
