use ibc_core_host_types::identifiers::{ClientId, ConnectionId};
use ibc_primitives::Signer;

use crate::connection::Counterparty;
use crate::version::Version;

pub const CONN_OPEN_INIT_TYPE_URL: &str = "/ibc.core.connection.v1.MsgConnectionOpenInit";

/// Per our convention, this message is sent to chain A.
///
/// Without an explicit `version` the new end proposes every version the host
/// supports.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgConnectionOpenInit {
    /// identifier of the new connection end on chain A
    pub conn_id_on_a: ConnectionId,
    /// the client identifier tracking chain B on chain A
    pub client_id_on_a: ClientId,
    pub counterparty: Counterparty,
    pub version: Option<Version>,
    pub signer: Signer,
}
