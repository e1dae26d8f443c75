use ibc_core_client_types::Height;
use ibc_core_commitment_types::commitment::CommitmentProofBytes;
use ibc_core_host_types::identifiers::{ClientId, ConnectionId};
use ibc_primitives::prelude::*;
use ibc_primitives::Signer;

use crate::connection::Counterparty;
use crate::version::Version;

pub const CONN_OPEN_TRY_TYPE_URL: &str = "/ibc.core.connection.v1.MsgConnectionOpenTry";

/// Per our convention, this message is sent to chain B.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgConnectionOpenTry {
    /// identifier of the connection end on chain B
    pub conn_id_on_b: ConnectionId,
    /// the client identifier tracking chain A on chain B
    pub client_id_on_b: ClientId,
    /// chain A's client, connection and prefix; the connection id is required
    pub counterparty: Counterparty,
    /// the versions proposed by chain A's `ConnOpenInit`
    pub versions_on_a: Vec<Version>,
    /// proof of chain A's connection end in `INIT`
    pub proof_conn_end_on_a: CommitmentProofBytes,
    /// proof that chain A stores chain B's consensus state at `consensus_height_of_b_on_a`
    pub proof_consensus_state_of_b_on_a: CommitmentProofBytes,
    /// height at which both proofs were taken on chain A
    pub proofs_height_on_a: Height,
    pub consensus_height_of_b_on_a: Height,
    pub signer: Signer,
}
