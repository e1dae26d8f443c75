use ibc_core_client_types::Height;
use ibc_core_commitment_types::commitment::CommitmentProofBytes;
use ibc_core_host_types::identifiers::ConnectionId;
use ibc_primitives::Signer;

use crate::version::Version;

pub const CONN_OPEN_ACK_TYPE_URL: &str = "/ibc.core.connection.v1.MsgConnectionOpenAck";

/// Per our convention, this message is sent to chain A.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgConnectionOpenAck {
    pub conn_id_on_a: ConnectionId,
    pub conn_id_on_b: ConnectionId,
    /// proof of chain B's connection end in `TRYOPEN`
    pub proof_conn_end_on_b: CommitmentProofBytes,
    pub proof_consensus_state_of_a_on_b: CommitmentProofBytes,
    pub proofs_height_on_b: Height,
    pub consensus_height_of_a_on_b: Height,
    /// the version chain B picked
    pub version: Version,
    pub signer: Signer,
}
