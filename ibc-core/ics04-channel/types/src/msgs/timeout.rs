use ibc_core_client_types::Height;
use ibc_core_commitment_types::commitment::CommitmentProofBytes;
use ibc_core_host_types::identifiers::Sequence;
use ibc_primitives::Signer;

use crate::packet::Packet;

pub const TIMEOUT_TYPE_URL: &str = "/ibc.core.channel.v1.MsgTimeout";

/// Proves on chain A that chain B reached the packet's timeout without
/// receiving it.
///
/// On ordered channels `proof_unreceived_on_b` proves chain B's
/// `nextSequenceRecv`, on unordered channels the absence of the receipt.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgTimeout {
    pub packet: Packet,
    pub next_seq_recv_on_b: Sequence,
    pub proof_unreceived_on_b: CommitmentProofBytes,
    pub proof_height_on_b: Height,
    pub signer: Signer,
}
