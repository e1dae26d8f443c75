//! Defines the trait to be implemented by all concrete consensus state types

use ibc_core_commitment_types::commitment::CommitmentRoot;
use ibc_primitives::prelude::*;
use ibc_primitives::Timestamp;

/// A pruned header: the part of a counterparty header a client keeps to
/// verify proofs at that height.
pub trait ConsensusState: Send + Sync {
    /// Commitment root of the consensus state, which is used for key-value pair verification.
    fn root(&self) -> &CommitmentRoot;

    /// The timestamp of the consensus state
    fn timestamp(&self) -> Timestamp;

    /// Serializes the `ConsensusState` into its `Any`-wrapped protobuf
    /// encoding, as stored by the counterparty.
    fn encode_vec(self) -> Vec<u8>;
}
