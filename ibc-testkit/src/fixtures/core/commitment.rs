use ibc_core::commitment_types::commitment::CommitmentProofBytes;
use ibc_core::commitment_types::proto::ics23::CommitmentProof;
use ibc_core::commitment_types::proto::v1::MerkleProof as RawMerkleProof;
use ibc_core::primitives::prelude::*;
use prost::Message;

/// Returns a well-formed `CommitmentProofBytes` that proves nothing, for
/// testing purposes only!
pub fn dummy_commitment_proof_bytes() -> CommitmentProofBytes {
    let raw_mp = RawMerkleProof {
        proofs: vec![CommitmentProof { proof: None }],
    };

    raw_mp
        .encode_to_vec()
        .try_into()
        .expect("could not convert to CommitmentProofBytes")
}
