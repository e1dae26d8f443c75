use ics23::{CommitmentProof, HostFunctionsManager, ProofSpec};

use crate::merkle::Hash;

/// The ICS-23 proof format of [`MerkleTree`](super::MerkleTree) proofs.
pub fn proof_spec() -> ProofSpec {
    ics23::tendermint_spec()
}

pub fn verify_membership(root: &Hash, proof: &CommitmentProof, key: &[u8], value: &[u8]) -> bool {
    ics23::verify_membership::<HostFunctionsManager>(proof, &proof_spec(), &root.to_vec(), key, value)
}

pub fn verify_non_membership(root: &Hash, proof: &CommitmentProof, key: &[u8]) -> bool {
    ics23::verify_non_membership::<HostFunctionsManager>(proof, &proof_spec(), &root.to_vec(), key)
}
