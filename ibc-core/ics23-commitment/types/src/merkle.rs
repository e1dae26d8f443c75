//! Merkle proof utilities

use ibc_primitives::prelude::*;
use ibc_primitives::proto::Protobuf;
use ibc_proto::ibc::core::commitment::v1::{MerklePath, MerkleProof as RawMerkleProof, MerkleRoot};
use ibc_proto::ics23::commitment_proof::Proof;
use ibc_proto::ics23::{
    calculate_existence_root, verify_membership, verify_non_membership, CommitmentProof,
    HostFunctionsProvider, NonExistenceProof,
};

use crate::commitment::{CommitmentPrefix, CommitmentRoot};
use crate::error::CommitmentError;
use crate::specs::ProofSpecs;

/// Builds the root-to-leaf key path `[prefix, path...]`.
pub fn apply_prefix(prefix: &CommitmentPrefix, mut path: Vec<String>) -> MerklePath {
    let mut key_path: Vec<String> = vec![format!("{prefix:?}")];
    key_path.append(&mut path);
    MerklePath { key_path }
}

impl From<CommitmentRoot> for MerkleRoot {
    fn from(root: CommitmentRoot) -> Self {
        Self {
            hash: root.into_vec(),
        }
    }
}

/// A chain of ICS-23 proofs, innermost store first. Each proof's root is the
/// value proven by the next one.
#[derive(Clone, Debug, PartialEq)]
pub struct MerkleProof {
    pub proofs: Vec<CommitmentProof>,
}

impl Protobuf<RawMerkleProof> for MerkleProof {}

impl TryFrom<RawMerkleProof> for MerkleProof {
    type Error = CommitmentError;

    fn try_from(proof: RawMerkleProof) -> Result<Self, Self::Error> {
        Ok(Self {
            proofs: proof.proofs,
        })
    }
}

impl From<MerkleProof> for RawMerkleProof {
    fn from(proof: MerkleProof) -> Self {
        Self {
            proofs: proof.proofs,
        }
    }
}

impl MerkleProof {
    fn check_arguments(
        &self,
        specs: &ProofSpecs,
        root: &MerkleRoot,
        keys: &MerklePath,
    ) -> Result<(), CommitmentError> {
        if self.proofs.is_empty() {
            return Err(CommitmentError::EmptyMerkleProof);
        }
        if root.hash.is_empty() {
            return Err(CommitmentError::EmptyMerkleRoot);
        }
        if specs.len() != self.proofs.len() {
            return Err(CommitmentError::NumberOfSpecsMismatch);
        }
        if keys.key_path.len() != self.proofs.len() {
            return Err(CommitmentError::NumberOfKeysMismatch);
        }
        Ok(())
    }

    /// Checks that `value` is stored under `keys` in the tree committed to
    /// by `root`. Proofs before `start_index` are skipped; `value` is then the
    /// already computed sub-root.
    pub fn verify_membership<H: HostFunctionsProvider>(
        &self,
        specs: &ProofSpecs,
        root: MerkleRoot,
        keys: MerklePath,
        value: Vec<u8>,
        start_index: usize,
    ) -> Result<(), CommitmentError> {
        self.check_arguments(specs, &root, &keys)?;
        if value.is_empty() {
            return Err(CommitmentError::EmptyVerifiedValue);
        }

        let mut subroot = value.clone();
        let mut value = value;
        // keys are represented from root-to-leaf
        for ((proof, spec), key) in self
            .proofs
            .iter()
            .zip(specs.iter())
            .zip(keys.key_path.iter().rev())
            .skip(start_index)
        {
            match &proof.proof {
                Some(Proof::Exist(existence_proof)) => {
                    subroot = calculate_existence_root::<H>(existence_proof)
                        .map_err(|_| CommitmentError::InvalidMerkleProof)?;

                    if !verify_membership::<H>(proof, spec, &subroot, key.as_bytes(), &value) {
                        return Err(CommitmentError::VerificationFailure);
                    }
                    value.clone_from(&subroot);
                }
                _ => return Err(CommitmentError::InvalidMerkleProof),
            }
        }

        if root.hash != subroot {
            return Err(CommitmentError::VerificationFailure);
        }

        Ok(())
    }

    /// Checks that nothing is stored under the leaf key of `keys`: the first
    /// proof is a non-existence proof, the remaining ones prove the resulting
    /// sub-root up to `root`.
    pub fn verify_non_membership<H: HostFunctionsProvider>(
        &self,
        specs: &ProofSpecs,
        root: MerkleRoot,
        keys: MerklePath,
    ) -> Result<(), CommitmentError> {
        self.check_arguments(specs, &root, &keys)?;

        let proof = self
            .proofs
            .first()
            .ok_or(CommitmentError::InvalidMerkleProof)?;
        let spec = specs
            .iter()
            .next()
            .ok_or(CommitmentError::InvalidMerkleProof)?;
        let key = keys
            .key_path
            .last()
            .ok_or(CommitmentError::InvalidMerkleProof)?;

        match &proof.proof {
            Some(Proof::Nonexist(non_existence_proof)) => {
                let subroot = calculate_non_existence_root::<H>(non_existence_proof)?;

                if !verify_non_membership::<H>(proof, spec, &subroot, key.as_bytes()) {
                    return Err(CommitmentError::VerificationFailure);
                }

                self.verify_membership::<H>(specs, root, keys, subroot, 1)
            }
            _ => Err(CommitmentError::InvalidMerkleProof),
        }
    }
}

fn calculate_non_existence_root<H: HostFunctionsProvider>(
    proof: &NonExistenceProof,
) -> Result<Vec<u8>, CommitmentError> {
    let neighbour = proof
        .left
        .as_ref()
        .or(proof.right.as_ref())
        .ok_or(CommitmentError::InvalidMerkleProof)?;
    calculate_existence_root::<H>(neighbour).map_err(|_| CommitmentError::InvalidMerkleProof)
}
