//! Defines proof specs, which encode the structure of proofs

use ibc_primitives::prelude::*;
use ibc_proto::ics23::ProofSpec as RawProofSpec;

use crate::error::CommitmentError;

/// The ordered list of proof specs a multi-level proof is checked against,
/// from the innermost store outwards.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ProofSpecs(Vec<RawProofSpec>);

impl ProofSpecs {
    /// Specs for a chain committing its IBC sub-store root into its
    /// application root, both as simple sorted Merkle trees.
    pub fn ibc_store() -> Self {
        Self(vec![ics23::tendermint_spec(), ics23::tendermint_spec()])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawProofSpec> {
        self.0.iter()
    }

    pub fn validate(&self) -> Result<(), CommitmentError> {
        if self.is_empty() {
            return Err(CommitmentError::EmptyProofSpecs);
        }
        // non-positive depths mean "no bound"
        for spec in &self.0 {
            if 0 < spec.min_depth && 0 < spec.max_depth && spec.max_depth < spec.min_depth {
                return Err(CommitmentError::InvalidDepthRange(
                    spec.min_depth,
                    spec.max_depth,
                ));
            }
        }
        Ok(())
    }
}

impl TryFrom<Vec<RawProofSpec>> for ProofSpecs {
    type Error = CommitmentError;

    fn try_from(specs: Vec<RawProofSpec>) -> Result<Self, CommitmentError> {
        let specs = Self(specs);
        specs.validate()?;
        Ok(specs)
    }
}

impl From<ProofSpecs> for Vec<RawProofSpec> {
    fn from(specs: ProofSpecs) -> Self {
        specs.0
    }
}
