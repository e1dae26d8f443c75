//! Defines the commitment error type

use displaydoc::Display;
use ibc_core_host_types::error::ErrorKind;
use ibc_primitives::prelude::*;

#[derive(Debug, Display)]
pub enum CommitmentError {
    /// empty commitment prefix
    EmptyCommitmentPrefix,
    /// empty merkle proof
    EmptyMerkleProof,
    /// empty merkle root
    EmptyMerkleRoot,
    /// empty verified value
    EmptyVerifiedValue,
    /// empty proof specs
    EmptyProofSpecs,
    /// invalid depth range: [{0}, {1}]
    InvalidDepthRange(i32, i32),
    /// mismatch between the number of proofs with that of specs
    NumberOfSpecsMismatch,
    /// mismatch between the number of proofs with that of keys
    NumberOfKeysMismatch,
    /// invalid merkle proof
    InvalidMerkleProof,
    /// proof verification failed
    VerificationFailure,
    /// decoding commitment proof bytes failed: `{0}`
    DecodingFailure(String),
}

impl CommitmentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyCommitmentPrefix
            | Self::EmptyProofSpecs
            | Self::InvalidDepthRange(..)
            | Self::DecodingFailure(_) => ErrorKind::InvalidInput,
            _ => ErrorKind::InvalidProof,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CommitmentError {}
