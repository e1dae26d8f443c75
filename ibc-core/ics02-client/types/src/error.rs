//! Defines the client error type

use displaydoc::Display;
use ibc_core_commitment_types::error::CommitmentError;
use ibc_core_host_types::error::{DecodingError, ErrorCode, ErrorKind, HostError, IdentifierError};
use ibc_core_host_types::identifiers::ClientId;
use ibc_primitives::prelude::*;

use crate::height::Height;
use crate::Status;

const CODESPACE: &str = "client";

/// Encodes all the possible client errors
#[derive(Debug, Display, derive_more::From)]
pub enum ClientError {
    /// client state not found: `{client_id}`
    #[from(ignore)]
    ClientStateNotFound { client_id: ClientId },
    /// consensus state not found for client `{client_id}` at height `{height}`
    #[from(ignore)]
    ConsensusStateNotFound { client_id: ClientId, height: Height },
    /// client state already exists: `{client_id}`
    #[from(ignore)]
    ClientStateAlreadyExists { client_id: ClientId },
    /// client is not active; status is `{status}`
    #[from(ignore)]
    InactiveClient { status: Status },
    /// invalid proof height; expected `{actual}` <= `{latest}`
    #[from(ignore)]
    InvalidProofHeight { actual: Height, latest: Height },
    /// invalid header: `{description}`
    #[from(ignore)]
    InvalidHeader { description: String },
    /// invalid client state: `{description}`
    #[from(ignore)]
    InvalidClientState { description: String },
    /// invalid consensus state: `{description}`
    #[from(ignore)]
    InvalidConsensusState { description: String },
    /// unknown client state type: `{0}`
    #[from(ignore)]
    UnknownClientStateType(String),
    /// unknown consensus state type: `{0}`
    #[from(ignore)]
    UnknownConsensusStateType(String),
    /// unknown header type: `{0}`
    #[from(ignore)]
    UnknownHeaderType(String),
    /// invalid height; cannot be zero
    #[from(ignore)]
    InvalidHeight,
    /// missing local consensus state at `{height}`
    #[from(ignore)]
    MissingLocalConsensusState { height: Height },
    /// failed ICS23 verification: `{0}`
    FailedICS23Verification(CommitmentError),
    /// identifier error: `{0}`
    Identifier(IdentifierError),
    /// decoding error: `{0}`
    Decoding(DecodingError),
    /// host error: `{0}`
    Host(HostError),
    /// other error: `{description}`
    #[from(ignore)]
    Other { description: String },
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ClientStateNotFound { .. }
            | Self::ConsensusStateNotFound { .. }
            | Self::MissingLocalConsensusState { .. } => ErrorKind::NotFound,
            Self::ClientStateAlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::InactiveClient { .. } => ErrorKind::InvalidState,
            Self::InvalidProofHeight { .. } => ErrorKind::InvalidProof,
            Self::FailedICS23Verification(e) => match e.kind() {
                ErrorKind::InvalidInput => ErrorKind::InvalidInput,
                _ => ErrorKind::InvalidProof,
            },
            Self::InvalidHeader { .. }
            | Self::InvalidClientState { .. }
            | Self::InvalidConsensusState { .. }
            | Self::UnknownClientStateType(_)
            | Self::UnknownConsensusStateType(_)
            | Self::UnknownHeaderType(_)
            | Self::InvalidHeight
            | Self::Identifier(_)
            | Self::Decoding(_) => ErrorKind::InvalidInput,
            Self::Host(e) => e.kind(),
            Self::Other { .. } => ErrorKind::Internal,
        }
    }

    pub fn code(&self) -> ErrorCode {
        let code = match self {
            Self::ClientStateNotFound { .. } => 1001,
            Self::ConsensusStateNotFound { .. } => 1002,
            Self::ClientStateAlreadyExists { .. } => 1003,
            Self::InactiveClient { .. } => 1004,
            Self::InvalidProofHeight { .. } => 1005,
            Self::InvalidHeader { .. } => 1006,
            Self::InvalidClientState { .. } | Self::InvalidConsensusState { .. } => 1007,
            Self::UnknownClientStateType(_) => 1008,
            Self::UnknownConsensusStateType(_) => 1009,
            Self::UnknownHeaderType(_) => 1010,
            Self::InvalidHeight => 1011,
            Self::FailedICS23Verification(_) => 1012,
            Self::Identifier(_) => 1013,
            Self::Host(e) => return e.code(),
            Self::Decoding(_) => 1015,
            Self::MissingLocalConsensusState { .. } => 1016,
            Self::Other { .. } => 1099,
        };
        ErrorCode::new(CODESPACE, code)
    }
}

impl From<&'static str> for ClientError {
    fn from(s: &'static str) -> Self {
        Self::Other {
            description: s.to_string(),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::FailedICS23Verification(e) => Some(e),
            Self::Identifier(e) => Some(e),
            Self::Decoding(e) => Some(e),
            Self::Host(e) => Some(e),
            _ => None,
        }
    }
}
