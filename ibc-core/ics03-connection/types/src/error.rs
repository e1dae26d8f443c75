//! Defines the connection error type

use displaydoc::Display;
use ibc_core_client_types::error::ClientError;
use ibc_core_client_types::Height;
use ibc_core_host_types::error::{DecodingError, ErrorCode, ErrorKind, HostError, IdentifierError};
use ibc_core_host_types::identifiers::ConnectionId;
use ibc_primitives::prelude::*;

use crate::version::Version;

const CODESPACE: &str = "connection";

#[derive(Debug, Display, derive_more::From)]
pub enum ConnectionError {
    /// no connection was found for the connection id `{connection_id}`
    #[from(ignore)]
    ConnectionNotFound { connection_id: ConnectionId },
    /// connection `{connection_id}` already exists and has progressed past INIT
    #[from(ignore)]
    ConnectionAlreadyExists { connection_id: ConnectionId },
    /// connection `{connection_id}` already exists in INIT
    #[from(ignore)]
    ConnectionMismatch { connection_id: ConnectionId },
    /// mismatched connection states: expected `{expected}`, actual `{actual}`
    #[from(ignore)]
    MismatchedConnectionStates { expected: String, actual: String },
    /// invalid connection state value `{value}`; must be one of 0, 1, 2, 3
    #[from(ignore)]
    InvalidStateValue { value: i32 },
    /// no common version
    #[from(ignore)]
    NoCommonVersion,
    /// version \"`{version}`\" not supported
    #[from(ignore)]
    VersionNotSupported { version: Version },
    /// feature \"`{feature}`\" not supported
    #[from(ignore)]
    FeatureNotSupported { feature: String },
    /// empty supported versions
    #[from(ignore)]
    EmptyVersions,
    /// empty supported features
    #[from(ignore)]
    EmptyFeatures,
    /// a negotiated connection must carry exactly one version, found `{actual}`
    #[from(ignore)]
    InvalidVersionLength { actual: usize },
    /// invalid counterparty: `{description}`
    #[from(ignore)]
    InvalidCounterparty { description: String },
    /// failed to verify the counterparty connection end: `{0}`
    #[from(ignore)]
    FailedToVerifyConnectionState(ClientError),
    /// failed to verify the host's consensus state stored on the counterparty: `{0}`
    #[from(ignore)]
    FailedToVerifyConsensusState(ClientError),
    /// consensus height claimed by the counterparty is too advanced: `{target_height}` (host chain current height: `{current_height}`)
    #[from(ignore)]
    InvalidConsensusHeight {
        target_height: Height,
        current_height: Height,
    },
    /// client error: `{0}`
    Client(ClientError),
    /// identifier error: `{0}`
    Identifier(IdentifierError),
    /// decoding error: `{0}`
    Decoding(DecodingError),
    /// host error: `{0}`
    Host(HostError),
}

impl ConnectionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConnectionNotFound { .. } => ErrorKind::NotFound,
            Self::ConnectionMismatch { .. } => ErrorKind::AlreadyExists,
            Self::ConnectionAlreadyExists { .. } | Self::MismatchedConnectionStates { .. } => {
                ErrorKind::InvalidState
            }
            Self::NoCommonVersion
            | Self::VersionNotSupported { .. }
            | Self::FeatureNotSupported { .. } => ErrorKind::VersionMismatch,
            Self::FailedToVerifyConnectionState(_) | Self::FailedToVerifyConsensusState(_) => {
                ErrorKind::InvalidProof
            }
            Self::InvalidStateValue { .. }
            | Self::EmptyVersions
            | Self::EmptyFeatures
            | Self::InvalidVersionLength { .. }
            | Self::InvalidCounterparty { .. }
            | Self::InvalidConsensusHeight { .. }
            | Self::Identifier(_)
            | Self::Decoding(_) => ErrorKind::InvalidInput,
            Self::Client(e) => e.kind(),
            Self::Host(e) => e.kind(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        let code = match self {
            Self::ConnectionNotFound { .. } => 2001,
            Self::ConnectionAlreadyExists { .. } => 2002,
            Self::ConnectionMismatch { .. } => 2003,
            Self::MismatchedConnectionStates { .. } => 2004,
            Self::InvalidStateValue { .. } => 2005,
            Self::NoCommonVersion => 2006,
            Self::VersionNotSupported { .. } => 2007,
            Self::FeatureNotSupported { .. } => 2008,
            Self::EmptyVersions => 2009,
            Self::EmptyFeatures => 2010,
            Self::InvalidVersionLength { .. } => 2011,
            Self::InvalidCounterparty { .. } => 2012,
            Self::FailedToVerifyConnectionState(_) => 2013,
            Self::FailedToVerifyConsensusState(_) => 2014,
            Self::InvalidConsensusHeight { .. } => 2015,
            Self::Identifier(_) => 2017,
            Self::Decoding(_) => 2018,
            Self::Client(e) => return e.code(),
            Self::Host(e) => return e.code(),
        };
        ErrorCode::new(CODESPACE, code)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConnectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Client(e)
            | Self::FailedToVerifyConnectionState(e)
            | Self::FailedToVerifyConsensusState(e) => Some(e),
            Self::Identifier(e) => Some(e),
            Self::Decoding(e) => Some(e),
            Self::Host(e) => Some(e),
            _ => None,
        }
    }
}
