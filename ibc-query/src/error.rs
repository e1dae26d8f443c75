use alloc::string::{String, ToString};

use derive_more::From;
use displaydoc::Display;
use ibc_core::channel::types::error::{ChannelError, PacketError};
use ibc_core::client::types::error::ClientError;
use ibc_core::connection::types::error::ConnectionError;
use ibc_core::handler::types::error::ContextError;
use ibc_core::host::types::error::{DecodingError, HostError, IdentifierError};

/// Errors surfaced while answering a query.
#[derive(Debug, Display, From)]
pub enum QueryError {
    /// context error: `{0}`
    Context(ContextError),
    /// decoding error: `{0}`
    Decoding(DecodingError),
    /// proof not found: `{0}`
    #[from(ignore)]
    ProofNotFound(String),
    /// invalid pagination: `{0}`
    #[from(ignore)]
    InvalidPagination(String),
}

impl QueryError {
    pub fn proof_not_found<T: ToString>(description: T) -> Self {
        Self::ProofNotFound(description.to_string())
    }

    pub fn invalid_pagination<T: ToString>(description: T) -> Self {
        Self::InvalidPagination(description.to_string())
    }
}

impl From<IdentifierError> for QueryError {
    fn from(e: IdentifierError) -> Self {
        Self::Decoding(DecodingError::InvalidIdentifier(e.to_string()))
    }
}

impl From<ClientError> for QueryError {
    fn from(e: ClientError) -> Self {
        Self::Context(e.into())
    }
}

impl From<ConnectionError> for QueryError {
    fn from(e: ConnectionError) -> Self {
        Self::Context(e.into())
    }
}

impl From<ChannelError> for QueryError {
    fn from(e: ChannelError) -> Self {
        Self::Context(e.into())
    }
}

impl From<PacketError> for QueryError {
    fn from(e: PacketError) -> Self {
        Self::Context(e.into())
    }
}

impl From<HostError> for QueryError {
    fn from(e: HostError) -> Self {
        Self::Context(e.into())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Context(e) => Some(e),
            Self::Decoding(e) => Some(e),
            Self::ProofNotFound(_) | Self::InvalidPagination(_) => None,
        }
    }
}
