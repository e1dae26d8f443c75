//! Defines the context error type

use derive_more::From;
use displaydoc::Display;
use ibc_core_channel_types::error::{ChannelError, PacketError};
use ibc_core_client_types::error::ClientError;
use ibc_core_connection_types::error::ConnectionError;
use ibc_core_host_types::error::{ErrorCode, ErrorKind, HostError};
use ibc_core_router_types::error::RouterError;
use ibc_primitives::prelude::*;

/// Top-level error returned by the handlers and by the host contexts.
#[derive(Debug, Display, From)]
pub enum ContextError {
    /// ICS02 Client error: {0}
    ClientError(ClientError),
    /// ICS03 Connection error: {0}
    ConnectionError(ConnectionError),
    /// ICS04 Channel error: {0}
    ChannelError(ChannelError),
    /// ICS04 Packet error: {0}
    PacketError(PacketError),
    /// ICS26 Routing error: {0}
    RouterError(RouterError),
    /// Host error: {0}
    HostError(HostError),
}

impl ContextError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ClientError(e) => e.kind(),
            Self::ConnectionError(e) => e.kind(),
            Self::ChannelError(e) => e.kind(),
            Self::PacketError(e) => e.kind(),
            Self::RouterError(e) => e.kind(),
            Self::HostError(e) => e.kind(),
        }
    }

    /// The code of the innermost error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ClientError(e) => e.code(),
            Self::ConnectionError(e) => e.code(),
            Self::ChannelError(e) => e.code(),
            Self::PacketError(e) => e.code(),
            Self::RouterError(e) => e.code(),
            Self::HostError(e) => e.code(),
        }
    }
}

impl From<ContextError> for ClientError {
    fn from(context_error: ContextError) -> Self {
        match context_error {
            ContextError::ClientError(e) => e,
            ContextError::HostError(e) => ClientError::Host(e),
            _ => ClientError::Other {
                description: context_error.to_string(),
            },
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ClientError(e) => Some(e),
            Self::ConnectionError(e) => Some(e),
            Self::ChannelError(e) => Some(e),
            Self::PacketError(e) => Some(e),
            Self::RouterError(e) => Some(e),
            Self::HostError(e) => Some(e),
        }
    }
}
