//! Error taxonomy shared by all IBC core modules, plus the errors raised by
//! host implementations and identifier parsing.

use displaydoc::Display;
use ibc_primitives::prelude::*;
pub use ibc_primitives::DecodingError;

/// The coarse category of a protocol error.
///
/// Every module-level error maps onto exactly one kind, which is what callers
/// (relayers, hosts, tests) branch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum ErrorKind {
    /// not found
    NotFound,
    /// already exists
    AlreadyExists,
    /// invalid state
    InvalidState,
    /// invalid proof
    InvalidProof,
    /// invalid packet
    InvalidPacket,
    /// timeout
    Timeout,
    /// unauthorized
    Unauthorized,
    /// version mismatch
    VersionMismatch,
    /// invalid input
    InvalidInput,
    /// internal
    Internal,
}

/// A stable numeric error code, namespaced by the module that raised it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ErrorCode {
    pub codespace: &'static str,
    pub code: u32,
}

impl ErrorCode {
    pub const fn new(codespace: &'static str, code: u32) -> Self {
        Self { codespace, code }
    }
}

impl core::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{}", self.codespace, self.code)
    }
}

/// Errors that originate from host implementations.
#[derive(Debug, Display, PartialEq, Eq)]
pub enum HostError {
    /// invalid state: `{description}`
    InvalidState { description: String },
    /// missing state: `{description}`
    MissingState { description: String },
    /// failed to store data: `{description}`
    FailedToStore { description: String },
    /// failed to retrieve data from store: `{description}`
    FailedToRetrieve { description: String },
    /// failed to validate signer: `{description}`
    InvalidSigner { description: String },
    /// other error: `{description}`
    Other { description: String },
}

impl HostError {
    pub fn invalid_state<T: ToString>(description: T) -> Self {
        Self::InvalidState {
            description: description.to_string(),
        }
    }

    pub fn missing_state<T: ToString>(description: T) -> Self {
        Self::MissingState {
            description: description.to_string(),
        }
    }

    pub fn failed_to_store<T: ToString>(description: T) -> Self {
        Self::FailedToStore {
            description: description.to_string(),
        }
    }

    pub fn failed_to_retrieve<T: ToString>(description: T) -> Self {
        Self::FailedToRetrieve {
            description: description.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::MissingState { .. } => ErrorKind::NotFound,
            Self::InvalidSigner { .. } => ErrorKind::Unauthorized,
            Self::FailedToStore { .. } | Self::FailedToRetrieve { .. } | Self::Other { .. } => {
                ErrorKind::Internal
            }
        }
    }

    pub fn code(&self) -> ErrorCode {
        let code = match self {
            Self::InvalidState { .. } => 5001,
            Self::MissingState { .. } => 5002,
            Self::FailedToStore { .. } => 5003,
            Self::FailedToRetrieve { .. } => 5004,
            Self::InvalidSigner { .. } => 5005,
            Self::Other { .. } => 5099,
        };
        ErrorCode::new("host", code)
    }
}

/// Errors that arise when parsing identifiers.
#[derive(Debug, Display, PartialEq, Eq)]
pub enum IdentifierError {
    /// identifier `{id}` has invalid length; must be between [`{min}`,`{max}`]
    InvalidLength { id: String, min: u64, max: u64 },
    /// identifier `{id}` can only contain alphanumeric characters or `.`, `_`, `+`, `-`, `#`, `[`, `]`, `<`, `>`
    InvalidCharacter { id: String },
    /// failed to parse `{value}` as a sequence: `{description}`
    InvalidSequence { value: String, description: String },
}

impl IdentifierError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidInput
    }
}

#[cfg(feature = "std")]
impl std::error::Error for IdentifierError {}

#[cfg(feature = "std")]
impl std::error::Error for HostError {}
