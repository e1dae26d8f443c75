//! Defines the channel and packet error types

use displaydoc::Display;
use ibc_core_client_types::error::ClientError;
use ibc_core_client_types::Height;
use ibc_core_connection_types::error::ConnectionError;
use ibc_core_host_types::error::{DecodingError, ErrorCode, ErrorKind, HostError, IdentifierError};
use ibc_core_host_types::identifiers::{ChannelId, ConnectionId, PortId, Sequence};
use ibc_primitives::prelude::*;
use ibc_primitives::Timestamp;

use crate::channel::Order;
use crate::commitment::PacketCommitment;
use crate::timeout::{TimeoutHeight, TimeoutTimestamp};

/// Channel and packet errors share one codespace; packet codes start at 3100.
const CODESPACE: &str = "channel";

#[derive(Debug, Display, derive_more::From)]
pub enum ChannelError {
    /// no channel end found for port `{port_id}` and channel `{channel_id}`
    #[from(ignore)]
    ChannelNotFound {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// channel `{channel_id}` on port `{port_id}` already exists and has progressed past INIT
    #[from(ignore)]
    ChannelAlreadyExists {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// channel `{channel_id}` on port `{port_id}` already exists in INIT
    #[from(ignore)]
    ChannelMismatch {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// mismatched channel states: expected `{expected}`, actual `{actual}`
    #[from(ignore)]
    MismatchedChannelState { expected: String, actual: String },
    /// channel is closed
    #[from(ignore)]
    ChannelClosed,
    /// connection `{connection_id}` is not open
    #[from(ignore)]
    ConnectionNotOpen { connection_id: ConnectionId },
    /// connection `{connection_id}` has no counterparty connection id yet
    #[from(ignore)]
    MissingCounterpartyConnection { connection_id: ConnectionId },
    /// invalid connection hops length: expected `{expected}`, actual `{actual}`
    #[from(ignore)]
    InvalidConnectionHopsLength { expected: usize, actual: usize },
    /// invalid channel ordering `{value}`
    #[from(ignore)]
    InvalidOrderValue { value: String },
    /// invalid channel state value `{value}`; must be one of 0, 1, 2, 3, 4
    #[from(ignore)]
    InvalidStateValue { value: i32 },
    /// invalid counterparty: `{description}`
    #[from(ignore)]
    InvalidCounterparty { description: String },
    /// failed to verify the counterparty channel end: `{0}`
    #[from(ignore)]
    FailedChannelVerification(ClientError),
    /// the connection version does not support channel ordering `{ordering}`
    #[from(ignore)]
    UnsupportedOrdering { ordering: Order },
    /// application module error: `{description}`
    #[from(ignore)]
    AppModule { description: String },
    /// connection error: `{0}`
    Connection(ConnectionError),
    /// client error: `{0}`
    Client(ClientError),
    /// identifier error: `{0}`
    Identifier(IdentifierError),
    /// decoding error: `{0}`
    Decoding(DecodingError),
    /// host error: `{0}`
    Host(HostError),
}

impl ChannelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ChannelNotFound { .. } => ErrorKind::NotFound,
            Self::ChannelMismatch { .. } => ErrorKind::AlreadyExists,
            Self::ChannelAlreadyExists { .. }
            | Self::MismatchedChannelState { .. }
            | Self::ChannelClosed
            | Self::ConnectionNotOpen { .. }
            | Self::MissingCounterpartyConnection { .. } => ErrorKind::InvalidState,
            Self::InvalidConnectionHopsLength { .. }
            | Self::InvalidOrderValue { .. }
            | Self::InvalidStateValue { .. }
            | Self::InvalidCounterparty { .. }
            | Self::Identifier(_)
            | Self::Decoding(_) => ErrorKind::InvalidInput,
            Self::FailedChannelVerification(_) => ErrorKind::InvalidProof,
            Self::UnsupportedOrdering { .. } => ErrorKind::VersionMismatch,
            Self::AppModule { .. } => ErrorKind::Unauthorized,
            Self::Connection(e) => e.kind(),
            Self::Client(e) => e.kind(),
            Self::Host(e) => e.kind(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        let code = match self {
            Self::ChannelNotFound { .. } => 3001,
            Self::ChannelAlreadyExists { .. } => 3002,
            Self::ChannelMismatch { .. } => 3003,
            Self::MismatchedChannelState { .. } => 3004,
            Self::ChannelClosed => 3005,
            Self::ConnectionNotOpen { .. } => 3006,
            Self::InvalidConnectionHopsLength { .. } => 3007,
            Self::InvalidOrderValue { .. } => 3008,
            Self::InvalidStateValue { .. } => 3009,
            Self::InvalidCounterparty { .. } => 3010,
            Self::FailedChannelVerification(_) => 3011,
            Self::UnsupportedOrdering { .. } => 3012,
            Self::AppModule { .. } => 3013,
            Self::Identifier(_) => 3016,
            Self::Decoding(_) => 3018,
            Self::MissingCounterpartyConnection { .. } => 3019,
            Self::Connection(e) => return e.code(),
            Self::Client(e) => return e.code(),
            Self::Host(e) => return e.code(),
        };
        ErrorCode::new(CODESPACE, code)
    }
}

#[derive(Debug, Display, derive_more::From)]
pub enum PacketError {
    /// no packet commitment found for sequence `{sequence}`
    #[from(ignore)]
    PacketCommitmentNotFound { sequence: Sequence },
    /// mismatched commitments for packet `{sequence}`: expected `{expected:?}`, actual `{actual:?}`
    #[from(ignore)]
    MismatchedPacketCommitment {
        sequence: Sequence,
        expected: PacketCommitment,
        actual: PacketCommitment,
    },
    /// packet `{sequence}` has already been received
    #[from(ignore)]
    PacketAlreadyReceived { sequence: Sequence },
    /// mismatched packet sequence: expected `{expected}`, actual `{actual}`
    #[from(ignore)]
    InvalidPacketSequence {
        expected: Sequence,
        actual: Sequence,
    },
    /// packet endpoint `{port_id}/{channel_id}` does not match the channel counterparty
    #[from(ignore)]
    MismatchedPacketCounterparty {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// packet has neither a timeout height nor a timeout timestamp
    #[from(ignore)]
    MissingTimeout,
    /// packet timeout height `{timeout_height}` has passed at height `{chain_height}`
    #[from(ignore)]
    TimeoutHeightExpired {
        timeout_height: TimeoutHeight,
        chain_height: Height,
    },
    /// packet timeout timestamp `{timeout_timestamp}` has passed at `{chain_timestamp}`
    #[from(ignore)]
    TimeoutTimestampExpired {
        timeout_timestamp: TimeoutTimestamp,
        chain_timestamp: Timestamp,
    },
    /// packet timeout height `{timeout_height}` not reached at proof height `{proof_height}`
    #[from(ignore)]
    TimeoutHeightNotReached {
        timeout_height: TimeoutHeight,
        proof_height: Height,
    },
    /// packet timeout timestamp `{timeout_timestamp}` not reached at `{proof_timestamp}`
    #[from(ignore)]
    TimeoutTimestampNotReached {
        timeout_timestamp: TimeoutTimestamp,
        proof_timestamp: Timestamp,
    },
    /// acknowledgement for packet `{sequence}` already exists
    #[from(ignore)]
    AcknowledgementExists { sequence: Sequence },
    /// empty acknowledgement is only allowed on ordered channels
    #[from(ignore)]
    EmptyAcknowledgement,
    /// packet `{sequence}` has not been received
    #[from(ignore)]
    PacketNotReceived { sequence: Sequence },
    /// packet data bytes cannot be empty
    #[from(ignore)]
    EmptyPacketData,
    /// packet `{sequence}` was already received by the counterparty; its next receive sequence is `{next_seq_recv_on_b}`
    #[from(ignore)]
    InvalidNextSequenceRecv {
        sequence: Sequence,
        next_seq_recv_on_b: Sequence,
    },
    /// failed packet proof verification: `{0}`
    #[from(ignore)]
    FailedProofVerification(ClientError),
    /// packet sequence cannot be 0
    #[from(ignore)]
    ZeroSequence,
    /// application module error: `{description}`
    #[from(ignore)]
    AppModule { description: String },
    /// channel error: `{0}`
    Channel(ChannelError),
    /// identifier error: `{0}`
    Identifier(IdentifierError),
    /// decoding error: `{0}`
    Decoding(DecodingError),
    /// host error: `{0}`
    Host(HostError),
}

impl PacketError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PacketCommitmentNotFound { .. } => ErrorKind::NotFound,
            Self::AcknowledgementExists { .. } => ErrorKind::AlreadyExists,
            Self::PacketAlreadyReceived { .. } | Self::PacketNotReceived { .. } => {
                ErrorKind::InvalidState
            }
            Self::MismatchedPacketCommitment { .. }
            | Self::InvalidPacketSequence { .. }
            | Self::MismatchedPacketCounterparty { .. }
            | Self::MissingTimeout
            | Self::EmptyAcknowledgement
            | Self::EmptyPacketData
            | Self::InvalidNextSequenceRecv { .. }
            | Self::ZeroSequence => ErrorKind::InvalidPacket,
            Self::TimeoutHeightExpired { .. }
            | Self::TimeoutTimestampExpired { .. }
            | Self::TimeoutHeightNotReached { .. }
            | Self::TimeoutTimestampNotReached { .. } => ErrorKind::Timeout,
            Self::FailedProofVerification(_) => ErrorKind::InvalidProof,
            Self::AppModule { .. } => ErrorKind::Unauthorized,
            Self::Identifier(_) | Self::Decoding(_) => ErrorKind::InvalidInput,
            Self::Channel(e) => e.kind(),
            Self::Host(e) => e.kind(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        let code = match self {
            Self::PacketCommitmentNotFound { .. } => 3101,
            Self::MismatchedPacketCommitment { .. } => 3102,
            Self::PacketAlreadyReceived { .. } => 3103,
            Self::InvalidPacketSequence { .. } => 3104,
            Self::MismatchedPacketCounterparty { .. } => 3105,
            Self::MissingTimeout => 3106,
            Self::TimeoutHeightExpired { .. } => 3107,
            Self::TimeoutTimestampExpired { .. } => 3108,
            Self::TimeoutHeightNotReached { .. } => 3109,
            Self::TimeoutTimestampNotReached { .. } => 3110,
            Self::AcknowledgementExists { .. } => 3111,
            Self::EmptyAcknowledgement => 3112,
            Self::PacketNotReceived { .. } => 3113,
            Self::EmptyPacketData => 3114,
            Self::InvalidNextSequenceRecv { .. } => 3115,
            Self::FailedProofVerification(_) => 3116,
            Self::ZeroSequence => 3117,
            Self::Identifier(_) => 3119,
            Self::AppModule { .. } => 3120,
            Self::Decoding(_) => 3121,
            Self::Channel(e) => return e.code(),
            Self::Host(e) => return e.code(),
        };
        ErrorCode::new(CODESPACE, code)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ChannelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::FailedChannelVerification(e) | Self::Client(e) => Some(e),
            Self::Connection(e) => Some(e),
            Self::Identifier(e) => Some(e),
            Self::Decoding(e) => Some(e),
            Self::Host(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PacketError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::FailedProofVerification(e) => Some(e),
            Self::Channel(e) => Some(e),
            Self::Identifier(e) => Some(e),
            Self::Decoding(e) => Some(e),
            Self::Host(e) => Some(e),
            _ => None,
        }
    }
}
