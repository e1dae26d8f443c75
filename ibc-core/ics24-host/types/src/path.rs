//! Defines all store paths used by IBC.
//!
//! Every piece of provable IBC state lives under one of the keys below. The
//! counterparty verifies these keys prefixed with the host's commitment
//! prefix, so the rendering of each path is part of the wire protocol.
use core::str::FromStr;

use derive_more::{Display, From};
use ibc_primitives::prelude::*;

use crate::identifiers::{ChannelId, ClientId, ConnectionId, PortId, Sequence};

pub const NEXT_CLIENT_SEQUENCE: &str = "nextClientSequence";

pub const CLIENT_PREFIX: &str = "clients";
pub const CLIENT_STATE: &str = "clientState";
pub const CONSENSUS_STATE_PREFIX: &str = "consensusStates";
pub const CONNECTION_PREFIX: &str = "connections";
pub const PORT_PREFIX: &str = "ports";
pub const CHANNEL_PREFIX: &str = "channels";
pub const NEXT_SEQ_SEND: &str = "nextSequenceSend";
pub const NEXT_SEQ_RECV: &str = "nextSequenceRecv";
pub const NEXT_SEQ_ACK: &str = "nextSequenceAck";
pub const PACKET_COMMITMENT_PREFIX: &str = "packets";
pub const PACKET_ACK_PREFIX: &str = "acknowledgements";
pub const PACKET_RECEIPT_PREFIX: &str = "receipts";

/// The Path enum abstracts out the different sub-paths.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, From, Display)]
pub enum Path {
    NextClientSequence(NextClientSequencePath),
    ClientState(ClientStatePath),
    ClientConsensusState(ClientConsensusStatePath),
    ClientConnection(ClientConnectionPath),
    Connection(ConnectionPath),
    ChannelEnd(ChannelEndPath),
    SeqSend(SeqSendPath),
    SeqRecv(SeqRecvPath),
    SeqAck(SeqAckPath),
    Commitment(CommitmentPath),
    Ack(AckPath),
    Receipt(ReceiptPath),
}

impl Path {
    pub fn into_bytes(self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{NEXT_CLIENT_SEQUENCE}")]
pub struct NextClientSequencePath;

#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From)]
#[display(fmt = "{CLIENT_PREFIX}/{_0}/{CLIENT_STATE}")]
pub struct ClientStatePath(pub ClientId);

impl ClientStatePath {
    pub fn new(client_id: ClientId) -> ClientStatePath {
        ClientStatePath(client_id)
    }

    /// Returns the store prefix under which all client states live: "clients".
    pub fn prefix() -> String {
        CLIENT_PREFIX.to_string()
    }
}

/// `clients/{client_id}/consensusStates/{height}`, with the height rendered
/// in decimal.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{CLIENT_PREFIX}/{client_id}/{CONSENSUS_STATE_PREFIX}/{height}")]
pub struct ClientConsensusStatePath {
    pub client_id: ClientId,
    pub height: u64,
}

/// Returns the parent path of every consensus state of a client:
/// "clients/{client_id}/consensusStates".
pub fn full_consensus_state_path(client_id: &ClientId) -> String {
    format!("{CLIENT_PREFIX}/{client_id}/{CONSENSUS_STATE_PREFIX}")
}

impl ClientConsensusStatePath {
    pub fn new(client_id: ClientId, height: u64) -> ClientConsensusStatePath {
        ClientConsensusStatePath { client_id, height }
    }

    pub fn parent(&self) -> String {
        full_consensus_state_path(&self.client_id)
    }
}

/// Index of the connections built on top of a client.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{CLIENT_PREFIX}/{_0}/{CONNECTION_PREFIX}")]
pub struct ClientConnectionPath(pub ClientId);

impl ClientConnectionPath {
    pub fn new(client_id: ClientId) -> ClientConnectionPath {
        ClientConnectionPath(client_id)
    }
}

#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{CONNECTION_PREFIX}/{_0}")]
pub struct ConnectionPath(pub ConnectionId);

impl ConnectionPath {
    pub fn new(connection_id: &ConnectionId) -> ConnectionPath {
        ConnectionPath(connection_id.clone())
    }

    /// Returns the store prefix under which all connection ends live:
    /// "connections".
    pub fn prefix() -> String {
        CONNECTION_PREFIX.to_string()
    }
}

/// Returns the prefix shared by every key of a channel:
/// "ports/{port_id}/channels/{channel_id}".
fn channel_path(port_id: &PortId, channel_id: &ChannelId) -> String {
    format!("{PORT_PREFIX}/{port_id}/{CHANNEL_PREFIX}/{channel_id}")
}

#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}", "channel_path(_0, _1)")]
pub struct ChannelEndPath(pub PortId, pub ChannelId);

impl ChannelEndPath {
    pub fn new(port_id: &PortId, channel_id: &ChannelId) -> ChannelEndPath {
        ChannelEndPath(port_id.clone(), channel_id.clone())
    }

    /// Returns the store prefix under which all channel state lives: "ports".
    pub fn prefix() -> String {
        PORT_PREFIX.to_string()
    }
}

#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}/{NEXT_SEQ_SEND}", "channel_path(_0, _1)")]
pub struct SeqSendPath(pub PortId, pub ChannelId);

impl SeqSendPath {
    pub fn new(port_id: &PortId, channel_id: &ChannelId) -> SeqSendPath {
        SeqSendPath(port_id.clone(), channel_id.clone())
    }
}

#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}/{NEXT_SEQ_RECV}", "channel_path(_0, _1)")]
pub struct SeqRecvPath(pub PortId, pub ChannelId);

impl SeqRecvPath {
    pub fn new(port_id: &PortId, channel_id: &ChannelId) -> SeqRecvPath {
        SeqRecvPath(port_id.clone(), channel_id.clone())
    }
}

#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}/{NEXT_SEQ_ACK}", "channel_path(_0, _1)")]
pub struct SeqAckPath(pub PortId, pub ChannelId);

impl SeqAckPath {
    pub fn new(port_id: &PortId, channel_id: &ChannelId) -> SeqAckPath {
        SeqAckPath(port_id.clone(), channel_id.clone())
    }
}

#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(
    fmt = "{}/{PACKET_COMMITMENT_PREFIX}/{}",
    "channel_path(port_id, channel_id)",
    "sequence_key(*sequence)"
)]
pub struct CommitmentPath {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub sequence: Sequence,
}

impl CommitmentPath {
    pub fn new(port_id: &PortId, channel_id: &ChannelId, sequence: Sequence) -> CommitmentPath {
        CommitmentPath {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
            sequence,
        }
    }

    /// Returns the parent of every packet commitment of a channel:
    /// "ports/{port_id}/channels/{channel_id}/packets".
    pub fn prefix(port_id: &PortId, channel_id: &ChannelId) -> String {
        format!(
            "{}/{PACKET_COMMITMENT_PREFIX}",
            channel_path(port_id, channel_id)
        )
    }
}

#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(
    fmt = "{}/{PACKET_ACK_PREFIX}/{}",
    "channel_path(port_id, channel_id)",
    "sequence_key(*sequence)"
)]
pub struct AckPath {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub sequence: Sequence,
}

impl AckPath {
    pub fn new(port_id: &PortId, channel_id: &ChannelId, sequence: Sequence) -> AckPath {
        AckPath {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
            sequence,
        }
    }

    /// Returns the parent of every acknowledgement commitment of a channel:
    /// "ports/{port_id}/channels/{channel_id}/acknowledgements".
    pub fn prefix(port_id: &PortId, channel_id: &ChannelId) -> String {
        format!("{}/{PACKET_ACK_PREFIX}", channel_path(port_id, channel_id))
    }
}

#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(
    fmt = "{}/{PACKET_RECEIPT_PREFIX}/{}",
    "channel_path(port_id, channel_id)",
    "sequence_key(*sequence)"
)]
pub struct ReceiptPath {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub sequence: Sequence,
}

impl ReceiptPath {
    pub fn new(port_id: &PortId, channel_id: &ChannelId, sequence: Sequence) -> ReceiptPath {
        ReceiptPath {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
            sequence,
        }
    }
}

#[derive(Debug, displaydoc::Display)]
pub enum PathError {
    /// `{path}` could not be parsed into a Path
    ParseFailure { path: String },
}

#[cfg(feature = "std")]
impl std::error::Error for PathError {}

/// The FromStr trait allows paths encoded as strings to be parsed into Paths.
impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let components: Vec<&str> = s.split('/').collect();

        parse_next_sequence(&components)
            .or_else(|| parse_client_paths(&components))
            .or_else(|| parse_connections(&components))
            .or_else(|| parse_ports(&components))
            .ok_or(PathError::ParseFailure {
                path: s.to_string(),
            })
    }
}

fn parse_next_sequence(components: &[&str]) -> Option<Path> {
    match components {
        [NEXT_CLIENT_SEQUENCE] => Some(NextClientSequencePath.into()),
        _ => None,
    }
}

fn parse_client_paths(components: &[&str]) -> Option<Path> {
    match components {
        [CLIENT_PREFIX, client_id, CLIENT_STATE] => {
            Some(ClientStatePath(ClientId::from_str(client_id).ok()?).into())
        }
        [CLIENT_PREFIX, client_id, CONNECTION_PREFIX] => {
            Some(ClientConnectionPath(ClientId::from_str(client_id).ok()?).into())
        }
        [CLIENT_PREFIX, client_id, CONSENSUS_STATE_PREFIX, height] => {
            let height = parse_decimal(height)?;
            Some(
                ClientConsensusStatePath {
                    client_id: ClientId::from_str(client_id).ok()?,
                    height,
                }
                .into(),
            )
        }
        _ => None,
    }
}

fn parse_connections(components: &[&str]) -> Option<Path> {
    match components {
        [CONNECTION_PREFIX, connection_id] => {
            Some(ConnectionPath(ConnectionId::from_str(connection_id).ok()?).into())
        }
        _ => None,
    }
}

fn parse_ports(components: &[&str]) -> Option<Path> {
    let [PORT_PREFIX, port_id, CHANNEL_PREFIX, channel_id, rest @ ..] = components else {
        return None;
    };

    let port_id = PortId::from_str(port_id).ok()?;
    let channel_id = ChannelId::from_str(channel_id).ok()?;

    match rest {
        [] => Some(ChannelEndPath(port_id, channel_id).into()),
        [NEXT_SEQ_SEND] => Some(SeqSendPath(port_id, channel_id).into()),
        [NEXT_SEQ_RECV] => Some(SeqRecvPath(port_id, channel_id).into()),
        [NEXT_SEQ_ACK] => Some(SeqAckPath(port_id, channel_id).into()),
        [kind, sequence] => {
            let sequence = Sequence::from(parse_sequence_key(sequence)?);
            match *kind {
                PACKET_COMMITMENT_PREFIX => Some(
                    CommitmentPath {
                        port_id,
                        channel_id,
                        sequence,
                    }
                    .into(),
                ),
                PACKET_ACK_PREFIX => Some(
                    AckPath {
                        port_id,
                        channel_id,
                        sequence,
                    }
                    .into(),
                ),
                PACKET_RECEIPT_PREFIX => Some(
                    ReceiptPath {
                        port_id,
                        channel_id,
                        sequence,
                    }
                    .into(),
                ),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Digits of `u64::MAX`.
const SEQUENCE_KEY_WIDTH: usize = 20;

/// Renders a packet sequence zero-padded to a fixed width, so that the keys
/// of a channel's packets sort in sequence order.
fn sequence_key(sequence: Sequence) -> String {
    format!("{:0width$}", sequence.value(), width = SEQUENCE_KEY_WIDTH)
}

fn parse_sequence_key(s: &str) -> Option<u64> {
    if s.len() != SEQUENCE_KEY_WIDTH || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Accepts only canonical decimal renderings, so that a parsed path renders
/// back to the same key.
fn parse_decimal(s: &str) -> Option<u64> {
    if s.is_empty() || (s.len() > 1 && s.starts_with('0')) || !s.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    s.parse().ok()
}
