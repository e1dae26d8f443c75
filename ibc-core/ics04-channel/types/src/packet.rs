//! Defines the packet type
use ibc_core_client_types::Height;
use ibc_core_host_types::error::DecodingError;
use ibc_core_host_types::identifiers::{ChannelId, PortId, Sequence};
use ibc_primitives::prelude::*;
use ibc_primitives::Timestamp;
use ibc_proto::ibc::core::channel::v1::{Packet as RawPacket, PacketState as RawPacketState};

use crate::commitment::{compute_packet_commitment, PacketCommitment};
use crate::error::PacketError;
use crate::timeout::{TimeoutHeight, TimeoutTimestamp};

/// The unit of data exchanged over a channel, sent from chain A to chain B.
///
/// The `data` field is opaque to the core.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Hash, PartialEq, Eq)]
pub struct Packet {
    pub seq_on_a: Sequence,
    pub port_id_on_a: PortId,
    pub chan_id_on_a: ChannelId,
    pub port_id_on_b: PortId,
    pub chan_id_on_b: ChannelId,
    #[cfg_attr(
        feature = "serde",
        serde(serialize_with = "ibc_core_commitment_types::serializer::ser_hex_upper")
    )]
    pub data: Vec<u8>,
    pub timeout_height_on_b: TimeoutHeight,
    pub timeout_timestamp_on_b: TimeoutTimestamp,
}

struct PacketData<'a>(&'a [u8]);

impl core::fmt::Debug for PacketData<'_> {
    fn fmt(&self, formatter: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(formatter, "{:?}", self.0)
    }
}

impl core::fmt::Debug for Packet {
    fn fmt(&self, formatter: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        formatter
            .debug_struct("Packet")
            .field("sequence", &self.seq_on_a)
            .field("source_port", &self.port_id_on_a)
            .field("source_channel", &self.chan_id_on_a)
            .field("destination_port", &self.port_id_on_b)
            .field("destination_channel", &self.chan_id_on_b)
            .field("data", &PacketData(&self.data))
            .field("timeout_height", &self.timeout_height_on_b)
            .field("timeout_timestamp", &self.timeout_timestamp_on_b)
            .finish()
    }
}

impl Packet {
    /// Rejects the zero sequence, empty data and a packet without any
    /// timeout.
    pub fn validate_basic(&self) -> Result<(), PacketError> {
        if self.seq_on_a.is_zero() {
            return Err(PacketError::ZeroSequence);
        }
        if self.data.is_empty() {
            return Err(PacketError::EmptyPacketData);
        }
        if !self.timeout_height_on_b.is_set() && !self.timeout_timestamp_on_b.is_set() {
            return Err(PacketError::MissingTimeout);
        }
        Ok(())
    }

    /// Checks whether a chain at `dst_chain_height` and `dst_chain_ts` has
    /// reached either of the packet's timeouts.
    pub fn timed_out(&self, dst_chain_ts: &Timestamp, dst_chain_height: Height) -> bool {
        self.timeout_height_on_b.has_expired(dst_chain_height)
            || self.timeout_timestamp_on_b.has_expired(dst_chain_ts)
    }

    /// Fails with a timeout error when a chain at `height` and `timestamp`
    /// is no longer allowed to receive the packet.
    pub fn verify_not_timed_out(
        &self,
        height: Height,
        timestamp: &Timestamp,
    ) -> Result<(), PacketError> {
        if self.timeout_height_on_b.has_expired(height) {
            return Err(PacketError::TimeoutHeightExpired {
                timeout_height: self.timeout_height_on_b,
                chain_height: height,
            });
        }
        if self.timeout_timestamp_on_b.has_expired(timestamp) {
            return Err(PacketError::TimeoutTimestampExpired {
                timeout_timestamp: self.timeout_timestamp_on_b,
                chain_timestamp: *timestamp,
            });
        }
        Ok(())
    }

    pub fn commitment(&self) -> PacketCommitment {
        compute_packet_commitment(
            &self.data,
            &self.timeout_height_on_b,
            &self.timeout_timestamp_on_b,
        )
    }
}

/// Omits the packet data
impl core::fmt::Display for Packet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(
            f,
            "seq:{}, path:{}/{}->{}/{}, toh:{}, tos:{}",
            self.seq_on_a,
            self.port_id_on_a,
            self.chan_id_on_a,
            self.port_id_on_b,
            self.chan_id_on_b,
            self.timeout_height_on_b,
            self.timeout_timestamp_on_b
        )
    }
}

impl TryFrom<RawPacket> for Packet {
    type Error = PacketError;

    fn try_from(raw_pkt: RawPacket) -> Result<Self, Self::Error> {
        let packet = Packet {
            seq_on_a: Sequence::from(raw_pkt.sequence),
            port_id_on_a: raw_pkt.source_port.parse()?,
            chan_id_on_a: raw_pkt.source_channel.parse()?,
            port_id_on_b: raw_pkt.destination_port.parse()?,
            chan_id_on_b: raw_pkt.destination_channel.parse()?,
            data: raw_pkt.data,
            timeout_height_on_b: raw_pkt.timeout_height.try_into()?,
            timeout_timestamp_on_b: raw_pkt.timeout_timestamp.into(),
        };
        packet.validate_basic()?;

        Ok(packet)
    }
}

impl From<Packet> for RawPacket {
    fn from(packet: Packet) -> Self {
        RawPacket {
            sequence: packet.seq_on_a.value(),
            source_port: packet.port_id_on_a.to_string(),
            source_channel: packet.chan_id_on_a.to_string(),
            destination_port: packet.port_id_on_b.to_string(),
            destination_channel: packet.chan_id_on_b.to_string(),
            data: packet.data,
            timeout_height: packet.timeout_height_on_b.into(),
            timeout_timestamp: packet.timeout_timestamp_on_b.nanoseconds(),
        }
    }
}

/// A stored per-packet value (commitment, receipt or acknowledgement hash)
/// together with its location, as returned by queries.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Hash, PartialEq, Eq)]
pub struct PacketState {
    pub port_id: PortId,
    pub chan_id: ChannelId,
    pub seq: Sequence,
    #[cfg_attr(
        feature = "serde",
        serde(serialize_with = "ibc_core_commitment_types::serializer::ser_hex_upper")
    )]
    pub data: Vec<u8>,
}

impl core::fmt::Debug for PacketState {
    fn fmt(&self, formatter: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        formatter
            .debug_struct("PacketState")
            .field("port", &self.port_id)
            .field("channel", &self.chan_id)
            .field("sequence", &self.seq)
            .field("data", &PacketData(&self.data))
            .finish()
    }
}

impl TryFrom<RawPacketState> for PacketState {
    type Error = PacketError;

    fn try_from(raw_pkt: RawPacketState) -> Result<Self, Self::Error> {
        if raw_pkt.sequence == 0 {
            return Err(PacketError::ZeroSequence);
        }
        if raw_pkt.data.is_empty() {
            return Err(DecodingError::missing_field("data").into());
        }

        Ok(PacketState {
            seq: Sequence::from(raw_pkt.sequence),
            port_id: raw_pkt.port_id.parse()?,
            chan_id: raw_pkt.channel_id.parse()?,
            data: raw_pkt.data,
        })
    }
}

impl From<PacketState> for RawPacketState {
    fn from(packet: PacketState) -> Self {
        Self {
            sequence: packet.seq.value(),
            port_id: packet.port_id.to_string(),
            channel_id: packet.chan_id.to_string(),
            data: packet.data,
        }
    }
}
