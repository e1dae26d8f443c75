//! Attributes shared by the packet events.

use ibc_core_host_types::identifiers::ConnectionId;
use ibc_primitives::prelude::*;
use subtle_encoding::hex;
use tendermint::abci;

use crate::acknowledgement::Acknowledgement;
use crate::channel::Order;
use crate::packet::Packet;

pub const PKT_SEQ_ATTRIBUTE_KEY: &str = "packet_sequence";
pub const PKT_DATA_HEX_ATTRIBUTE_KEY: &str = "packet_data_hex";
pub const PKT_SRC_PORT_ATTRIBUTE_KEY: &str = "packet_src_port";
pub const PKT_SRC_CHANNEL_ATTRIBUTE_KEY: &str = "packet_src_channel";
pub const PKT_DST_PORT_ATTRIBUTE_KEY: &str = "packet_dst_port";
pub const PKT_DST_CHANNEL_ATTRIBUTE_KEY: &str = "packet_dst_channel";
pub const PKT_CHANNEL_ORDERING_ATTRIBUTE_KEY: &str = "packet_channel_ordering";
pub const PKT_TIMEOUT_HEIGHT_ATTRIBUTE_KEY: &str = "packet_timeout_height";
pub const PKT_TIMEOUT_TIMESTAMP_ATTRIBUTE_KEY: &str = "packet_timeout_timestamp";
pub const PKT_ACK_HEX_ATTRIBUTE_KEY: &str = "packet_ack_hex";
pub const PKT_CONNECTION_ID_ATTRIBUTE_KEY: &str = "packet_connection";

fn hex_string(bytes: &[u8]) -> String {
    // hex output is always ASCII
    String::from_utf8(hex::encode(bytes)).unwrap_or_default()
}

/// Timeouts, sequence and both endpoints.
pub(super) fn packet_attributes(packet: &Packet) -> Vec<abci::EventAttribute> {
    vec![
        (
            PKT_TIMEOUT_HEIGHT_ATTRIBUTE_KEY,
            packet.timeout_height_on_b.commitment_value().to_string(),
        )
            .into(),
        (
            PKT_TIMEOUT_TIMESTAMP_ATTRIBUTE_KEY,
            packet.timeout_timestamp_on_b.nanoseconds().to_string(),
        )
            .into(),
        (PKT_SEQ_ATTRIBUTE_KEY, packet.seq_on_a.to_string()).into(),
        (PKT_SRC_PORT_ATTRIBUTE_KEY, packet.port_id_on_a.as_str()).into(),
        (PKT_SRC_CHANNEL_ATTRIBUTE_KEY, packet.chan_id_on_a.as_str()).into(),
        (PKT_DST_PORT_ATTRIBUTE_KEY, packet.port_id_on_b.as_str()).into(),
        (PKT_DST_CHANNEL_ATTRIBUTE_KEY, packet.chan_id_on_b.as_str()).into(),
    ]
}

pub(super) fn packet_data_attributes(packet: &Packet) -> Vec<abci::EventAttribute> {
    vec![(PKT_DATA_HEX_ATTRIBUTE_KEY, hex_string(&packet.data)).into()]
}

pub(super) fn ack_attribute(ack: &Acknowledgement) -> abci::EventAttribute {
    (PKT_ACK_HEX_ATTRIBUTE_KEY, hex_string(ack.as_bytes())).into()
}

pub(super) fn channel_ordering_attribute(ordering: Order) -> abci::EventAttribute {
    (PKT_CHANNEL_ORDERING_ATTRIBUTE_KEY, ordering.as_str()).into()
}

pub(super) fn connection_attribute(connection_id: &ConnectionId) -> abci::EventAttribute {
    (PKT_CONNECTION_ID_ATTRIBUTE_KEY, connection_id.as_str()).into()
}
