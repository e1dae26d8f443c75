//! Types for the IBC events emitted by the channel and packet handlers.

mod packet_attributes;

use ibc_core_host_types::identifiers::{ChannelId, ConnectionId, PortId};
use ibc_primitives::prelude::*;
use tendermint::abci;

pub use self::packet_attributes::*;
use crate::acknowledgement::Acknowledgement;
use crate::channel::Order;
use crate::packet::Packet;
use crate::Version;

/// Channel event types
pub const CHANNEL_OPEN_INIT_EVENT: &str = "channel_open_init";
pub const CHANNEL_OPEN_TRY_EVENT: &str = "channel_open_try";
pub const CHANNEL_OPEN_ACK_EVENT: &str = "channel_open_ack";
pub const CHANNEL_OPEN_CONFIRM_EVENT: &str = "channel_open_confirm";
pub const CHANNEL_CLOSE_INIT_EVENT: &str = "channel_close_init";
pub const CHANNEL_CLOSE_CONFIRM_EVENT: &str = "channel_close_confirm";
pub const CHANNEL_CLOSED_EVENT: &str = "channel_close";

/// Packet event types
pub const SEND_PACKET_EVENT: &str = "send_packet";
pub const RECEIVE_PACKET_EVENT: &str = "recv_packet";
pub const WRITE_ACK_EVENT: &str = "write_acknowledgement";
pub const ACK_PACKET_EVENT: &str = "acknowledge_packet";
pub const TIMEOUT_EVENT: &str = "timeout_packet";

pub const PORT_ID_ATTRIBUTE_KEY: &str = "port_id";
pub const CHANNEL_ID_ATTRIBUTE_KEY: &str = "channel_id";
pub const COUNTERPARTY_PORT_ID_ATTRIBUTE_KEY: &str = "counterparty_port_id";
pub const COUNTERPARTY_CHANNEL_ID_ATTRIBUTE_KEY: &str = "counterparty_channel_id";
pub const CONNECTION_ID_ATTRIBUTE_KEY: &str = "connection_id";
pub const VERSION_ATTRIBUTE_KEY: &str = "version";
pub const CHANNEL_ORDERING_ATTRIBUTE_KEY: &str = "channel_ordering";

#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
struct ChannelAttributes {
    port_id: PortId,
    channel_id: ChannelId,
    counterparty_port_id: PortId,
    counterparty_channel_id: Option<ChannelId>,
    connection_id: ConnectionId,
    version: Option<Version>,
}

impl From<ChannelAttributes> for Vec<abci::EventAttribute> {
    fn from(a: ChannelAttributes) -> Self {
        let mut attributes: Vec<abci::EventAttribute> = vec![
            (PORT_ID_ATTRIBUTE_KEY, a.port_id.as_str()).into(),
            (CHANNEL_ID_ATTRIBUTE_KEY, a.channel_id.as_str()).into(),
            (COUNTERPARTY_PORT_ID_ATTRIBUTE_KEY, a.counterparty_port_id.as_str()).into(),
            (
                COUNTERPARTY_CHANNEL_ID_ATTRIBUTE_KEY,
                a.counterparty_channel_id
                    .as_ref()
                    .map(|id| id.as_str())
                    .unwrap_or(""),
            )
                .into(),
            (CONNECTION_ID_ATTRIBUTE_KEY, a.connection_id.as_str()).into(),
        ];
        if let Some(version) = a.version {
            attributes.push((VERSION_ATTRIBUTE_KEY, version.as_str()).into());
        }
        attributes
    }
}

macro_rules! channel_event {
    ($(#[$meta:meta])* $name:ident, $kind:ident, $port:ident, $chan:ident, $cp_port:ident, $cp_chan:ident, $conn:ident) => {
        $(#[$meta])*
        #[cfg_attr(
            feature = "borsh",
            derive(borsh::BorshSerialize, borsh::BorshDeserialize)
        )]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name(ChannelAttributes);

        impl $name {
            pub fn $port(&self) -> &PortId {
                &self.0.port_id
            }

            pub fn $chan(&self) -> &ChannelId {
                &self.0.channel_id
            }

            pub fn $cp_port(&self) -> &PortId {
                &self.0.counterparty_port_id
            }

            pub fn $cp_chan(&self) -> Option<&ChannelId> {
                self.0.counterparty_channel_id.as_ref()
            }

            pub fn $conn(&self) -> &ConnectionId {
                &self.0.connection_id
            }

            pub fn version(&self) -> Option<&Version> {
                self.0.version.as_ref()
            }

            pub fn event_type(&self) -> &str {
                $kind
            }
        }

        impl From<$name> for abci::Event {
            fn from(v: $name) -> Self {
                abci::Event {
                    kind: $kind.to_string(),
                    attributes: v.0.into(),
                }
            }
        }
    };
}

channel_event!(
    /// Emitted on chain A by `ChanOpenInit`.
    OpenInit,
    CHANNEL_OPEN_INIT_EVENT,
    port_id_on_a,
    chan_id_on_a,
    port_id_on_b,
    chan_id_on_b,
    conn_id_on_a
);

channel_event!(
    /// Emitted on chain B by `ChanOpenTry`.
    OpenTry,
    CHANNEL_OPEN_TRY_EVENT,
    port_id_on_b,
    chan_id_on_b,
    port_id_on_a,
    chan_id_on_a,
    conn_id_on_b
);

channel_event!(
    /// Emitted on chain A by `ChanOpenAck`.
    OpenAck,
    CHANNEL_OPEN_ACK_EVENT,
    port_id_on_a,
    chan_id_on_a,
    port_id_on_b,
    chan_id_on_b,
    conn_id_on_a
);

channel_event!(
    /// Emitted on chain B by `ChanOpenConfirm`.
    OpenConfirm,
    CHANNEL_OPEN_CONFIRM_EVENT,
    port_id_on_b,
    chan_id_on_b,
    port_id_on_a,
    chan_id_on_a,
    conn_id_on_b
);

channel_event!(
    /// Emitted on chain A by `ChanCloseInit`.
    CloseInit,
    CHANNEL_CLOSE_INIT_EVENT,
    port_id_on_a,
    chan_id_on_a,
    port_id_on_b,
    chan_id_on_b,
    conn_id_on_a
);

channel_event!(
    /// Emitted on chain B by `ChanCloseConfirm`.
    CloseConfirm,
    CHANNEL_CLOSE_CONFIRM_EVENT,
    port_id_on_b,
    chan_id_on_b,
    port_id_on_a,
    chan_id_on_a,
    conn_id_on_b
);

impl OpenInit {
    pub fn new(
        port_id_on_a: PortId,
        chan_id_on_a: ChannelId,
        port_id_on_b: PortId,
        conn_id_on_a: ConnectionId,
        version_on_a: Version,
    ) -> Self {
        Self(ChannelAttributes {
            port_id: port_id_on_a,
            channel_id: chan_id_on_a,
            counterparty_port_id: port_id_on_b,
            counterparty_channel_id: None,
            connection_id: conn_id_on_a,
            version: Some(version_on_a),
        })
    }
}

impl OpenTry {
    pub fn new(
        port_id_on_b: PortId,
        chan_id_on_b: ChannelId,
        port_id_on_a: PortId,
        chan_id_on_a: ChannelId,
        conn_id_on_b: ConnectionId,
        version_on_b: Version,
    ) -> Self {
        Self(ChannelAttributes {
            port_id: port_id_on_b,
            channel_id: chan_id_on_b,
            counterparty_port_id: port_id_on_a,
            counterparty_channel_id: Some(chan_id_on_a),
            connection_id: conn_id_on_b,
            version: Some(version_on_b),
        })
    }
}

impl OpenAck {
    pub fn new(
        port_id_on_a: PortId,
        chan_id_on_a: ChannelId,
        port_id_on_b: PortId,
        chan_id_on_b: ChannelId,
        conn_id_on_a: ConnectionId,
    ) -> Self {
        Self(ChannelAttributes {
            port_id: port_id_on_a,
            channel_id: chan_id_on_a,
            counterparty_port_id: port_id_on_b,
            counterparty_channel_id: Some(chan_id_on_b),
            connection_id: conn_id_on_a,
            version: None,
        })
    }
}

impl OpenConfirm {
    pub fn new(
        port_id_on_b: PortId,
        chan_id_on_b: ChannelId,
        port_id_on_a: PortId,
        chan_id_on_a: ChannelId,
        conn_id_on_b: ConnectionId,
    ) -> Self {
        Self(ChannelAttributes {
            port_id: port_id_on_b,
            channel_id: chan_id_on_b,
            counterparty_port_id: port_id_on_a,
            counterparty_channel_id: Some(chan_id_on_a),
            connection_id: conn_id_on_b,
            version: None,
        })
    }
}

impl CloseInit {
    pub fn new(
        port_id_on_a: PortId,
        chan_id_on_a: ChannelId,
        port_id_on_b: PortId,
        chan_id_on_b: Option<ChannelId>,
        conn_id_on_a: ConnectionId,
    ) -> Self {
        Self(ChannelAttributes {
            port_id: port_id_on_a,
            channel_id: chan_id_on_a,
            counterparty_port_id: port_id_on_b,
            counterparty_channel_id: chan_id_on_b,
            connection_id: conn_id_on_a,
            version: None,
        })
    }
}

impl CloseConfirm {
    pub fn new(
        port_id_on_b: PortId,
        chan_id_on_b: ChannelId,
        port_id_on_a: PortId,
        chan_id_on_a: Option<ChannelId>,
        conn_id_on_b: ConnectionId,
    ) -> Self {
        Self(ChannelAttributes {
            port_id: port_id_on_b,
            channel_id: chan_id_on_b,
            counterparty_port_id: port_id_on_a,
            counterparty_channel_id: chan_id_on_a,
            connection_id: conn_id_on_b,
            version: None,
        })
    }
}

/// Emitted when a timeout on an ordered channel closes the channel.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelClosed {
    attributes: ChannelAttributes,
    channel_ordering: Order,
}

impl ChannelClosed {
    pub fn new(
        port_id_on_a: PortId,
        chan_id_on_a: ChannelId,
        port_id_on_b: PortId,
        chan_id_on_b: Option<ChannelId>,
        conn_id_on_a: ConnectionId,
        channel_ordering: Order,
    ) -> Self {
        Self {
            attributes: ChannelAttributes {
                port_id: port_id_on_a,
                channel_id: chan_id_on_a,
                counterparty_port_id: port_id_on_b,
                counterparty_channel_id: chan_id_on_b,
                connection_id: conn_id_on_a,
                version: None,
            },
            channel_ordering,
        }
    }

    pub fn port_id_on_a(&self) -> &PortId {
        &self.attributes.port_id
    }

    pub fn chan_id_on_a(&self) -> &ChannelId {
        &self.attributes.channel_id
    }

    pub fn channel_ordering(&self) -> &Order {
        &self.channel_ordering
    }

    pub fn event_type(&self) -> &str {
        CHANNEL_CLOSED_EVENT
    }
}

impl From<ChannelClosed> for abci::Event {
    fn from(ev: ChannelClosed) -> Self {
        let mut attributes: Vec<abci::EventAttribute> = ev.attributes.into();
        attributes.push((CHANNEL_ORDERING_ATTRIBUTE_KEY, ev.channel_ordering.as_str()).into());
        abci::Event {
            kind: CHANNEL_CLOSED_EVENT.to_string(),
            attributes,
        }
    }
}

macro_rules! packet_event {
    ($(#[$meta:meta])* $name:ident, $kind:ident, $conn:ident) => {
        $(#[$meta])*
        #[cfg_attr(
            feature = "borsh",
            derive(borsh::BorshSerialize, borsh::BorshDeserialize)
        )]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name {
            packet: Packet,
            channel_ordering: Order,
            connection_id: ConnectionId,
        }

        impl $name {
            pub fn new(packet: Packet, channel_ordering: Order, $conn: ConnectionId) -> Self {
                Self {
                    packet,
                    channel_ordering,
                    connection_id: $conn,
                }
            }

            pub fn packet(&self) -> &Packet {
                &self.packet
            }

            pub fn channel_ordering(&self) -> &Order {
                &self.channel_ordering
            }

            pub fn $conn(&self) -> &ConnectionId {
                &self.connection_id
            }

            pub fn event_type(&self) -> &str {
                $kind
            }
        }
    };
}

packet_event!(
    /// Emitted on chain A when an application sends a packet.
    SendPacket,
    SEND_PACKET_EVENT,
    conn_id_on_a
);

packet_event!(
    /// Emitted on chain B when a packet is received.
    ReceivePacket,
    RECEIVE_PACKET_EVENT,
    conn_id_on_b
);

packet_event!(
    /// Emitted on chain A when an acknowledgement is processed.
    AcknowledgePacket,
    ACK_PACKET_EVENT,
    conn_id_on_a
);

packet_event!(
    /// Emitted on chain A when a packet times out.
    TimeoutPacket,
    TIMEOUT_EVENT,
    conn_id_on_a
);

impl From<SendPacket> for abci::Event {
    fn from(ev: SendPacket) -> Self {
        let mut attributes = packet_data_attributes(&ev.packet);
        attributes.extend(packet_attributes(&ev.packet));
        attributes.push(channel_ordering_attribute(ev.channel_ordering));
        attributes.push(connection_attribute(&ev.connection_id));
        abci::Event {
            kind: SEND_PACKET_EVENT.to_string(),
            attributes,
        }
    }
}

impl From<ReceivePacket> for abci::Event {
    fn from(ev: ReceivePacket) -> Self {
        let mut attributes = packet_data_attributes(&ev.packet);
        attributes.extend(packet_attributes(&ev.packet));
        attributes.push(channel_ordering_attribute(ev.channel_ordering));
        attributes.push(connection_attribute(&ev.connection_id));
        abci::Event {
            kind: RECEIVE_PACKET_EVENT.to_string(),
            attributes,
        }
    }
}

impl From<AcknowledgePacket> for abci::Event {
    fn from(ev: AcknowledgePacket) -> Self {
        let mut attributes = packet_attributes(&ev.packet);
        attributes.push(channel_ordering_attribute(ev.channel_ordering));
        attributes.push(connection_attribute(&ev.connection_id));
        abci::Event {
            kind: ACK_PACKET_EVENT.to_string(),
            attributes,
        }
    }
}

impl From<TimeoutPacket> for abci::Event {
    fn from(ev: TimeoutPacket) -> Self {
        let mut attributes = packet_attributes(&ev.packet);
        attributes.push(channel_ordering_attribute(ev.channel_ordering));
        attributes.push(connection_attribute(&ev.connection_id));
        abci::Event {
            kind: TIMEOUT_EVENT.to_string(),
            attributes,
        }
    }
}

/// Emitted on chain B when the acknowledgement of a received packet is
/// written.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteAcknowledgement {
    packet: Packet,
    acknowledgement: Acknowledgement,
    connection_id: ConnectionId,
}

impl WriteAcknowledgement {
    pub fn new(
        packet: Packet,
        acknowledgement: Acknowledgement,
        conn_id_on_b: ConnectionId,
    ) -> Self {
        Self {
            packet,
            acknowledgement,
            connection_id: conn_id_on_b,
        }
    }

    pub fn packet(&self) -> &Packet {
        &self.packet
    }

    pub fn acknowledgement(&self) -> &Acknowledgement {
        &self.acknowledgement
    }

    pub fn conn_id_on_b(&self) -> &ConnectionId {
        &self.connection_id
    }

    pub fn event_type(&self) -> &str {
        WRITE_ACK_EVENT
    }
}

impl From<WriteAcknowledgement> for abci::Event {
    fn from(ev: WriteAcknowledgement) -> Self {
        let mut attributes = packet_data_attributes(&ev.packet);
        attributes.extend(packet_attributes(&ev.packet));
        attributes.push(ack_attribute(&ev.acknowledgement));
        attributes.push(connection_attribute(&ev.connection_id));
        abci::Event {
            kind: WRITE_ACK_EVENT.to_string(),
            attributes,
        }
    }
}
