//! Channel ends and their ordering and state.

use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use ibc_core_host_types::error::DecodingError;
use ibc_core_host_types::identifiers::{ChannelId, ConnectionId, PortId};
use ibc_primitives::prelude::*;
use ibc_primitives::utils::PrettySlice;
use ibc_proto::ibc::core::channel::v1::{
    Channel as RawChannel, Counterparty as RawCounterparty,
    IdentifiedChannel as RawIdentifiedChannel,
};
use ibc_proto::Protobuf;

use crate::error::ChannelError;
use crate::Version;

/// Number of connection hops a channel may declare.
pub const CONNECTION_HOPS_LENGTH: usize = 1;

/// A [`ChannelEnd`] along with its ID and the port it is bound to
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentifiedChannelEnd {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub channel_end: ChannelEnd,
}

impl IdentifiedChannelEnd {
    pub fn new(port_id: PortId, channel_id: ChannelId, channel_end: ChannelEnd) -> Self {
        IdentifiedChannelEnd {
            port_id,
            channel_id,
            channel_end,
        }
    }
}

impl Protobuf<RawIdentifiedChannel> for IdentifiedChannelEnd {}

impl TryFrom<RawIdentifiedChannel> for IdentifiedChannelEnd {
    type Error = ChannelError;

    fn try_from(value: RawIdentifiedChannel) -> Result<Self, Self::Error> {
        let channel_end = RawChannel {
            state: value.state,
            ordering: value.ordering,
            counterparty: value.counterparty,
            connection_hops: value.connection_hops,
            version: value.version,
            upgrade_sequence: 0,
        }
        .try_into()?;

        Ok(IdentifiedChannelEnd {
            port_id: value.port_id.parse()?,
            channel_id: value.channel_id.parse()?,
            channel_end,
        })
    }
}

impl From<IdentifiedChannelEnd> for RawIdentifiedChannel {
    fn from(value: IdentifiedChannelEnd) -> Self {
        let raw_end = RawChannel::from(value.channel_end);
        RawIdentifiedChannel {
            state: raw_end.state,
            ordering: raw_end.ordering,
            counterparty: raw_end.counterparty,
            connection_hops: raw_end.connection_hops,
            version: raw_end.version,
            port_id: value.port_id.to_string(),
            channel_id: value.channel_id.to_string(),
            upgrade_sequence: 0,
        }
    }
}

/// One end of a channel, as stored under `ports/{port}/channels/{channel}`.
///
/// The ordering never changes once the end exists. The version may be
/// replaced once, when the counterparty's version is accepted on
/// `ChanOpenAck`. `Closed` is terminal.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelEnd {
    pub state: State,
    pub ordering: Order,
    pub remote: Counterparty,
    pub connection_hops: Vec<ConnectionId>,
    pub version: Version,
}

impl Display for ChannelEnd {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "ChannelEnd {{ state: {}, ordering: {}, remote: {}, connection_hops: {}, version: {} }}",
            self.state,
            self.ordering,
            self.remote,
            PrettySlice(&self.connection_hops),
            self.version
        )
    }
}

impl Protobuf<RawChannel> for ChannelEnd {}

impl TryFrom<RawChannel> for ChannelEnd {
    type Error = ChannelError;

    fn try_from(value: RawChannel) -> Result<Self, Self::Error> {
        if value.upgrade_sequence != 0 {
            return Err(DecodingError::invalid_field("channel upgrades are not supported").into());
        }

        let remote = value
            .counterparty
            .ok_or(DecodingError::missing_field("counterparty"))?
            .try_into()?;

        let connection_hops = value
            .connection_hops
            .iter()
            .map(|hop| ConnectionId::from_str(hop))
            .collect::<Result<Vec<_>, _>>()?;

        ChannelEnd::new(
            value.state.try_into()?,
            value.ordering.try_into()?,
            remote,
            connection_hops,
            value.version.into(),
        )
    }
}

impl From<ChannelEnd> for RawChannel {
    fn from(value: ChannelEnd) -> Self {
        RawChannel {
            state: value.state.into(),
            ordering: value.ordering.into(),
            counterparty: Some(value.remote.into()),
            connection_hops: value
                .connection_hops
                .iter()
                .map(|hop| hop.as_str().to_string())
                .collect(),
            version: value.version.to_string(),
            upgrade_sequence: 0,
        }
    }
}

impl ChannelEnd {
    /// Creates a channel end, rejecting the `Uninitialized` state and any
    /// number of hops other than one.
    pub fn new(
        state: State,
        ordering: Order,
        remote: Counterparty,
        connection_hops: Vec<ConnectionId>,
        version: Version,
    ) -> Result<Self, ChannelError> {
        if state == State::Uninitialized {
            return Err(ChannelError::InvalidStateValue { value: 0 });
        }
        verify_connection_hops_length(&connection_hops)?;

        Ok(Self {
            state,
            ordering,
            remote,
            connection_hops,
            version,
        })
    }

    pub fn set_state(&mut self, s: State) {
        self.state = s;
    }

    pub fn set_version(&mut self, v: Version) {
        self.version = v;
    }

    pub fn set_counterparty_channel_id(&mut self, c: ChannelId) {
        self.remote.channel_id = Some(c);
    }

    pub fn is_open(&self) -> bool {
        self.state == State::Open
    }

    pub fn is_closed(&self) -> bool {
        self.state == State::Closed
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn ordering(&self) -> &Order {
        &self.ordering
    }

    pub fn counterparty(&self) -> &Counterparty {
        &self.remote
    }

    pub fn connection_hops(&self) -> &[ConnectionId] {
        &self.connection_hops
    }

    /// The connection the channel runs over.
    pub fn connection_hop(&self) -> Result<&ConnectionId, ChannelError> {
        self.connection_hops
            .first()
            .ok_or(ChannelError::InvalidConnectionHopsLength {
                expected: CONNECTION_HOPS_LENGTH,
                actual: 0,
            })
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn verify_state_matches(&self, expected: &State) -> Result<(), ChannelError> {
        if self.state != *expected {
            return Err(ChannelError::MismatchedChannelState {
                expected: expected.to_string(),
                actual: self.state.to_string(),
            });
        }
        Ok(())
    }

    pub fn verify_not_closed(&self) -> Result<(), ChannelError> {
        if self.is_closed() {
            return Err(ChannelError::ChannelClosed);
        }
        Ok(())
    }

    pub fn verify_connection_hops_length(&self) -> Result<(), ChannelError> {
        verify_connection_hops_length(&self.connection_hops)
    }

    /// Whether `other` would be created from the same handshake parameters,
    /// ignoring the state.
    pub fn same_parameters(&self, other: &ChannelEnd) -> bool {
        self.ordering == other.ordering
            && self.remote == other.remote
            && self.connection_hops == other.connection_hops
            && self.version == other.version
    }
}

pub fn verify_connection_hops_length(connection_hops: &[ConnectionId]) -> Result<(), ChannelError> {
    if connection_hops.len() != CONNECTION_HOPS_LENGTH {
        return Err(ChannelError::InvalidConnectionHopsLength {
            expected: CONNECTION_HOPS_LENGTH,
            actual: connection_hops.len(),
        });
    }
    Ok(())
}

#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Counterparty {
    pub port_id: PortId,
    pub channel_id: Option<ChannelId>,
}

impl Counterparty {
    pub fn new(port_id: PortId, channel_id: Option<ChannelId>) -> Self {
        Self {
            port_id,
            channel_id,
        }
    }

    pub fn port_id(&self) -> &PortId {
        &self.port_id
    }

    pub fn channel_id(&self) -> Option<&ChannelId> {
        self.channel_id.as_ref()
    }

    /// A channel handshake starts without knowing the counterparty's channel.
    pub fn verify_empty_channel_id(&self) -> Result<(), ChannelError> {
        if let Some(channel_id) = &self.channel_id {
            return Err(ChannelError::InvalidCounterparty {
                description: format!("counterparty channel id must be empty, found {channel_id}"),
            });
        }
        Ok(())
    }
}

impl Display for Counterparty {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match &self.channel_id {
            Some(channel_id) => write!(
                f,
                "Counterparty(port_id: {}, channel_id: {channel_id})",
                self.port_id
            ),
            None => write!(f, "Counterparty(port_id: {}, channel_id: None)", self.port_id),
        }
    }
}

impl Protobuf<RawCounterparty> for Counterparty {}

impl TryFrom<RawCounterparty> for Counterparty {
    type Error = ChannelError;

    fn try_from(raw_counterparty: RawCounterparty) -> Result<Self, Self::Error> {
        let channel_id = if raw_counterparty.channel_id.is_empty() {
            None
        } else {
            Some(raw_counterparty.channel_id.parse()?)
        };

        Ok(Counterparty::new(raw_counterparty.port_id.parse()?, channel_id))
    }
}

impl From<Counterparty> for RawCounterparty {
    fn from(value: Counterparty) -> Self {
        RawCounterparty {
            port_id: value.port_id.to_string(),
            channel_id: value
                .channel_id
                .map_or_else(String::new, |id| id.to_string()),
        }
    }
}

/// Delivery guarantee of a channel. The string forms double as the feature
/// names carried by connection versions.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    Unordered = 1isize,
    Ordered = 2isize,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unordered => "ORDER_UNORDERED",
            Self::Ordered => "ORDER_ORDERED",
        }
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<i32> for Order {
    type Error = ChannelError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Unordered),
            2 => Ok(Self::Ordered),
            _ => Err(ChannelError::InvalidOrderValue {
                value: value.to_string(),
            }),
        }
    }
}

impl From<Order> for i32 {
    fn from(value: Order) -> Self {
        value as i32
    }
}

impl FromStr for Order {
    type Err = ChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().trim_start_matches("order_") {
            "unordered" => Ok(Self::Unordered),
            "ordered" => Ok(Self::Ordered),
            _ => Err(ChannelError::InvalidOrderValue {
                value: s.to_string(),
            }),
        }
    }
}

/// Handshake state of a [`ChannelEnd`]
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum State {
    Uninitialized = 0isize,
    Init = 1isize,
    TryOpen = 2isize,
    Open = 3isize,
    Closed = 4isize,
}

impl State {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "UNINITIALIZED",
            Self::Init => "INIT",
            Self::TryOpen => "TRYOPEN",
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
        }
    }

    pub fn is_open(self) -> bool {
        self == State::Open
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<i32> for State {
    type Error = ChannelError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Uninitialized),
            1 => Ok(Self::Init),
            2 => Ok(Self::TryOpen),
            3 => Ok(Self::Open),
            4 => Ok(Self::Closed),
            _ => Err(ChannelError::InvalidStateValue { value }),
        }
    }
}

impl From<State> for i32 {
    fn from(value: State) -> Self {
        value as i32
    }
}
