use core::fmt::{Display, Error as FmtError, Formatter};

use ibc_core_commitment_types::commitment::CommitmentPrefix;
use ibc_core_host_types::error::DecodingError;
use ibc_core_host_types::identifiers::{ClientId, ConnectionId};
use ibc_primitives::prelude::*;
use ibc_proto::ibc::core::commitment::v1::MerklePrefix;
use ibc_proto::ibc::core::connection::v1::{
    ClientPaths as RawClientPaths, ConnectionEnd as RawConnectionEnd,
    Counterparty as RawCounterparty, IdentifiedConnection as RawIdentifiedConnection,
};
use ibc_proto::Protobuf;

use crate::error::ConnectionError;
use crate::version::Version;

/// A connection end together with the identifier it is stored under.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IdentifiedConnectionEnd {
    pub connection_id: ConnectionId,
    pub connection_end: ConnectionEnd,
}

impl IdentifiedConnectionEnd {
    pub fn new(connection_id: ConnectionId, connection_end: ConnectionEnd) -> Self {
        IdentifiedConnectionEnd {
            connection_id,
            connection_end,
        }
    }

    pub fn id(&self) -> &ConnectionId {
        &self.connection_id
    }

    pub fn end(&self) -> &ConnectionEnd {
        &self.connection_end
    }
}

impl Protobuf<RawIdentifiedConnection> for IdentifiedConnectionEnd {}

impl TryFrom<RawIdentifiedConnection> for IdentifiedConnectionEnd {
    type Error = ConnectionError;

    fn try_from(value: RawIdentifiedConnection) -> Result<Self, Self::Error> {
        let raw_connection_end = RawConnectionEnd {
            client_id: value.client_id,
            versions: value.versions,
            state: value.state,
            counterparty: value.counterparty,
            delay_period: value.delay_period,
        };

        Ok(IdentifiedConnectionEnd {
            connection_id: value.id.parse()?,
            connection_end: raw_connection_end.try_into()?,
        })
    }
}

impl From<IdentifiedConnectionEnd> for RawIdentifiedConnection {
    fn from(value: IdentifiedConnectionEnd) -> Self {
        let raw_end = RawConnectionEnd::from(value.connection_end);
        RawIdentifiedConnection {
            id: value.connection_id.to_string(),
            client_id: raw_end.client_id,
            versions: raw_end.versions,
            state: raw_end.state,
            delay_period: raw_end.delay_period,
            counterparty: raw_end.counterparty,
        }
    }
}

/// One side of a connection between two chains.
///
/// A connection end in any state but `INIT` carries exactly one version.
/// The delay period is always zero and is not modelled.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConnectionEnd {
    pub state: State,
    client_id: ClientId,
    counterparty: Counterparty,
    versions: Vec<Version>,
}

impl Protobuf<RawConnectionEnd> for ConnectionEnd {}

impl TryFrom<RawConnectionEnd> for ConnectionEnd {
    type Error = ConnectionError;

    fn try_from(value: RawConnectionEnd) -> Result<Self, Self::Error> {
        let state = value.state.try_into()?;

        if value.client_id.is_empty() {
            return Err(DecodingError::missing_field("client_id").into());
        }

        if value.versions.is_empty() {
            return Err(ConnectionError::EmptyVersions);
        }

        Self::new(
            state,
            value.client_id.parse()?,
            value
                .counterparty
                .ok_or(DecodingError::missing_field("counterparty"))?
                .try_into()?,
            value
                .versions
                .into_iter()
                .map(Version::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        )
    }
}

impl From<ConnectionEnd> for RawConnectionEnd {
    fn from(value: ConnectionEnd) -> Self {
        RawConnectionEnd {
            client_id: value.client_id.to_string(),
            versions: value.versions.into_iter().map(Into::into).collect(),
            state: value.state as i32,
            counterparty: Some(value.counterparty.into()),
            delay_period: 0,
        }
    }
}

impl ConnectionEnd {
    pub fn new(
        state: State,
        client_id: ClientId,
        counterparty: Counterparty,
        versions: Vec<Version>,
    ) -> Result<Self, ConnectionError> {
        if versions.is_empty() {
            return Err(ConnectionError::EmptyVersions);
        }
        if state != State::Init && versions.len() != 1 {
            return Err(ConnectionError::InvalidVersionLength {
                actual: versions.len(),
            });
        }

        Ok(Self {
            state,
            client_id,
            counterparty,
            versions,
        })
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn set_state(&mut self, new_state: State) {
        self.state = new_state;
    }

    pub fn set_counterparty(&mut self, new_cparty: Counterparty) {
        self.counterparty = new_cparty;
    }

    pub fn set_version(&mut self, new_version: Version) {
        self.versions = vec![new_version];
    }

    pub fn counterparty_matches(&self, other: &Counterparty) -> bool {
        self.counterparty.eq(other)
    }

    pub fn client_id_matches(&self, other: &ClientId) -> bool {
        self.client_id.eq(other)
    }

    pub fn is_open(&self) -> bool {
        self.state == State::Open
    }

    pub fn is_uninitialized(&self) -> bool {
        self.state == State::Uninitialized
    }

    pub fn verify_state_matches(&self, expected: &State) -> Result<(), ConnectionError> {
        if !self.state.eq(expected) {
            return Err(ConnectionError::MismatchedConnectionStates {
                expected: expected.to_string(),
                actual: self.state.to_string(),
            });
        }
        Ok(())
    }

    /// Returns the single negotiated version of a connection past `INIT`.
    pub fn negotiated_version(&self) -> Result<&Version, ConnectionError> {
        match self.versions.as_slice() {
            [version] => Ok(version),
            versions => Err(ConnectionError::InvalidVersionLength {
                actual: versions.len(),
            }),
        }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    pub fn counterparty(&self) -> &Counterparty {
        &self.counterparty
    }
}

/// The counterparty's view of the mirror connection end.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Counterparty {
    pub client_id: ClientId,
    pub connection_id: Option<ConnectionId>,
    pub prefix: CommitmentPrefix,
}

impl Protobuf<RawCounterparty> for Counterparty {}

impl TryFrom<RawCounterparty> for Counterparty {
    type Error = ConnectionError;

    fn try_from(raw_counterparty: RawCounterparty) -> Result<Self, Self::Error> {
        let connection_id = if raw_counterparty.connection_id.is_empty() {
            None
        } else {
            Some(raw_counterparty.connection_id.parse()?)
        };
        let prefix = raw_counterparty
            .prefix
            .ok_or(DecodingError::missing_field("prefix"))?
            .key_prefix
            .try_into()
            .map_err(|_| DecodingError::missing_field("key_prefix"))?;

        Ok(Counterparty::new(
            raw_counterparty.client_id.parse()?,
            connection_id,
            prefix,
        ))
    }
}

impl From<Counterparty> for RawCounterparty {
    fn from(value: Counterparty) -> Self {
        RawCounterparty {
            client_id: value.client_id.to_string(),
            connection_id: value
                .connection_id
                .map_or_else(String::new, |v| v.to_string()),
            prefix: Some(MerklePrefix {
                key_prefix: value.prefix.into_vec(),
            }),
        }
    }
}

impl Counterparty {
    pub fn new(
        client_id: ClientId,
        connection_id: Option<ConnectionId>,
        prefix: CommitmentPrefix,
    ) -> Self {
        Self {
            client_id,
            connection_id,
            prefix,
        }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn connection_id(&self) -> Option<&ConnectionId> {
        self.connection_id.as_ref()
    }

    pub fn prefix(&self) -> &CommitmentPrefix {
        &self.prefix
    }

    /// Called upon initiating a connection handshake on the host chain to verify
    /// that the counterparty connection id has not been set.
    pub fn verify_empty_connection_id(&self) -> Result<(), ConnectionError> {
        if self.connection_id().is_some() {
            return Err(ConnectionError::InvalidCounterparty {
                description: "counterparty connection id must be empty".to_string(),
            });
        }
        Ok(())
    }
}

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
}

impl State {
    /// Yields the State as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "UNINITIALIZED",
            Self::Init => "INIT",
            Self::TryOpen => "TRYOPEN",
            Self::Open => "OPEN",
        }
    }

    pub fn is_open(self) -> bool {
        self == State::Open
    }

    /// Returns whether this state has progressed less than or as far as
    /// `other` along the handshake.
    ///
    /// ```
    /// # use ibc_core_connection_types::State;
    /// assert!(State::Init.less_or_equal_progress(State::Open));
    /// assert!(State::TryOpen.less_or_equal_progress(State::TryOpen));
    /// assert!(!State::Open.less_or_equal_progress(State::Uninitialized));
    /// ```
    pub fn less_or_equal_progress(self, other: Self) -> bool {
        self <= other
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<i32> for State {
    type Error = ConnectionError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Uninitialized),
            1 => Ok(Self::Init),
            2 => Ok(Self::TryOpen),
            3 => Ok(Self::Open),
            _ => Err(ConnectionError::InvalidStateValue { value }),
        }
    }
}

impl From<State> for i32 {
    fn from(value: State) -> Self {
        value as i32
    }
}

/// The connections built on top of one client, as stored under
/// `clients/{client_id}/connections`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientConnections(pub Vec<ConnectionId>);

impl ClientConnections {
    pub fn push(&mut self, connection_id: ConnectionId) {
        if !self.0.contains(&connection_id) {
            self.0.push(connection_id);
        }
    }

    pub fn ids(&self) -> &[ConnectionId] {
        &self.0
    }
}

impl Protobuf<RawClientPaths> for ClientConnections {}

impl TryFrom<RawClientPaths> for ClientConnections {
    type Error = ConnectionError;

    fn try_from(value: RawClientPaths) -> Result<Self, Self::Error> {
        Ok(Self(
            value
                .paths
                .iter()
                .map(|id| id.parse())
                .collect::<Result<_, _>>()?,
        ))
    }
}

impl From<ClientConnections> for RawClientPaths {
    fn from(value: ClientConnections) -> Self {
        RawClientPaths {
            paths: value.0.iter().map(ToString::to_string).collect(),
        }
    }
}
