//! Types for the IBC events emitted by the connection module.

use ibc_core_host_types::identifiers::{ClientId, ConnectionId};
use ibc_primitives::prelude::*;
use tendermint::abci;

/// Connection event types
pub const CONNECTION_OPEN_INIT_EVENT: &str = "connection_open_init";
pub const CONNECTION_OPEN_TRY_EVENT: &str = "connection_open_try";
pub const CONNECTION_OPEN_ACK_EVENT: &str = "connection_open_ack";
pub const CONNECTION_OPEN_CONFIRM_EVENT: &str = "connection_open_confirm";

pub const CONN_ID_ATTRIBUTE_KEY: &str = "connection_id";
pub const CLIENT_ID_ATTRIBUTE_KEY: &str = "client_id";
pub const COUNTERPARTY_CONN_ID_ATTRIBUTE_KEY: &str = "counterparty_connection_id";
pub const COUNTERPARTY_CLIENT_ID_ATTRIBUTE_KEY: &str = "counterparty_client_id";

#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Attributes {
    connection_id: ConnectionId,
    client_id: ClientId,
    counterparty_connection_id: Option<ConnectionId>,
    counterparty_client_id: ClientId,
}

impl From<Attributes> for Vec<abci::EventAttribute> {
    fn from(a: Attributes) -> Self {
        vec![
            (CONN_ID_ATTRIBUTE_KEY, a.connection_id.as_str()).into(),
            (CLIENT_ID_ATTRIBUTE_KEY, a.client_id.as_str()).into(),
            (
                COUNTERPARTY_CLIENT_ID_ATTRIBUTE_KEY,
                a.counterparty_client_id.as_str(),
            )
                .into(),
            (
                COUNTERPARTY_CONN_ID_ATTRIBUTE_KEY,
                a.counterparty_connection_id
                    .as_ref()
                    .map(|id| id.as_str())
                    .unwrap_or(""),
            )
                .into(),
        ]
    }
}

macro_rules! connection_event {
    ($(#[$meta:meta])* $name:ident, $kind:ident, $conn:ident, $client:ident, $cp_conn:ident, $cp_client:ident) => {
        $(#[$meta])*
        #[cfg_attr(
            feature = "borsh",
            derive(borsh::BorshSerialize, borsh::BorshDeserialize)
        )]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name(Attributes);

        impl $name {
            pub fn $conn(&self) -> &ConnectionId {
                &self.0.connection_id
            }

            pub fn $client(&self) -> &ClientId {
                &self.0.client_id
            }

            pub fn $cp_conn(&self) -> Option<&ConnectionId> {
                self.0.counterparty_connection_id.as_ref()
            }

            pub fn $cp_client(&self) -> &ClientId {
                &self.0.counterparty_client_id
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

connection_event!(
    /// Emitted on chain A by `ConnOpenInit`.
    OpenInit,
    CONNECTION_OPEN_INIT_EVENT,
    conn_id_on_a,
    client_id_on_a,
    conn_id_on_b,
    client_id_on_b
);

connection_event!(
    /// Emitted on chain B by `ConnOpenTry`.
    OpenTry,
    CONNECTION_OPEN_TRY_EVENT,
    conn_id_on_b,
    client_id_on_b,
    conn_id_on_a,
    client_id_on_a
);

connection_event!(
    /// Emitted on chain A by `ConnOpenAck`.
    OpenAck,
    CONNECTION_OPEN_ACK_EVENT,
    conn_id_on_a,
    client_id_on_a,
    conn_id_on_b,
    client_id_on_b
);

connection_event!(
    /// Emitted on chain B by `ConnOpenConfirm`.
    OpenConfirm,
    CONNECTION_OPEN_CONFIRM_EVENT,
    conn_id_on_b,
    client_id_on_b,
    conn_id_on_a,
    client_id_on_a
);

impl OpenInit {
    pub fn new(
        conn_id_on_a: ConnectionId,
        client_id_on_a: ClientId,
        client_id_on_b: ClientId,
    ) -> Self {
        Self(Attributes {
            connection_id: conn_id_on_a,
            client_id: client_id_on_a,
            counterparty_connection_id: None,
            counterparty_client_id: client_id_on_b,
        })
    }
}

impl OpenTry {
    pub fn new(
        conn_id_on_b: ConnectionId,
        client_id_on_b: ClientId,
        conn_id_on_a: ConnectionId,
        client_id_on_a: ClientId,
    ) -> Self {
        Self(Attributes {
            connection_id: conn_id_on_b,
            client_id: client_id_on_b,
            counterparty_connection_id: Some(conn_id_on_a),
            counterparty_client_id: client_id_on_a,
        })
    }
}

impl OpenAck {
    pub fn new(
        conn_id_on_a: ConnectionId,
        client_id_on_a: ClientId,
        conn_id_on_b: ConnectionId,
        client_id_on_b: ClientId,
    ) -> Self {
        Self(Attributes {
            connection_id: conn_id_on_a,
            client_id: client_id_on_a,
            counterparty_connection_id: Some(conn_id_on_b),
            counterparty_client_id: client_id_on_b,
        })
    }
}

impl OpenConfirm {
    pub fn new(
        conn_id_on_b: ConnectionId,
        client_id_on_b: ClientId,
        conn_id_on_a: ConnectionId,
        client_id_on_a: ClientId,
    ) -> Self {
        Self(Attributes {
            connection_id: conn_id_on_b,
            client_id: client_id_on_b,
            counterparty_connection_id: Some(conn_id_on_a),
            counterparty_client_id: client_id_on_a,
        })
    }
}
