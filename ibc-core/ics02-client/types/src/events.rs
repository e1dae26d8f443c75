//! Types for the IBC events emitted by the client module.

use ibc_core_host_types::identifiers::{ClientId, ClientType};
use ibc_primitives::prelude::*;
use subtle_encoding::hex;
use tendermint::abci;

use crate::height::Height;

/// Client event types
pub const CREATE_CLIENT_EVENT: &str = "create_client";
pub const UPDATE_CLIENT_EVENT: &str = "update_client";

/// The content of the `key` field for the attribute containing the client identifier.
pub const CLIENT_ID_ATTRIBUTE_KEY: &str = "client_id";

/// The content of the `key` field for the attribute containing the client type.
pub const CLIENT_TYPE_ATTRIBUTE_KEY: &str = "client_type";

/// The content of the `key` field for the attribute containing the height.
pub const CONSENSUS_HEIGHT_ATTRIBUTE_KEY: &str = "consensus_height";

/// The content of the `key` field for the header in update client event.
pub const HEADER_ATTRIBUTE_KEY: &str = "header";

/// CreateClient event signals the creation of a new on-chain client (IBC client).
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateClient {
    client_id: ClientId,
    client_type: ClientType,
    consensus_height: Height,
}

impl CreateClient {
    pub fn new(client_id: ClientId, client_type: ClientType, consensus_height: Height) -> Self {
        Self {
            client_id,
            client_type,
            consensus_height,
        }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn client_type(&self) -> &ClientType {
        &self.client_type
    }

    pub fn consensus_height(&self) -> &Height {
        &self.consensus_height
    }

    pub fn event_type(&self) -> &str {
        CREATE_CLIENT_EVENT
    }
}

impl From<CreateClient> for abci::Event {
    fn from(c: CreateClient) -> Self {
        Self {
            kind: CREATE_CLIENT_EVENT.to_owned(),
            attributes: vec![
                (CLIENT_ID_ATTRIBUTE_KEY, c.client_id.as_str()).into(),
                (CLIENT_TYPE_ATTRIBUTE_KEY, c.client_type.as_str()).into(),
                (
                    CONSENSUS_HEIGHT_ATTRIBUTE_KEY,
                    c.consensus_height.to_string(),
                )
                    .into(),
            ],
        }
    }
}

/// UpdateClient event signals a recent update of an on-chain client (IBC Client).
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateClient {
    client_id: ClientId,
    client_type: ClientType,
    consensus_height: Height,
    header: Vec<u8>,
}

impl UpdateClient {
    /// Constructs a new UpdateClient event.
    ///
    /// NOTE: the `header` is the encoded bytes of the
    /// [`Any`](ibc_proto::google::protobuf::Any) type.
    pub fn new(
        client_id: ClientId,
        client_type: ClientType,
        consensus_height: Height,
        header: Vec<u8>,
    ) -> Self {
        Self {
            client_id,
            client_type,
            consensus_height,
            header,
        }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn client_type(&self) -> &ClientType {
        &self.client_type
    }

    pub fn consensus_height(&self) -> &Height {
        &self.consensus_height
    }

    pub fn header(&self) -> &Vec<u8> {
        &self.header
    }

    pub fn event_type(&self) -> &str {
        UPDATE_CLIENT_EVENT
    }
}

impl From<UpdateClient> for abci::Event {
    fn from(u: UpdateClient) -> Self {
        let header = String::from_utf8(hex::encode(&u.header))
            .unwrap_or_default();
        Self {
            kind: UPDATE_CLIENT_EVENT.to_owned(),
            attributes: vec![
                (CLIENT_ID_ATTRIBUTE_KEY, u.client_id.as_str()).into(),
                (CLIENT_TYPE_ATTRIBUTE_KEY, u.client_type.as_str()).into(),
                (
                    CONSENSUS_HEIGHT_ATTRIBUTE_KEY,
                    u.consensus_height.to_string(),
                )
                    .into(),
                (HEADER_ATTRIBUTE_KEY, header).into(),
            ],
        }
    }
}
