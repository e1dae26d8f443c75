//! Defines the client message types that are sent to the chain by the relayer.

use ibc_primitives::prelude::*;

mod create_client;
mod update_client;

pub use create_client::*;
pub use update_client::*;

/// Encodes all the different client messages
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From)]
pub enum ClientMsg {
    CreateClient(MsgCreateClient),
    UpdateClient(MsgUpdateClient),
}

impl ClientMsg {
    pub fn type_url(&self) -> String {
        match self {
            Self::CreateClient(_) => CREATE_CLIENT_TYPE_URL.to_string(),
            Self::UpdateClient(_) => UPDATE_CLIENT_TYPE_URL.to_string(),
        }
    }
}
