use ibc_core_host_types::identifiers::{ChannelId, ConnectionId, PortId};
use ibc_primitives::prelude::*;
use ibc_primitives::Signer;

use crate::channel::{verify_connection_hops_length, Order};
use crate::error::ChannelError;
use crate::Version;

pub const CHAN_OPEN_INIT_TYPE_URL: &str = "/ibc.core.channel.v1.MsgChannelOpenInit";

/// First step of the channel handshake, sent to chain A by the application
/// owning `port_id_on_a`.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgChannelOpenInit {
    pub port_id_on_a: PortId,
    /// chosen by the sender
    pub chan_id_on_a: ChannelId,
    pub connection_hops_on_a: Vec<ConnectionId>,
    pub port_id_on_b: PortId,
    pub ordering: Order,
    pub signer: Signer,
    /// proposed application version; the module callback may replace it
    pub version_proposal: Version,
}

impl MsgChannelOpenInit {
    pub fn verify_connection_hops_length(&self) -> Result<(), ChannelError> {
        verify_connection_hops_length(&self.connection_hops_on_a)
    }
}
