use ibc_core_client_types::Height;
use ibc_core_commitment_types::commitment::CommitmentProofBytes;
use ibc_core_host_types::identifiers::{ChannelId, ConnectionId, PortId};
use ibc_primitives::prelude::*;
use ibc_primitives::Signer;

use crate::channel::{verify_connection_hops_length, Order};
use crate::error::ChannelError;
use crate::Version;

pub const CHAN_OPEN_TRY_TYPE_URL: &str = "/ibc.core.channel.v1.MsgChannelOpenTry";

/// Second step of the channel handshake, sent to chain B.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgChannelOpenTry {
    pub port_id_on_b: PortId,
    /// chosen by the sender
    pub chan_id_on_b: ChannelId,
    pub connection_hops_on_b: Vec<ConnectionId>,
    pub port_id_on_a: PortId,
    pub chan_id_on_a: ChannelId,
    /// version recorded by chain A on `ChanOpenInit`
    pub version_supported_on_a: Version,
    /// version proposed for chain B's end; the module callback may replace it
    pub version_proposal: Version,
    /// proof of chain A's channel end in `INIT`
    pub proof_chan_end_on_a: CommitmentProofBytes,
    pub proof_height_on_a: Height,
    pub ordering: Order,
    pub signer: Signer,
}

impl MsgChannelOpenTry {
    pub fn verify_connection_hops_length(&self) -> Result<(), ChannelError> {
        verify_connection_hops_length(&self.connection_hops_on_b)
    }
}
