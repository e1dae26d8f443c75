//! Host-side traits the query functions are written against.

use alloc::vec::Vec;

use ibc_core::channel::types::channel::IdentifiedChannelEnd;
use ibc_core::channel::types::packet::PacketState;
use ibc_core::client::types::Height;
use ibc_core::connection::types::IdentifiedConnectionEnd;
use ibc_core::handler::types::error::ContextError;
use ibc_core::host::types::identifiers::{ClientId, ConnectionId, Sequence};
use ibc_core::host::types::path::{ChannelEndPath, Path};
use ibc_core::host::{ClientStateRef, ValidationContext};

/// Proofs over the host's committed store.
pub trait ProvableContext {
    /// Returns the proof for `path` under the commitment root of `height`:
    /// a membership proof when a value is stored there, a non-membership
    /// proof otherwise. `None` if the host kept no root for that height.
    fn get_proof(&self, height: Height, path: &Path) -> Option<Vec<u8>>;
}

/// Enumeration of the IBC store, on top of the point lookups of
/// [`ValidationContext`].
pub trait QueryContext: ProvableContext + ValidationContext {
    /// All clients, with their current client state.
    fn client_states(&self) -> Result<Vec<(ClientId, ClientStateRef<Self>)>, ContextError>;

    /// The heights of every consensus state stored for `client_id`, in
    /// ascending order.
    fn consensus_state_heights(&self, client_id: &ClientId) -> Result<Vec<Height>, ContextError>;

    fn connection_ends(&self) -> Result<Vec<IdentifiedConnectionEnd>, ContextError>;

    /// The connections opened on top of `client_id`, in creation order.
    fn client_connection_ends(
        &self,
        client_id: &ClientId,
    ) -> Result<Vec<ConnectionId>, ContextError>;

    fn channel_ends(&self) -> Result<Vec<IdentifiedChannelEnd>, ContextError>;

    /// Every packet commitment still stored for the channel.
    fn packet_commitments(
        &self,
        channel_end_path: &ChannelEndPath,
    ) -> Result<Vec<PacketState>, ContextError>;

    /// The acknowledgement hashes written for `sequences` on the channel, or
    /// for every sequence when `sequences` is empty.
    fn packet_acknowledgements(
        &self,
        channel_end_path: &ChannelEndPath,
        sequences: impl ExactSizeIterator<Item = Sequence>,
    ) -> Result<Vec<PacketState>, ContextError>;

    /// The subset of `sequences` the channel has not received yet.
    fn unreceived_packets(
        &self,
        channel_end_path: &ChannelEndPath,
        sequences: impl ExactSizeIterator<Item = Sequence>,
    ) -> Result<Vec<Sequence>, ContextError>;

    /// The subset of `sequences` whose commitment is still stored, meaning
    /// their acknowledgement has not been processed. Every such sequence
    /// when `sequences` is empty.
    fn unreceived_acks(
        &self,
        channel_end_path: &ChannelEndPath,
        sequences: impl ExactSizeIterator<Item = Sequence>,
    ) -> Result<Vec<Sequence>, ContextError>;
}
