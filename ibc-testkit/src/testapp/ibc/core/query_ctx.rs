use core::fmt::Debug;

use ibc_core::channel::types::channel::{IdentifiedChannelEnd, Order};
use ibc_core::channel::types::packet::PacketState;
use ibc_core::client::types::Height;
use ibc_core::commitment_types::merkle::MerkleProof;
use ibc_core::connection::types::IdentifiedConnectionEnd;
use ibc_core::handler::types::error::ContextError;
use ibc_core::host::types::identifiers::{ClientId, ConnectionId, Sequence};
use ibc_core::host::types::path::{
    AckPath, ChannelEndPath, ClientConnectionPath, CommitmentPath, Path, ReceiptPath,
    SeqRecvPath, CHANNEL_PREFIX, CLIENT_PREFIX, CONNECTION_PREFIX, PACKET_ACK_PREFIX,
    PACKET_COMMITMENT_PREFIX, PORT_PREFIX,
};
use ibc_core::host::{ClientStateRef, ValidationContext};
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::proto::Protobuf;
use ibc_proto::ibc::core::commitment::v1::MerkleProof as RawMerkleProof;
use ibc_query::core::context::{ProvableContext, QueryContext};
use ibc_testkit_store::context::ProvableStore;
use ibc_testkit_store::types::{Height as StoreHeight, Path as StorePath};

use crate::testapp::ibc::core::types::MockIbcStore;

impl<S> ProvableContext for MockIbcStore<S>
where
    S: ProvableStore + Debug,
{
    /// The proof of `path` in the IBC store chained with the proof of the
    /// IBC store root under the commitment prefix.
    fn get_proof(&self, height: Height, path: &Path) -> Option<Vec<u8>> {
        let ibc_proof = self.store.get_proof(
            StoreHeight::Stable(height.value()),
            &StorePath::from(path.clone()),
        )?;
        let commitment_proof = self
            .ibc_commitment_proofs
            .lock()
            .get(&height.value())
            .cloned()?;

        let merkle_proof = MerkleProof {
            proofs: vec![ibc_proof, commitment_proof],
        };

        Some(Protobuf::<RawMerkleProof>::encode_vec(merkle_proof))
    }
}

impl<S> MockIbcStore<S>
where
    S: ProvableStore + Debug,
{
    fn channel_keys(channel_end_path: &ChannelEndPath, kind: &str) -> String {
        format!(
            "{PORT_PREFIX}/{}/{CHANNEL_PREFIX}/{}/{kind}",
            channel_end_path.0, channel_end_path.1
        )
    }

    fn is_received(&self, channel_end_path: &ChannelEndPath, seq: Sequence) -> bool {
        let ordering = self
            .channel_end(channel_end_path)
            .map(|channel_end| *channel_end.ordering());

        match ordering {
            Ok(Order::Ordered) => self
                .get_next_sequence_recv(&SeqRecvPath::new(&channel_end_path.0, &channel_end_path.1))
                .map(|next_seq_recv| seq < next_seq_recv)
                .unwrap_or(false),
            _ => self.packet_receipt_store.is_path_set(
                StoreHeight::Pending,
                &ReceiptPath::new(&channel_end_path.0, &channel_end_path.1, seq),
            ),
        }
    }
}

impl<S> QueryContext for MockIbcStore<S>
where
    S: ProvableStore + Debug,
{
    fn client_states(&self) -> Result<Vec<(ClientId, ClientStateRef<Self>)>, ContextError> {
        Ok(self
            .ibc_paths(CLIENT_PREFIX)
            .into_iter()
            .filter_map(|path| match path {
                Path::ClientState(path) => {
                    let client_state = self.client_state_at(&path.0)?;
                    Some((path.0, client_state))
                }
                _ => None,
            })
            .collect())
    }

    fn consensus_state_heights(&self, client_id: &ClientId) -> Result<Vec<Height>, ContextError> {
        Ok(self.consensus_heights(client_id))
    }

    fn connection_ends(&self) -> Result<Vec<IdentifiedConnectionEnd>, ContextError> {
        self.ibc_paths(CONNECTION_PREFIX)
            .into_iter()
            .filter_map(|path| match path {
                Path::Connection(path) => Some(path.0),
                _ => None,
            })
            .map(|connection_id| {
                let connection_end = self.connection_end(&connection_id)?;
                Ok(IdentifiedConnectionEnd::new(connection_id, connection_end))
            })
            .collect()
    }

    fn client_connection_ends(
        &self,
        client_id: &ClientId,
    ) -> Result<Vec<ConnectionId>, ContextError> {
        Ok(self
            .connection_ids_store
            .get(
                StoreHeight::Pending,
                &ClientConnectionPath::new(client_id.clone()),
            )
            .map(|conn_ids| conn_ids.0)
            .unwrap_or_default())
    }

    fn channel_ends(&self) -> Result<Vec<IdentifiedChannelEnd>, ContextError> {
        self.ibc_paths(PORT_PREFIX)
            .into_iter()
            .filter_map(|path| match path {
                Path::ChannelEnd(path) => Some(path),
                _ => None,
            })
            .map(|channel_end_path| {
                let channel_end = self.channel_end(&channel_end_path)?;
                Ok(IdentifiedChannelEnd::new(
                    channel_end_path.0,
                    channel_end_path.1,
                    channel_end,
                ))
            })
            .collect()
    }

    fn packet_commitments(
        &self,
        channel_end_path: &ChannelEndPath,
    ) -> Result<Vec<PacketState>, ContextError> {
        // Keys come in store order, which is sequence order.
        let packet_states = self
            .ibc_paths(Self::channel_keys(channel_end_path, PACKET_COMMITMENT_PREFIX))
            .into_iter()
            .filter_map(|path| match path {
                Path::Commitment(path) => {
                    let commitment = self
                        .packet_commitment_store
                        .get(StoreHeight::Pending, &path)?;
                    Some(PacketState {
                        port_id: path.port_id,
                        chan_id: path.channel_id,
                        seq: path.sequence,
                        data: commitment.into_vec(),
                    })
                }
                _ => None,
            })
            .collect();
        Ok(packet_states)
    }

    fn packet_acknowledgements(
        &self,
        channel_end_path: &ChannelEndPath,
        sequences: impl ExactSizeIterator<Item = Sequence>,
    ) -> Result<Vec<PacketState>, ContextError> {
        let ack_paths: Vec<AckPath> = if sequences.len() == 0 {
            self.ibc_paths(Self::channel_keys(channel_end_path, PACKET_ACK_PREFIX))
                .into_iter()
                .filter_map(|path| match path {
                    Path::Ack(path) => Some(path),
                    _ => None,
                })
                .collect()
        } else {
            sequences
                .map(|seq| AckPath::new(&channel_end_path.0, &channel_end_path.1, seq))
                .collect()
        };

        let packet_states = ack_paths
            .into_iter()
            .filter_map(|ack_path| {
                let ack_commitment = self.packet_ack_store.get(StoreHeight::Pending, &ack_path)?;
                Some(PacketState {
                    port_id: ack_path.port_id,
                    chan_id: ack_path.channel_id,
                    seq: ack_path.sequence,
                    data: ack_commitment.into_vec(),
                })
            })
            .collect();
        Ok(packet_states)
    }

    fn unreceived_packets(
        &self,
        channel_end_path: &ChannelEndPath,
        sequences: impl ExactSizeIterator<Item = Sequence>,
    ) -> Result<Vec<Sequence>, ContextError> {
        Ok(sequences
            .filter(|&seq| !self.is_received(channel_end_path, seq))
            .collect())
    }

    fn unreceived_acks(
        &self,
        channel_end_path: &ChannelEndPath,
        sequences: impl ExactSizeIterator<Item = Sequence>,
    ) -> Result<Vec<Sequence>, ContextError> {
        if sequences.len() == 0 {
            return Ok(self
                .packet_commitments(channel_end_path)?
                .into_iter()
                .map(|state| state.seq)
                .collect());
        }

        // The commitment of a sent packet is deleted once its acknowledgement
        // is processed.
        Ok(sequences
            .filter(|&seq| {
                self.packet_commitment_store.has(
                    StoreHeight::Pending,
                    &CommitmentPath::new(&channel_end_path.0, &channel_end_path.1, seq),
                )
            })
            .collect())
    }
}
