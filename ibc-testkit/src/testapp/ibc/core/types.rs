//! The IBC store of a mock chain.

use core::fmt::Debug;
use std::collections::BTreeMap;
use std::sync::Arc;

use ibc_core::channel::types::channel::ChannelEnd;
use ibc_core::channel::types::commitment::{AcknowledgementCommitment, PacketCommitment};
use ibc_core::client::types::Height;
use ibc_core::commitment_types::commitment::CommitmentPrefix;
use ibc_core::connection::types::{ClientConnections, ConnectionEnd};
use ibc_core::handler::types::events::IbcEvent;
use ibc_core::host::types::identifiers::{ClientId, Sequence};
use ibc_core::host::types::path::{
    full_consensus_state_path, AckPath, ChannelEndPath, ClientConnectionPath,
    ClientConsensusStatePath, ClientStatePath, CommitmentPath, ConnectionPath,
    NextClientSequencePath, Path as IbcPath, ReceiptPath, SeqAckPath, SeqRecvPath, SeqSendPath,
};
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::proto::Any;
use ibc_proto::ibc::core::channel::v1::Channel as RawChannelEnd;
use ibc_proto::ibc::core::connection::v1::{
    ClientPaths as RawClientPaths, ConnectionEnd as RawConnectionEnd,
};
use ibc_testkit_store::context::{ProvableStore, Store};
use ibc_testkit_store::impls::{InMemoryStore, RevertibleStore, SharedStore};
use ibc_testkit_store::types::{
    BinStore, Height as StoreHeight, Path, ProtobufStore, TypedSet, TypedStore,
};
use ibc_testkit_store::utils::Codec;
use ics23::CommitmentProof;
use parking_lot::Mutex;

use crate::testapp::ibc::clients::mock::consensus_state::MockConsensusState;
use crate::testapp::ibc::clients::{AnyClientState, AnyConsensusState};

pub const DEFAULT_BLOCK_TIME_SECS: u64 = 3;

/// The commitment prefix mock chains commit their IBC store under.
pub const DEFAULT_COMMITMENT_PREFIX: &str = "ibc";

/// Big-endian `u64`, the encoding of counters and sequence numbers.
#[derive(Clone, Debug)]
pub struct SequenceCodec;

impl Codec for SequenceCodec {
    type Type = Sequence;

    fn encode(d: &Self::Type) -> Vec<u8> {
        d.to_vec()
    }

    fn decode(bytes: &[u8]) -> Option<Self::Type> {
        Sequence::from_be_slice(bytes)
    }
}

#[derive(Clone, Debug)]
pub struct CounterCodec;

impl Codec for CounterCodec {
    type Type = u64;

    fn encode(d: &Self::Type) -> Vec<u8> {
        d.to_be_bytes().to_vec()
    }

    fn decode(bytes: &[u8]) -> Option<Self::Type> {
        Some(u64::from_be_bytes(bytes.try_into().ok()?))
    }
}

pub type SequenceStore<S, K> = TypedStore<SharedStore<S>, K, SequenceCodec>;

/// An object that stores all IBC related data.
///
/// Every field below is a typed view of the same shared store, so what a
/// handler writes through one of them is committed, proven and rolled back
/// together.
#[derive(Debug)]
pub struct MockIbcStore<S>
where
    S: ProvableStore + Debug,
{
    /// Handle to the store holding every IBC path.
    pub store: SharedStore<S>,
    /// Number of clients created so far.
    pub client_counter: TypedStore<SharedStore<S>, NextClientSequencePath, CounterCodec>,
    pub client_state_store: ProtobufStore<SharedStore<S>, ClientStatePath, AnyClientState, Any>,
    pub consensus_state_store:
        ProtobufStore<SharedStore<S>, ClientConsensusStatePath, AnyConsensusState, Any>,
    pub connection_end_store:
        ProtobufStore<SharedStore<S>, ConnectionPath, ConnectionEnd, RawConnectionEnd>,
    /// The connections built on top of each client.
    pub connection_ids_store:
        ProtobufStore<SharedStore<S>, ClientConnectionPath, ClientConnections, RawClientPaths>,
    pub channel_end_store: ProtobufStore<SharedStore<S>, ChannelEndPath, ChannelEnd, RawChannelEnd>,
    pub send_sequence_store: SequenceStore<S, SeqSendPath>,
    pub recv_sequence_store: SequenceStore<S, SeqRecvPath>,
    pub ack_sequence_store: SequenceStore<S, SeqAckPath>,
    pub packet_commitment_store: BinStore<SharedStore<S>, CommitmentPath, PacketCommitment>,
    pub packet_receipt_store: TypedSet<SharedStore<S>, ReceiptPath>,
    pub packet_ack_store: BinStore<SharedStore<S>, AckPath, AcknowledgementCommitment>,
    /// The consensus state of each committed height of this chain.
    pub host_consensus_states: Arc<Mutex<BTreeMap<u64, MockConsensusState>>>,
    /// Proof that the IBC store root at a height is stored under the
    /// commitment prefix in the main store.
    pub ibc_commitment_proofs: Arc<Mutex<BTreeMap<u64, CommitmentProof>>>,
    pub commitment_prefix: CommitmentPrefix,
    /// Emitted IBC events in order
    pub events: Arc<Mutex<Vec<IbcEvent>>>,
    /// Logs of the IBC module
    pub logs: Arc<Mutex<Vec<String>>>,
}

pub type DefaultIbcStore = MockIbcStore<RevertibleStore<InMemoryStore>>;

impl<S> MockIbcStore<S>
where
    S: ProvableStore + Debug,
{
    pub fn new(store: S, commitment_prefix: CommitmentPrefix) -> Self {
        let mut shared_store = SharedStore::new(store);

        let mut client_counter = TypedStore::new(shared_store.share());
        // The counter keeps the store non-empty, so that every path has a
        // non-membership proof from the first block on.
        client_counter
            .set(NextClientSequencePath, 0)
            .expect("no error");
        shared_store.apply().expect("no error");

        Self {
            client_counter,
            client_state_store: TypedStore::new(shared_store.share()),
            consensus_state_store: TypedStore::new(shared_store.share()),
            connection_end_store: TypedStore::new(shared_store.share()),
            connection_ids_store: TypedStore::new(shared_store.share()),
            channel_end_store: TypedStore::new(shared_store.share()),
            send_sequence_store: TypedStore::new(shared_store.share()),
            recv_sequence_store: TypedStore::new(shared_store.share()),
            ack_sequence_store: TypedStore::new(shared_store.share()),
            packet_commitment_store: TypedStore::new(shared_store.share()),
            packet_receipt_store: TypedStore::new(shared_store.share()),
            packet_ack_store: TypedStore::new(shared_store.share()),
            host_consensus_states: Arc::new(Mutex::new(BTreeMap::new())),
            ibc_commitment_proofs: Arc::new(Mutex::new(BTreeMap::new())),
            commitment_prefix,
            events: Arc::new(Mutex::new(Vec::new())),
            logs: Arc::new(Mutex::new(Vec::new())),
            store: shared_store,
        }
    }

    /// Records what the host committed at `height`: its consensus state and
    /// the proof of the IBC root in the main store.
    pub fn begin_block(
        &mut self,
        height: u64,
        consensus_state: MockConsensusState,
        ibc_commitment_proof: CommitmentProof,
    ) {
        self.host_consensus_states
            .lock()
            .insert(height, consensus_state);
        self.ibc_commitment_proofs
            .lock()
            .insert(height, ibc_commitment_proof);
    }

    /// Commits the pending IBC state and returns its root.
    pub fn end_block(&mut self) -> Result<Vec<u8>, <SharedStore<S> as Store>::Error> {
        self.store.commit()
    }

    /// Keeps the writes of the last transaction.
    pub fn apply(&mut self) -> Result<(), <SharedStore<S> as Store>::Error> {
        self.store.apply()
    }

    /// Drops the writes and events of a failed transaction; `events_len` and
    /// `logs_len` are the lengths before it ran.
    pub fn revert(&mut self, events_len: usize, logs_len: usize) {
        self.store.reset();
        self.events.lock().truncate(events_len);
        self.logs.lock().truncate(logs_len);
    }

    /// Number of committed blocks.
    pub fn committed_height(&self) -> u64 {
        self.store.current_height()
    }

    /// Typed keys under `prefix` that parse as IBC paths.
    pub(crate) fn ibc_paths(&self, prefix: impl Into<Path>) -> Vec<IbcPath> {
        self.store
            .get_keys(&prefix.into())
            .into_iter()
            .filter_map(|path| path.as_str().parse().ok())
            .collect()
    }

    pub(crate) fn client_state_at(&self, client_id: &ClientId) -> Option<AnyClientState> {
        self.client_state_store
            .get(StoreHeight::Pending, &ClientStatePath::new(client_id.clone()))
    }

    pub(crate) fn consensus_heights(&self, client_id: &ClientId) -> Vec<Height> {
        let mut heights: Vec<Height> = self
            .ibc_paths(full_consensus_state_path(client_id))
            .into_iter()
            .filter_map(|path| match path {
                IbcPath::ClientConsensusState(path) if &path.client_id == client_id => {
                    Height::new(path.height).ok()
                }
                _ => None,
            })
            .collect();
        heights.sort();
        heights
    }
}

impl<S> Default for MockIbcStore<S>
where
    S: ProvableStore + Debug + Default,
{
    fn default() -> Self {
        Self::new(
            S::default(),
            CommitmentPrefix::try_from(DEFAULT_COMMITMENT_PREFIX.as_bytes().to_vec())
                .expect("Never fails"),
        )
    }
}
