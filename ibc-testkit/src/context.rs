use core::fmt::Debug;
use core::time::Duration;

use ibc_core::channel::handler::{send_packet, write_acknowledgement};
use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::channel::types::channel::ChannelEnd;
use ibc_core::channel::types::commitment::PacketCommitment;
use ibc_core::channel::types::packet::Packet;
use ibc_core::client::context::ClientExecutionContext;
use ibc_core::client::types::Height;
use ibc_core::connection::types::ConnectionEnd;
use ibc_core::entrypoint::{deliver_tx, dispatch};
use ibc_core::handler::types::error::ContextError;
use ibc_core::handler::types::events::IbcEvent;
use ibc_core::handler::types::msgs::MsgEnvelope;
use ibc_core::host::types::identifiers::{ChannelId, ClientId, ConnectionId, PortId, Sequence};
use ibc_core::host::types::path::{
    ChannelEndPath, ClientConnectionPath, ClientConsensusStatePath, ClientStatePath,
    CommitmentPath, ConnectionPath, SeqAckPath, SeqRecvPath, SeqSendPath,
};
use ibc_core::host::{ExecutionContext, ValidationContext};
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Timestamp;
use ibc_core::router::types::module::ModuleId;
use ibc_testkit_store::context::{ProvableStore, Store};
use ibc_testkit_store::impls::{InMemoryStore, RevertibleStore};
use ibc_testkit_store::types::{Height as StoreHeight, Path};
use tracing::debug;

use crate::fixtures::core::context::MockContextConfig;
use crate::hosts::MockHost;
use crate::relayer::error::RelayerError;
use crate::testapp::ibc::applications::mock::MOCK_MODULE_ID;
use crate::testapp::ibc::clients::mock::client_state::MockClientState;
use crate::testapp::ibc::clients::mock::consensus_state::MockConsensusState;
use crate::testapp::ibc::clients::mock::header::MockHeader;
use crate::testapp::ibc::clients::{AnyClientState, AnyConsensusState};
use crate::testapp::ibc::core::router::MockRouter;
use crate::testapp::ibc::core::types::MockIbcStore;

/// A mock chain: a main store committing the root of an IBC store under the
/// commitment prefix, a block history and a router.
#[derive(Debug)]
pub struct MockGenericContext<S>
where
    S: ProvableStore + Debug,
{
    /// The main store of the context, whose root is the application hash
    /// of each block.
    pub main_store: S,

    /// The blocks produced so far.
    pub host: MockHost,

    /// An object that stores all IBC related data.
    pub ibc_store: MockIbcStore<S>,

    /// A router that can route messages to the appropriate IBC application.
    pub ibc_router: MockRouter,
}

pub type MockStore = RevertibleStore<InMemoryStore>;
pub type MockContext = MockGenericContext<MockStore>;

/// Returns a MockContext with bare minimum initialization: no clients, no
/// connections and no channels are present, and the chain has Height(5).
impl<S> Default for MockGenericContext<S>
where
    S: ProvableStore + Debug + Default,
{
    fn default() -> Self {
        MockContextConfig::builder().build()
    }
}

/// Implementation of internal interface for use in testing. The methods in
/// this interface should _not_ be accessible to any handler.
impl<S> MockGenericContext<S>
where
    S: ProvableStore + Debug,
{
    pub fn ibc_store(&self) -> &MockIbcStore<S> {
        &self.ibc_store
    }

    pub fn ibc_store_mut(&mut self) -> &mut MockIbcStore<S> {
        &mut self.ibc_store
    }

    pub fn host_block(&self, target_height: &Height) -> Option<MockHeader> {
        self.host.get_block(target_height)
    }

    fn commitment_path(&self) -> Path {
        Path::from(String::from_utf8_lossy(self.ibc_store.commitment_prefix.as_bytes()).into_owned())
    }

    /// Records the latest block in the IBC store: its consensus state and
    /// the proof of the IBC root in the main store.
    pub fn begin_block(&mut self) {
        let latest_block = self.host.latest_block();
        let height = latest_block.height().value();

        let ibc_commitment_proof = self
            .main_store
            .get_proof(StoreHeight::Stable(height), &self.commitment_path())
            .expect("the IBC root is committed at every height");

        self.ibc_store.begin_block(
            height,
            MockConsensusState::new(latest_block),
            ibc_commitment_proof,
        );
    }

    /// Commits the IBC store and writes its root in the main store.
    pub fn end_block(&mut self) {
        let ibc_store_commitment = self.ibc_store.end_block().expect("no error");

        let commitment_path = self.commitment_path();
        self.main_store
            .set(commitment_path, ibc_store_commitment)
            .expect("no error");
    }

    /// Commits the main store and appends a block carrying its root.
    pub fn produce_block(&mut self) {
        let main_store_commitment = self.main_store.commit().expect("no error");
        self.host.advance_block(main_store_commitment);
    }

    pub fn advance_block(&mut self) {
        self.end_block();
        self.produce_block();
        self.begin_block();

        debug!(height = %self.latest_height(), "mock chain advanced");
    }

    pub fn advance_block_up_to(mut self, target_height: Height) -> Self {
        assert!(
            !self.host.is_empty() && target_height >= self.latest_height(),
            "Cannot rewind history of the chain to a smaller height!"
        );

        while self.latest_height() < target_height {
            self.advance_block();
        }
        self
    }

    /// Advances blocks until the chain time is at or past `timestamp`.
    pub fn advance_block_to_timestamp(&mut self, timestamp: Timestamp) {
        while self.latest_timestamp() < timestamp {
            self.advance_block();
        }
    }

    pub fn latest_height(&self) -> Height {
        let latest_ibc_height = self.ibc_store.host_height().expect("Never fails");
        let latest_host_height = self.host.latest_height();
        assert_eq!(
            latest_ibc_height, latest_host_height,
            "The IBC store and the host chain must have the same height"
        );
        latest_ibc_height
    }

    pub fn latest_timestamp(&self) -> Timestamp {
        self.host.latest_block().timestamp
    }

    pub fn timestamp_at(&self, height: Height) -> Timestamp {
        self.host
            .get_block(&height)
            .expect("block exists")
            .timestamp
    }

    pub fn block_time(&self) -> Duration {
        self.host.block_time
    }

    /// A client of this chain at its latest height, with the matching
    /// consensus state.
    pub fn generate_light_client(&self) -> (MockClientState, MockConsensusState) {
        let latest_height = self.latest_height();
        (
            self.host.generate_client_state(&latest_height),
            self.host
                .consensus_state_at(&latest_height)
                .expect("block exists"),
        )
    }

    /// Keeps the writes made by a builder method out of reach of the next
    /// failed transaction.
    fn keep_writes(mut self) -> Self {
        self.ibc_store.apply().expect("no error");
        self
    }

    pub fn with_client_state(mut self, client_id: &ClientId, client_state: AnyClientState) -> Self {
        let client_state_path = ClientStatePath::new(client_id.clone());
        self.ibc_store
            .store_client_state(client_state_path, client_state)
            .expect("error writing to store");
        self.keep_writes()
    }

    pub fn with_consensus_state(
        mut self,
        client_id: &ClientId,
        height: Height,
        consensus_state: AnyConsensusState,
    ) -> Self {
        let consensus_state_path = ClientConsensusStatePath::new(client_id.clone(), height.value());
        self.ibc_store
            .store_consensus_state(consensus_state_path, consensus_state)
            .expect("error writing to store");
        self.keep_writes()
    }

    /// Installs a client of `counterparty` at its latest height.
    pub fn with_light_client_of<T>(
        self,
        client_id: &ClientId,
        counterparty: &MockGenericContext<T>,
    ) -> Self
    where
        T: ProvableStore + Debug,
    {
        let (client_state, consensus_state) = counterparty.generate_light_client();
        let height = client_state.latest_height();

        self.with_client_state(client_id, client_state.into())
            .with_consensus_state(client_id, height, consensus_state.into())
    }

    /// Associates a connection to this context.
    pub fn with_connection(
        mut self,
        connection_id: ConnectionId,
        connection_end: ConnectionEnd,
    ) -> Self {
        let client_connection_path = ClientConnectionPath::new(connection_end.client_id().clone());
        self.ibc_store
            .store_connection_to_client(&client_connection_path, connection_id.clone())
            .expect("error writing to store");

        let connection_path = ConnectionPath::new(&connection_id);
        self.ibc_store
            .store_connection(&connection_path, connection_end)
            .expect("error writing to store");
        self.keep_writes()
    }

    /// Associates a channel (in an arbitrary state) to this context.
    pub fn with_channel(
        mut self,
        port_id: PortId,
        chan_id: ChannelId,
        channel_end: ChannelEnd,
    ) -> Self {
        let channel_end_path = ChannelEndPath::new(&port_id, &chan_id);
        self.ibc_store
            .store_channel(&channel_end_path, channel_end)
            .expect("error writing to store");
        self.keep_writes()
    }

    pub fn with_send_sequence(
        mut self,
        port_id: PortId,
        chan_id: ChannelId,
        seq_number: Sequence,
    ) -> Self {
        let seq_send_path = SeqSendPath::new(&port_id, &chan_id);
        self.ibc_store
            .store_next_sequence_send(&seq_send_path, seq_number)
            .expect("error writing to store");
        self.keep_writes()
    }

    pub fn with_recv_sequence(
        mut self,
        port_id: PortId,
        chan_id: ChannelId,
        seq_number: Sequence,
    ) -> Self {
        let seq_recv_path = SeqRecvPath::new(&port_id, &chan_id);
        self.ibc_store
            .store_next_sequence_recv(&seq_recv_path, seq_number)
            .expect("error writing to store");
        self.keep_writes()
    }

    pub fn with_ack_sequence(
        mut self,
        port_id: PortId,
        chan_id: ChannelId,
        seq_number: Sequence,
    ) -> Self {
        let seq_ack_path = SeqAckPath::new(&port_id, &chan_id);
        self.ibc_store
            .store_next_sequence_ack(&seq_ack_path, seq_number)
            .expect("error writing to store");
        self.keep_writes()
    }

    pub fn with_packet_commitment(
        mut self,
        port_id: PortId,
        chan_id: ChannelId,
        seq: Sequence,
        data: PacketCommitment,
    ) -> Self {
        let commitment_path = CommitmentPath::new(&port_id, &chan_id, seq);
        self.ibc_store
            .store_packet_commitment(&commitment_path, data)
            .expect("error writing to store");
        self.keep_writes()
    }

    /// Runs `tx` against the IBC store as one transaction: its writes and
    /// events are kept and a block is produced when it succeeds, and
    /// dropped when it fails.
    fn transact<F>(&mut self, tx: F) -> Result<(), RelayerError>
    where
        F: FnOnce(&mut MockIbcStore<S>, &mut MockRouter) -> Result<(), ContextError>,
    {
        let events_len = self.ibc_store.events.lock().len();
        let logs_len = self.ibc_store.logs.lock().len();

        match tx(&mut self.ibc_store, &mut self.ibc_router) {
            Ok(()) => {
                self.ibc_store.apply().expect("no error");
                self.advance_block();
                Ok(())
            }
            Err(e) => {
                debug!(error = %e, "transaction failed; reverting");
                self.ibc_store.revert(events_len, logs_len);
                Err(RelayerError::TransactionFailed(e))
            }
        }
    }

    /// A datagram passes from the relayer to the IBC module (on host chain),
    /// in a transaction of its own.
    pub fn deliver(&mut self, msg: MsgEnvelope) -> Result<(), RelayerError> {
        self.transact(|ibc_store, router| dispatch(ibc_store, router, msg))
    }

    /// Delivers `msgs` as one atomic transaction.
    pub fn deliver_tx(&mut self, msgs: Vec<MsgEnvelope>) -> Result<(), RelayerError> {
        self.transact(|ibc_store, router| deliver_tx(ibc_store, router, msgs))
    }

    /// The mock application sends `packet`.
    pub fn send_packet(&mut self, packet: Packet) -> Result<(), RelayerError> {
        self.send_packet_as(&ModuleId::new(MOCK_MODULE_ID.to_string()), packet)
    }

    /// `module_id` sends `packet`; the core checks that it owns the port.
    pub fn send_packet_as(
        &mut self,
        module_id: &ModuleId,
        packet: Packet,
    ) -> Result<(), RelayerError> {
        self.transact(|ibc_store, router| send_packet(ibc_store, &*router, module_id, packet))
    }

    /// The mock application acknowledges a packet it received earlier
    /// without acknowledging it.
    pub fn write_acknowledgement(
        &mut self,
        packet: Packet,
        acknowledgement: Acknowledgement,
    ) -> Result<(), RelayerError> {
        let module_id = ModuleId::new(MOCK_MODULE_ID.to_string());
        self.transact(|ibc_store, router| {
            write_acknowledgement(ibc_store, &*router, &module_id, packet, acknowledgement)
        })
    }

    pub fn get_events(&self) -> Vec<IbcEvent> {
        self.ibc_store.events.lock().clone()
    }

    pub fn get_logs(&self) -> Vec<String> {
        self.ibc_store.logs.lock().clone()
    }
}
