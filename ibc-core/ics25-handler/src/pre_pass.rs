//! A read-only view of the host that accumulates the effects of the packet
//! messages already validated in the current transaction.

use alloc::collections::{BTreeMap, BTreeSet};

use ibc_core_channel::types::channel::{ChannelEnd, Order, State};
use ibc_core_channel::types::commitment::{AcknowledgementCommitment, PacketCommitment, Receipt};
use ibc_core_channel::types::msgs::PacketMsg;
use ibc_core_channel::types::packet::Packet;
use ibc_core_client::types::Height;
use ibc_core_commitment_types::commitment::CommitmentPrefix;
use ibc_core_connection::types::version::Version as ConnectionVersion;
use ibc_core_connection::types::ConnectionEnd;
use ibc_core_handler_types::error::ContextError;
use ibc_core_host::types::error::HostError;
use ibc_core_host::types::identifiers::{ConnectionId, Sequence};
use ibc_core_host::types::path::{
    AckPath, ChannelEndPath, CommitmentPath, ReceiptPath, SeqAckPath, SeqRecvPath, SeqSendPath,
};
use ibc_core_host::ValidationContext;
use ibc_primitives::prelude::*;
use ibc_primitives::{Signer, Timestamp};

/// Wraps the host context; nothing is ever written to the host store.
pub(crate) struct PrePassContext<'a, Ctx> {
    inner: &'a Ctx,
    channel_ends: BTreeMap<ChannelEndPath, ChannelEnd>,
    next_seq_recv: BTreeMap<SeqRecvPath, Sequence>,
    next_seq_ack: BTreeMap<SeqAckPath, Sequence>,
    receipts: BTreeSet<ReceiptPath>,
    deleted_commitments: BTreeSet<CommitmentPath>,
}

impl<'a, Ctx> PrePassContext<'a, Ctx>
where
    Ctx: ValidationContext,
{
    pub(crate) fn new(inner: &'a Ctx) -> Self {
        Self {
            inner,
            channel_ends: BTreeMap::new(),
            next_seq_recv: BTreeMap::new(),
            next_seq_ack: BTreeMap::new(),
            receipts: BTreeSet::new(),
            deleted_commitments: BTreeSet::new(),
        }
    }

    /// Applies to the overlay the state changes the execution of `msg` will
    /// make. `msg` MUST have passed validation against this overlay.
    pub(crate) fn record(&mut self, msg: &PacketMsg) -> Result<(), ContextError> {
        match msg {
            PacketMsg::Recv(msg) => {
                let packet = &msg.packet;
                let chan_end_on_b = self.channel_end(&ChannelEndPath::new(
                    &packet.port_id_on_b,
                    &packet.chan_id_on_b,
                ))?;

                match chan_end_on_b.ordering {
                    Order::Ordered => {
                        let path = SeqRecvPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);
                        self.next_seq_recv.insert(path, packet.seq_on_a.increment());
                    }
                    Order::Unordered => {
                        self.receipts.insert(ReceiptPath::new(
                            &packet.port_id_on_b,
                            &packet.chan_id_on_b,
                            packet.seq_on_a,
                        ));
                    }
                }
            }
            PacketMsg::Ack(msg) => {
                let chan_end_on_a = self.delete_commitment(&msg.packet)?;

                if let Order::Ordered = chan_end_on_a.ordering {
                    let packet = &msg.packet;
                    let path = SeqAckPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
                    self.next_seq_ack.insert(path, packet.seq_on_a.increment());
                }
            }
            PacketMsg::Timeout(msg) => self.time_out(&msg.packet)?,
            PacketMsg::TimeoutOnClose(msg) => self.time_out(&msg.packet)?,
        }

        Ok(())
    }

    /// Returns the sending channel end.
    fn delete_commitment(&mut self, packet: &Packet) -> Result<ChannelEnd, ContextError> {
        self.deleted_commitments.insert(CommitmentPath::new(
            &packet.port_id_on_a,
            &packet.chan_id_on_a,
            packet.seq_on_a,
        ));

        self.channel_end(&ChannelEndPath::new(
            &packet.port_id_on_a,
            &packet.chan_id_on_a,
        ))
    }

    fn time_out(&mut self, packet: &Packet) -> Result<(), ContextError> {
        let mut chan_end_on_a = self.delete_commitment(packet)?;

        if let Order::Ordered = chan_end_on_a.ordering {
            chan_end_on_a.set_state(State::Closed);
            self.channel_ends.insert(
                ChannelEndPath::new(&packet.port_id_on_a, &packet.chan_id_on_a),
                chan_end_on_a,
            );
        }

        Ok(())
    }
}

impl<Ctx> ValidationContext for PrePassContext<'_, Ctx>
where
    Ctx: ValidationContext,
{
    type V = Ctx::V;
    type HostConsensusState = Ctx::HostConsensusState;

    fn get_client_validation_context(&self) -> &Self::V {
        self.inner.get_client_validation_context()
    }

    fn host_height(&self) -> Result<Height, ContextError> {
        self.inner.host_height()
    }

    fn host_timestamp(&self) -> Result<Timestamp, ContextError> {
        self.inner.host_timestamp()
    }

    fn host_consensus_state(
        &self,
        height: &Height,
    ) -> Result<Self::HostConsensusState, ContextError> {
        self.inner.host_consensus_state(height)
    }

    fn client_counter(&self) -> Result<u64, ContextError> {
        self.inner.client_counter()
    }

    fn connection_end(&self, conn_id: &ConnectionId) -> Result<ConnectionEnd, ContextError> {
        self.inner.connection_end(conn_id)
    }

    fn commitment_prefix(&self) -> CommitmentPrefix {
        self.inner.commitment_prefix()
    }

    fn get_compatible_versions(&self) -> Vec<ConnectionVersion> {
        self.inner.get_compatible_versions()
    }

    fn pick_version(
        &self,
        counterparty_candidate_versions: &[ConnectionVersion],
    ) -> Result<ConnectionVersion, ContextError> {
        self.inner.pick_version(counterparty_candidate_versions)
    }

    fn channel_end(&self, channel_end_path: &ChannelEndPath) -> Result<ChannelEnd, ContextError> {
        match self.channel_ends.get(channel_end_path) {
            Some(chan_end) => Ok(chan_end.clone()),
            None => self.inner.channel_end(channel_end_path),
        }
    }

    fn get_next_sequence_send(
        &self,
        seq_send_path: &SeqSendPath,
    ) -> Result<Sequence, ContextError> {
        self.inner.get_next_sequence_send(seq_send_path)
    }

    fn get_next_sequence_recv(
        &self,
        seq_recv_path: &SeqRecvPath,
    ) -> Result<Sequence, ContextError> {
        match self.next_seq_recv.get(seq_recv_path) {
            Some(seq) => Ok(*seq),
            None => self.inner.get_next_sequence_recv(seq_recv_path),
        }
    }

    fn get_next_sequence_ack(&self, seq_ack_path: &SeqAckPath) -> Result<Sequence, ContextError> {
        match self.next_seq_ack.get(seq_ack_path) {
            Some(seq) => Ok(*seq),
            None => self.inner.get_next_sequence_ack(seq_ack_path),
        }
    }

    fn get_packet_commitment(
        &self,
        commitment_path: &CommitmentPath,
    ) -> Result<PacketCommitment, ContextError> {
        if self.deleted_commitments.contains(commitment_path) {
            return Err(HostError::missing_state(format!(
                "packet commitment at {commitment_path}"
            ))
            .into());
        }
        self.inner.get_packet_commitment(commitment_path)
    }

    fn get_packet_receipt(&self, receipt_path: &ReceiptPath) -> Result<Receipt, ContextError> {
        if self.receipts.contains(receipt_path) {
            return Ok(Receipt::Ok);
        }
        self.inner.get_packet_receipt(receipt_path)
    }

    fn get_packet_acknowledgement(
        &self,
        ack_path: &AckPath,
    ) -> Result<AcknowledgementCommitment, ContextError> {
        self.inner.get_packet_acknowledgement(ack_path)
    }

    fn validate_message_signer(&self, signer: &Signer) -> Result<(), ContextError> {
        self.inner.validate_message_signer(signer)
    }
}
