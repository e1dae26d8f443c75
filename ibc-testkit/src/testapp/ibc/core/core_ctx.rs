//! Implementation of the host contexts for the mock IBC store.

use core::fmt::Debug;

use ibc_core::channel::types::channel::ChannelEnd;
use ibc_core::channel::types::commitment::{AcknowledgementCommitment, PacketCommitment, Receipt};
use ibc_core::channel::types::error::{ChannelError, PacketError};
use ibc_core::client::types::error::ClientError;
use ibc_core::client::types::Height;
use ibc_core::commitment_types::commitment::CommitmentPrefix;
use ibc_core::connection::types::error::ConnectionError;
use ibc_core::connection::types::ConnectionEnd;
use ibc_core::handler::types::error::ContextError;
use ibc_core::handler::types::events::IbcEvent;
use ibc_core::host::types::error::HostError;
use ibc_core::host::types::identifiers::{ConnectionId, Sequence};
use ibc_core::host::types::path::{
    AckPath, ChannelEndPath, ClientConnectionPath, CommitmentPath, ConnectionPath,
    NextClientSequencePath, ReceiptPath, SeqAckPath, SeqRecvPath, SeqSendPath,
};
use ibc_core::host::{ExecutionContext, ValidationContext};
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::{Signer, Timestamp};
use ibc_testkit_store::context::ProvableStore;
use ibc_testkit_store::types::Height as StoreHeight;

use super::types::MockIbcStore;
use crate::testapp::ibc::clients::mock::consensus_state::MockConsensusState;

impl<S> ValidationContext for MockIbcStore<S>
where
    S: ProvableStore + Debug,
{
    type V = Self;
    type HostConsensusState = MockConsensusState;

    fn get_client_validation_context(&self) -> &Self::V {
        self
    }

    fn host_height(&self) -> Result<Height, ContextError> {
        Ok(Height::new(self.committed_height())?)
    }

    fn host_timestamp(&self) -> Result<Timestamp, ContextError> {
        self.host_consensus_states
            .lock()
            .values()
            .next_back()
            .map(|cs| cs.header.timestamp)
            .ok_or_else(|| HostError::missing_state("no block committed yet").into())
    }

    fn host_consensus_state(&self, height: &Height) -> Result<MockConsensusState, ContextError> {
        self.host_consensus_states
            .lock()
            .get(&height.value())
            .cloned()
            .ok_or_else(|| ClientError::MissingLocalConsensusState { height: *height }.into())
    }

    fn client_counter(&self) -> Result<u64, ContextError> {
        self.client_counter
            .get(StoreHeight::Pending, &NextClientSequencePath)
            .ok_or_else(|| HostError::missing_state("client counter").into())
    }

    fn connection_end(&self, conn_id: &ConnectionId) -> Result<ConnectionEnd, ContextError> {
        Ok(self
            .connection_end_store
            .get(StoreHeight::Pending, &ConnectionPath::new(conn_id))
            .ok_or(ConnectionError::ConnectionNotFound {
                connection_id: conn_id.clone(),
            })?)
    }

    fn commitment_prefix(&self) -> CommitmentPrefix {
        self.commitment_prefix.clone()
    }

    fn channel_end(&self, channel_end_path: &ChannelEndPath) -> Result<ChannelEnd, ContextError> {
        Ok(self
            .channel_end_store
            .get(StoreHeight::Pending, channel_end_path)
            .ok_or(ChannelError::ChannelNotFound {
                port_id: channel_end_path.0.clone(),
                channel_id: channel_end_path.1.clone(),
            })?)
    }

    fn get_next_sequence_send(
        &self,
        seq_send_path: &SeqSendPath,
    ) -> Result<Sequence, ContextError> {
        self.send_sequence_store
            .get(StoreHeight::Pending, seq_send_path)
            .ok_or_else(|| HostError::missing_state(format!("{seq_send_path}")).into())
    }

    fn get_next_sequence_recv(
        &self,
        seq_recv_path: &SeqRecvPath,
    ) -> Result<Sequence, ContextError> {
        self.recv_sequence_store
            .get(StoreHeight::Pending, seq_recv_path)
            .ok_or_else(|| HostError::missing_state(format!("{seq_recv_path}")).into())
    }

    fn get_next_sequence_ack(&self, seq_ack_path: &SeqAckPath) -> Result<Sequence, ContextError> {
        self.ack_sequence_store
            .get(StoreHeight::Pending, seq_ack_path)
            .ok_or_else(|| HostError::missing_state(format!("{seq_ack_path}")).into())
    }

    fn get_packet_commitment(
        &self,
        commitment_path: &CommitmentPath,
    ) -> Result<PacketCommitment, ContextError> {
        Ok(self
            .packet_commitment_store
            .get(StoreHeight::Pending, commitment_path)
            .ok_or(PacketError::PacketCommitmentNotFound {
                sequence: commitment_path.sequence,
            })?)
    }

    fn get_packet_receipt(&self, receipt_path: &ReceiptPath) -> Result<Receipt, ContextError> {
        if self
            .packet_receipt_store
            .is_path_set(StoreHeight::Pending, receipt_path)
        {
            Ok(Receipt::Ok)
        } else {
            Ok(Receipt::None)
        }
    }

    fn get_packet_acknowledgement(
        &self,
        ack_path: &AckPath,
    ) -> Result<AcknowledgementCommitment, ContextError> {
        self.packet_ack_store
            .get(StoreHeight::Pending, ack_path)
            .ok_or_else(|| HostError::missing_state(format!("{ack_path}")).into())
    }

    fn validate_message_signer(&self, signer: &Signer) -> Result<(), ContextError> {
        if signer.is_empty() {
            return Err(HostError::InvalidSigner {
                description: "empty signer".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl<S> ExecutionContext for MockIbcStore<S>
where
    S: ProvableStore + Debug,
{
    type E = Self;

    fn get_client_execution_context(&mut self) -> &mut Self::E {
        self
    }

    fn increase_client_counter(&mut self) -> Result<(), ContextError> {
        let current_sequence = self.client_counter()?;

        self.client_counter
            .set(NextClientSequencePath, current_sequence + 1)
            .map_err(|e| HostError::failed_to_store(format!("client counter: {e:?}")))?;

        Ok(())
    }

    fn store_connection(
        &mut self,
        connection_path: &ConnectionPath,
        connection_end: ConnectionEnd,
    ) -> Result<(), ContextError> {
        self.connection_end_store
            .set(connection_path.clone(), connection_end)
            .map_err(|e| HostError::failed_to_store(format!("{connection_path}: {e:?}")))?;
        Ok(())
    }

    fn store_connection_to_client(
        &mut self,
        client_connection_path: &ClientConnectionPath,
        conn_id: ConnectionId,
    ) -> Result<(), ContextError> {
        let mut conn_ids = self
            .connection_ids_store
            .get(StoreHeight::Pending, client_connection_path)
            .unwrap_or_default();
        conn_ids.push(conn_id);
        self.connection_ids_store
            .set(client_connection_path.clone(), conn_ids)
            .map_err(|e| HostError::failed_to_store(format!("{client_connection_path}: {e:?}")))?;
        Ok(())
    }

    fn store_packet_commitment(
        &mut self,
        commitment_path: &CommitmentPath,
        commitment: PacketCommitment,
    ) -> Result<(), ContextError> {
        self.packet_commitment_store
            .set(commitment_path.clone(), commitment)
            .map_err(|e| HostError::failed_to_store(format!("{commitment_path}: {e:?}")))?;
        Ok(())
    }

    fn delete_packet_commitment(&mut self, key: &CommitmentPath) -> Result<(), ContextError> {
        self.packet_commitment_store.delete(key.clone());
        Ok(())
    }

    fn store_packet_receipt(
        &mut self,
        receipt_path: &ReceiptPath,
        receipt: Receipt,
    ) -> Result<(), ContextError> {
        if receipt.is_ok() {
            self.packet_receipt_store
                .set_path(receipt_path.clone())
                .map_err(|e| HostError::failed_to_store(format!("{receipt_path}: {e:?}")))?;
        }
        Ok(())
    }

    fn store_packet_acknowledgement(
        &mut self,
        ack_path: &AckPath,
        ack_commitment: AcknowledgementCommitment,
    ) -> Result<(), ContextError> {
        self.packet_ack_store
            .set(ack_path.clone(), ack_commitment)
            .map_err(|e| HostError::failed_to_store(format!("{ack_path}: {e:?}")))?;
        Ok(())
    }

    fn store_channel(
        &mut self,
        channel_end_path: &ChannelEndPath,
        channel_end: ChannelEnd,
    ) -> Result<(), ContextError> {
        self.channel_end_store
            .set(channel_end_path.clone(), channel_end)
            .map_err(|e| HostError::failed_to_store(format!("{channel_end_path}: {e:?}")))?;
        Ok(())
    }

    fn store_next_sequence_send(
        &mut self,
        seq_send_path: &SeqSendPath,
        seq: Sequence,
    ) -> Result<(), ContextError> {
        self.send_sequence_store
            .set(seq_send_path.clone(), seq)
            .map_err(|e| HostError::failed_to_store(format!("{seq_send_path}: {e:?}")))?;
        Ok(())
    }

    fn store_next_sequence_recv(
        &mut self,
        seq_recv_path: &SeqRecvPath,
        seq: Sequence,
    ) -> Result<(), ContextError> {
        self.recv_sequence_store
            .set(seq_recv_path.clone(), seq)
            .map_err(|e| HostError::failed_to_store(format!("{seq_recv_path}: {e:?}")))?;
        Ok(())
    }

    fn store_next_sequence_ack(
        &mut self,
        seq_ack_path: &SeqAckPath,
        seq: Sequence,
    ) -> Result<(), ContextError> {
        self.ack_sequence_store
            .set(seq_ack_path.clone(), seq)
            .map_err(|e| HostError::failed_to_store(format!("{seq_ack_path}: {e:?}")))?;
        Ok(())
    }

    fn emit_ibc_event(&mut self, event: IbcEvent) -> Result<(), ContextError> {
        self.events.lock().push(event);
        Ok(())
    }

    fn log_message(&mut self, message: String) -> Result<(), ContextError> {
        self.logs.lock().push(message);
        Ok(())
    }
}
