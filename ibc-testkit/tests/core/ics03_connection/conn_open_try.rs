use ibc_core::channel::types::channel::ChannelEnd;
use ibc_core::channel::types::commitment::{AcknowledgementCommitment, PacketCommitment, Receipt};
use ibc_core::client::types::Height;
use ibc_core::commitment_types::commitment::CommitmentPrefix;
use ibc_core::connection::handler::conn_open_try;
use ibc_core::connection::types::msgs::{ConnectionMsg, MsgConnectionOpenTry};
use ibc_core::connection::types::version::Version;
use ibc_core::connection::types::{ConnectionEnd, State};
use ibc_core::entrypoint::{execute, validate};
use ibc_core::handler::types::error::ContextError;
use ibc_core::handler::types::events::IbcEvent;
use ibc_core::handler::types::msgs::MsgEnvelope;
use ibc_core::host::types::error::{ErrorKind, HostError};
use ibc_core::host::types::identifiers::{ConnectionId, Sequence};
use ibc_core::host::types::path::{
    AckPath, ChannelEndPath, CommitmentPath, ReceiptPath, SeqAckPath, SeqRecvPath, SeqSendPath,
};
use ibc_core::host::ValidationContext;
use ibc_core::primitives::{Signer, Timestamp};
use ibc_testkit::relayer::context::RelayerContext;
use ibc_testkit::relayer::utils::{last_event, RelayerOps};
use ibc_testkit::testapp::ibc::clients::mock::consensus_state::MockConsensusState;
use ibc_testkit::testapp::ibc::core::types::DefaultIbcStore;

use super::Handshake;

fn msg_conn_open_try(hs: &Handshake) -> MsgConnectionOpenTry {
    let envelope = RelayerOps::msg_connection_open_try(
        hs.relayer.get_ctx_a(),
        hs.conn_id_on_a.clone(),
        hs.conn_id_on_b.clone(),
        hs.client_id_on_a.clone(),
        hs.client_id_on_b.clone(),
    );

    match envelope {
        MsgEnvelope::Connection(ConnectionMsg::OpenTry(msg)) => msg,
        _ => panic!("unexpected message"),
    }
}

fn envelope(msg: MsgConnectionOpenTry) -> MsgEnvelope {
    MsgEnvelope::Connection(ConnectionMsg::OpenTry(msg))
}

fn validate_on_b(hs: &Handshake, msg: MsgConnectionOpenTry) -> Result<(), ErrorKind> {
    let ctx_b = hs.relayer.get_ctx_b();
    validate(ctx_b.ibc_store(), &ctx_b.ibc_router, envelope(msg)).map_err(|e| e.kind())
}

#[test_log::test]
fn conn_open_try_happy_path() {
    let mut hs = Handshake::new().init_on_a();
    hs.relayer.sync_client_on_b(&hs.client_id_on_b);

    let msg = msg_conn_open_try(&hs);
    validate_on_b(&hs, msg.clone()).expect("validation succeeds");

    let ctx_b = hs.relayer.get_ctx_b_mut();
    execute(&mut ctx_b.ibc_store, &mut ctx_b.ibc_router, envelope(msg)).expect("execution succeeds");

    let conn_end_on_b = hs.conn_end_on_b();
    assert_eq!(conn_end_on_b.state(), &State::TryOpen);
    assert_eq!(conn_end_on_b.client_id(), &hs.client_id_on_b);
    assert_eq!(
        conn_end_on_b.counterparty().connection_id(),
        Some(&hs.conn_id_on_a)
    );
    // A single version is picked out of the proposals.
    assert_eq!(conn_end_on_b.versions().len(), 1);

    let event = last_event(hs.relayer.get_ctx_b(), |event| match event {
        IbcEvent::OpenTryConnection(e) => Some(e.clone()),
        _ => None,
    })
    .expect("event emitted");
    assert_eq!(event.conn_id_on_b(), &hs.conn_id_on_b);
}

#[test_log::test]
fn conn_open_try_with_stale_client() {
    let hs = Handshake::new().init_on_a();

    // The client of `A` on `B` has not seen the block with the new end yet.
    let msg = msg_conn_open_try(&hs);

    assert_eq!(validate_on_b(&hs, msg), Err(ErrorKind::InvalidProof));
}

#[test_log::test]
fn conn_open_try_with_versions_a_did_not_propose() {
    let mut hs = Handshake::new().init_on_a();
    hs.relayer.sync_client_on_b(&hs.client_id_on_b);

    let msg = MsgConnectionOpenTry {
        versions_on_a: vec![Version::new("1".to_string(), vec!["ORDER_ORDERED".to_string()])
            .expect("valid version")],
        ..msg_conn_open_try(&hs)
    };

    assert_eq!(validate_on_b(&hs, msg), Err(ErrorKind::InvalidProof));
}

#[test_log::test]
fn conn_open_try_without_common_version() {
    let mut hs = Handshake::new().init_on_a();
    hs.relayer.sync_client_on_b(&hs.client_id_on_b);

    let msg = MsgConnectionOpenTry {
        versions_on_a: vec![Version::new("2".to_string(), vec!["ORDER_ORDERED".to_string()])
            .expect("valid version")],
        ..msg_conn_open_try(&hs)
    };

    assert_eq!(validate_on_b(&hs, msg), Err(ErrorKind::VersionMismatch));
}

#[test_log::test]
fn conn_open_try_with_future_consensus_height() {
    let mut hs = Handshake::new().init_on_a();
    hs.relayer.sync_client_on_b(&hs.client_id_on_b);

    let msg = MsgConnectionOpenTry {
        consensus_height_of_b_on_a: hs.relayer.get_ctx_b().latest_height(),
        ..msg_conn_open_try(&hs)
    };

    assert_eq!(validate_on_b(&hs, msg), Err(ErrorKind::InvalidInput));
}

#[test_log::test]
fn conn_open_try_on_crossing_init() {
    let hs = Handshake::new().init_on_a();

    let (ctx_a, mut ctx_b) = hs.relayer.into_contexts();
    RelayerOps::connection_open_init_on_a(
        &mut ctx_b,
        &ctx_a,
        hs.conn_id_on_b.clone(),
        hs.client_id_on_b.clone(),
        hs.client_id_on_a.clone(),
    );
    let mut hs = Handshake {
        relayer: RelayerContext::new(ctx_a, ctx_b),
        ..hs
    };
    assert_eq!(hs.conn_end_on_b().state(), &State::Init);

    hs.relayer.sync_client_on_b(&hs.client_id_on_b);
    let msg = msg_conn_open_try(&hs);
    hs.relayer
        .get_ctx_b_mut()
        .deliver(envelope(msg))
        .expect("the relay of a matching attempt is accepted");

    assert_eq!(hs.conn_end_on_b().state(), &State::TryOpen);
}

#[test_log::test]
fn conn_open_try_on_open_end() {
    let mut hs = Handshake::new().init_on_a().try_on_b().ack_on_a();
    hs.relayer.sync_client_on_b(&hs.client_id_on_b);

    let msg = msg_conn_open_try(&hs);

    // `B` is in TRYOPEN already, which no relayed attempt replaces.
    assert_eq!(validate_on_b(&hs, msg), Err(ErrorKind::InvalidState));
}

#[test_log::test]
fn conn_open_try_with_consensus_height_b_never_stored() {
    let mut hs = Handshake::new().init_on_a();
    hs.relayer.sync_client_on_b(&hs.client_id_on_b);

    // `B` has a block at height 2, but the client on `A` was created later.
    let msg = MsgConnectionOpenTry {
        consensus_height_of_b_on_a: Height::new(2).expect("non-zero height"),
        ..msg_conn_open_try(&hs)
    };

    assert_eq!(validate_on_b(&hs, msg), Err(ErrorKind::InvalidProof));
}

#[test_log::test]
fn conn_open_try_with_consensus_proof_of_other_state() {
    let mut hs = Handshake::new().init_on_a();
    hs.relayer.sync_client_on_b(&hs.client_id_on_b);

    let msg = msg_conn_open_try(&hs);
    let msg = MsgConnectionOpenTry {
        proof_consensus_state_of_b_on_a: msg.proof_conn_end_on_a.clone(),
        ..msg
    };

    assert_eq!(validate_on_b(&hs, msg), Err(ErrorKind::InvalidProof));
}

/// A host whose connection store fails to read.
struct UnreadableConnections<'a>(&'a DefaultIbcStore);

impl ValidationContext for UnreadableConnections<'_> {
    type V = DefaultIbcStore;
    type HostConsensusState = MockConsensusState;

    fn get_client_validation_context(&self) -> &Self::V {
        self.0
    }

    fn host_height(&self) -> Result<Height, ContextError> {
        self.0.host_height()
    }

    fn host_timestamp(&self) -> Result<Timestamp, ContextError> {
        self.0.host_timestamp()
    }

    fn host_consensus_state(&self, height: &Height) -> Result<MockConsensusState, ContextError> {
        self.0.host_consensus_state(height)
    }

    fn client_counter(&self) -> Result<u64, ContextError> {
        self.0.client_counter()
    }

    fn connection_end(&self, conn_id: &ConnectionId) -> Result<ConnectionEnd, ContextError> {
        Err(HostError::failed_to_retrieve(format!("connection {conn_id}")).into())
    }

    fn commitment_prefix(&self) -> CommitmentPrefix {
        self.0.commitment_prefix()
    }

    fn channel_end(&self, channel_end_path: &ChannelEndPath) -> Result<ChannelEnd, ContextError> {
        self.0.channel_end(channel_end_path)
    }

    fn get_next_sequence_send(
        &self,
        seq_send_path: &SeqSendPath,
    ) -> Result<Sequence, ContextError> {
        self.0.get_next_sequence_send(seq_send_path)
    }

    fn get_next_sequence_recv(
        &self,
        seq_recv_path: &SeqRecvPath,
    ) -> Result<Sequence, ContextError> {
        self.0.get_next_sequence_recv(seq_recv_path)
    }

    fn get_next_sequence_ack(&self, seq_ack_path: &SeqAckPath) -> Result<Sequence, ContextError> {
        self.0.get_next_sequence_ack(seq_ack_path)
    }

    fn get_packet_commitment(
        &self,
        commitment_path: &CommitmentPath,
    ) -> Result<PacketCommitment, ContextError> {
        self.0.get_packet_commitment(commitment_path)
    }

    fn get_packet_receipt(&self, receipt_path: &ReceiptPath) -> Result<Receipt, ContextError> {
        self.0.get_packet_receipt(receipt_path)
    }

    fn get_packet_acknowledgement(
        &self,
        ack_path: &AckPath,
    ) -> Result<AcknowledgementCommitment, ContextError> {
        self.0.get_packet_acknowledgement(ack_path)
    }

    fn validate_message_signer(&self, signer: &Signer) -> Result<(), ContextError> {
        self.0.validate_message_signer(signer)
    }
}

#[test_log::test]
fn conn_open_try_with_unreadable_connection_store() {
    let mut hs = Handshake::new().init_on_a();
    hs.relayer.sync_client_on_b(&hs.client_id_on_b);

    let msg = msg_conn_open_try(&hs);
    let ctx_b = UnreadableConnections(hs.relayer.get_ctx_b().ibc_store());

    // A read failure is not taken for a free identifier.
    assert_eq!(
        conn_open_try::validate(&ctx_b, msg).map_err(|e| e.kind()),
        Err(ErrorKind::Internal)
    );
}
