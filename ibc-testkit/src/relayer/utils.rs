use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::channel::types::channel::{ChannelEnd, Order};
use ibc_core::channel::types::msgs::{
    ChannelMsg, MsgAcknowledgement, MsgChannelCloseConfirm, MsgChannelCloseInit,
    MsgChannelOpenAck, MsgChannelOpenConfirm, MsgChannelOpenInit, MsgChannelOpenTry,
    MsgRecvPacket, MsgTimeout, MsgTimeoutOnClose, PacketMsg,
};
use ibc_core::channel::types::packet::Packet;
use ibc_core::channel::types::Version as ChannelVersion;
use ibc_core::client::context::ClientValidationContext;
use ibc_core::client::types::msgs::{ClientMsg, MsgCreateClient, MsgUpdateClient};
use ibc_core::client::types::Height;
use ibc_core::commitment_types::commitment::CommitmentProofBytes;
use ibc_core::connection::types::msgs::{
    ConnectionMsg, MsgConnectionOpenAck, MsgConnectionOpenConfirm, MsgConnectionOpenInit,
    MsgConnectionOpenTry,
};
use ibc_core::connection::types::version::Version as ConnectionVersion;
use ibc_core::connection::types::Counterparty as ConnectionCounterparty;
use ibc_core::handler::types::events::IbcEvent;
use ibc_core::handler::types::msgs::MsgEnvelope;
use ibc_core::host::types::identifiers::{ChannelId, ClientId, ConnectionId, PortId, Sequence};
use ibc_core::host::types::path::{
    AckPath, ChannelEndPath, ClientConsensusStatePath, CommitmentPath, ConnectionPath, Path,
    ReceiptPath, SeqRecvPath,
};
use ibc_core::host::ValidationContext;
use ibc_core::primitives::prelude::*;
use ibc_query::core::context::{ProvableContext, QueryContext};

use crate::context::MockContext;
use crate::fixtures::core::signer::dummy_account_id;
use crate::relayer::error::RelayerError;

/// Relayer functions between two mock chains `A` and `B`.
///
/// Every function works in one direction, from `A` to `B`, so that the
/// variable names match the IBC message fields. For the opposite direction
/// pass the chains the other way around.
///
/// The `msg_*` functions only build a message out of the current state of
/// the chain the proofs come from, which is expected to be already known to
/// the client on the receiving chain. The other functions deliver it and
/// panic on failure.
#[derive(Debug, Default)]
pub struct RelayerOps;

/// Proof of `path` on `ctx` at `height`, of membership or absence.
pub fn proof_at(ctx: &MockContext, height: Height, path: impl Into<Path>) -> CommitmentProofBytes {
    let path = path.into();

    ctx.ibc_store()
        .get_proof(height, &path)
        .unwrap_or_else(|| panic!("no proof of `{path}` at {height}"))
        .try_into()
        .expect("non-empty proof")
}

/// The most recent event of `ctx` that `f` picks.
pub fn last_event<T>(ctx: &MockContext, f: impl Fn(&IbcEvent) -> Option<T>) -> Option<T> {
    ctx.ibc_store().events.lock().iter().rev().find_map(f)
}

impl RelayerOps {
    /// Creates a client on `A` with the latest state of `B`.
    /// Returns the client identifier on `A`.
    pub fn create_client_on_a(ctx_a: &mut MockContext, ctx_b: &MockContext) -> ClientId {
        let (client_state_of_b, consensus_state_of_b) = ctx_b.generate_light_client();

        let msg_for_a = MsgEnvelope::Client(ClientMsg::CreateClient(MsgCreateClient::new(
            client_state_of_b.into(),
            consensus_state_of_b.into(),
            dummy_account_id(),
        )));

        ctx_a.deliver(msg_for_a).expect("success");

        let Some(client_id_on_a) = last_event(ctx_a, |event| match event {
            IbcEvent::CreateClient(e) => Some(e.client_id().clone()),
            _ => None,
        }) else {
            panic!("unexpected event")
        };

        assert_eq!(
            ctx_a
                .ibc_store()
                .get_client_validation_context()
                .client_state(&client_id_on_a)
                .expect("client state exists")
                .latest_height(),
            ctx_b.latest_height()
        );

        client_id_on_a
    }

    /// Updates the client on `A` with the latest header of `B`.
    pub fn update_client_on_a(
        ctx_a: &mut MockContext,
        ctx_b: &MockContext,
        client_id_on_a: &ClientId,
    ) -> Result<(), RelayerError> {
        let trusted_height_of_b = ctx_a
            .ibc_store()
            .get_client_validation_context()
            .client_state(client_id_on_a)
            .map_err(|_| RelayerError::ClientStateNotFound {
                client_id: client_id_on_a.clone(),
            })?
            .latest_height();

        let target_height_of_b = ctx_b.latest_height();

        if trusted_height_of_b == target_height_of_b {
            return Err(RelayerError::ClientAlreadyUpToDate {
                client_id: client_id_on_a.clone(),
                source_height: target_height_of_b,
                destination_height: trusted_height_of_b,
            });
        }

        if trusted_height_of_b > target_height_of_b {
            return Err(RelayerError::ClientAtHigherHeight {
                client_id: client_id_on_a.clone(),
                source_height: target_height_of_b,
                destination_height: trusted_height_of_b,
            });
        }

        let target_block_of_b = ctx_b.host_block(&target_height_of_b).expect("block exists");

        let msg_for_a = MsgEnvelope::Client(ClientMsg::UpdateClient(MsgUpdateClient {
            client_id: client_id_on_a.clone(),
            client_message: target_block_of_b.into(),
            signer: dummy_account_id(),
        }));

        ctx_a.deliver(msg_for_a)
    }

    /// Brings the client on `A` to the latest height of `B`, if it is not
    /// there already.
    pub fn sync_client_on_a(ctx_a: &mut MockContext, ctx_b: &MockContext, client_id_on_a: &ClientId) {
        match Self::update_client_on_a(ctx_a, ctx_b, client_id_on_a) {
            Ok(()) | Err(RelayerError::ClientAlreadyUpToDate { .. }) => {}
            Err(e) => panic!("client update failed: {e}"),
        }
    }

    /// `A` initiates a connection with the other end on `B`, under the
    /// identifier `conn_id_on_a`.
    pub fn connection_open_init_on_a(
        ctx_a: &mut MockContext,
        ctx_b: &MockContext,
        conn_id_on_a: ConnectionId,
        client_id_on_a: ClientId,
        client_id_on_b: ClientId,
    ) {
        let counterparty_b = ConnectionCounterparty::new(
            client_id_on_b,
            None,
            ctx_b.ibc_store().commitment_prefix(),
        );

        let msg_for_a = MsgEnvelope::Connection(ConnectionMsg::OpenInit(MsgConnectionOpenInit {
            conn_id_on_a,
            client_id_on_a,
            counterparty: counterparty_b,
            version: None,
            signer: dummy_account_id(),
        }));

        ctx_a.deliver(msg_for_a).expect("success");

        let Some(_) = last_event(ctx_a, |event| match event {
            IbcEvent::OpenInitConnection(e) => Some(e.clone()),
            _ => None,
        }) else {
            panic!("unexpected event")
        };
    }

    /// A `ConnOpenTry` for `B`, proving `A`'s connection end and the
    /// consensus state of `B` that `A` stores.
    pub fn msg_connection_open_try(
        ctx_a: &MockContext,
        conn_id_on_a: ConnectionId,
        conn_id_on_b: ConnectionId,
        client_id_on_a: ClientId,
        client_id_on_b: ClientId,
    ) -> MsgEnvelope {
        let proofs_height_on_a = ctx_a.latest_height();

        let consensus_height_of_b_on_a = ctx_a
            .ibc_store()
            .get_client_validation_context()
            .client_state(&client_id_on_a)
            .expect("client state exists")
            .latest_height();

        let proof_conn_end_on_a = proof_at(
            ctx_a,
            proofs_height_on_a,
            ConnectionPath::new(&conn_id_on_a),
        );

        let proof_consensus_state_of_b_on_a = proof_at(
            ctx_a,
            proofs_height_on_a,
            ClientConsensusStatePath::new(
                client_id_on_a.clone(),
                consensus_height_of_b_on_a.value(),
            ),
        );

        let counterparty_a = ConnectionCounterparty::new(
            client_id_on_a,
            Some(conn_id_on_a),
            ctx_a.ibc_store().commitment_prefix(),
        );

        MsgEnvelope::Connection(ConnectionMsg::OpenTry(MsgConnectionOpenTry {
            conn_id_on_b,
            client_id_on_b,
            counterparty: counterparty_a,
            versions_on_a: ConnectionVersion::compatibles(),
            proof_conn_end_on_a,
            proof_consensus_state_of_b_on_a,
            proofs_height_on_a,
            consensus_height_of_b_on_a,
            signer: dummy_account_id(),
        }))
    }

    /// `B` receives the connection opening attempt by `A`.
    pub fn connection_open_try_on_b(
        ctx_b: &mut MockContext,
        ctx_a: &MockContext,
        conn_id_on_a: ConnectionId,
        conn_id_on_b: ConnectionId,
        client_id_on_a: ClientId,
        client_id_on_b: ClientId,
    ) {
        let msg_for_b = Self::msg_connection_open_try(
            ctx_a,
            conn_id_on_a,
            conn_id_on_b,
            client_id_on_a,
            client_id_on_b,
        );

        ctx_b.deliver(msg_for_b).expect("success");

        let Some(_) = last_event(ctx_b, |event| match event {
            IbcEvent::OpenTryConnection(e) => Some(e.clone()),
            _ => None,
        }) else {
            panic!("unexpected event")
        };
    }

    /// A `ConnOpenAck` for `A`, proving `B`'s connection end and the
    /// consensus state of `A` that `B` stores.
    pub fn msg_connection_open_ack(
        ctx_b: &MockContext,
        conn_id_on_a: ConnectionId,
        conn_id_on_b: ConnectionId,
        client_id_on_b: ClientId,
    ) -> MsgEnvelope {
        let proofs_height_on_b = ctx_b.latest_height();

        let consensus_height_of_a_on_b = ctx_b
            .ibc_store()
            .get_client_validation_context()
            .client_state(&client_id_on_b)
            .expect("client state exists")
            .latest_height();

        let proof_conn_end_on_b = proof_at(
            ctx_b,
            proofs_height_on_b,
            ConnectionPath::new(&conn_id_on_b),
        );

        let proof_consensus_state_of_a_on_b = proof_at(
            ctx_b,
            proofs_height_on_b,
            ClientConsensusStatePath::new(client_id_on_b, consensus_height_of_a_on_b.value()),
        );

        let version = ctx_b
            .ibc_store()
            .connection_end(&conn_id_on_b)
            .expect("connection end exists")
            .versions()
            .first()
            .cloned()
            .expect("one version is picked on try");

        MsgEnvelope::Connection(ConnectionMsg::OpenAck(MsgConnectionOpenAck {
            conn_id_on_a,
            conn_id_on_b,
            proof_conn_end_on_b,
            proof_consensus_state_of_a_on_b,
            proofs_height_on_b,
            consensus_height_of_a_on_b,
            version,
            signer: dummy_account_id(),
        }))
    }

    /// `A` receives `B`'s acknowledgement of the connection opening attempt.
    pub fn connection_open_ack_on_a(
        ctx_a: &mut MockContext,
        ctx_b: &MockContext,
        conn_id_on_a: ConnectionId,
        conn_id_on_b: ConnectionId,
        client_id_on_b: ClientId,
    ) {
        let msg_for_a =
            Self::msg_connection_open_ack(ctx_b, conn_id_on_a, conn_id_on_b, client_id_on_b);

        ctx_a.deliver(msg_for_a).expect("success");

        let Some(_) = last_event(ctx_a, |event| match event {
            IbcEvent::OpenAckConnection(e) => Some(e.clone()),
            _ => None,
        }) else {
            panic!("unexpected event")
        };
    }

    /// A `ConnOpenConfirm` for `B`, proving that `A`'s connection is open.
    pub fn msg_connection_open_confirm(
        ctx_a: &MockContext,
        conn_id_on_a: ConnectionId,
        conn_id_on_b: ConnectionId,
    ) -> MsgEnvelope {
        let proof_height_on_a = ctx_a.latest_height();

        MsgEnvelope::Connection(ConnectionMsg::OpenConfirm(MsgConnectionOpenConfirm {
            conn_id_on_b,
            proof_conn_end_on_a: proof_at(
                ctx_a,
                proof_height_on_a,
                ConnectionPath::new(&conn_id_on_a),
            ),
            proof_height_on_a,
            signer: dummy_account_id(),
        }))
    }

    /// `B` receives the confirmation from `A` that the connection is open.
    pub fn connection_open_confirm_on_b(
        ctx_b: &mut MockContext,
        ctx_a: &MockContext,
        conn_id_on_a: ConnectionId,
        conn_id_on_b: ConnectionId,
    ) {
        let msg_for_b = Self::msg_connection_open_confirm(ctx_a, conn_id_on_a, conn_id_on_b);

        ctx_b.deliver(msg_for_b).expect("success");

        let Some(_) = last_event(ctx_b, |event| match event {
            IbcEvent::OpenConfirmConnection(e) => Some(e.clone()),
            _ => None,
        }) else {
            panic!("unexpected event")
        };
    }

    /// The next unused connection identifier of `ctx`.
    pub fn next_connection_id(ctx: &MockContext) -> ConnectionId {
        let count = ctx
            .ibc_store()
            .connection_ends()
            .expect("no error")
            .len();
        ConnectionId::new(count as u64)
    }

    /// The next unused channel identifier of `ctx`.
    pub fn next_channel_id(ctx: &MockContext) -> ChannelId {
        let count = ctx.ibc_store().channel_ends().expect("no error").len();
        ChannelId::new(count as u64)
    }

    /// A connection is created by `A` towards `B` using the connection
    /// handshake, keeping both clients up to date along the way.
    /// Returns the connection identifiers of `A` and `B`.
    pub fn create_connection_on_a(
        ctx_a: &mut MockContext,
        ctx_b: &mut MockContext,
        client_id_on_a: ClientId,
        client_id_on_b: ClientId,
    ) -> (ConnectionId, ConnectionId) {
        let conn_id_on_a = Self::next_connection_id(ctx_a);
        let conn_id_on_b = Self::next_connection_id(ctx_b);

        Self::connection_open_init_on_a(
            ctx_a,
            ctx_b,
            conn_id_on_a.clone(),
            client_id_on_a.clone(),
            client_id_on_b.clone(),
        );

        Self::sync_client_on_a(ctx_b, ctx_a, &client_id_on_b);

        Self::connection_open_try_on_b(
            ctx_b,
            ctx_a,
            conn_id_on_a.clone(),
            conn_id_on_b.clone(),
            client_id_on_a.clone(),
            client_id_on_b.clone(),
        );

        Self::sync_client_on_a(ctx_a, ctx_b, &client_id_on_a);

        Self::connection_open_ack_on_a(
            ctx_a,
            ctx_b,
            conn_id_on_a.clone(),
            conn_id_on_b.clone(),
            client_id_on_b.clone(),
        );

        Self::sync_client_on_a(ctx_b, ctx_a, &client_id_on_b);

        Self::connection_open_confirm_on_b(ctx_b, ctx_a, conn_id_on_a.clone(), conn_id_on_b.clone());

        Self::sync_client_on_a(ctx_a, ctx_b, &client_id_on_a);

        (conn_id_on_a, conn_id_on_b)
    }

    /// `A` initiates a channel on `port_id_on_a` towards `port_id_on_b`.
    pub fn channel_open_init_on_a(
        ctx_a: &mut MockContext,
        conn_id_on_a: ConnectionId,
        port_id_on_a: PortId,
        chan_id_on_a: ChannelId,
        port_id_on_b: PortId,
        ordering: Order,
    ) {
        let msg_for_a = MsgEnvelope::Channel(ChannelMsg::OpenInit(MsgChannelOpenInit {
            port_id_on_a,
            chan_id_on_a,
            connection_hops_on_a: vec![conn_id_on_a],
            port_id_on_b,
            ordering,
            signer: dummy_account_id(),
            version_proposal: ChannelVersion::empty(),
        }));

        ctx_a.deliver(msg_for_a).expect("success");

        let Some(_) = last_event(ctx_a, |event| match event {
            IbcEvent::OpenInitChannel(e) => Some(e.clone()),
            _ => None,
        }) else {
            panic!("unexpected event")
        };
    }

    fn channel_end(ctx: &MockContext, port_id: &PortId, chan_id: &ChannelId) -> ChannelEnd {
        ctx.ibc_store()
            .channel_end(&ChannelEndPath::new(port_id, chan_id))
            .expect("channel end exists")
    }

    /// A `ChanOpenTry` for `B`, proving `A`'s channel end.
    pub fn msg_channel_open_try(
        ctx_a: &MockContext,
        conn_id_on_b: ConnectionId,
        port_id_on_a: PortId,
        chan_id_on_a: ChannelId,
        port_id_on_b: PortId,
        chan_id_on_b: ChannelId,
    ) -> MsgEnvelope {
        let proof_height_on_a = ctx_a.latest_height();
        let chan_end_on_a = Self::channel_end(ctx_a, &port_id_on_a, &chan_id_on_a);

        MsgEnvelope::Channel(ChannelMsg::OpenTry(MsgChannelOpenTry {
            port_id_on_b,
            chan_id_on_b,
            connection_hops_on_b: vec![conn_id_on_b],
            proof_chan_end_on_a: proof_at(
                ctx_a,
                proof_height_on_a,
                ChannelEndPath::new(&port_id_on_a, &chan_id_on_a),
            ),
            port_id_on_a,
            chan_id_on_a,
            version_supported_on_a: chan_end_on_a.version().clone(),
            version_proposal: chan_end_on_a.version().clone(),
            proof_height_on_a,
            ordering: chan_end_on_a.ordering,
            signer: dummy_account_id(),
        }))
    }

    /// `B` receives the channel opening attempt by `A`.
    pub fn channel_open_try_on_b(
        ctx_b: &mut MockContext,
        ctx_a: &MockContext,
        conn_id_on_b: ConnectionId,
        port_id_on_a: PortId,
        chan_id_on_a: ChannelId,
        port_id_on_b: PortId,
        chan_id_on_b: ChannelId,
    ) {
        let msg_for_b = Self::msg_channel_open_try(
            ctx_a,
            conn_id_on_b,
            port_id_on_a,
            chan_id_on_a,
            port_id_on_b,
            chan_id_on_b,
        );

        ctx_b.deliver(msg_for_b).expect("success");

        let Some(_) = last_event(ctx_b, |event| match event {
            IbcEvent::OpenTryChannel(e) => Some(e.clone()),
            _ => None,
        }) else {
            panic!("unexpected event")
        };
    }

    /// A `ChanOpenAck` for `A`, proving `B`'s channel end.
    pub fn msg_channel_open_ack(
        ctx_b: &MockContext,
        port_id_on_a: PortId,
        chan_id_on_a: ChannelId,
        port_id_on_b: PortId,
        chan_id_on_b: ChannelId,
    ) -> MsgEnvelope {
        let proof_height_on_b = ctx_b.latest_height();
        let chan_end_on_b = Self::channel_end(ctx_b, &port_id_on_b, &chan_id_on_b);

        MsgEnvelope::Channel(ChannelMsg::OpenAck(MsgChannelOpenAck {
            port_id_on_a,
            chan_id_on_a,
            version_on_b: chan_end_on_b.version().clone(),
            proof_chan_end_on_b: proof_at(
                ctx_b,
                proof_height_on_b,
                ChannelEndPath::new(&port_id_on_b, &chan_id_on_b),
            ),
            chan_id_on_b,
            proof_height_on_b,
            signer: dummy_account_id(),
        }))
    }

    /// `A` receives `B`'s acknowledgement of the channel opening attempt.
    pub fn channel_open_ack_on_a(
        ctx_a: &mut MockContext,
        ctx_b: &MockContext,
        port_id_on_a: PortId,
        chan_id_on_a: ChannelId,
        port_id_on_b: PortId,
        chan_id_on_b: ChannelId,
    ) {
        let msg_for_a =
            Self::msg_channel_open_ack(ctx_b, port_id_on_a, chan_id_on_a, port_id_on_b, chan_id_on_b);

        ctx_a.deliver(msg_for_a).expect("success");

        let Some(_) = last_event(ctx_a, |event| match event {
            IbcEvent::OpenAckChannel(e) => Some(e.clone()),
            _ => None,
        }) else {
            panic!("unexpected event")
        };
    }

    /// A `ChanOpenConfirm` for `B`, proving that `A`'s channel is open.
    pub fn msg_channel_open_confirm(
        ctx_a: &MockContext,
        port_id_on_a: PortId,
        chan_id_on_a: ChannelId,
        port_id_on_b: PortId,
        chan_id_on_b: ChannelId,
    ) -> MsgEnvelope {
        let proof_height_on_a = ctx_a.latest_height();

        MsgEnvelope::Channel(ChannelMsg::OpenConfirm(MsgChannelOpenConfirm {
            port_id_on_b,
            chan_id_on_b,
            proof_chan_end_on_a: proof_at(
                ctx_a,
                proof_height_on_a,
                ChannelEndPath::new(&port_id_on_a, &chan_id_on_a),
            ),
            proof_height_on_a,
            signer: dummy_account_id(),
        }))
    }

    /// `B` receives the confirmation from `A` that the channel is open.
    pub fn channel_open_confirm_on_b(
        ctx_b: &mut MockContext,
        ctx_a: &MockContext,
        port_id_on_a: PortId,
        chan_id_on_a: ChannelId,
        port_id_on_b: PortId,
        chan_id_on_b: ChannelId,
    ) {
        let msg_for_b = Self::msg_channel_open_confirm(
            ctx_a,
            port_id_on_a,
            chan_id_on_a,
            port_id_on_b,
            chan_id_on_b,
        );

        ctx_b.deliver(msg_for_b).expect("success");

        let Some(_) = last_event(ctx_b, |event| match event {
            IbcEvent::OpenConfirmChannel(e) => Some(e.clone()),
            _ => None,
        }) else {
            panic!("unexpected event")
        };
    }

    /// `A` starts closing the channel.
    pub fn channel_close_init_on_a(
        ctx_a: &mut MockContext,
        port_id_on_a: PortId,
        chan_id_on_a: ChannelId,
    ) {
        let msg_for_a = MsgEnvelope::Channel(ChannelMsg::CloseInit(MsgChannelCloseInit {
            port_id_on_a,
            chan_id_on_a,
            signer: dummy_account_id(),
        }));

        ctx_a.deliver(msg_for_a).expect("success");

        let Some(_) = last_event(ctx_a, |event| match event {
            IbcEvent::CloseInitChannel(e) => Some(e.clone()),
            _ => None,
        }) else {
            panic!("unexpected event")
        };
    }

    /// A `ChanCloseConfirm` for `B`, proving that `A`'s channel is closed.
    pub fn msg_channel_close_confirm(
        ctx_a: &MockContext,
        port_id_on_a: PortId,
        chan_id_on_a: ChannelId,
        port_id_on_b: PortId,
        chan_id_on_b: ChannelId,
    ) -> MsgEnvelope {
        let proof_height_on_a = ctx_a.latest_height();

        MsgEnvelope::Channel(ChannelMsg::CloseConfirm(MsgChannelCloseConfirm {
            port_id_on_b,
            chan_id_on_b,
            proof_chan_end_on_a: proof_at(
                ctx_a,
                proof_height_on_a,
                ChannelEndPath::new(&port_id_on_a, &chan_id_on_a),
            ),
            proof_height_on_a,
            signer: dummy_account_id(),
        }))
    }

    /// `B` closes its end after `A` closed its own.
    pub fn channel_close_confirm_on_b(
        ctx_b: &mut MockContext,
        ctx_a: &MockContext,
        port_id_on_a: PortId,
        chan_id_on_a: ChannelId,
        port_id_on_b: PortId,
        chan_id_on_b: ChannelId,
    ) {
        let msg_for_b = Self::msg_channel_close_confirm(
            ctx_a,
            port_id_on_a,
            chan_id_on_a,
            port_id_on_b,
            chan_id_on_b,
        );

        ctx_b.deliver(msg_for_b).expect("success");

        let Some(_) = last_event(ctx_b, |event| match event {
            IbcEvent::CloseConfirmChannel(e) => Some(e.clone()),
            _ => None,
        }) else {
            panic!("unexpected event")
        };
    }

    /// A channel is created by `A` towards `B` between the ports
    /// `port_id_on_a` and `port_id_on_b` using the channel handshake.
    /// Returns the channel identifiers of `A` and `B`.
    #[allow(clippy::too_many_arguments)]
    pub fn create_channel_on_a(
        ctx_a: &mut MockContext,
        ctx_b: &mut MockContext,
        client_id_on_a: ClientId,
        conn_id_on_a: ConnectionId,
        port_id_on_a: PortId,
        client_id_on_b: ClientId,
        conn_id_on_b: ConnectionId,
        port_id_on_b: PortId,
        ordering: Order,
    ) -> (ChannelId, ChannelId) {
        let chan_id_on_a = Self::next_channel_id(ctx_a);
        let chan_id_on_b = Self::next_channel_id(ctx_b);

        Self::channel_open_init_on_a(
            ctx_a,
            conn_id_on_a,
            port_id_on_a.clone(),
            chan_id_on_a.clone(),
            port_id_on_b.clone(),
            ordering,
        );

        Self::sync_client_on_a(ctx_b, ctx_a, &client_id_on_b);

        Self::channel_open_try_on_b(
            ctx_b,
            ctx_a,
            conn_id_on_b,
            port_id_on_a.clone(),
            chan_id_on_a.clone(),
            port_id_on_b.clone(),
            chan_id_on_b.clone(),
        );

        Self::sync_client_on_a(ctx_a, ctx_b, &client_id_on_a);

        Self::channel_open_ack_on_a(
            ctx_a,
            ctx_b,
            port_id_on_a.clone(),
            chan_id_on_a.clone(),
            port_id_on_b.clone(),
            chan_id_on_b.clone(),
        );

        Self::sync_client_on_a(ctx_b, ctx_a, &client_id_on_b);

        Self::channel_open_confirm_on_b(
            ctx_b,
            ctx_a,
            port_id_on_a,
            chan_id_on_a.clone(),
            port_id_on_b,
            chan_id_on_b.clone(),
        );

        Self::sync_client_on_a(ctx_a, ctx_b, &client_id_on_a);

        (chan_id_on_a, chan_id_on_b)
    }

    /// A channel is closed by `A` towards `B` using the channel closing
    /// handshake.
    pub fn close_channel_on_a(
        ctx_a: &mut MockContext,
        ctx_b: &mut MockContext,
        client_id_on_a: ClientId,
        port_id_on_a: PortId,
        chan_id_on_a: ChannelId,
        client_id_on_b: ClientId,
        port_id_on_b: PortId,
        chan_id_on_b: ChannelId,
    ) {
        Self::channel_close_init_on_a(ctx_a, port_id_on_a.clone(), chan_id_on_a.clone());

        Self::sync_client_on_a(ctx_b, ctx_a, &client_id_on_b);

        Self::channel_close_confirm_on_b(
            ctx_b,
            ctx_a,
            port_id_on_a,
            chan_id_on_a,
            port_id_on_b,
            chan_id_on_b,
        );

        Self::sync_client_on_a(ctx_a, ctx_b, &client_id_on_a);
    }

    /// A `RecvPacket` for `B`, proving the commitment of `packet` on `A`.
    pub fn msg_recv_packet(ctx_a: &MockContext, packet: Packet) -> MsgEnvelope {
        let proof_height_on_a = ctx_a.latest_height();

        let proof_commitment_on_a = proof_at(
            ctx_a,
            proof_height_on_a,
            CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a),
        );

        MsgEnvelope::Packet(PacketMsg::Recv(MsgRecvPacket {
            packet,
            proof_commitment_on_a,
            proof_height_on_a,
            signer: dummy_account_id(),
        }))
    }

    /// `B` receives a packet sent on `A`.
    /// Returns the acknowledgement `B` wrote right away, if any.
    pub fn packet_recv_on_b(
        ctx_b: &mut MockContext,
        ctx_a: &MockContext,
        packet: Packet,
    ) -> Option<Acknowledgement> {
        let events_before = ctx_b.ibc_store().events.lock().len();

        ctx_b
            .deliver(Self::msg_recv_packet(ctx_a, packet))
            .expect("success");

        let new_events: Vec<IbcEvent> = ctx_b.ibc_store().events.lock()[events_before..].to_vec();

        assert!(
            new_events
                .iter()
                .any(|event| matches!(event, IbcEvent::ReceivePacket(_))),
            "unexpected event"
        );

        new_events.iter().find_map(|event| match event {
            IbcEvent::WriteAcknowledgement(e) => Some(e.acknowledgement().clone()),
            _ => None,
        })
    }

    /// An `Acknowledgement` for `A`, proving that `B` stored the commitment
    /// of `acknowledgement`.
    pub fn msg_acknowledgement(
        ctx_b: &MockContext,
        packet: Packet,
        acknowledgement: Acknowledgement,
    ) -> MsgEnvelope {
        let proof_height_on_b = ctx_b.latest_height();

        let proof_acked_on_b = proof_at(
            ctx_b,
            proof_height_on_b,
            AckPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a),
        );

        MsgEnvelope::Packet(PacketMsg::Ack(MsgAcknowledgement {
            packet,
            acknowledgement,
            proof_acked_on_b,
            proof_height_on_b,
            signer: dummy_account_id(),
        }))
    }

    /// `A` receives the acknowledgement `B` wrote for `packet`.
    pub fn packet_ack_on_a(
        ctx_a: &mut MockContext,
        ctx_b: &MockContext,
        packet: Packet,
        acknowledgement: Acknowledgement,
    ) {
        ctx_a
            .deliver(Self::msg_acknowledgement(ctx_b, packet, acknowledgement))
            .expect("success");

        let Some(_) = last_event(ctx_a, |event| match event {
            IbcEvent::AcknowledgePacket(e) => Some(e.clone()),
            _ => None,
        }) else {
            panic!("unexpected event")
        };
    }

    /// What `B` proves to show it never received `packet`: its next receive
    /// sequence on ordered channels, the absence of a receipt otherwise.
    fn unreceived_proof(
        ctx_b: &MockContext,
        packet: &Packet,
        proof_height_on_b: Height,
    ) -> (Sequence, CommitmentProofBytes) {
        let chan_end_on_b = Self::channel_end(ctx_b, &packet.port_id_on_b, &packet.chan_id_on_b);
        let seq_recv_path_on_b = SeqRecvPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);
        let next_seq_recv_on_b = ctx_b
            .ibc_store()
            .get_next_sequence_recv(&seq_recv_path_on_b)
            .unwrap_or_else(|_| Sequence::from(1));

        let proof_unreceived_on_b = match chan_end_on_b.ordering {
            Order::Ordered => proof_at(ctx_b, proof_height_on_b, seq_recv_path_on_b),
            Order::Unordered => proof_at(
                ctx_b,
                proof_height_on_b,
                ReceiptPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a),
            ),
        };

        (next_seq_recv_on_b, proof_unreceived_on_b)
    }

    /// A `Timeout` for `A`, proving that `B` has not received `packet`.
    pub fn msg_timeout(ctx_b: &MockContext, packet: Packet) -> MsgEnvelope {
        let proof_height_on_b = ctx_b.latest_height();
        let (next_seq_recv_on_b, proof_unreceived_on_b) =
            Self::unreceived_proof(ctx_b, &packet, proof_height_on_b);

        MsgEnvelope::Packet(PacketMsg::Timeout(MsgTimeout {
            packet,
            next_seq_recv_on_b,
            proof_unreceived_on_b,
            proof_height_on_b,
            signer: dummy_account_id(),
        }))
    }

    /// `A` learns that `packet` timed out on `B`.
    pub fn packet_timeout_on_a(ctx_a: &mut MockContext, ctx_b: &MockContext, packet: Packet) {
        ctx_a
            .deliver(Self::msg_timeout(ctx_b, packet))
            .expect("success");

        let Some(_) = last_event(ctx_a, |event| match event {
            IbcEvent::TimeoutPacket(e) => Some(e.clone()),
            _ => None,
        }) else {
            panic!("unexpected event")
        };
    }

    /// A `TimeoutOnClose` for `A`, proving that `B` has not received
    /// `packet` and that `B`'s channel is closed.
    pub fn msg_timeout_on_close(ctx_b: &MockContext, packet: Packet) -> MsgEnvelope {
        let proof_height_on_b = ctx_b.latest_height();
        let (next_seq_recv_on_b, proof_unreceived_on_b) =
            Self::unreceived_proof(ctx_b, &packet, proof_height_on_b);

        let proof_close_on_b = proof_at(
            ctx_b,
            proof_height_on_b,
            ChannelEndPath::new(&packet.port_id_on_b, &packet.chan_id_on_b),
        );

        MsgEnvelope::Packet(PacketMsg::TimeoutOnClose(MsgTimeoutOnClose {
            packet,
            next_seq_recv_on_b,
            proof_unreceived_on_b,
            proof_close_on_b,
            proof_height_on_b,
            signer: dummy_account_id(),
        }))
    }

    /// `A` learns that `packet` will never be received because `B` closed
    /// the channel.
    pub fn packet_timeout_on_close_on_a(
        ctx_a: &mut MockContext,
        ctx_b: &MockContext,
        packet: Packet,
    ) {
        ctx_a
            .deliver(Self::msg_timeout_on_close(ctx_b, packet))
            .expect("success");

        let Some(_) = last_event(ctx_a, |event| match event {
            IbcEvent::TimeoutPacket(e) => Some(e.clone()),
            _ => None,
        }) else {
            panic!("unexpected event")
        };
    }
}
