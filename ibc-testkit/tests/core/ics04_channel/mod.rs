pub mod acknowledgement;
pub mod chan_open_ack;
pub mod chan_open_confirm;
pub mod chan_open_init;
pub mod recv_packet;
pub mod send_packet;
pub mod timeout;
pub mod timeout_on_close;

use ibc_core::channel::types::channel::{ChannelEnd, Order};
use ibc_core::entrypoint::validate;
use ibc_core::handler::types::msgs::MsgEnvelope;
use ibc_core::host::types::error::ErrorKind;
use ibc_core::host::types::identifiers::{ChannelId, ClientId, ConnectionId, PortId};
use ibc_testkit::context::MockContext;
use ibc_testkit::relayer::context::RelayerContext;
use ibc_testkit::relayer::utils::RelayerOps;
use ibc_testkit::testapp::ibc::applications::mock::MockModule;

/// Two chains with an open connection, taken through the channel handshake
/// between their mock ports one step at a time.
pub struct ChannelHandshake {
    pub relayer: RelayerContext,
    pub client_id_on_a: ClientId,
    pub client_id_on_b: ClientId,
    pub conn_id_on_a: ConnectionId,
    pub conn_id_on_b: ConnectionId,
    pub chan_id_on_a: ChannelId,
    pub chan_id_on_b: ChannelId,
    pub ordering: Order,
}

impl ChannelHandshake {
    pub fn new(ordering: Order) -> Self {
        let mut relayer = RelayerContext::new(MockContext::default(), MockContext::default());

        let client_id_on_a = relayer.create_client_on_a();
        let client_id_on_b = relayer.create_client_on_b();

        let (conn_id_on_a, conn_id_on_b) =
            relayer.create_connection_on_a(client_id_on_a.clone(), client_id_on_b.clone());

        Self {
            relayer,
            client_id_on_a,
            client_id_on_b,
            conn_id_on_a,
            conn_id_on_b,
            chan_id_on_a: ChannelId::zero(),
            chan_id_on_b: ChannelId::zero(),
            ordering,
        }
    }

    pub fn port_id() -> PortId {
        MockModule::port_id()
    }

    pub fn init_on_a(mut self) -> Self {
        RelayerOps::channel_open_init_on_a(
            self.relayer.get_ctx_a_mut(),
            self.conn_id_on_a.clone(),
            Self::port_id(),
            self.chan_id_on_a.clone(),
            Self::port_id(),
            self.ordering,
        );
        self
    }

    pub fn try_on_b(mut self) -> Self {
        self.relayer.sync_client_on_b(&self.client_id_on_b);

        let msg = self.msg_chan_open_try();
        self.relayer
            .get_ctx_b_mut()
            .deliver(msg)
            .expect("success");
        self
    }

    pub fn ack_on_a(mut self) -> Self {
        self.relayer.sync_client_on_a(&self.client_id_on_a);

        let msg = self.msg_chan_open_ack();
        self.relayer
            .get_ctx_a_mut()
            .deliver(msg)
            .expect("success");
        self
    }

    pub fn confirm_on_b(mut self) -> Self {
        self.relayer.sync_client_on_b(&self.client_id_on_b);

        let msg = self.msg_chan_open_confirm();
        self.relayer
            .get_ctx_b_mut()
            .deliver(msg)
            .expect("success");
        self
    }

    pub fn msg_chan_open_try(&self) -> MsgEnvelope {
        RelayerOps::msg_channel_open_try(
            self.relayer.get_ctx_a(),
            self.conn_id_on_b.clone(),
            Self::port_id(),
            self.chan_id_on_a.clone(),
            Self::port_id(),
            self.chan_id_on_b.clone(),
        )
    }

    pub fn msg_chan_open_ack(&self) -> MsgEnvelope {
        RelayerOps::msg_channel_open_ack(
            self.relayer.get_ctx_b(),
            Self::port_id(),
            self.chan_id_on_a.clone(),
            Self::port_id(),
            self.chan_id_on_b.clone(),
        )
    }

    pub fn msg_chan_open_confirm(&self) -> MsgEnvelope {
        RelayerOps::msg_channel_open_confirm(
            self.relayer.get_ctx_a(),
            Self::port_id(),
            self.chan_id_on_a.clone(),
            Self::port_id(),
            self.chan_id_on_b.clone(),
        )
    }

    pub fn chan_end_on_a(&self) -> ChannelEnd {
        self.relayer
            .channel_end_on_a(&Self::port_id(), &self.chan_id_on_a)
    }

    pub fn chan_end_on_b(&self) -> ChannelEnd {
        self.relayer
            .channel_end_on_b(&Self::port_id(), &self.chan_id_on_b)
    }
}

/// The kind of the error `ctx` rejects `msg` with, without applying it.
pub fn validate_kind(ctx: &MockContext, msg: MsgEnvelope) -> ErrorKind {
    validate(ctx.ibc_store(), &ctx.ibc_router, msg)
        .expect_err("validation fails")
        .kind()
}
