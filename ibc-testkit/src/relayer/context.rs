use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::channel::types::channel::{ChannelEnd, Order};
use ibc_core::channel::types::packet::Packet;
use ibc_core::host::types::identifiers::{ChannelId, ClientId, ConnectionId, PortId};
use ibc_core::host::types::path::ChannelEndPath;
use ibc_core::host::ValidationContext;

use crate::context::MockContext;
use crate::relayer::utils::RelayerOps;

/// Two mock chains, `A` and `B`, and a relayer between them.
#[derive(Debug)]
pub struct RelayerContext {
    ctx_a: MockContext,
    ctx_b: MockContext,
}

impl RelayerContext {
    pub fn new(ctx_a: MockContext, ctx_b: MockContext) -> Self {
        Self { ctx_a, ctx_b }
    }

    pub fn get_ctx_a(&self) -> &MockContext {
        &self.ctx_a
    }

    pub fn get_ctx_b(&self) -> &MockContext {
        &self.ctx_b
    }

    pub fn get_ctx_a_mut(&mut self) -> &mut MockContext {
        &mut self.ctx_a
    }

    pub fn get_ctx_b_mut(&mut self) -> &mut MockContext {
        &mut self.ctx_b
    }

    pub fn into_contexts(self) -> (MockContext, MockContext) {
        (self.ctx_a, self.ctx_b)
    }

    pub fn create_client_on_a(&mut self) -> ClientId {
        RelayerOps::create_client_on_a(&mut self.ctx_a, &self.ctx_b)
    }

    pub fn create_client_on_b(&mut self) -> ClientId {
        RelayerOps::create_client_on_a(&mut self.ctx_b, &self.ctx_a)
    }

    /// Brings the client of `B` on `A` to the latest height of `B`.
    pub fn sync_client_on_a(&mut self, client_id_on_a: &ClientId) {
        RelayerOps::sync_client_on_a(&mut self.ctx_a, &self.ctx_b, client_id_on_a)
    }

    /// Brings the client of `A` on `B` to the latest height of `A`.
    pub fn sync_client_on_b(&mut self, client_id_on_b: &ClientId) {
        RelayerOps::sync_client_on_a(&mut self.ctx_b, &self.ctx_a, client_id_on_b)
    }

    pub fn create_connection_on_a(
        &mut self,
        client_id_on_a: ClientId,
        client_id_on_b: ClientId,
    ) -> (ConnectionId, ConnectionId) {
        RelayerOps::create_connection_on_a(
            &mut self.ctx_a,
            &mut self.ctx_b,
            client_id_on_a,
            client_id_on_b,
        )
    }

    pub fn create_connection_on_b(
        &mut self,
        client_id_on_b: ClientId,
        client_id_on_a: ClientId,
    ) -> (ConnectionId, ConnectionId) {
        RelayerOps::create_connection_on_a(
            &mut self.ctx_b,
            &mut self.ctx_a,
            client_id_on_b,
            client_id_on_a,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_channel_on_a(
        &mut self,
        client_id_on_a: ClientId,
        conn_id_on_a: ConnectionId,
        port_id_on_a: PortId,
        client_id_on_b: ClientId,
        conn_id_on_b: ConnectionId,
        port_id_on_b: PortId,
        ordering: Order,
    ) -> (ChannelId, ChannelId) {
        RelayerOps::create_channel_on_a(
            &mut self.ctx_a,
            &mut self.ctx_b,
            client_id_on_a,
            conn_id_on_a,
            port_id_on_a,
            client_id_on_b,
            conn_id_on_b,
            port_id_on_b,
            ordering,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn close_channel_on_a(
        &mut self,
        client_id_on_a: ClientId,
        port_id_on_a: PortId,
        chan_id_on_a: ChannelId,
        client_id_on_b: ClientId,
        port_id_on_b: PortId,
        chan_id_on_b: ChannelId,
    ) {
        RelayerOps::close_channel_on_a(
            &mut self.ctx_a,
            &mut self.ctx_b,
            client_id_on_a,
            port_id_on_a,
            chan_id_on_a,
            client_id_on_b,
            port_id_on_b,
            chan_id_on_b,
        )
    }

    /// The application on `A` sends `packet`, and the client of `A` on `B`
    /// is brought up to date so that `B` can verify it.
    pub fn send_packet_on_a(&mut self, client_id_on_b: &ClientId, packet: Packet) {
        self.ctx_a.send_packet(packet).expect("success");
        self.sync_client_on_b(client_id_on_b);
    }

    /// `B` receives `packet` and, when it acknowledges it right away, `A`
    /// processes the acknowledgement. Returns that acknowledgement.
    pub fn relay_packet_to_b(
        &mut self,
        client_id_on_a: &ClientId,
        client_id_on_b: &ClientId,
        packet: Packet,
    ) -> Option<Acknowledgement> {
        self.sync_client_on_b(client_id_on_b);

        let acknowledgement =
            RelayerOps::packet_recv_on_b(&mut self.ctx_b, &self.ctx_a, packet.clone());

        if let Some(acknowledgement) = &acknowledgement {
            self.ack_packet_on_a(client_id_on_a, packet, acknowledgement.clone());
        }

        acknowledgement
    }

    /// Sends `packet` from `A` and relays it to `B` and back.
    pub fn send_packet_on_a_and_relay(
        &mut self,
        client_id_on_a: &ClientId,
        client_id_on_b: &ClientId,
        packet: Packet,
    ) -> Option<Acknowledgement> {
        self.send_packet_on_a(client_id_on_b, packet.clone());
        self.relay_packet_to_b(client_id_on_a, client_id_on_b, packet)
    }

    /// `A` processes the acknowledgement `B` wrote for `packet`.
    pub fn ack_packet_on_a(
        &mut self,
        client_id_on_a: &ClientId,
        packet: Packet,
        acknowledgement: Acknowledgement,
    ) {
        self.sync_client_on_a(client_id_on_a);
        RelayerOps::packet_ack_on_a(&mut self.ctx_a, &self.ctx_b, packet, acknowledgement);
    }

    /// `A` times `packet` out with a proof that `B` never received it.
    pub fn timeout_packet_on_a(&mut self, client_id_on_a: &ClientId, packet: Packet) {
        self.sync_client_on_a(client_id_on_a);
        RelayerOps::packet_timeout_on_a(&mut self.ctx_a, &self.ctx_b, packet);
    }

    /// `A` times `packet` out because `B` closed the channel first.
    pub fn timeout_packet_on_close_on_a(&mut self, client_id_on_a: &ClientId, packet: Packet) {
        self.sync_client_on_a(client_id_on_a);
        RelayerOps::packet_timeout_on_close_on_a(&mut self.ctx_a, &self.ctx_b, packet);
    }

    pub fn channel_end_on_a(&self, port_id: &PortId, chan_id: &ChannelId) -> ChannelEnd {
        self.ctx_a
            .ibc_store()
            .channel_end(&ChannelEndPath::new(port_id, chan_id))
            .expect("channel end exists")
    }

    pub fn channel_end_on_b(&self, port_id: &PortId, chan_id: &ChannelId) -> ChannelEnd {
        self.ctx_b
            .ibc_store()
            .channel_end(&ChannelEndPath::new(port_id, chan_id))
            .expect("channel end exists")
    }
}
