use ibc_core::channel::types::channel::Order;
use ibc_core::channel::types::packet::Packet;
use ibc_core::channel::types::timeout::TimeoutHeight;
use ibc_core::client::types::Height;
use ibc_core::host::types::error::ErrorKind;
use ibc_core::host::types::identifiers::{ChannelId, ClientId, ConnectionId, Sequence};
use ibc_testkit::context::MockContext;
use ibc_testkit::fixtures::core::channel::PacketConfig;
use ibc_testkit::fixtures::core::context::MockContextConfig;
use ibc_testkit::relayer::context::RelayerContext;
use ibc_testkit::relayer::error::RelayerError;
use ibc_testkit::testapp::ibc::applications::mock::{AckMode, MockModule};

pub mod ics02_client;
pub mod ics04_channel;
pub mod invariants;
pub mod query;
pub mod router;
pub mod scenarios;

/// Two mock chains with clients of each other, an open connection and an
/// open channel between their mock ports.
pub struct LinkedChains {
    pub relayer: RelayerContext,
    pub module_a: MockModule,
    pub module_b: MockModule,
    pub client_id_on_a: ClientId,
    pub client_id_on_b: ClientId,
    pub conn_id_on_a: ConnectionId,
    pub conn_id_on_b: ConnectionId,
    pub chan_id_on_a: ChannelId,
    pub chan_id_on_b: ChannelId,
}

impl LinkedChains {
    pub fn new(ordering: Order, ack_mode_on_b: AckMode) -> Self {
        let module_a = MockModule::default();
        let module_b = MockModule::new(ack_mode_on_b);

        let ctx_a: MockContext = MockContextConfig::builder()
            .module(module_a.clone())
            .build();
        let ctx_b: MockContext = MockContextConfig::builder()
            .module(module_b.clone())
            .build();

        let mut relayer = RelayerContext::new(ctx_a, ctx_b);

        let client_id_on_a = relayer.create_client_on_a();
        let client_id_on_b = relayer.create_client_on_b();

        let (conn_id_on_a, conn_id_on_b) =
            relayer.create_connection_on_a(client_id_on_a.clone(), client_id_on_b.clone());

        let (chan_id_on_a, chan_id_on_b) = relayer.create_channel_on_a(
            client_id_on_a.clone(),
            conn_id_on_a.clone(),
            MockModule::port_id(),
            client_id_on_b.clone(),
            conn_id_on_b.clone(),
            MockModule::port_id(),
            ordering,
        );

        Self {
            relayer,
            module_a,
            module_b,
            client_id_on_a,
            client_id_on_b,
            conn_id_on_a,
            conn_id_on_b,
            chan_id_on_a,
            chan_id_on_b,
        }
    }

    /// A packet from `A` to `B` on the channel, timing out at
    /// `timeout_height` on `B`.
    pub fn packet_to_b(&self, seq: u64, data: &[u8], timeout_height: Height) -> Packet {
        PacketConfig::builder()
            .seq_on_a(Sequence::from(seq))
            .chan_id_on_a(self.chan_id_on_a.clone())
            .chan_id_on_b(self.chan_id_on_b.clone())
            .data(data.to_vec())
            .timeout_height_on_b(TimeoutHeight::At(timeout_height))
            .build()
    }

    /// A packet from `B` to `A` on the channel, with a distant timeout.
    pub fn packet_to_a(&self, seq: u64, data: &[u8]) -> Packet {
        PacketConfig::builder()
            .seq_on_a(Sequence::from(seq))
            .chan_id_on_a(self.chan_id_on_b.clone())
            .chan_id_on_b(self.chan_id_on_a.clone())
            .data(data.to_vec())
            .timeout_height_on_b(TimeoutHeight::At(
                self.relayer.get_ctx_a().latest_height().add(100),
            ))
            .build()
    }

    /// A height of `B` far enough that packets do not time out in a test.
    pub fn far_height_on_b(&self) -> Height {
        self.relayer.get_ctx_b().latest_height().add(100)
    }
}

/// The kind of the error a failed transaction was rejected with.
pub fn error_kind(res: Result<(), RelayerError>) -> ErrorKind {
    match res {
        Err(RelayerError::TransactionFailed(e)) => e.kind(),
        Err(e) => panic!("not a transaction failure: {e}"),
        Ok(()) => panic!("the transaction was expected to fail"),
    }
}
