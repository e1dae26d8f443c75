use ibc_core::channel::types::packet::Packet;
use ibc_core::channel::types::timeout::{TimeoutHeight, TimeoutTimestamp};
use ibc_core::client::types::Height;
use ibc_core::host::types::identifiers::{ChannelId, PortId, Sequence};
use ibc_core::primitives::prelude::*;
use typed_builder::TypedBuilder;

use crate::testapp::ibc::applications::mock::MockModule;

/// Configuration of the `Packet` type for building dummy packets.
///
/// Both ends default to the mock port on `channel-0`.
#[derive(TypedBuilder, Debug)]
#[builder(build_method(into = Packet))]
pub struct PacketConfig {
    #[builder(default = Sequence::from(1))]
    pub seq_on_a: Sequence,
    #[builder(default = MockModule::port_id())]
    pub port_id_on_a: PortId,
    #[builder(default = ChannelId::zero())]
    pub chan_id_on_a: ChannelId,
    #[builder(default = MockModule::port_id())]
    pub port_id_on_b: PortId,
    #[builder(default = ChannelId::zero())]
    pub chan_id_on_b: ChannelId,
    #[builder(default = b"ping".to_vec())]
    pub data: Vec<u8>,
    #[builder(default = TimeoutHeight::At(Height::new(1_000).expect("Never fails")))]
    pub timeout_height_on_b: TimeoutHeight,
    #[builder(default = TimeoutTimestamp::Never)]
    pub timeout_timestamp_on_b: TimeoutTimestamp,
}

impl From<PacketConfig> for Packet {
    fn from(config: PacketConfig) -> Self {
        Packet {
            seq_on_a: config.seq_on_a,
            port_id_on_a: config.port_id_on_a,
            chan_id_on_a: config.chan_id_on_a,
            port_id_on_b: config.port_id_on_b,
            chan_id_on_b: config.chan_id_on_b,
            data: config.data,
            timeout_height_on_b: config.timeout_height_on_b,
            timeout_timestamp_on_b: config.timeout_timestamp_on_b,
        }
    }
}

/// Returns a dummy packet with sequence `seq` between the mock ports of
/// `channel-0` on both chains, for testing purposes only!
pub fn dummy_packet(seq: Sequence) -> Packet {
    PacketConfig::builder().seq_on_a(seq).build()
}
