mod packet;

use ibc_core::channel::types::channel::{ChannelEnd, Counterparty, Order, State};
use ibc_core::channel::types::Version;
use ibc_core::host::types::identifiers::{ChannelId, ConnectionId};
use ibc_core::primitives::prelude::*;
pub use packet::*;

use crate::testapp::ibc::applications::mock::MockModule;

/// Returns a dummy `ChannelEnd` on `connection-0`, whose counterparty is the
/// mock port on `remote_channel_id`, for testing purposes only!
pub fn dummy_channel_end(
    state: State,
    ordering: Order,
    remote_channel_id: Option<ChannelId>,
) -> ChannelEnd {
    ChannelEnd::new(
        state,
        ordering,
        Counterparty::new(MockModule::port_id(), remote_channel_id),
        vec![ConnectionId::zero()],
        MockModule::version(),
    )
    .expect("Never fails")
}

/// Same as `dummy_channel_end`, with an empty version as proposed by
/// `ChanOpenInit`.
pub fn dummy_channel_end_with_empty_version(state: State, ordering: Order) -> ChannelEnd {
    ChannelEnd {
        version: Version::empty(),
        ..dummy_channel_end(state, ordering, None)
    }
}
