use core::fmt::Debug;

use ibc_core::client::types::msgs::{MsgCreateClient, MsgUpdateClient};
use ibc_core::host::types::identifiers::ClientId;
use ibc_core::primitives::prelude::*;
use ibc_testkit_store::context::ProvableStore;

use crate::context::MockGenericContext;
use crate::fixtures::core::signer::dummy_account_id;
use crate::testapp::ibc::clients::mock::client_state::client_type;
use crate::testapp::ibc::clients::mock::header::MockHeader;

/// The identifier of the `counter`-th mock client of a chain.
pub fn mock_client_id(counter: u64) -> ClientId {
    client_type().build_client_id(counter)
}

/// Returns a `MsgCreateClient` for a mock client of `counterparty` at its
/// latest height, for testing purposes only!
pub fn dummy_msg_create_client<S>(counterparty: &MockGenericContext<S>) -> MsgCreateClient
where
    S: ProvableStore + Debug,
{
    let (client_state, consensus_state) = counterparty.generate_light_client();

    MsgCreateClient::new(
        client_state.into(),
        consensus_state.into(),
        dummy_account_id(),
    )
}

/// Returns a `MsgUpdateClient` moving `client_id` to `header`, for testing
/// purposes only!
pub fn dummy_msg_update_client(client_id: ClientId, header: MockHeader) -> MsgUpdateClient {
    MsgUpdateClient {
        client_id,
        client_message: header.into(),
        signer: dummy_account_id(),
    }
}
