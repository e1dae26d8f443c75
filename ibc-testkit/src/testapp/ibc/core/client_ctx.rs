use core::fmt::Debug;

use ibc_core::client::context::{
    ClientExecutionContext, ClientValidationContext, ExtClientValidationContext,
};
use ibc_core::client::types::error::ClientError;
use ibc_core::client::types::Height;
use ibc_core::handler::types::error::ContextError;
use ibc_core::host::types::error::HostError;
use ibc_core::host::types::identifiers::ClientId;
use ibc_core::host::types::path::{ClientConsensusStatePath, ClientStatePath};
use ibc_core::host::ValidationContext;
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Timestamp;
use ibc_testkit_store::context::ProvableStore;
use ibc_testkit_store::types::Height as StoreHeight;

use crate::testapp::ibc::clients::{AnyClientState, AnyConsensusState};
use crate::testapp::ibc::core::types::MockIbcStore;

impl<S> ClientValidationContext for MockIbcStore<S>
where
    S: ProvableStore + Debug,
{
    type ClientStateRef = AnyClientState;
    type ConsensusStateRef = AnyConsensusState;

    fn client_state(&self, client_id: &ClientId) -> Result<Self::ClientStateRef, ContextError> {
        Ok(self
            .client_state_at(client_id)
            .ok_or(ClientError::ClientStateNotFound {
                client_id: client_id.clone(),
            })?)
    }

    fn consensus_state(
        &self,
        client_cons_state_path: &ClientConsensusStatePath,
    ) -> Result<AnyConsensusState, ContextError> {
        let height = Height::new(client_cons_state_path.height)?;

        Ok(self
            .consensus_state_store
            .get(StoreHeight::Pending, client_cons_state_path)
            .ok_or(ClientError::ConsensusStateNotFound {
                client_id: client_cons_state_path.client_id.clone(),
                height,
            })?)
    }
}

impl<S> ExtClientValidationContext for MockIbcStore<S>
where
    S: ProvableStore + Debug,
{
    fn host_timestamp(&self) -> Result<Timestamp, ContextError> {
        ValidationContext::host_timestamp(self)
    }

    fn host_height(&self) -> Result<Height, ContextError> {
        ValidationContext::host_height(self)
    }

    fn consensus_state_heights(&self, client_id: &ClientId) -> Result<Vec<Height>, ContextError> {
        Ok(self.consensus_heights(client_id))
    }
}

impl<S> ClientExecutionContext for MockIbcStore<S>
where
    S: ProvableStore + Debug,
{
    type ClientStateMut = AnyClientState;

    fn store_client_state(
        &mut self,
        client_state_path: ClientStatePath,
        client_state: Self::ClientStateRef,
    ) -> Result<(), ContextError> {
        self.client_state_store
            .set(client_state_path.clone(), client_state)
            .map_err(|e| HostError::failed_to_store(format!("{client_state_path}: {e:?}")))?;

        Ok(())
    }

    fn store_consensus_state(
        &mut self,
        consensus_state_path: ClientConsensusStatePath,
        consensus_state: Self::ConsensusStateRef,
    ) -> Result<(), ContextError> {
        self.consensus_state_store
            .set(consensus_state_path.clone(), consensus_state)
            .map_err(|e| HostError::failed_to_store(format!("{consensus_state_path}: {e:?}")))?;

        Ok(())
    }
}
