pub mod mock;

use derive_more::From;
use ibc_core::client::context::client_state::{
    ClientStateCommon, ClientStateExecution, ClientStateValidation,
};
use ibc_core::client::context::consensus_state::ConsensusState;
use ibc_core::client::context::{ClientExecutionContext, ClientValidationContext};
use ibc_core::client::types::error::ClientError;
use ibc_core::client::types::{Height, Status};
use ibc_core::commitment_types::commitment::{
    CommitmentPrefix, CommitmentProofBytes, CommitmentRoot,
};
use ibc_core::host::types::identifiers::{ClientId, ClientType};
use ibc_core::host::types::path::Path;
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::proto::{Any, Protobuf};
use ibc_core::primitives::Timestamp;

use crate::testapp::ibc::clients::mock::client_state::{
    MockClientState, MOCK_CLIENT_STATE_TYPE_URL,
};
use crate::testapp::ibc::clients::mock::consensus_state::{
    MockConsensusState, MOCK_CONSENSUS_STATE_TYPE_URL,
};

/// Every client state the mock host can store.
#[derive(Debug, Clone, From, PartialEq)]
pub enum AnyClientState {
    Mock(MockClientState),
}

impl AnyClientState {
    pub fn latest_height(&self) -> Height {
        match self {
            Self::Mock(cs) => cs.latest_height(),
        }
    }

    pub fn is_frozen(&self) -> bool {
        match self {
            Self::Mock(cs) => cs.is_frozen(),
        }
    }
}

impl Protobuf<Any> for AnyClientState {}

impl TryFrom<Any> for AnyClientState {
    type Error = ClientError;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        match raw.type_url.as_str() {
            MOCK_CLIENT_STATE_TYPE_URL => MockClientState::try_from(raw).map(Into::into),
            _ => Err(ClientError::UnknownClientStateType(raw.type_url)),
        }
    }
}

impl From<AnyClientState> for Any {
    fn from(host_client_state: AnyClientState) -> Self {
        match host_client_state {
            AnyClientState::Mock(cs) => cs.into(),
        }
    }
}

impl ClientStateCommon for AnyClientState {
    fn verify_consensus_state(&self, consensus_state: Any) -> Result<(), ClientError> {
        match self {
            Self::Mock(cs) => cs.verify_consensus_state(consensus_state),
        }
    }

    fn client_type(&self) -> ClientType {
        match self {
            Self::Mock(cs) => cs.client_type(),
        }
    }

    fn latest_height(&self) -> Height {
        match self {
            Self::Mock(cs) => ClientStateCommon::latest_height(cs),
        }
    }

    fn validate_proof_height(&self, proof_height: Height) -> Result<(), ClientError> {
        match self {
            Self::Mock(cs) => cs.validate_proof_height(proof_height),
        }
    }

    fn verify_membership(
        &self,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProofBytes,
        root: &CommitmentRoot,
        path: Path,
        value: Vec<u8>,
    ) -> Result<(), ClientError> {
        match self {
            Self::Mock(cs) => cs.verify_membership(prefix, proof, root, path, value),
        }
    }

    fn verify_non_membership(
        &self,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProofBytes,
        root: &CommitmentRoot,
        path: Path,
    ) -> Result<(), ClientError> {
        match self {
            Self::Mock(cs) => cs.verify_non_membership(prefix, proof, root, path),
        }
    }
}

impl<V> ClientStateValidation<V> for AnyClientState
where
    V: ClientValidationContext,
    MockClientState: ClientStateValidation<V>,
{
    fn verify_client_message(
        &self,
        ctx: &V,
        client_id: &ClientId,
        client_message: Any,
    ) -> Result<(), ClientError> {
        match self {
            Self::Mock(cs) => cs.verify_client_message(ctx, client_id, client_message),
        }
    }

    fn status(&self, ctx: &V, client_id: &ClientId) -> Result<Status, ClientError> {
        match self {
            Self::Mock(cs) => cs.status(ctx, client_id),
        }
    }
}

impl<E> ClientStateExecution<E> for AnyClientState
where
    E: ClientExecutionContext,
    MockClientState: ClientStateExecution<E>,
{
    fn initialise(
        &self,
        ctx: &mut E,
        client_id: &ClientId,
        consensus_state: Any,
    ) -> Result<(), ClientError> {
        match self {
            Self::Mock(cs) => cs.initialise(ctx, client_id, consensus_state),
        }
    }

    fn update_state(
        &self,
        ctx: &mut E,
        client_id: &ClientId,
        header: Any,
    ) -> Result<Vec<Height>, ClientError> {
        match self {
            Self::Mock(cs) => cs.update_state(ctx, client_id, header),
        }
    }
}

/// Every consensus state the mock host can store.
#[derive(Debug, Clone, From, PartialEq, Eq)]
pub enum AnyConsensusState {
    Mock(MockConsensusState),
}

impl Protobuf<Any> for AnyConsensusState {}

impl TryFrom<Any> for AnyConsensusState {
    type Error = ClientError;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        match raw.type_url.as_str() {
            MOCK_CONSENSUS_STATE_TYPE_URL => MockConsensusState::try_from(raw).map(Into::into),
            _ => Err(ClientError::UnknownConsensusStateType(raw.type_url)),
        }
    }
}

impl From<AnyConsensusState> for Any {
    fn from(host_consensus_state: AnyConsensusState) -> Self {
        match host_consensus_state {
            AnyConsensusState::Mock(cs) => cs.into(),
        }
    }
}

impl TryFrom<AnyConsensusState> for MockConsensusState {
    type Error = ClientError;

    fn try_from(value: AnyConsensusState) -> Result<Self, Self::Error> {
        match value {
            AnyConsensusState::Mock(cs) => Ok(cs),
        }
    }
}

impl ConsensusState for AnyConsensusState {
    fn root(&self) -> &CommitmentRoot {
        match self {
            Self::Mock(cs) => cs.root(),
        }
    }

    fn timestamp(&self) -> Timestamp {
        match self {
            Self::Mock(cs) => cs.timestamp(),
        }
    }

    fn encode_vec(self) -> Vec<u8> {
        <Self as Protobuf<Any>>::encode_vec(self)
    }
}
