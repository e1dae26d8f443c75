use core::str::FromStr;
use core::time::Duration;

use ibc_core::client::context::client_state::{
    ClientStateCommon, ClientStateExecution, ClientStateValidation,
};
use ibc_core::client::context::prelude::*;
use ibc_core::client::types::error::ClientError;
use ibc_core::client::types::{Height, Status};
use ibc_core::commitment_types::commitment::{
    CommitmentPrefix, CommitmentProofBytes, CommitmentRoot,
};
use ibc_core::commitment_types::merkle::{apply_prefix, MerkleProof};
use ibc_core::commitment_types::specs::ProofSpecs;
use ibc_core::host::types::error::DecodingError;
use ibc_core::host::types::identifiers::{ClientId, ClientType};
use ibc_core::host::types::path::{ClientConsensusStatePath, ClientStatePath, Path};
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::proto::{Any, Protobuf};
use ics23::HostFunctionsManager;

use crate::testapp::ibc::clients::mock::consensus_state::MockConsensusState;
use crate::testapp::ibc::clients::mock::header::MockHeader;
use crate::testapp::ibc::clients::mock::proto::ClientState as RawMockClientState;

pub const MOCK_CLIENT_STATE_TYPE_URL: &str = "/ibc.mock.ClientState";
pub const MOCK_CLIENT_TYPE: &str = "9999-mock";

pub fn client_type() -> ClientType {
    ClientType::from_str(MOCK_CLIENT_TYPE).expect("never fails because it's valid")
}

/// A light client that trusts every header it is given but checks
/// membership proofs for real against the header roots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockClientState {
    pub header: MockHeader,
    pub trusting_period: Duration,
    pub frozen: bool,
}

impl MockClientState {
    /// Initializes a new active `MockClientState` with the given
    /// `MockHeader` and a trusting period of a day.
    pub fn new(header: MockHeader) -> Self {
        Self {
            header,
            trusting_period: Duration::from_secs(24 * 60 * 60),
            frozen: false,
        }
    }

    pub fn latest_height(&self) -> Height {
        self.header.height()
    }

    pub fn with_trusting_period(self, trusting_period: Duration) -> Self {
        Self {
            trusting_period,
            ..self
        }
    }

    pub fn frozen(self) -> Self {
        Self {
            frozen: true,
            ..self
        }
    }

    pub fn unfrozen(self) -> Self {
        Self {
            frozen: false,
            ..self
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn merkle_proof(proof: &CommitmentProofBytes) -> Result<MerkleProof, ClientError> {
        Ok(MerkleProof::try_from(proof)?)
    }
}

impl Protobuf<RawMockClientState> for MockClientState {}

impl TryFrom<RawMockClientState> for MockClientState {
    type Error = ClientError;

    fn try_from(raw: RawMockClientState) -> Result<Self, Self::Error> {
        let header = raw
            .header
            .ok_or(DecodingError::missing_field("header"))?
            .try_into()?;

        Ok(Self {
            header,
            trusting_period: Duration::from_nanos(raw.trusting_period),
            frozen: raw.frozen,
        })
    }
}

impl From<MockClientState> for RawMockClientState {
    fn from(value: MockClientState) -> Self {
        Self {
            header: Some(value.header.into()),
            trusting_period: value
                .trusting_period
                .as_nanos()
                .try_into()
                .unwrap_or(u64::MAX),
            frozen: value.frozen,
        }
    }
}

impl Protobuf<Any> for MockClientState {}

impl TryFrom<Any> for MockClientState {
    type Error = ClientError;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        match raw.type_url.as_str() {
            MOCK_CLIENT_STATE_TYPE_URL => Protobuf::<RawMockClientState>::decode_vec(&raw.value)
                .map_err(|e| ClientError::InvalidClientState {
                    description: e.to_string(),
                }),
            _ => Err(ClientError::UnknownClientStateType(raw.type_url)),
        }
    }
}

impl From<MockClientState> for Any {
    fn from(client_state: MockClientState) -> Self {
        Self {
            type_url: MOCK_CLIENT_STATE_TYPE_URL.to_string(),
            value: Protobuf::<RawMockClientState>::encode_vec(client_state),
        }
    }
}

impl ClientStateCommon for MockClientState {
    fn verify_consensus_state(&self, consensus_state: Any) -> Result<(), ClientError> {
        let _ = MockConsensusState::try_from(consensus_state)?;

        Ok(())
    }

    fn client_type(&self) -> ClientType {
        client_type()
    }

    fn latest_height(&self) -> Height {
        self.header.height()
    }

    fn validate_proof_height(&self, proof_height: Height) -> Result<(), ClientError> {
        let latest_height = self.latest_height();

        if latest_height < proof_height {
            return Err(ClientError::InvalidProofHeight {
                actual: proof_height,
                latest: latest_height,
            });
        }

        Ok(())
    }

    fn verify_membership(
        &self,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProofBytes,
        root: &CommitmentRoot,
        path: Path,
        value: Vec<u8>,
    ) -> Result<(), ClientError> {
        let merkle_path = apply_prefix(prefix, vec![path.to_string()]);

        Self::merkle_proof(proof)?.verify_membership::<HostFunctionsManager>(
            &ProofSpecs::ibc_store(),
            root.clone().into(),
            merkle_path,
            value,
            0,
        )?;

        Ok(())
    }

    fn verify_non_membership(
        &self,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProofBytes,
        root: &CommitmentRoot,
        path: Path,
    ) -> Result<(), ClientError> {
        let merkle_path = apply_prefix(prefix, vec![path.to_string()]);

        Self::merkle_proof(proof)?.verify_non_membership::<HostFunctionsManager>(
            &ProofSpecs::ibc_store(),
            root.clone().into(),
            merkle_path,
        )?;

        Ok(())
    }
}

impl<V> ClientStateValidation<V> for MockClientState
where
    V: ExtClientValidationContext,
{
    fn verify_client_message(
        &self,
        _ctx: &V,
        _client_id: &ClientId,
        client_message: Any,
    ) -> Result<(), ClientError> {
        let header = MockHeader::try_from(client_message)?;

        if header.root.is_empty() {
            return Err(ClientError::InvalidHeader {
                description: format!("header at {} carries no commitment root", header.height),
            });
        }

        Ok(())
    }

    fn status(&self, ctx: &V, _client_id: &ClientId) -> Result<Status, ClientError> {
        if self.is_frozen() {
            return Ok(Status::Frozen);
        }

        let now = ctx.host_timestamp()?;
        let elapsed = now
            .duration_since(&self.header.timestamp)
            .unwrap_or_default();

        if elapsed > self.trusting_period {
            return Ok(Status::Expired);
        }

        Ok(Status::Active)
    }
}

impl<E> ClientStateExecution<E> for MockClientState
where
    E: ClientExecutionContext + ExtClientValidationContext,
    E::ClientStateRef: From<MockClientState>,
    E::ConsensusStateRef: From<MockConsensusState>,
{
    fn initialise(
        &self,
        ctx: &mut E,
        client_id: &ClientId,
        consensus_state: Any,
    ) -> Result<(), ClientError> {
        let mock_consensus_state = MockConsensusState::try_from(consensus_state)?;

        ctx.store_client_state(ClientStatePath::new(client_id.clone()), self.clone().into())?;
        ctx.store_consensus_state(
            ClientConsensusStatePath::new(client_id.clone(), self.latest_height().value()),
            mock_consensus_state.into(),
        )?;

        Ok(())
    }

    fn update_state(
        &self,
        ctx: &mut E,
        client_id: &ClientId,
        header: Any,
    ) -> Result<Vec<Height>, ClientError> {
        let header = MockHeader::try_from(header)?;
        let header_height = header.height;

        if header_height > self.latest_height() {
            let new_client_state = Self {
                header: header.clone(),
                ..self.clone()
            };
            ctx.store_client_state(
                ClientStatePath::new(client_id.clone()),
                new_client_state.into(),
            )?;
        }

        ctx.store_consensus_state(
            ClientConsensusStatePath::new(client_id.clone(), header_height.value()),
            MockConsensusState::new(header).into(),
        )?;

        Ok(vec![header_height])
    }
}
