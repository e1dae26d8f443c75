use core::time::Duration;

use ibc_core::client::types::Height;
use ibc_core::commitment_types::commitment::CommitmentRoot;
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Timestamp;
use typed_builder::TypedBuilder;

use crate::testapp::ibc::clients::mock::client_state::MockClientState;
use crate::testapp::ibc::clients::mock::consensus_state::MockConsensusState;
use crate::testapp::ibc::clients::mock::header::MockHeader;
use crate::testapp::ibc::core::types::DEFAULT_BLOCK_TIME_SECS;
use crate::utils::year_2023;

/// The block history of a mock chain. Block `n` sits at index `n - 1` and
/// carries the application hash committed at height `n`.
#[derive(TypedBuilder, Clone, Debug)]
pub struct MockHost {
    #[builder(default = Duration::from_secs(DEFAULT_BLOCK_TIME_SECS))]
    pub block_time: Duration,
    /// Timestamp of the block at height 1.
    #[builder(default = year_2023())]
    pub genesis_timestamp: Timestamp,
    #[builder(default)]
    pub history: Vec<MockHeader>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl MockHost {
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn latest_block(&self) -> MockHeader {
        self.history.last().cloned().expect("at least one block")
    }

    pub fn latest_height(&self) -> Height {
        self.latest_block().height()
    }

    pub fn get_block(&self, target_height: &Height) -> Option<MockHeader> {
        let index = usize::try_from(target_height.value().checked_sub(1)?).ok()?;
        self.history.get(index).cloned()
    }

    /// Appends the next block, committing to `app_hash`. Each block comes
    /// `block_time` after the previous one.
    pub fn advance_block(&mut self, app_hash: Vec<u8>) {
        let (height, timestamp) = match self.history.last() {
            None => (Height::min(), self.genesis_timestamp),
            Some(latest_block) => (
                latest_block.height().increment(),
                (latest_block.timestamp + self.block_time).expect("Never fails"),
            ),
        };

        self.history.push(
            MockHeader::new(height)
                .with_timestamp(timestamp)
                .with_root(CommitmentRoot::from(app_hash)),
        );
    }

    /// A client of this chain trusting the block at `latest_height`.
    pub fn generate_client_state(&self, latest_height: &Height) -> MockClientState {
        MockClientState::new(self.get_block(latest_height).expect("height exists"))
    }

    pub fn consensus_state_at(&self, height: &Height) -> Option<MockConsensusState> {
        self.get_block(height).map(MockConsensusState::new)
    }

    /// Checks that the history holds one block per height, in order.
    pub fn validate(&self) -> Result<(), String> {
        for (index, block) in self.history.iter().enumerate() {
            if block.height().value() != index as u64 + 1 {
                return Err(format!("block at index {index} has height {}", block.height()));
            }
        }
        Ok(())
    }
}
