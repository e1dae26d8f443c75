use core::fmt::Debug;
use core::time::Duration;

use ibc_core::client::types::Height;
use ibc_core::commitment_types::commitment::CommitmentPrefix;
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Timestamp;
use ibc_testkit_store::context::ProvableStore;
use typed_builder::TypedBuilder;

use crate::context::MockGenericContext;
use crate::hosts::MockHost;
use crate::testapp::ibc::applications::mock::MockModule;
use crate::testapp::ibc::core::router::MockRouter;
use crate::testapp::ibc::core::types::{
    MockIbcStore, DEFAULT_BLOCK_TIME_SECS, DEFAULT_COMMITMENT_PREFIX,
};
use crate::utils::year_2023;

/// Configuration of a mock chain, for testing purposes only!
///
/// The chain is built with one block per height up to `latest_height`,
/// the first of them at `genesis_timestamp`.
#[derive(Debug, TypedBuilder)]
#[builder(build_method(into))]
pub struct MockContextConfig {
    #[builder(default = Height::new(5).expect("Never fails"))]
    latest_height: Height,

    #[builder(default = Duration::from_secs(DEFAULT_BLOCK_TIME_SECS))]
    block_time: Duration,

    #[builder(default = year_2023())]
    genesis_timestamp: Timestamp,

    #[builder(default = CommitmentPrefix::try_from(DEFAULT_COMMITMENT_PREFIX.as_bytes().to_vec()).expect("Never fails"))]
    commitment_prefix: CommitmentPrefix,

    /// The application bound to the mock port.
    #[builder(default)]
    module: MockModule,
}

impl<S> From<MockContextConfig> for MockGenericContext<S>
where
    S: ProvableStore + Debug + Default,
{
    fn from(params: MockContextConfig) -> Self {
        let host = MockHost::builder()
            .block_time(params.block_time)
            .genesis_timestamp(params.genesis_timestamp)
            .build();

        let mut context = Self {
            main_store: S::default(),
            host,
            ibc_store: MockIbcStore::new(S::default(), params.commitment_prefix),
            ibc_router: MockRouter::new_with_mock(params.module),
        };

        // store is at height 0; no block

        context.advance_block();

        // store is at height 1; one block

        context.advance_block_up_to(params.latest_height)
    }
}
