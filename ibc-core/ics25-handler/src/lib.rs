//! Exposes IBC handler entry points for an integrated IBC core modules. These
//! entry points are responsible for processing incoming IBC messages,
//! performing validation, and execution logics by invoking the appropriate
//! module handler.
//!
//! When processing a given message `M`, if any method in this library returns
//! an error, the runtime is expected to rollback all state modifications made
//! to the context (e.g. [`ExecutionContext`](ibc_core_host::ExecutionContext))
//! while processing `M`. For [`entrypoint::deliver_tx`] the whole transaction
//! is rolled back.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod entrypoint;
mod pre_pass;

/// Re-export IBC handler types from `ibc-core-handler-types` crate.
pub mod types {
    #[doc(inline)]
    pub use ibc_core_handler_types::*;
}
