//! The host-facing side of the IBC core: [`ValidationContext`] gives the
//! handlers read access to the host's IBC store, [`ExecutionContext`] adds
//! the writes, events and logs.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod context;
pub use context::*;

/// Re-exports data structures of the host crate.
pub mod types {
    #[doc(inline)]
    pub use ibc_core_host_types::*;
}
