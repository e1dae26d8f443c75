//! Connects application modules to the IBC core: the [`Router`](router::Router)
//! resolves the module bound to a port and the [`Module`](module::Module)
//! trait lists the callbacks the core invokes on it.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod module;
pub mod router;

/// Re-exports router data structures from the `ibc-core-router-types` crate
pub mod types {
    #[doc(inline)]
    pub use ibc_core_router_types::*;
}
