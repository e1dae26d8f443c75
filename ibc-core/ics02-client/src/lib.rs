//! ICS-02: the client registry. Creates light clients and feeds them headers,
//! and re-exports the client context traits and domain types.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

#[cfg(feature = "std")]
extern crate std;

pub mod handler;

/// Re-exports the ICS-02 traits every light client implements.
pub mod context {
    #[doc(inline)]
    pub use ibc_core_client_context::*;
}

/// Re-exports ICS-02 data structures from the `ibc-core-client-types` crate.
pub mod types {
    #[doc(inline)]
    pub use ibc_core_client_types::*;
}
