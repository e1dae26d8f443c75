//! ICS-03: the connection handshake. Handlers for `ConnOpenInit`,
//! `ConnOpenTry`, `ConnOpenAck` and `ConnOpenConfirm`, and re-exports of the
//! connection domain types.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

#[cfg(feature = "std")]
extern crate std;

pub mod handler;

/// Re-exports ICS-03 data structures from the `ibc-core-connection-types` crate
pub mod types {
    #[doc(inline)]
    pub use ibc_core_connection_types::*;
}
