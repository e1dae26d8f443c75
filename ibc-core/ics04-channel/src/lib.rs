//! The ICS-04 channel handlers: the four-step channel handshake, channel
//! closing and the packet lifecycle from send to acknowledgement or timeout.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod context;
pub mod handler;

/// Re-exports ICS-04 data structures from the `ibc-core-channel-types` crate
pub mod types {
    #[doc(inline)]
    pub use ibc_core_channel_types::*;
}
