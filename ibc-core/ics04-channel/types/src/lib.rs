//! Channel ends, packets, timeouts, commitments and the channel/packet
//! messages and events.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod channel;
pub mod error;
pub mod events;
pub mod msgs;
pub mod packet;
pub mod timeout;

pub mod acknowledgement;
pub mod commitment;
mod version;
pub use version::Version;

/// Re-exports ICS-04 proto types from the `ibc-proto` crate
pub mod proto {
    pub use ibc_proto::ibc::core::channel::*;
}
