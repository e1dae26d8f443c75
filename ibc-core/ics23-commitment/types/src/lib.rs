//! ICS-23: Commitment defines the roots, prefixes and proofs a light client
//! uses to check counterparty state against a verified commitment root.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod commitment;
pub mod error;
pub mod merkle;
pub mod specs;

#[cfg(feature = "serde")]
pub mod serializer;

/// Re-exports ICS-23 proto types from the `ibc-proto` crate, which are
/// used in the implementation of dependent IBC crates.
pub mod proto {
    pub use ibc_proto::ibc::core::commitment::*;
    pub use ibc_proto::ics23;
}
