//! ICS-24: Host defines the identifiers, store paths and error taxonomy that a
//! state machine hosting an IBC-enabled chain shares with the IBC core.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod identifiers;
pub mod path;
pub(crate) mod validate;
