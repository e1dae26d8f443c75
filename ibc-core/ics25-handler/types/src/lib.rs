//! Types shared by the IBC handler entry points: the message envelope, the
//! events emitted while handling messages and the top-level error.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod events;
pub mod msgs;
